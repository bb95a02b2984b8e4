use crate::{Error, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use walkdir::WalkDir;

const SECONDS_IN_DAY: u64 = 60 * 60 * 24;

/// Which files of a flat directory to delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcPolicy {
    /// Delete everything but the N most recently modified files.
    KeepLatest(usize),
    /// Delete files modified more than N days ago.
    OlderThan(u64),
    All,
}

impl GcPolicy {
    fn validate(self) -> Result<Self> {
        match self {
            GcPolicy::KeepLatest(0) | GcPolicy::OlderThan(0) => Err(Error::InvalidInput(
                "garbage collection parameter must be greater than 0".to_string(),
            )),
            policy => Ok(policy),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GcReport {
    pub removed: Vec<PathBuf>,
    pub failed: usize,
}

pub fn collect_garbage(dir: &Path, policy: GcPolicy) -> Result<GcReport> {
    let policy = policy.validate()?;
    let mut files = list_files(dir)?;
    // Newest first.
    files.sort_by(|a, b| b.1.cmp(&a.1));

    let doomed: Vec<PathBuf> = match policy {
        GcPolicy::All => files.into_iter().map(|(path, _)| path).collect(),
        GcPolicy::KeepLatest(keep) => files.into_iter().skip(keep).map(|(path, _)| path).collect(),
        GcPolicy::OlderThan(days) => {
            let age = Duration::from_secs(days.saturating_mul(SECONDS_IN_DAY));
            let cutoff = SystemTime::now().checked_sub(age).unwrap_or(SystemTime::UNIX_EPOCH);
            files
                .into_iter()
                .filter(|(_, modified)| *modified < cutoff)
                .map(|(path, _)| path)
                .collect()
        }
    };

    let mut report = GcReport::default();
    for path in doomed {
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed");
                report.removed.push(path);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot remove file");
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

fn list_files(dir: &Path) -> Result<Vec<(PathBuf, SystemTime)>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for item in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let item = item.map_err(io::Error::from)?;
        if !item.file_type().is_file() {
            continue;
        }
        let modified = item
            .metadata()
            .map_err(io::Error::from)?
            .modified()?;
        files.push((item.into_path(), modified));
    }
    Ok(files)
}
