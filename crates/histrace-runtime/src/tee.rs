use crate::exec::{ExecOptions, ExitOutcome, Invocation, execute};
use crate::resolver::resolve_trace_name;
use crate::staging::StagingTrace;
use crate::Result;
use chrono::Utc;
use histrace_core::Environment;
use std::io;
use std::path::PathBuf;
use tempfile::TempPath;

/// Where the captured output ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceOutcome {
    /// Renamed to the matching entry's trace name.
    Stored(PathBuf),
    /// Naming failed; the staging file was left in place for manual recovery.
    Kept { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeeOutcome {
    pub status: ExitOutcome,
    pub trace: TraceOutcome,
}

/// Run `invocation` while capturing its output, then store the capture under
/// the trace name of the history entry the shell recorded for it.
pub fn tee(env: &Environment, invocation: &Invocation, options: ExecOptions) -> Result<TeeOutcome> {
    let started_at = Utc::now().timestamp();
    let staging = StagingTrace::create(env.tmp_dir())?;

    let status = execute(invocation, options, Some(staging.tap()))?;
    let staged = staging.finish()?;
    let trace = store(env, &invocation.text(), started_at, staged)?;

    Ok(TeeOutcome { status, trace })
}

fn store(env: &Environment, command: &str, started_at: i64, staged: TempPath) -> Result<TraceOutcome> {
    let name = match resolve_trace_name(env, command, started_at) {
        Ok(name) => name,
        Err(err) => return keep(staged, err.to_string()),
    };

    let target = env.trace_path(&name);
    if let Err(err) = std::fs::create_dir_all(env.traces_dir()) {
        return keep(staged, err.to_string());
    }

    match staged.persist(&target) {
        Ok(()) => {
            tracing::debug!(trace = %target.display(), "trace stored");
            Ok(TraceOutcome::Stored(target))
        }
        Err(err) => keep(err.path, err.error.to_string()),
    }
}

fn keep(staged: TempPath, reason: String) -> Result<TraceOutcome> {
    let path = staged.keep().map_err(io::Error::from)?;
    tracing::warn!(path = %path.display(), reason = %reason, "cannot store trace");
    Ok(TraceOutcome::Kept { path, reason })
}
