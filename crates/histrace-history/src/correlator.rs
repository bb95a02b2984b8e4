use crate::keeper::EntrySink;
use histrace_types::{SharedEntry, TraceName};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use std::thread::{self, JoinHandle};
use walkdir::WalkDir;

const CHANNEL_CAPACITY: usize = 1024;

/// Background worker flagging entries whose trace file exists.
///
/// The traces directory is listed once when the worker starts. Entries are
/// then streamed to it through a bounded channel while parsing continues.
/// Flags are only guaranteed to be visible after [`TraceCorrelator::finish`].
pub struct TraceCorrelator {
    sender: SyncSender<SharedEntry>,
    handle: JoinHandle<usize>,
}

impl TraceCorrelator {
    pub fn spawn(traces_dir: PathBuf) -> std::io::Result<Self> {
        let (sender, receiver) = sync_channel(CHANNEL_CAPACITY);
        let handle = thread::Builder::new()
            .name("histrace-correlator".to_string())
            .spawn(move || correlate(&traces_dir, receiver))?;
        Ok(Self { sender, handle })
    }

    pub fn sink(&self) -> &dyn EntrySink {
        &self.sender
    }

    /// Close the channel and wait for the worker. Returns how many entries were flagged.
    pub fn finish(self) -> usize {
        drop(self.sender);
        match self.handle.join() {
            Ok(marked) => marked,
            Err(_) => {
                tracing::warn!("trace correlator panicked, trace marks may be incomplete");
                0
            }
        }
    }
}

fn correlate(traces_dir: &Path, receiver: Receiver<SharedEntry>) -> usize {
    let names = match list_trace_names(traces_dir) {
        Ok(names) => names,
        Err(err) => {
            tracing::warn!(
                dir = %traces_dir.display(),
                error = %err,
                "cannot list traces directory"
            );
            return 0;
        }
    };
    tracing::debug!(count = names.len(), "trace names loaded");

    let mut marked = 0;
    for entry in receiver {
        if names.contains(&entry.trace_name()) {
            entry.mark_has_trace();
            marked += 1;
        }
    }
    marked
}

fn list_trace_names(dir: &Path) -> walkdir::Result<HashSet<TraceName>> {
    let mut names = HashSet::new();
    for item in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let item = item?;
        if !item.file_type().is_file() {
            continue;
        }
        if let Some(name) = item.file_name().to_str().and_then(TraceName::parse) {
            names.insert(name);
        }
    }
    Ok(names)
}
