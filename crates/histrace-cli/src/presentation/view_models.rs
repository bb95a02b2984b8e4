use histrace_core::Environment;
use histrace_runtime::{Bookmark, GcReport};
use histrace_types::HistoryEntry;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub number: u64,
    pub command: String,
    pub timestamp: Option<i64>,
    pub has_trace: bool,
    pub trace_name: String,
    #[serde(skip)]
    pub time: Option<String>,
}

impl EntryView {
    pub fn new(entry: &HistoryEntry, env: &Environment) -> Self {
        Self {
            number: entry.number(),
            command: entry.command().to_string(),
            timestamp: entry.timestamp(),
            has_trace: entry.has_trace(),
            trace_name: entry.trace_name().to_string(),
            time: entry
                .timestamp()
                .and_then(|timestamp| env.format_timestamp(timestamp)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkView {
    pub name: String,
    pub command: String,
}

impl From<Bookmark> for BookmarkView {
    fn from(bookmark: Bookmark) -> Self {
        Self {
            name: bookmark.name,
            command: bookmark.command,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GcView {
    pub kind: &'static str,
    pub removed: usize,
    pub failed: usize,
}

impl GcView {
    pub fn new(kind: &'static str, report: &GcReport) -> Self {
        Self {
            kind,
            removed: report.removed.len(),
            failed: report.failed,
        }
    }
}
