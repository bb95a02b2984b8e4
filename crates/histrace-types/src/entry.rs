use crate::TraceName;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Entries are shared between the keeper that owns them and the trace correlator
/// which flags them from its worker thread.
pub type SharedEntry = Arc<HistoryEntry>;

/// One logical shell command as recorded in the history file.
///
/// Immutable once committed, except for the trace flag which the correlator
/// flips asynchronously.
#[derive(Debug)]
pub struct HistoryEntry {
    number: u64,
    command: String,
    timestamp: i64,
    has_trace: AtomicBool,
}

impl HistoryEntry {
    pub fn new(number: u64, command: impl Into<String>, timestamp: i64) -> Self {
        Self {
            number,
            command: command.into(),
            timestamp,
            has_trace: AtomicBool::new(false),
        }
    }

    /// 1-based position of the command in the history file.
    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Seconds since epoch, `None` when the history line carried no timestamp.
    pub fn timestamp(&self) -> Option<i64> {
        (self.timestamp != 0).then_some(self.timestamp)
    }

    pub fn has_trace(&self) -> bool {
        self.has_trace.load(Ordering::Acquire)
    }

    pub fn mark_has_trace(&self) {
        self.has_trace.store(true, Ordering::Release);
    }

    pub fn trace_name(&self) -> TraceName {
        TraceName::compute(self.timestamp, &self.command)
    }
}

impl Clone for HistoryEntry {
    fn clone(&self) -> Self {
        Self {
            number: self.number,
            command: self.command.clone(),
            timestamp: self.timestamp,
            has_trace: AtomicBool::new(self.has_trace()),
        }
    }
}

impl PartialEq for HistoryEntry {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
            && self.command == other.command
            && self.timestamp == other.timestamp
            && self.has_trace() == other.has_trace()
    }
}

impl Eq for HistoryEntry {}

/// In-flight entry being filled line by line by the parser.
///
/// Drafts are moved into a keeper on commit, so one draft can never end up
/// holding two logical commands.
#[derive(Debug, Default)]
pub struct EntryDraft {
    number: u64,
    command: String,
    timestamp: i64,
    lines: usize,
}

impl EntryDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_number(&mut self, number: u64) {
        self.number = number;
    }

    pub fn set_timestamp(&mut self, timestamp: i64) {
        self.timestamp = timestamp;
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Append one physical line, joining continuation lines with `\n`.
    pub fn push_line(&mut self, line: &str) {
        if self.lines > 0 {
            self.command.push('\n');
        }
        self.command.push_str(line);
        self.lines += 1;
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// True until the first command line has been pushed.
    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }

    pub fn seal(self) -> SharedEntry {
        Arc::new(HistoryEntry::new(self.number, self.command, self.timestamp))
    }
}
