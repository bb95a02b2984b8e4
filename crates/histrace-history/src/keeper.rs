//! Consumption strategies for parsed entries.
//!
//! A keeper decides what to retain, when the parser may stop reading, and
//! what the final result looks like. The parser itself never buffers.

use crate::{Error, Result};
use histrace_types::{EntryDraft, SharedEntry};
use std::sync::Arc;
use std::sync::mpsc::SyncSender;

/// Receiver of committed entries besides the keeper, usually the trace correlator.
pub trait EntrySink {
    fn accept(&self, entry: &SharedEntry);
}

impl EntrySink for () {
    fn accept(&self, _entry: &SharedEntry) {}
}

impl EntrySink for SyncSender<SharedEntry> {
    fn accept(&self, entry: &SharedEntry) {
        // A gone receiver means correlation was abandoned; parsing goes on.
        let _ = self.send(Arc::clone(entry));
    }
}

pub trait Keeper {
    type Output;

    /// Fresh draft for the first logical command.
    fn init(&mut self) -> EntryDraft {
        EntryDraft::new()
    }

    /// Take ownership of a complete draft and hand back a fresh one.
    fn commit(&mut self, draft: EntryDraft, sink: &dyn EntrySink) -> EntryDraft;

    /// Consulted before every physical line; `false` stops the parser.
    fn keep_going(&self) -> bool {
        true
    }

    fn finish(self) -> Result<Self::Output>;
}

/// Upper bound on up-front allocation. Sizes come from user input and the
/// environment; past this the vector grows on demand.
const MAX_PREALLOCATION: usize = 1 << 16;

/// Retains every committed entry in encounter order.
#[derive(Debug, Default)]
pub struct AllKeeper {
    entries: Vec<SharedEntry>,
}

impl AllKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.min(MAX_PREALLOCATION)),
        }
    }
}

impl Keeper for AllKeeper {
    type Output = Vec<SharedEntry>;

    fn commit(&mut self, draft: EntryDraft, sink: &dyn EntrySink) -> EntryDraft {
        let entry = draft.seal();
        sink.accept(&entry);
        self.entries.push(entry);
        EntryDraft::new()
    }

    fn finish(self) -> Result<Self::Output> {
        Ok(self.entries)
    }
}

/// Retains commits whose 0-based index falls in `[start, finish)` and stops
/// once the window is full.
#[derive(Debug)]
pub struct RangeKeeper {
    start: usize,
    finish: usize,
    index: usize,
    entries: Vec<SharedEntry>,
}

impl RangeKeeper {
    pub fn new(start: usize, finish: usize) -> Self {
        let finish = finish.max(start);
        Self {
            start,
            finish,
            index: 0,
            entries: Vec::with_capacity((finish - start).min(MAX_PREALLOCATION)),
        }
    }
}

impl Keeper for RangeKeeper {
    type Output = Vec<SharedEntry>;

    fn commit(&mut self, draft: EntryDraft, sink: &dyn EntrySink) -> EntryDraft {
        if (self.start..self.finish).contains(&self.index) {
            let entry = draft.seal();
            sink.accept(&entry);
            self.entries.push(entry);
        }
        self.index += 1;
        EntryDraft::new()
    }

    fn keep_going(&self) -> bool {
        self.index < self.finish
    }

    fn finish(self) -> Result<Self::Output> {
        Ok(self.entries)
    }
}

/// Keeps only the most recent commit. Has to read to the end of the file.
#[derive(Debug, Default)]
pub struct LastKeeper {
    last: Option<SharedEntry>,
}

impl LastKeeper {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Keeper for LastKeeper {
    type Output = SharedEntry;

    fn commit(&mut self, draft: EntryDraft, sink: &dyn EntrySink) -> EntryDraft {
        let entry = draft.seal();
        sink.accept(&entry);
        self.last = Some(entry);
        EntryDraft::new()
    }

    fn finish(self) -> Result<Self::Output> {
        self.last
            .ok_or_else(|| Error::NotFound("history is empty".to_string()))
    }
}

/// Picks the Nth commit (1-based) and stops right after it.
#[derive(Debug)]
pub struct PreciseKeeper {
    target: u64,
    committed: u64,
    found: Option<SharedEntry>,
}

impl PreciseKeeper {
    pub fn new(target: u64) -> Self {
        Self {
            target,
            committed: 0,
            found: None,
        }
    }
}

impl Keeper for PreciseKeeper {
    type Output = SharedEntry;

    fn commit(&mut self, draft: EntryDraft, sink: &dyn EntrySink) -> EntryDraft {
        self.committed += 1;
        if self.committed == self.target {
            let entry = draft.seal();
            sink.accept(&entry);
            self.found = Some(entry);
        }
        EntryDraft::new()
    }

    fn keep_going(&self) -> bool {
        self.committed < self.target
    }

    fn finish(self) -> Result<Self::Output> {
        self.found.ok_or_else(|| {
            Error::NotFound(format!("history entry #{} does not exist", self.target))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(number: u64, command: &str) -> EntryDraft {
        let mut draft = EntryDraft::new();
        draft.set_number(number);
        draft.push_line(command);
        draft
    }

    fn feed<K: Keeper>(keeper: &mut K, count: u64) {
        let _ = keeper.init();
        for n in 1..=count {
            if !keeper.keep_going() {
                break;
            }
            keeper.commit(draft(n, &format!("cmd {}", n)), &());
        }
    }

    #[test]
    fn test_all_keeper_keeps_order() {
        let mut keeper = AllKeeper::with_capacity(2);
        feed(&mut keeper, 5);
        let entries = keeper.finish().unwrap();
        let numbers: Vec<u64> = entries.iter().map(|e| e.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_range_keeper_window_and_early_stop() {
        let mut keeper = RangeKeeper::new(2, 5);
        feed(&mut keeper, 10);
        assert!(!keeper.keep_going());
        let entries = keeper.finish().unwrap();
        let numbers: Vec<u64> = entries.iter().map(|e| e.number()).collect();
        assert_eq!(numbers, vec![3, 4, 5]);
    }

    #[test]
    fn test_range_keeper_single_slot() {
        let mut keeper = RangeKeeper::new(4, 5);
        feed(&mut keeper, 10);
        assert_eq!(keeper.finish().unwrap().len(), 1);
    }

    #[test]
    fn test_huge_bounds_do_not_preallocate() {
        let mut keeper = RangeKeeper::new(0, usize::MAX);
        feed(&mut keeper, 3);
        assert!(keeper.keep_going());
        assert_eq!(keeper.finish().unwrap().len(), 3);

        let mut keeper = AllKeeper::with_capacity(usize::MAX);
        feed(&mut keeper, 2);
        assert_eq!(keeper.finish().unwrap().len(), 2);
    }

    #[test]
    fn test_range_keeper_inverted_bounds_is_empty() {
        let keeper = RangeKeeper::new(5, 2);
        assert!(!keeper.keep_going());
        assert!(keeper.finish().unwrap().is_empty());
    }

    #[test]
    fn test_last_keeper() {
        let mut keeper = LastKeeper::new();
        feed(&mut keeper, 3);
        assert_eq!(keeper.finish().unwrap().command(), "cmd 3");
    }

    #[test]
    fn test_last_keeper_empty_is_not_found() {
        assert!(matches!(LastKeeper::new().finish(), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_precise_keeper_stops_after_target() {
        let mut keeper = PreciseKeeper::new(3);
        feed(&mut keeper, 10);
        assert!(!keeper.keep_going());
        assert_eq!(keeper.finish().unwrap().number(), 3);
    }

    #[test]
    fn test_precise_keeper_out_of_range() {
        let mut keeper = PreciseKeeper::new(11);
        feed(&mut keeper, 10);
        assert!(matches!(keeper.finish(), Err(Error::NotFound(_))));
        assert!(matches!(PreciseKeeper::new(0).finish(), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_sync_sender_sink_receives_entries() {
        let (tx, rx) = std::sync::mpsc::sync_channel(8);
        let mut keeper = AllKeeper::new();
        keeper.commit(draft(1, "ls"), &tx);
        drop(tx);
        let received: Vec<SharedEntry> = rx.iter().collect();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].command(), "ls");
    }
}
