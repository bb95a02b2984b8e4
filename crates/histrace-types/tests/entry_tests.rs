use histrace_types::*;

#[test]
fn test_entry_trace_name_matches_direct_computation() {
    let entry = HistoryEntry::new(42, "ls -la", 1000);
    assert_eq!(entry.trace_name(), TraceName::compute(1000, "ls -la"));
}

#[test]
fn test_entries_without_timestamp_hash_with_zero() {
    let entry = HistoryEntry::new(1, "pwd", 0);
    assert_eq!(entry.timestamp(), None);
    assert_eq!(entry.trace_name(), TraceName::compute(0, "pwd"));
}

#[test]
fn test_sealed_draft_keeps_fields() {
    let mut draft = EntryDraft::new();
    draft.set_number(7);
    draft.set_timestamp(1_700_000_000);
    draft.push_line("cargo build");
    let entry = draft.seal();

    assert_eq!(entry.number(), 7);
    assert_eq!(entry.command(), "cargo build");
    assert_eq!(entry.timestamp(), Some(1_700_000_000));
    assert!(!entry.has_trace());
}

#[test]
fn test_clone_preserves_trace_flag() {
    let entry = HistoryEntry::new(1, "make", 5);
    entry.mark_has_trace();
    let copy = entry.clone();
    assert!(copy.has_trace());
    assert_eq!(copy, entry);
}
