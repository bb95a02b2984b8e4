use crate::Result;
use crate::classifier::{Line, LineClassifier, TimestampPosition, ends_with_continuation};
use crate::keeper::{EntrySink, Keeper};
use histrace_types::EntryDraft;
use regex::Regex;
use std::io::BufRead;

/// Streams a history file line by line into a [`Keeper`].
///
/// Entries are numbered by their position in the file. The optional filter
/// is matched against the full command text at commit time; rejected
/// commands still consume a number.
pub struct HistoryParser<'a> {
    classifier: &'a dyn LineClassifier,
    filter: Option<&'a Regex>,
}

impl<'a> HistoryParser<'a> {
    pub fn new(classifier: &'a dyn LineClassifier, filter: Option<&'a Regex>) -> Self {
        Self { classifier, filter }
    }

    pub fn parse<R, K>(&self, mut reader: R, mut keeper: K, sink: &dyn EntrySink) -> Result<K::Output>
    where
        R: BufRead,
        K: Keeper,
    {
        let position = self.classifier.timestamp_position();
        let mut draft = keeper.init();
        let mut number: u64 = 0;
        let mut pending_timestamp: Option<i64> = None;
        let mut continuing = false;
        let mut buf = Vec::new();

        while keeper.keep_going() {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            trim_line_ending(&mut buf);
            let text = self.classifier.decode(&buf);
            tracing::trace!(line = %text, "parse history line");

            if continuing {
                draft.push_line(&text);
                if ends_with_continuation(&text) {
                    continue;
                }
                continuing = false;
                draft = self.commit(&mut keeper, draft, sink);
                continue;
            }

            match self.classifier.classify(&text) {
                Line::Noise => {}
                Line::Timestamp(timestamp) => match position {
                    TimestampPosition::Before => pending_timestamp = Some(timestamp),
                    TimestampPosition::After if !draft.is_empty() => {
                        draft.set_timestamp(timestamp);
                        draft = self.commit(&mut keeper, draft, sink);
                    }
                    _ => {}
                },
                Line::Command(command) => {
                    // A record that never got its closing timestamp line.
                    if !draft.is_empty() {
                        draft = self.commit(&mut keeper, draft, sink);
                        if !keeper.keep_going() {
                            break;
                        }
                    }

                    number += 1;
                    draft.set_number(number);
                    if let Some(timestamp) = command.timestamp.or(pending_timestamp.take()) {
                        draft.set_timestamp(timestamp);
                    }
                    draft.push_line(&command.text);

                    if command.continues {
                        continuing = true;
                    } else if position != TimestampPosition::After {
                        draft = self.commit(&mut keeper, draft, sink);
                    }
                }
            }
        }

        if !draft.is_empty() {
            tracing::debug!(command = %draft.command(), "commit unterminated entry at end of history");
            self.commit(&mut keeper, draft, sink);
        }

        keeper.finish()
    }

    fn commit<K: Keeper>(&self, keeper: &mut K, draft: EntryDraft, sink: &dyn EntrySink) -> EntryDraft {
        if let Some(filter) = self.filter
            && !filter.is_match(draft.command())
        {
            return EntryDraft::new();
        }
        keeper.commit(draft, sink)
    }
}

fn trim_line_ending(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{BashClassifier, FishClassifier, ZshClassifier};
    use crate::keeper::{AllKeeper, PreciseKeeper};
    use histrace_types::SharedEntry;

    fn parse_all(classifier: &dyn LineClassifier, input: &str, filter: Option<&Regex>) -> Vec<SharedEntry> {
        HistoryParser::new(classifier, filter)
            .parse(input.as_bytes(), AllKeeper::new(), &())
            .unwrap()
    }

    #[test]
    fn test_bash_timestamps_attach_to_next_command_only() {
        let entries = parse_all(&BashClassifier, "#1000\nls -la\npwd\n", None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].timestamp(), Some(1000));
        assert_eq!(entries[1].timestamp(), None);
        assert_eq!(entries[1].number(), 2);
    }

    #[test]
    fn test_bash_continuation_joins_lines() {
        let input = "#1000\necho one \\\ntwo \\\nthree\nls\n";
        let entries = parse_all(&BashClassifier, input, None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].command(), "echo one \\\ntwo \\\nthree");
        assert_eq!(entries[0].command().matches('\n').count(), 2);
        assert_eq!(entries[1].number(), 2);
    }

    #[test]
    fn test_filter_keeps_original_numbers() {
        let filter = Regex::new("git").unwrap();
        let input = "ls\ngit status\nmake\ngit log\n";
        let entries = parse_all(&BashClassifier, input, Some(&filter));
        let numbers: Vec<u64> = entries.iter().map(|e| e.number()).collect();
        assert_eq!(numbers, vec![2, 4]);
    }

    #[test]
    fn test_filter_sees_whole_continued_command() {
        let filter = Regex::new("second").unwrap();
        let entries = parse_all(&BashClassifier, "first \\\nsecond\nthird\n", Some(&filter));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].command(), "first \\\nsecond");
    }

    #[test]
    fn test_zsh_skips_noise_lines() {
        let input = ": 1000:0;ls\ngarbage\n: 1001:3;make test\n";
        let entries = parse_all(&ZshClassifier, input, None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].command(), "make test");
        assert_eq!(entries[1].timestamp(), Some(1001));
        assert_eq!(entries[1].number(), 2);
    }

    #[test]
    fn test_fish_commits_on_when() {
        let input = "- cmd: ls\n  when: 1000\n  paths:\n    - /tmp\n- cmd: pwd\n  when: 1001\n";
        let entries = parse_all(&FishClassifier, input, None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].command(), "ls");
        assert_eq!(entries[0].timestamp(), Some(1000));
        assert_eq!(entries[1].timestamp(), Some(1001));
    }

    #[test]
    fn test_fish_record_without_when_is_kept() {
        let input = "- cmd: ls\n- cmd: pwd\n  when: 1001\n- cmd: tail\n";
        let entries = parse_all(&FishClassifier, input, None);
        let commands: Vec<&str> = entries.iter().map(|e| e.command()).collect();
        assert_eq!(commands, vec!["ls", "pwd", "tail"]);
        assert_eq!(entries[0].timestamp(), None);
        assert_eq!(entries[2].number(), 3);
    }

    #[test]
    fn test_unterminated_continuation_at_eof() {
        let entries = parse_all(&BashClassifier, "echo a \\\n", None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].command(), "echo a \\");
    }

    #[test]
    fn test_crlf_line_endings() {
        let entries = parse_all(&BashClassifier, "ls\r\npwd\r\n", None);
        assert_eq!(entries[0].command(), "ls");
        assert_eq!(entries[1].command(), "pwd");
    }

    #[test]
    fn test_precise_keeper_stops_reading() {
        let mut cursor = std::io::Cursor::new("a\nb\nc\nd\ne\n");
        let entry = HistoryParser::new(&BashClassifier, None)
            .parse(&mut cursor, PreciseKeeper::new(2), &())
            .unwrap();
        assert_eq!(entry.command(), "b");
        assert_eq!(cursor.position(), 4);
    }
}
