use super::{CommandLine, Line, LineClassifier, TimestampPosition};
use histrace_types::Dialect;
use std::borrow::Cow;

const CMD_PREFIX: &str = "- cmd: ";
const WHEN_PREFIX: &str = "when: ";

/// fish's YAML-like history: `- cmd: ...` followed by an indented `when: ...`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FishClassifier;

impl LineClassifier for FishClassifier {
    fn dialect(&self) -> Dialect {
        Dialect::Fish
    }

    fn timestamp_position(&self) -> TimestampPosition {
        TimestampPosition::After
    }

    fn classify<'a>(&self, line: &'a str) -> Line<'a> {
        if let Some(command) = line.strip_prefix(CMD_PREFIX) {
            return Line::Command(CommandLine {
                text: unescape(command),
                timestamp: None,
                continues: false,
            });
        }

        if let Some(value) = line.trim_start().strip_prefix(WHEN_PREFIX)
            && let Ok(timestamp) = value.trim().parse::<i64>()
        {
            return Line::Timestamp(timestamp);
        }

        Line::Noise
    }
}

/// fish writes newlines as `\n` and backslashes as `\\`.
fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('\\') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_and_when_lines() {
        match FishClassifier.classify("- cmd: cargo test") {
            Line::Command(cmd) => {
                assert_eq!(cmd.text, "cargo test");
                assert_eq!(cmd.timestamp, None);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(FishClassifier.classify("  when: 1700000000"), Line::Timestamp(1_700_000_000));
    }

    #[test]
    fn test_paths_block_is_noise() {
        assert_eq!(FishClassifier.classify("  paths:"), Line::Noise);
        assert_eq!(FishClassifier.classify("    - /tmp/build"), Line::Noise);
    }

    #[test]
    fn test_escaped_newline_becomes_real_newline() {
        match FishClassifier.classify(r"- cmd: for f in *\n  echo $f\nend") {
            Line::Command(cmd) => {
                assert_eq!(cmd.text, "for f in *\n  echo $f\nend");
                assert!(!cmd.continues);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_escaped_backslash() {
        assert_eq!(unescape(r"echo a\\b"), "echo a\\b");
        assert_eq!(unescape(r"echo \t"), "echo \\t");
    }
}
