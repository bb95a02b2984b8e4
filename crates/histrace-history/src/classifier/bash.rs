use super::{CommandLine, Line, LineClassifier, TimestampPosition, ends_with_continuation};
use histrace_types::Dialect;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static TIMESTAMP_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#\s*(\d+)$").unwrap());

/// Plain bash history, optionally with `HISTTIMEFORMAT` marker lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct BashClassifier;

impl LineClassifier for BashClassifier {
    fn dialect(&self) -> Dialect {
        Dialect::Bash
    }

    fn timestamp_position(&self) -> TimestampPosition {
        TimestampPosition::Before
    }

    fn classify<'a>(&self, line: &'a str) -> Line<'a> {
        if let Some(caps) = TIMESTAMP_REGEX.captures(line) {
            return match caps[1].parse::<i64>() {
                Ok(timestamp) => Line::Timestamp(timestamp),
                Err(_) => Line::Noise,
            };
        }

        if line.trim().is_empty() {
            return Line::Noise;
        }

        Line::Command(CommandLine {
            text: Cow::Borrowed(line),
            timestamp: None,
            continues: ends_with_continuation(line),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_marker() {
        assert_eq!(BashClassifier.classify("#1700000000"), Line::Timestamp(1_700_000_000));
        assert_eq!(BashClassifier.classify("# 42"), Line::Timestamp(42));
    }

    #[test]
    fn test_comment_like_command_is_a_command() {
        match BashClassifier.classify("#not a timestamp") {
            Line::Command(cmd) => assert_eq!(cmd.text, "#not a timestamp"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_command_with_continuation() {
        match BashClassifier.classify("docker run \\") {
            Line::Command(cmd) => {
                assert!(cmd.continues);
                assert_eq!(cmd.timestamp, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_blank_line_is_noise() {
        assert_eq!(BashClassifier.classify("   "), Line::Noise);
        assert_eq!(BashClassifier.classify(""), Line::Noise);
    }
}
