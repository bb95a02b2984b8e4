use super::{CommandLine, Line, LineClassifier, TimestampPosition, ends_with_continuation};
use histrace_types::Dialect;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static EXTENDED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^: (\d+):(\d+);(.*)$").unwrap());

/// zsh stores bytes >= 0x83 escaped with this marker; the next byte is XORed with 0x20.
const META: u8 = 0x83;

/// zsh `EXTENDED_HISTORY` format: `: <start>:<elapsed>;<command>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZshClassifier;

impl LineClassifier for ZshClassifier {
    fn dialect(&self) -> Dialect {
        Dialect::Zsh
    }

    fn timestamp_position(&self) -> TimestampPosition {
        TimestampPosition::Inline
    }

    fn classify<'a>(&self, line: &'a str) -> Line<'a> {
        let Some(caps) = EXTENDED_REGEX.captures(line) else {
            return Line::Noise;
        };
        let Ok(timestamp) = caps[1].parse::<i64>() else {
            return Line::Noise;
        };
        let Some(command) = caps.get(3) else {
            return Line::Noise;
        };

        let text = command.as_str();
        Line::Command(CommandLine {
            text: Cow::Borrowed(text),
            timestamp: Some(timestamp),
            continues: ends_with_continuation(text),
        })
    }

    fn decode(&self, raw: &[u8]) -> String {
        String::from_utf8_lossy(&unmetafy(raw)).into_owned()
    }
}

fn unmetafy(raw: &[u8]) -> Cow<'_, [u8]> {
    if !raw.contains(&META) {
        return Cow::Borrowed(raw);
    }

    let mut out = Vec::with_capacity(raw.len());
    let mut bytes = raw.iter();
    while let Some(&byte) = bytes.next() {
        if byte == META {
            if let Some(&next) = bytes.next() {
                out.push(next ^ 0x20);
            }
        } else {
            out.push(byte);
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_line() {
        match ZshClassifier.classify(": 1700000000:0;git status") {
            Line::Command(cmd) => {
                assert_eq!(cmd.text, "git status");
                assert_eq!(cmd.timestamp, Some(1_700_000_000));
                assert!(!cmd.continues);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_multi_digit_duration() {
        assert!(matches!(
            ZshClassifier.classify(": 1700000000:125;sleep 125"),
            Line::Command(_)
        ));
    }

    #[test]
    fn test_plain_line_is_noise() {
        assert_eq!(ZshClassifier.classify("git status"), Line::Noise);
        assert_eq!(ZshClassifier.classify(": abc:0;ls"), Line::Noise);
    }

    #[test]
    fn test_unmetafy() {
        // Plain UTF-8 passes through untouched.
        assert_eq!(ZshClassifier.decode(b"echo caf\xc3\xa9"), "echo café");
        assert_eq!(unmetafy(&[b'a', META, 0xa3, b'b']).as_ref(), &[b'a', 0x83, b'b']);
    }

    #[test]
    fn test_decode_is_lossy() {
        assert_eq!(ZshClassifier.decode(b"ls \xff"), "ls \u{fffd}");
    }
}
