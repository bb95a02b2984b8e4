//! Dialect-specific grammar of one physical history line.
//!
//! A classifier only looks at a single line. Joining continuation lines,
//! numbering and committing entries is the parser's job.

mod bash;
mod fish;
mod zsh;

pub use bash::BashClassifier;
pub use fish::FishClassifier;
pub use zsh::ZshClassifier;

use histrace_types::Dialect;
use std::borrow::Cow;

/// Where a dialect records the timestamp relative to the command text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampPosition {
    /// A separate marker line precedes the command (bash `#1700000000`).
    Before,
    /// The timestamp is part of the command line itself (zsh extended history).
    Inline,
    /// A later line closes the record (fish `when:`).
    After,
}

/// A line that starts a new logical command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
    pub text: Cow<'a, str>,
    pub timestamp: Option<i64>,
    /// The line ends with an unescaped `\` and following raw lines belong to it.
    pub continues: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Timestamp(i64),
    Command(CommandLine<'a>),
    /// Blank or unparseable; skipped without error.
    Noise,
}

pub trait LineClassifier: Send + Sync {
    fn dialect(&self) -> Dialect;

    fn timestamp_position(&self) -> TimestampPosition;

    fn classify<'a>(&self, line: &'a str) -> Line<'a>;

    /// Turn raw bytes of one line (without the newline) into text.
    /// Invalid UTF-8 is replaced, never an error.
    fn decode(&self, raw: &[u8]) -> String {
        String::from_utf8_lossy(raw).into_owned()
    }
}

pub fn classifier_for(dialect: Dialect) -> Box<dyn LineClassifier> {
    match dialect {
        Dialect::Bash => Box::new(BashClassifier),
        Dialect::Zsh => Box::new(ZshClassifier),
        Dialect::Fish => Box::new(FishClassifier),
    }
}

/// True when `text` ends with an odd number of backslashes.
pub fn ends_with_continuation(text: &str) -> bool {
    let trailing = text.bytes().rev().take_while(|b| *b == b'\\').count();
    trailing % 2 == 1
}
