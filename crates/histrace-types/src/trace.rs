use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{self, Write};

/// Length of a trace name: a 128-bit digest rendered as lowercase hex.
pub const TRACE_NAME_LEN: usize = 32;

/// Content-derived file name of a stored trace.
///
/// Computed from `(timestamp, command)` only, so any entry with the same
/// timestamp and text maps to the same file and existence can be tested by
/// name without an index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceName(String);

impl TraceName {
    pub fn compute(timestamp: i64, command: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(timestamp.to_le_bytes());
        hasher.update(command.as_bytes());
        let digest = hasher.finalize();

        let mut name = String::with_capacity(TRACE_NAME_LEN);
        for byte in &digest[..TRACE_NAME_LEN / 2] {
            let _ = write!(name, "{:02x}", byte);
        }
        Self(name)
    }

    /// Accept a file name found on disk if it has the shape of a trace name.
    pub fn parse(name: &str) -> Option<Self> {
        let valid = name.len() == TRACE_NAME_LEN
            && name
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        valid.then(|| Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TraceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
