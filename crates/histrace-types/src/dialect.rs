use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Shell history file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Bash,
    Zsh,
    Fish,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::Bash, Dialect::Zsh, Dialect::Fish];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Bash => "bash",
            Dialect::Zsh => "zsh",
            Dialect::Fish => "fish",
        }
    }

    /// Resolve a dialect from a shell executable path such as `/usr/bin/zsh`.
    ///
    /// Only the basename is inspected, so `$SHELL` can be passed as-is.
    pub fn from_shell_path(shell: &str) -> Result<Self> {
        let basename = Path::new(shell.trim())
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        basename.parse()
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bash" => Ok(Dialect::Bash),
            "zsh" => Ok(Dialect::Zsh),
            "fish" => Ok(Dialect::Fish),
            other => Err(Error::UnknownDialect(other.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
