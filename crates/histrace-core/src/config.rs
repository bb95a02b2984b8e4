use crate::Result;
use histrace_types::Dialect;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_WINDOW_SECS: u64 = 5;

/// Which candidate wins when several history entries score the same
/// during trace naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    #[default]
    Latest,
    Earliest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MatchingConfig {
    /// Half-width of the window around the execution start, in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    #[serde(default)]
    pub tie_break: TieBreak,
}

fn default_window_secs() -> u64 {
    DEFAULT_WINDOW_SECS
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_WINDOW_SECS,
            tie_break: TieBreak::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub shell: Option<Dialect>,

    #[serde(default)]
    pub histfile: Option<PathBuf>,

    #[serde(default)]
    pub time_format: Option<String>,

    #[serde(default)]
    pub tmp_dir: Option<PathBuf>,

    #[serde(default)]
    pub matching: MatchingConfig,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
