use crate::{Error, Result};
use histrace_types::Dialect;
use std::path::{Path, PathBuf};

pub const APP_DIR_ENV: &str = "HISTRACE_DIR";
const DEFAULT_APP_DIR: &str = ".histrace";

/// Resolve the application data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. HISTRACE_DIR environment variable (with tilde expansion)
/// 3. ~/.histrace
pub fn resolve_app_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(APP_DIR_ENV)
        && !env_path.is_empty()
    {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(DEFAULT_APP_DIR));
    }

    Err(Error::Config(
        "Could not determine app directory: no HOME directory found".to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Default history file location of a shell.
///
/// fish keeps its history under the XDG data directory rather than in `$HOME`.
pub fn default_history_file(dialect: Dialect, home: &Path, xdg_data_home: Option<&Path>) -> PathBuf {
    match dialect {
        Dialect::Bash => home.join(".bash_history"),
        Dialect::Zsh => home.join(".zsh_history"),
        Dialect::Fish => xdg_data_home
            .map(Path::to_path_buf)
            .unwrap_or_else(|| home.join(".local").join("share"))
            .join("fish")
            .join("fish_history"),
    }
}
