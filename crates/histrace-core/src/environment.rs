use crate::config::{CONFIG_FILE, Config, MatchingConfig};
use crate::path::{default_history_file, expand_tilde, resolve_app_dir};
use crate::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, TimeZone};
use histrace_types::{Dialect, TraceName};
use std::fmt::Write;
use std::path::{Path, PathBuf};

pub const TRACES_DIR: &str = "traces";
pub const BOOKMARKS_DIR: &str = "bookmarks";
pub const DEFAULT_HISTORY_CAPACITY: usize = 5000;

/// Values given explicitly on the command line. They win over the config file
/// and the process environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub shell: Option<String>,
    pub histfile: Option<String>,
    pub time_format: Option<String>,
    pub app_dir: Option<String>,
    pub tmp_dir: Option<String>,
}

/// Resolved locations and settings every command works against.
#[derive(Debug, Clone)]
pub struct Environment {
    shell: Option<Dialect>,
    hist_file: Option<PathBuf>,
    time_format: Option<String>,
    app_dir: PathBuf,
    tmp_dir: PathBuf,
    history_capacity: usize,
    matching: MatchingConfig,
}

impl Environment {
    pub fn builder(app_dir: impl Into<PathBuf>) -> EnvironmentBuilder {
        EnvironmentBuilder::new(app_dir)
    }

    /// Resolve the environment: CLI overrides, then `config.toml`, then the
    /// process environment, then built-in defaults.
    pub fn discover(overrides: &Overrides) -> Result<Self> {
        let app_dir = resolve_app_dir(overrides.app_dir.as_deref())?;
        let config = Config::load_from(&app_dir.join(CONFIG_FILE))?;

        let shell = match overrides.shell.as_deref() {
            Some(explicit) => Some(Dialect::from_shell_path(explicit)?),
            None => config.shell.or_else(|| {
                let from_env = std::env::var("SHELL").ok()?;
                match Dialect::from_shell_path(&from_env) {
                    Ok(dialect) => Some(dialect),
                    Err(err) => {
                        tracing::debug!(shell = %from_env, error = %err, "ignore $SHELL");
                        None
                    }
                }
            }),
        };

        let hist_file = overrides
            .histfile
            .as_deref()
            .map(expand_tilde)
            .or(config.histfile)
            .or_else(|| non_empty_var("HISTFILE").map(|p| expand_tilde(&p)))
            .or_else(|| {
                let home = dirs::home_dir()?;
                let xdg = non_empty_var("XDG_DATA_HOME").map(PathBuf::from);
                shell.map(|dialect| default_history_file(dialect, &home, xdg.as_deref()))
            });

        let time_format = overrides
            .time_format
            .clone()
            .or(config.time_format)
            .or_else(|| non_empty_var("HISTTIMEFORMAT"));

        let tmp_dir = overrides
            .tmp_dir
            .as_deref()
            .map(expand_tilde)
            .or(config.tmp_dir)
            .unwrap_or_else(std::env::temp_dir);

        let history_capacity = non_empty_var("HISTFILESIZE")
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_HISTORY_CAPACITY);

        let mut builder = Environment::builder(app_dir)
            .tmp_dir(tmp_dir)
            .history_capacity(history_capacity)
            .matching(config.matching);
        if let Some(shell) = shell {
            builder = builder.shell(shell);
        }
        if let Some(hist_file) = hist_file {
            builder = builder.hist_file(hist_file);
        }
        if let Some(time_format) = time_format {
            builder = builder.time_format(time_format);
        }

        let env = builder.build();
        tracing::debug!(environment = ?env, "environment resolved");
        Ok(env)
    }

    /// Fails when parsing cannot start: no dialect or no history file.
    pub fn ensure_ready(&self) -> Result<()> {
        self.shell()?;
        self.hist_file()?;
        Ok(())
    }

    pub fn shell(&self) -> Result<Dialect> {
        self.shell.ok_or_else(|| {
            Error::NotReady("shell is not set, use --shell or $SHELL".to_string())
        })
    }

    pub fn hist_file(&self) -> Result<&Path> {
        self.hist_file.as_deref().ok_or_else(|| {
            Error::NotReady("history file is not set, use --histfile or $HISTFILE".to_string())
        })
    }

    pub fn time_format(&self) -> Option<&str> {
        self.time_format.as_deref()
    }

    pub fn traces_dir(&self) -> PathBuf {
        self.app_dir.join(TRACES_DIR)
    }

    pub fn bookmarks_dir(&self) -> PathBuf {
        self.app_dir.join(BOOKMARKS_DIR)
    }

    pub fn tmp_dir(&self) -> &Path {
        &self.tmp_dir
    }

    pub fn trace_path(&self, name: &TraceName) -> PathBuf {
        self.traces_dir().join(name.as_str())
    }

    /// Initial allocation for keepers that retain the whole history.
    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    pub fn matching(&self) -> MatchingConfig {
        self.matching
    }

    pub fn create_dirs(&self) -> Result<()> {
        for dir in [self.traces_dir(), self.bookmarks_dir(), self.tmp_dir.clone()] {
            std::fs::create_dir_all(&dir)?;
            tracing::debug!(dir = %dir.display(), "directory ready");
        }
        Ok(())
    }

    /// Render a timestamp with the configured strftime format in local time.
    ///
    /// Returns `None` when no format is configured, the timestamp is absent or
    /// the format string is invalid.
    pub fn format_timestamp(&self, timestamp: i64) -> Option<String> {
        let format = self.time_format.as_deref()?.trim_end();
        if timestamp == 0 || format.is_empty() {
            return None;
        }

        let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            tracing::warn!(format = %format, "invalid time format");
            return None;
        }

        let moment = Local.timestamp_opt(timestamp, 0).single()?;
        let mut rendered = String::new();
        write!(rendered, "{}", moment.format_with_items(items.into_iter())).ok()?;
        Some(rendered)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

pub struct EnvironmentBuilder {
    env: Environment,
}

impl EnvironmentBuilder {
    fn new(app_dir: impl Into<PathBuf>) -> Self {
        Self {
            env: Environment {
                shell: None,
                hist_file: None,
                time_format: None,
                app_dir: app_dir.into(),
                tmp_dir: std::env::temp_dir(),
                history_capacity: DEFAULT_HISTORY_CAPACITY,
                matching: MatchingConfig::default(),
            },
        }
    }

    pub fn shell(mut self, shell: Dialect) -> Self {
        self.env.shell = Some(shell);
        self
    }

    pub fn hist_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env.hist_file = Some(path.into());
        self
    }

    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.env.time_format = Some(format.into());
        self
    }

    pub fn tmp_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.env.tmp_dir = path.into();
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.env.history_capacity = capacity;
        self
    }

    pub fn matching(mut self, matching: MatchingConfig) -> Self {
        self.env.matching = matching;
        self
    }

    pub fn build(self) -> Environment {
        self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_without_shell() {
        let env = Environment::builder("/tmp/app").hist_file("/tmp/h").build();
        assert!(matches!(env.ensure_ready(), Err(Error::NotReady(_))));
    }

    #[test]
    fn test_not_ready_without_histfile() {
        let env = Environment::builder("/tmp/app").shell(Dialect::Bash).build();
        assert!(matches!(env.ensure_ready(), Err(Error::NotReady(_))));
    }

    #[test]
    fn test_ready_environment() {
        let env = Environment::builder("/tmp/app")
            .shell(Dialect::Zsh)
            .hist_file("/tmp/h")
            .build();
        assert!(env.ensure_ready().is_ok());
        assert_eq!(env.traces_dir(), PathBuf::from("/tmp/app/traces"));
        assert_eq!(env.bookmarks_dir(), PathBuf::from("/tmp/app/bookmarks"));
    }

    #[test]
    fn test_trace_path_is_flat() {
        let env = Environment::builder("/tmp/app").build();
        let name = TraceName::compute(1000, "ls -la");
        assert_eq!(
            env.trace_path(&name),
            PathBuf::from("/tmp/app/traces").join(name.as_str())
        );
    }

    #[test]
    fn test_format_timestamp() {
        let env = Environment::builder("/tmp/app").time_format("%Y ").build();
        let year = Local.timestamp_opt(1_000_000_000, 0).unwrap().format("%Y").to_string();
        assert_eq!(env.format_timestamp(1_000_000_000), Some(year));
        assert_eq!(env.format_timestamp(0), None);
    }

    #[test]
    fn test_format_timestamp_without_format() {
        let env = Environment::builder("/tmp/app").build();
        assert_eq!(env.format_timestamp(1_000_000_000), None);
    }

    #[test]
    fn test_invalid_time_format_is_ignored() {
        let env = Environment::builder("/tmp/app").time_format("%Q%").build();
        assert_eq!(env.format_timestamp(1_000_000_000), None);
    }
}
