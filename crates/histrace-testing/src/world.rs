//! TestWorld pattern for declarative integration test setup.

use crate::fixtures::{Record, history_text};
use anyhow::Result;
use assert_cmd::Command;
use filetime::FileTime;
use flate2::Compression;
use flate2::write::GzEncoder;
use histrace_types::{Dialect, TraceName};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated home directory for one test.
///
/// # Example
/// ```no_run
/// use histrace_testing::TestWorld;
/// use histrace_types::Dialect;
///
/// let world = TestWorld::new(Dialect::Bash).with_history(&[(1000, "ls -la")]);
/// let result = world.run(&["show"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    dialect: Dialect,
    home: PathBuf,
    app_dir: PathBuf,
    tmp_dir: PathBuf,
    hist_file: PathBuf,
    env_vars: HashMap<String, String>,
}

impl TestWorld {
    pub fn new(dialect: Dialect) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let home = temp_dir.path().join("home");
        let app_dir = home.join(".histrace");
        let tmp_dir = temp_dir.path().join("tmp");

        std::fs::create_dir_all(&home).expect("Failed to create home dir");
        std::fs::create_dir_all(&tmp_dir).expect("Failed to create tmp dir");

        let hist_file = home.join(format!(".{}_history", dialect));

        Self {
            temp_dir,
            dialect,
            home,
            app_dir,
            tmp_dir,
            hist_file,
            env_vars: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    pub fn traces_dir(&self) -> PathBuf {
        self.app_dir.join("traces")
    }

    pub fn bookmarks_dir(&self) -> PathBuf {
        self.app_dir.join("bookmarks")
    }

    pub fn tmp_dir(&self) -> &Path {
        &self.tmp_dir
    }

    pub fn hist_file(&self) -> &Path {
        &self.hist_file
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write the history file in this world's dialect.
    pub fn with_history(self, records: &[Record<'_>]) -> Self {
        self.write_history(records).expect("Failed to write history");
        self
    }

    pub fn write_history(&self, records: &[Record<'_>]) -> Result<()> {
        self.write_raw_history(history_text(self.dialect, records).as_bytes())
    }

    pub fn write_raw_history(&self, content: &[u8]) -> Result<()> {
        std::fs::write(&self.hist_file, content)?;
        Ok(())
    }

    /// Store a gzip trace under the name an entry with this timestamp and
    /// command resolves to.
    pub fn place_trace(&self, timestamp: i64, command: &str, output: &[u8]) -> Result<PathBuf> {
        let dir = self.traces_dir();
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(TraceName::compute(timestamp, command).as_str());

        let mut encoder = GzEncoder::new(std::fs::File::create(&path)?, Compression::default());
        encoder.write_all(output)?;
        encoder.finish()?;
        Ok(path)
    }

    pub fn place_bookmark(&self, name: &str, command: &str) -> Result<PathBuf> {
        let dir = self.bookmarks_dir();
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(name);
        std::fs::write(&path, command)?;
        Ok(path)
    }

    /// Push a file's modification time `days` into the past.
    pub fn age_file(&self, path: &Path, days: u64) -> Result<()> {
        let now = FileTime::now();
        let then = FileTime::from_unix_time(now.unix_seconds() - (days * 24 * 60 * 60) as i64, 0);
        filetime::set_file_mtime(path, then)?;
        Ok(())
    }

    /// Configure a CLI command with this world's home, shell and history file.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.current_dir(&self.home)
            .env_clear()
            .env("PATH", std::env::var_os("PATH").unwrap_or_default())
            .env("HOME", &self.home)
            .env("SHELL", format!("/bin/{}", self.dialect))
            .env("HISTFILE", &self.hist_file)
            .env("HISTRACE_DIR", &self.app_dir)
            .env("TMPDIR", &self.tmp_dir);

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run the histrace binary inside this world.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("histrace")
            .map_err(|e| anyhow::anyhow!("Failed to find histrace binary: {}", e))?;
        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;
        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
