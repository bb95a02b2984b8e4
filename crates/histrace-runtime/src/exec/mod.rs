//! Running commands with optional output capture.
//!
//! Two paths: a plain child sharing (or piping) the caller's streams, and a
//! child attached to a fresh pseudo-terminal. Both forward job-control
//! signals for as long as the child runs.

mod plain;
mod pty;

use crate::{Error, Result};
use std::io::Write;
use std::os::unix::process::ExitStatusExt;
use std::process::{Command, ExitStatus};
use std::sync::{Arc, Mutex};

const FALLBACK_SHELL: &str = "/bin/sh";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOptions {
    /// Run through `$SHELL -i -c` instead of splitting on whitespace.
    pub use_shell: bool,
    /// Attach the child to a pseudo-terminal.
    pub use_pty: bool,
}

/// How a child that did start came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Exited(i32),
    Signaled(i32),
}

impl ExitOutcome {
    /// Exit status to report for this outcome; signals map to `128 + signal`.
    pub fn exit_code(self) -> i32 {
        match self {
            ExitOutcome::Exited(code) => code,
            ExitOutcome::Signaled(signal) => 128 + signal,
        }
    }

    pub fn success(self) -> bool {
        self == ExitOutcome::Exited(0)
    }
}

impl From<ExitStatus> for ExitOutcome {
    fn from(status: ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => ExitOutcome::Exited(code),
            (None, Some(signal)) => ExitOutcome::Signaled(signal),
            (None, None) => ExitOutcome::Exited(1),
        }
    }
}

/// Shared writer receiving a copy of everything the child prints.
///
/// Cloned into every copy loop. Write failures are logged once per chunk and
/// never interrupt the copy to the terminal.
#[derive(Clone)]
pub struct TraceTap {
    inner: Arc<Mutex<dyn Write + Send>>,
}

impl TraceTap {
    pub fn new(inner: Arc<Mutex<dyn Write + Send>>) -> Self {
        Self { inner }
    }

    pub fn record(&self, chunk: &[u8]) {
        let result = match self.inner.lock() {
            Ok(mut writer) => writer.write_all(chunk),
            Err(_) => Err(std::io::Error::other("trace writer poisoned")),
        };
        if let Err(err) = result {
            tracing::warn!(error = %err, "cannot write to trace");
        }
    }
}

/// What to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// A command line as stored in history: split on whitespace, or handed
    /// to the shell whole.
    Line(String),
    /// Arguments that are already split. Passed to the child untouched.
    Argv(Vec<String>),
}

impl Invocation {
    /// Single-line rendering, used for the shell, for logs and for matching
    /// against history.
    pub fn text(&self) -> String {
        match self {
            Invocation::Line(line) => line.clone(),
            Invocation::Argv(args) => args.join(" "),
        }
    }
}

impl From<&str> for Invocation {
    fn from(line: &str) -> Self {
        Invocation::Line(line.to_string())
    }
}

/// Run `invocation` to completion.
///
/// A command that cannot be started is an [`Error::Spawn`]; everything the
/// child itself does, including dying from a signal, is an [`ExitOutcome`].
pub fn execute(invocation: &Invocation, options: ExecOptions, tap: Option<TraceTap>) -> Result<ExitOutcome> {
    let command = invocation.text();
    let cmd = build_command(invocation, options.use_shell)?;
    tracing::debug!(
        command = %command,
        shell = options.use_shell,
        pty = options.use_pty,
        "execute command"
    );

    let outcome = if options.use_pty {
        pty::run(cmd, &command, tap)?
    } else {
        plain::run(cmd, &command, tap)?
    };
    tracing::debug!(outcome = ?outcome, "command finished");
    Ok(outcome)
}

fn build_command(invocation: &Invocation, use_shell: bool) -> Result<Command> {
    if use_shell {
        let shell = std::env::var("SHELL")
            .ok()
            .filter(|shell| !shell.is_empty())
            .unwrap_or_else(|| FALLBACK_SHELL.to_string());
        let mut cmd = Command::new(shell);
        cmd.arg("-i").arg("-c").arg(invocation.text());
        return Ok(cmd);
    }

    let (program, args): (&str, Vec<&str>) = match invocation {
        Invocation::Line(line) => {
            let mut parts = line.split_whitespace();
            let program = parts.next().unwrap_or_default();
            (program, parts.collect())
        }
        Invocation::Argv(argv) => match argv.split_first() {
            Some((program, rest)) => (program.as_str(), rest.iter().map(String::as_str).collect()),
            None => ("", Vec::new()),
        },
    };
    if program.is_empty() {
        return Err(Error::InvalidInput("command is empty".to_string()));
    }

    let mut cmd = Command::new(program);
    cmd.args(args);
    Ok(cmd)
}

fn spawn_error(command: &str, source: std::io::Error) -> Error {
    Error::Spawn {
        command: command.to_string(),
        source,
    }
}
