use crate::args::LogLevel;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Overrides `--log-level` with a full filter directive.
pub const LOG_ENV: &str = "HISTRACE_LOG";

/// Diagnostics go to stderr so they never mix with command output on stdout.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
