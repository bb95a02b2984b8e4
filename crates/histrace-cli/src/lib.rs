mod args;
mod commands;
mod handlers;
mod logging;
pub mod presentation;
pub mod slice;

pub use args::{Cli, Commands, ExecArgs, GcArgs, LogLevel, OutputFormat};
pub use commands::run;
