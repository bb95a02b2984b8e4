mod commands;
mod common;
mod enums;

pub use commands::*;
pub use common::*;
pub use enums::*;

use clap::Parser;

#[derive(Parser)]
#[command(name = "histrace")]
#[command(about = "Query shell history, bookmark commands and keep their output", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Shell whose history to read (bash, zsh, fish or a path to one)")]
    pub shell: Option<String>,

    #[arg(long, global = true, help = "History file to read instead of the shell default")]
    pub histfile: Option<String>,

    #[arg(long, global = true, help = "strftime format for timestamps (defaults to $HISTTIMEFORMAT)")]
    pub histtimeformat: Option<String>,

    #[arg(long, global = true, help = "Directory for traces, bookmarks and config (defaults to ~/.histrace)")]
    pub appdir: Option<String>,

    #[arg(long, global = true, help = "Directory for in-flight traces")]
    pub tmpdir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}
