use clap::Args;
use histrace_runtime::{ExecOptions, GcPolicy};

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct ExecArgs {
    #[arg(short = 'x', long = "run-in-shell", help = "Run through an interactive $SHELL -c")]
    pub run_in_shell: bool,

    #[arg(short = 'y', long = "pty", help = "Attach the command to a pseudo-terminal")]
    pub pty: bool,
}

impl ExecArgs {
    pub fn options(&self) -> ExecOptions {
        ExecOptions {
            use_shell: self.run_in_shell,
            use_pty: self.pty,
        }
    }
}

#[derive(Debug, Clone, Copy, Args)]
#[group(required = true, multiple = false)]
pub struct GcArgs {
    #[arg(long, value_name = "N", help = "Keep only the N most recent files")]
    pub keep_latest: Option<usize>,

    #[arg(long, value_name = "DAYS", help = "Remove files older than DAYS days")]
    pub older_than: Option<u64>,

    #[arg(long, help = "Remove everything")]
    pub all: bool,
}

impl GcArgs {
    pub fn policy(&self) -> GcPolicy {
        match (self.keep_latest, self.older_than) {
            (Some(keep), _) => GcPolicy::KeepLatest(keep),
            (None, Some(days)) => GcPolicy::OlderThan(days),
            (None, None) => GcPolicy::All,
        }
    }
}
