use super::common::{ExecArgs, GcArgs};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    #[command(visible_alias = "s", about = "List history entries")]
    Show {
        #[arg(short = 'g', long = "grep", value_name = "PATTERN", help = "Only entries matching this regex")]
        pattern: Option<String>,

        #[arg(short = 'z', long, requires = "pattern", help = "Treat PATTERN as a fuzzy query")]
        fuzzy: bool,

        #[arg(
            value_name = "SLICE",
            num_args = 0..=2,
            allow_hyphen_values = true,
            help = "N for the last N entries, or START FINISH; prefix with _ to count from the end"
        )]
        slice: Vec<String>,
    },

    #[command(visible_alias = "b", about = "Bookmark a history entry under a name")]
    Bookmark {
        #[arg(help = "History entry number")]
        number: u64,

        #[arg(help = "Bookmark name ([A-Za-z_][A-Za-z0-9_]*)")]
        name: String,
    },

    #[command(visible_alias = "e", about = "Run a history entry or a bookmark")]
    Exec {
        #[arg(value_name = "NUMBER|BOOKMARK")]
        target: String,

        #[command(flatten)]
        exec: ExecArgs,
    },

    #[command(visible_alias = "t", about = "Run a command and store its output as a trace")]
    Tee {
        #[command(flatten)]
        exec: ExecArgs,

        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    #[command(visible_alias = "l", about = "Print the stored output of a history entry")]
    Trace {
        #[arg(help = "History entry number")]
        number: u64,
    },

    #[command(visible_alias = "lb", about = "List bookmarks")]
    Bookmarks,

    #[command(visible_alias = "rb", about = "Remove bookmarks")]
    RemoveBookmarks {
        #[arg(required = true)]
        names: Vec<String>,
    },

    #[command(visible_alias = "gt", about = "Remove stored traces")]
    GcTraces {
        #[command(flatten)]
        policy: GcArgs,
    },

    #[command(visible_alias = "gb", about = "Remove bookmarks in bulk")]
    GcBookmarks {
        #[command(flatten)]
        policy: GcArgs,
    },
}
