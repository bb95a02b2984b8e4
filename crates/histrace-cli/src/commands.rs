use super::args::{Cli, Commands};
use super::handlers::{self, HandlerContext};
use crate::logging;
use anyhow::Result;
use histrace_core::{Environment, Overrides};

/// Dispatch a parsed command line. Returns the exit code to terminate with.
pub fn run(cli: Cli) -> Result<i32> {
    logging::init(cli.log_level);

    let overrides = Overrides {
        shell: cli.shell,
        histfile: cli.histfile,
        time_format: cli.histtimeformat,
        app_dir: cli.appdir,
        tmp_dir: cli.tmpdir,
    };
    let env = Environment::discover(&overrides)?;
    env.create_dirs()?;

    let ctx = HandlerContext::new(env, cli.format);

    match cli.command {
        Commands::Show {
            pattern,
            fuzzy,
            slice,
        } => handlers::show::handle(&ctx, pattern.as_deref(), fuzzy, &slice).map(|_| 0),

        Commands::Bookmark { number, name } => {
            handlers::bookmark::handle(&ctx, number, &name).map(|_| 0)
        }

        Commands::Exec { target, exec } => handlers::exec::handle(&ctx, &target, exec.options()),

        Commands::Tee { exec, command } => handlers::tee::handle(&ctx, &command, exec.options()),

        Commands::Trace { number } => handlers::trace::handle(&ctx, number).map(|_| 0),

        Commands::Bookmarks => handlers::bookmarks::list(&ctx).map(|_| 0),

        Commands::RemoveBookmarks { names } => {
            handlers::bookmarks::remove(&ctx, &names).map(|_| 0)
        }

        Commands::GcTraces { policy } => {
            let dir = ctx.env.traces_dir();
            handlers::gc::handle(&ctx, &dir, "traces", policy.policy()).map(|_| 0)
        }

        Commands::GcBookmarks { policy } => {
            let dir = ctx.env.bookmarks_dir();
            handlers::gc::handle(&ctx, &dir, "bookmarks", policy.policy()).map(|_| 0)
        }
    }
}
