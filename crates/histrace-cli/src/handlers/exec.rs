use super::HandlerContext;
use anyhow::Result;
use histrace_history::{PreciseKeeper, get_commands};
use histrace_runtime::{ExecOptions, Invocation, execute};

/// Run a history entry (by number) or a bookmark (by name).
pub fn handle(ctx: &HandlerContext, target: &str, options: ExecOptions) -> Result<i32> {
    let command = if !target.is_empty() && target.bytes().all(|b| b.is_ascii_digit()) {
        let number = target.parse::<u64>()?;
        get_commands(&ctx.env, None, PreciseKeeper::new(number))?
            .command()
            .to_string()
    } else {
        ctx.bookmarks().load(target)?
    };

    tracing::debug!(command = %command, "exec");
    let status = execute(&Invocation::Line(command), options, None)?;
    Ok(status.exit_code())
}
