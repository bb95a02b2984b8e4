use super::HandlerContext;
use anyhow::Result;
use histrace_history::{PreciseKeeper, get_commands};
use histrace_runtime::validate_bookmark_name;

pub fn handle(ctx: &HandlerContext, number: u64, name: &str) -> Result<()> {
    validate_bookmark_name(name)?;

    let entry = get_commands(&ctx.env, None, PreciseKeeper::new(number))?;
    let path = ctx.bookmarks().save(name, entry.command())?;
    tracing::info!(name, number, path = %path.display(), "bookmark saved");
    Ok(())
}
