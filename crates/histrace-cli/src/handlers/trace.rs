use super::HandlerContext;
use anyhow::Result;
use histrace_history::{PreciseKeeper, get_commands};
use histrace_runtime::dump_trace;
use std::io::{self, Write};

pub fn handle(ctx: &HandlerContext, number: u64) -> Result<()> {
    let entry = get_commands(&ctx.env, None, PreciseKeeper::new(number))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = dump_trace(&ctx.env, &entry, &mut out)?;
    out.flush()?;
    tracing::debug!(number, bytes = written, "trace printed");
    Ok(())
}
