use super::HandlerContext;
use crate::presentation::{EntryView, render_entries};
use crate::slice::Slice;
use anyhow::Result;
use histrace_history::{AllKeeper, RangeKeeper, build_filter, get_commands};
use is_terminal::IsTerminal;
use std::io;

pub fn handle(ctx: &HandlerContext, pattern: Option<&str>, fuzzy: bool, slice: &[String]) -> Result<()> {
    let slice = Slice::from_args(slice)?;
    let filter = build_filter(pattern, fuzzy)?;

    // Without a filter, committed indices and history positions agree, so a
    // forward range can stop reading early.
    let entries = match slice.forward_bounds() {
        Some((start, finish)) if filter.is_none() => {
            get_commands(&ctx.env, None, RangeKeeper::new(start, finish))?
        }
        _ => {
            let all = get_commands(
                &ctx.env,
                filter.as_ref(),
                AllKeeper::with_capacity(ctx.env.history_capacity()),
            )?;
            let (start, finish) = slice.bounds(all.len());
            all[start..finish].to_vec()
        }
    };

    let views: Vec<EntryView> = entries
        .iter()
        .map(|entry| EntryView::new(entry, &ctx.env))
        .collect();

    let stdout = io::stdout();
    let color = stdout.is_terminal();
    render_entries(&mut stdout.lock(), &views, ctx.format, color)?;
    Ok(())
}
