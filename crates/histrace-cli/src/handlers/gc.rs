use super::HandlerContext;
use crate::presentation::{GcView, render_gc};
use anyhow::Result;
use histrace_runtime::{GcPolicy, collect_garbage};
use std::io;
use std::path::Path;

pub fn handle(ctx: &HandlerContext, dir: &Path, kind: &'static str, policy: GcPolicy) -> Result<()> {
    let report = collect_garbage(dir, policy)?;
    tracing::info!(kind, removed = report.removed.len(), failed = report.failed, "gc finished");

    render_gc(&mut io::stdout().lock(), &GcView::new(kind, &report), ctx.format)?;
    Ok(())
}
