use super::HandlerContext;
use anyhow::Result;
use histrace_runtime::{ExecOptions, Invocation, TraceOutcome, tee};

pub fn handle(ctx: &HandlerContext, command: &[String], options: ExecOptions) -> Result<i32> {
    let outcome = tee(&ctx.env, &Invocation::Argv(command.to_vec()), options)?;

    match &outcome.trace {
        TraceOutcome::Stored(path) => {
            tracing::debug!(path = %path.display(), "trace stored");
        }
        TraceOutcome::Kept { path, .. } => {
            eprintln!("trace kept at {}", path.display());
        }
    }

    Ok(outcome.status.exit_code())
}
