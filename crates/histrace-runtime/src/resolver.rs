//! Matching a finished command back to the history entry the shell wrote for it.
//!
//! History files carry no per-invocation id, so the match is a heuristic:
//! entries close in time to the execution start are candidates, and the
//! one sharing the most tokens with the executed command wins.

use crate::{Error, Result};
use histrace_core::{Environment, MatchingConfig, TieBreak};
use histrace_history::{AllKeeper, get_commands};
use histrace_types::{SharedEntry, TraceName};

/// Re-read the history and name the trace after the entry matching `command`.
pub fn resolve_trace_name(env: &Environment, command: &str, started_at: i64) -> Result<TraceName> {
    let entries = get_commands(env, None, AllKeeper::with_capacity(env.history_capacity()))?;
    let entry = select_candidate(&entries, command, started_at, &env.matching())
        .ok_or_else(|| Error::NotFound("history is empty, cannot name the trace".to_string()))?;
    tracing::debug!(
        number = entry.number(),
        command = %entry.command(),
        "trace matched history entry"
    );
    Ok(entry.trace_name())
}

pub fn select_candidate<'a>(
    entries: &'a [SharedEntry],
    command: &str,
    started_at: i64,
    matching: &MatchingConfig,
) -> Option<&'a SharedEntry> {
    let candidates: Vec<&SharedEntry> = entries
        .iter()
        .filter(|entry| {
            entry
                .timestamp()
                .is_some_and(|ts| ts.abs_diff(started_at) <= matching.window_secs)
        })
        .collect();

    match candidates.as_slice() {
        [] => {
            let fallback = entries.last();
            tracing::warn!(
                window_secs = matching.window_secs,
                started_at,
                "no history entry close to execution start, using the latest one"
            );
            fallback
        }
        [single] => Some(*single),
        _ => best_scored(&candidates, command, matching.tie_break),
    }
}

fn best_scored<'a>(candidates: &[&'a SharedEntry], command: &str, tie_break: TieBreak) -> Option<&'a SharedEntry> {
    let tokens: Vec<&str> = command.split_whitespace().collect();
    let mut best: Option<(usize, &'a SharedEntry)> = None;

    for &candidate in candidates {
        let score = overlap(&tokens, candidate.command());
        let better = match (best, tie_break) {
            (None, _) => true,
            (Some((top, _)), TieBreak::Latest) => score >= top,
            (Some((top, _)), TieBreak::Earliest) => score > top,
        };
        if better {
            best = Some((score, candidate));
        }
    }

    best.map(|(_, entry)| entry)
}

/// Number of command tokens found verbatim inside the candidate text.
fn overlap(tokens: &[&str], candidate: &str) -> usize {
    tokens.iter().filter(|token| candidate.contains(**token)).count()
}
