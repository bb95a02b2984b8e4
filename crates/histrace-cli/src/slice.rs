//! `show` slice arguments.
//!
//! Indices count committed entries, 0-based. A leading `_` or `-` counts
//! from the end, the same way Python slices do.

use anyhow::{Result, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    FromStart(usize),
    FromEnd(usize),
}

impl Index {
    pub fn parse(raw: &str) -> Result<Self> {
        let (from_end, digits) = match raw.strip_prefix(['_', '-']) {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let Ok(value) = digits.parse::<usize>() else {
            bail!("{:?} is not a valid index", raw);
        };
        Ok(if from_end {
            Index::FromEnd(value)
        } else {
            Index::FromStart(value)
        })
    }

    fn resolve(self, len: usize) -> usize {
        match self {
            Index::FromStart(index) => index.min(len),
            Index::FromEnd(back) => len.saturating_sub(back),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    All,
    Last(usize),
    Range { start: Index, finish: Index },
}

impl Slice {
    pub fn from_args(args: &[String]) -> Result<Self> {
        match args {
            [] => Ok(Slice::All),
            [count] => {
                let Ok(count) = count.trim_start_matches(['_', '-']).parse::<usize>() else {
                    bail!("{:?} is not a valid count", count);
                };
                Ok(Slice::Last(count))
            }
            [start, finish] => Ok(Slice::Range {
                start: Index::parse(start)?,
                finish: Index::parse(finish)?,
            }),
            _ => bail!("expected at most two slice arguments"),
        }
    }

    /// Bounds usable without knowing the history length, allowing an early stop.
    pub fn forward_bounds(&self) -> Option<(usize, usize)> {
        match *self {
            Slice::Range {
                start: Index::FromStart(start),
                finish: Index::FromStart(finish),
            } => Some((start, finish)),
            _ => None,
        }
    }

    /// Apply to a fully materialized list of `len` entries.
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        match *self {
            Slice::All => (0, len),
            Slice::Last(count) => (len.saturating_sub(count), len),
            Slice::Range { start, finish } => {
                let start = start.resolve(len);
                let finish = finish.resolve(len);
                (start, finish.max(start))
            }
        }
    }
}
