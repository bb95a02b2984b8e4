use crate::{Error, Result};
use flate2::read::GzDecoder;
use histrace_core::Environment;
use histrace_types::HistoryEntry;
use std::fs::File;
use std::io::{self, BufReader, Write};

/// Stream the decompressed trace of `entry` into `out`.
pub fn dump_trace(env: &Environment, entry: &HistoryEntry, out: &mut dyn Write) -> Result<u64> {
    let path = env.trace_path(&entry.trace_name());
    let file = File::open(&path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => {
            Error::NotFound(format!("no trace for command #{}", entry.number()))
        }
        _ => Error::Io(err),
    })?;

    let mut decoder = GzDecoder::new(BufReader::new(file));
    let written = io::copy(&mut decoder, out)?;
    out.flush()?;
    Ok(written)
}
