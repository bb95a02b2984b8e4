use crate::exec::TraceTap;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempPath;

const STAGING_PREFIX: &str = "histrace";

type Encoder = GzEncoder<BufWriter<File>>;

/// Gzip-compressed temporary file collecting a command's output until it
/// can be named after its history entry.
///
/// The file is removed on drop unless [`StagingTrace::finish`] hands its
/// path over to the caller.
pub struct StagingTrace {
    encoder: Arc<Mutex<Encoder>>,
    path: TempPath,
}

impl StagingTrace {
    pub fn create(tmp_dir: &Path) -> io::Result<Self> {
        std::fs::create_dir_all(tmp_dir)?;
        let (file, path) = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempfile_in(tmp_dir)?
            .into_parts();
        tracing::debug!(path = %path.display(), "staging trace created");

        let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        Ok(Self {
            encoder: Arc::new(Mutex::new(encoder)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tap(&self) -> TraceTap {
        let writer: Arc<Mutex<dyn Write + Send>> = self.encoder.clone();
        TraceTap::new(writer)
    }

    /// Write the gzip trailer and flush everything to disk.
    pub fn finish(self) -> io::Result<TempPath> {
        {
            let mut encoder = self
                .encoder
                .lock()
                .map_err(|_| io::Error::other("trace writer poisoned"))?;
            encoder.try_finish()?;
            encoder.get_mut().flush()?;
        }
        Ok(self.path)
    }
}
