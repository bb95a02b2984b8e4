use super::{ExitOutcome, TraceTap, spawn_error};
use crate::Result;
use crate::signals::{SignalForwarder, SignalTarget};
use std::io::{self, Read, Write};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

const CHUNK_SIZE: usize = 8 * 1024;

pub(super) fn run(mut cmd: Command, command: &str, tap: Option<TraceTap>) -> Result<ExitOutcome> {
    cmd.stdin(Stdio::inherit());
    if tap.is_some() {
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    }

    let mut child = cmd.spawn().map_err(|err| spawn_error(command, err))?;
    let _forwarder = SignalForwarder::start(SignalTarget::Process(child.id() as libc::pid_t));

    let mut copiers = Vec::new();
    if let Some(tap) = tap {
        if let Some(stdout) = child.stdout.take() {
            copiers.push(spawn_copier("histrace-stdout", stdout, io::stdout, tap.clone())?);
        }
        if let Some(stderr) = child.stderr.take() {
            copiers.push(spawn_copier("histrace-stderr", stderr, io::stderr, tap)?);
        }
    }

    let status = child.wait()?;
    for copier in copiers {
        if copier.join().is_err() {
            tracing::warn!("output copy thread panicked");
        }
    }
    Ok(status.into())
}

fn spawn_copier<R, W, F>(name: &str, mut source: R, target: F, tap: TraceTap) -> io::Result<JoinHandle<()>>
where
    R: Read + Send + 'static,
    W: Write,
    F: FnOnce() -> W + Send + 'static,
{
    thread::Builder::new().name(name.to_string()).spawn(move || {
        let mut target = target();
        let mut buf = [0u8; CHUNK_SIZE];
        loop {
            let n = match source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    tracing::debug!(error = %err, "child output closed");
                    break;
                }
            };
            let chunk = &buf[..n];
            tap.record(chunk);
            // The terminal may be gone (closed pipe); the trace still gets everything.
            if target.write_all(chunk).and_then(|_| target.flush()).is_err() {
                tracing::debug!("terminal write failed");
            }
        }
    })
}
