use super::{ExitOutcome, TraceTap, spawn_error};
use crate::Result;
use crate::signals::{SignalForwarder, SignalTarget};
use crossterm::terminal;
use is_terminal::IsTerminal;
use std::fs::File;
use std::io::{self, Read, Write};
use std::os::fd::{FromRawFd, OwnedFd};
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use terminal_size::{Height, Width, terminal_size};

const CHUNK_SIZE: usize = 8 * 1024;
const DEFAULT_COLS: u16 = 80;
const DEFAULT_ROWS: u16 = 24;
const INPUT_POLL_MS: libc::c_int = 100;

struct PtyPair {
    master: OwnedFd,
    slave: OwnedFd,
}

/// Puts the real terminal in raw mode so keystrokes reach the child untouched.
struct RawModeGuard {
    enabled: bool,
}

impl RawModeGuard {
    fn enable() -> Self {
        if !io::stdin().is_terminal() {
            return Self { enabled: false };
        }
        match terminal::enable_raw_mode() {
            Ok(()) => Self { enabled: true },
            Err(err) => {
                tracing::warn!(error = %err, "cannot switch terminal to raw mode");
                Self { enabled: false }
            }
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.enabled
            && let Err(err) = terminal::disable_raw_mode()
        {
            tracing::warn!(error = %err, "cannot restore terminal mode");
        }
    }
}

pub(super) fn run(mut cmd: Command, command: &str, tap: Option<TraceTap>) -> Result<ExitOutcome> {
    let pair = open_pty().map_err(|err| spawn_error(command, err))?;

    let slave_in = pair.slave.try_clone()?;
    let slave_out = pair.slave.try_clone()?;
    cmd.stdin(Stdio::from(slave_in))
        .stdout(Stdio::from(slave_out))
        .stderr(Stdio::from(pair.slave));

    // SAFETY: only async-signal-safe calls between fork and exec.
    unsafe {
        cmd.pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(io::Error::last_os_error());
            }
            if libc::ioctl(0, libc::TIOCSCTTY, 0) == -1 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        });
    }

    let mut child = cmd.spawn().map_err(|err| spawn_error(command, err))?;
    // The parent must not keep the slave open, or the master never sees EOF.
    drop(cmd);

    // setsid made the child a process group leader.
    let _forwarder = SignalForwarder::start(SignalTarget::Group(child.id() as libc::pid_t));
    let raw_mode = RawModeGuard::enable();

    let master = File::from(pair.master);
    let master_input = master.try_clone()?;

    let stop_input = Arc::new(AtomicBool::new(false));
    let input = thread::Builder::new()
        .name("histrace-pty-input".to_string())
        .spawn({
            let stop = Arc::clone(&stop_input);
            move || pump_input(master_input, &stop)
        })?;

    let output = thread::Builder::new()
        .name("histrace-pty-output".to_string())
        .spawn(move || copy_output(master, tap))?;

    let status = child.wait()?;
    stop_input.store(true, Ordering::Relaxed);
    if output.join().is_err() {
        tracing::warn!("pty output thread panicked");
    }
    if input.join().is_err() {
        tracing::warn!("pty input thread panicked");
    }
    drop(raw_mode);

    Ok(status.into())
}

/// Relay the user's keystrokes to the child until `stop` is raised.
///
/// Polls with a timeout so the thread notices `stop` without consuming input
/// meant for whatever runs after the child.
fn pump_input(mut master: File, stop: &AtomicBool) {
    let mut stdin = io::stdin();
    let mut buf = [0u8; CHUNK_SIZE];
    while !stop.load(Ordering::Relaxed) {
        let mut fds = libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN,
            revents: 0,
        };
        // SAFETY: one valid pollfd for the duration of the call.
        let ready = unsafe { libc::poll(&mut fds, 1, INPUT_POLL_MS) };
        if ready < 0 {
            if io::Error::last_os_error().kind() == io::ErrorKind::Interrupted {
                continue;
            }
            break;
        }
        if ready == 0 {
            continue;
        }
        match stdin.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                if master.write_all(&buf[..n]).is_err() {
                    break;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
}

fn copy_output(mut master: File, tap: Option<TraceTap>) {
    let mut stdout = io::stdout();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = match master.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            // EIO once every slave descriptor is closed.
            Err(_) => break,
        };
        let chunk = &buf[..n];
        if let Some(tap) = &tap {
            tap.record(chunk);
        }
        if stdout.write_all(chunk).and_then(|_| stdout.flush()).is_err() {
            tracing::debug!("terminal write failed");
        }
    }
}

fn open_pty() -> io::Result<PtyPair> {
    let (cols, rows) = match terminal_size() {
        Some((Width(cols), Height(rows))) => (cols, rows),
        None => (DEFAULT_COLS, DEFAULT_ROWS),
    };
    let mut winsize = libc::winsize {
        ws_row: rows,
        ws_col: cols,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };

    let mut master: libc::c_int = -1;
    let mut slave: libc::c_int = -1;
    // SAFETY: all pointers are valid for the duration of the call.
    let rc = unsafe {
        libc::openpty(
            &mut master,
            &mut slave,
            std::ptr::null_mut(),
            std::ptr::null_mut::<libc::termios>(),
            &mut winsize as *mut libc::winsize,
        )
    };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }

    // SAFETY: openpty succeeded, both descriptors are open and owned by us.
    unsafe {
        Ok(PtyPair {
            master: OwnedFd::from_raw_fd(master),
            slave: OwnedFd::from_raw_fd(slave),
        })
    }
}
