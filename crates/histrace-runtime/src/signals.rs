//! Forwarding of job-control signals to a running child.
//!
//! OS handlers can be installed only once per process, so a single
//! dispatcher thread owns them for the life of the process. A
//! [`SignalForwarder`] points the dispatcher at one child while it lives.
//! With no forwarder alive a signal gets its default effect again.

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread;
use tokio::signal::unix::{Signal, SignalKind, signal};

/// Signals relayed to the child while it runs.
const FORWARDED: &[libc::c_int] = &[
    libc::SIGINT,
    libc::SIGTERM,
    libc::SIGQUIT,
    libc::SIGTSTP,
    libc::SIGCONT,
    libc::SIGTTIN,
    libc::SIGTTOU,
    libc::SIGBUS,
    libc::SIGSYS,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalTarget {
    Process(libc::pid_t),
    /// Whole process group led by this pid.
    Group(libc::pid_t),
}

impl SignalTarget {
    fn kill_pid(self) -> libc::pid_t {
        match self {
            SignalTarget::Process(pid) => pid,
            SignalTarget::Group(pgid) => -pgid,
        }
    }
}

/// Fault-class signals cannot be meaningfully survived; the child is killed.
pub fn translate(signal: libc::c_int) -> libc::c_int {
    match signal {
        libc::SIGBUS | libc::SIGSYS => libc::SIGKILL,
        other => other,
    }
}

/// What a signal does to this process when nobody forwards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DefaultAction {
    Terminate,
    Stop,
    Ignore,
}

fn default_action(signal: libc::c_int) -> DefaultAction {
    match signal {
        libc::SIGTSTP | libc::SIGTTIN | libc::SIGTTOU => DefaultAction::Stop,
        libc::SIGCONT => DefaultAction::Ignore,
        _ => DefaultAction::Terminate,
    }
}

/// Live forwarders, innermost last.
static TARGETS: Mutex<Vec<(u64, SignalTarget)>> = Mutex::new(Vec::new());
static NEXT_ID: AtomicU64 = AtomicU64::new(0);
static DISPATCHER: OnceLock<bool> = OnceLock::new();

fn targets() -> MutexGuard<'static, Vec<(u64, SignalTarget)>> {
    TARGETS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Relays signals to `target` until dropped. Forwarders nest: dropping the
/// innermost one hands signals back to the one started before it.
pub struct SignalForwarder {
    id: Option<u64>,
}

impl SignalForwarder {
    /// Start forwarding to `target`. Failure to install handlers is logged
    /// once and yields an inert forwarder: the child still runs, just
    /// without relaying.
    pub fn start(target: SignalTarget) -> Self {
        if !*DISPATCHER.get_or_init(start_dispatcher) {
            return Self { id: None };
        }
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        targets().push((id, target));
        Self { id: Some(id) }
    }
}

impl Drop for SignalForwarder {
    fn drop(&mut self) {
        if let Some(id) = self.id {
            targets().retain(|&(live, _)| live != id);
        }
    }
}

fn start_dispatcher() -> bool {
    match spawn_dispatcher() {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "cannot forward signals to child");
            false
        }
    }
}

fn spawn_dispatcher() -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    // Handlers are armed here, before any forwarder is handed out.
    let streams: Vec<(libc::c_int, Signal)> = {
        let _guard = runtime.enter();
        FORWARDED
            .iter()
            .filter_map(|&raw| match signal(SignalKind::from_raw(raw)) {
                Ok(stream) => Some((raw, stream)),
                Err(err) => {
                    tracing::debug!(signal = raw, error = %err, "signal not forwarded");
                    None
                }
            })
            .collect()
    };

    thread::Builder::new()
        .name("histrace-signals".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                for (raw, mut stream) in streams {
                    tokio::spawn(async move {
                        while stream.recv().await.is_some() {
                            dispatch(raw);
                        }
                    });
                }
                std::future::pending::<()>().await;
            });
        })?;
    Ok(())
}

fn dispatch(raw: libc::c_int) {
    let target = targets().last().map(|&(_, target)| target);
    match target {
        Some(target) => deliver(target, raw),
        None => fall_back(raw),
    }
}

/// Give an unforwarded signal the effect it would have had without handlers.
fn fall_back(raw: libc::c_int) {
    tracing::debug!(signal = raw, "no child to forward to");
    match default_action(raw) {
        // SAFETY: signal and kill have no memory-safety preconditions.
        DefaultAction::Terminate => unsafe {
            libc::signal(raw, libc::SIG_DFL);
            libc::kill(libc::getpid(), raw);
        },
        // SAFETY: as above.
        DefaultAction::Stop => unsafe {
            libc::kill(libc::getpid(), libc::SIGSTOP);
        },
        DefaultAction::Ignore => {}
    }
}

fn deliver(target: SignalTarget, raw: libc::c_int) {
    let sent = translate(raw);
    tracing::debug!(signal = raw, sent, target = ?target, "forward signal");
    // SAFETY: kill has no memory-safety preconditions.
    let rc = unsafe { libc::kill(target.kill_pid(), sent) };
    if rc != 0 {
        tracing::debug!(
            error = %std::io::Error::last_os_error(),
            "cannot deliver signal, child probably exited"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_signals_become_kill() {
        assert_eq!(translate(libc::SIGBUS), libc::SIGKILL);
        assert_eq!(translate(libc::SIGSYS), libc::SIGKILL);
        assert_eq!(translate(libc::SIGINT), libc::SIGINT);
        assert_eq!(translate(libc::SIGTSTP), libc::SIGTSTP);
    }

    #[test]
    fn test_group_target_negates_pid() {
        assert_eq!(SignalTarget::Process(42).kill_pid(), 42);
        assert_eq!(SignalTarget::Group(42).kill_pid(), -42);
    }

    #[test]
    fn test_unforwarded_signals_keep_their_default_effect() {
        assert_eq!(default_action(libc::SIGINT), DefaultAction::Terminate);
        assert_eq!(default_action(libc::SIGTERM), DefaultAction::Terminate);
        assert_eq!(default_action(libc::SIGBUS), DefaultAction::Terminate);
        assert_eq!(default_action(libc::SIGTSTP), DefaultAction::Stop);
        assert_eq!(default_action(libc::SIGTTOU), DefaultAction::Stop);
        assert_eq!(default_action(libc::SIGCONT), DefaultAction::Ignore);
    }
}
