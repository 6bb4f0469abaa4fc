//! OS signal handling.
//!
//! # Responsibilities
//! - Register SIGINT and SIGTERM handlers
//! - Translate them into [`RelaySignal`] events on a channel
//! - Deliver relayed signals to a child process (or its process group)
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - The listener never acts on a signal itself; the supervisor decides
//!   whether to forward or escalate

use tokio::process::Child;
use tokio::sync::mpsc;

/// A termination signal received by the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaySignal {
    /// SIGINT (Ctrl+C).
    Interrupt,
    /// SIGTERM (e.g., `docker stop`).
    Terminate,
}

impl RelaySignal {
    /// Raw signal number.
    pub fn number(self) -> i32 {
        match self {
            RelaySignal::Interrupt => 2,
            RelaySignal::Terminate => 15,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RelaySignal::Interrupt => "SIGINT",
            RelaySignal::Terminate => "SIGTERM",
        }
    }
}

/// Receiving half of the signal channel.
pub type SignalReceiver = mpsc::UnboundedReceiver<RelaySignal>;

/// Install SIGINT/SIGTERM handlers and return a channel fed by them.
///
/// Must be called from within a Tokio runtime. Once installed, the default
/// "terminate on SIGINT" behaviour is replaced for the rest of the process
/// lifetime.
#[cfg(unix)]
pub fn listen() -> std::io::Result<SignalReceiver> {
    use tokio::signal::unix::{signal, SignalKind};

    let (tx, rx) = mpsc::unbounded_channel();
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                Some(()) = interrupt.recv() => RelaySignal::Interrupt,
                Some(()) = terminate.recv() => RelaySignal::Terminate,
                else => break,
            };
            tracing::debug!(signal = received.name(), "Signal received");
            if tx.send(received).is_err() {
                break;
            }
        }
    });

    Ok(rx)
}

#[cfg(not(unix))]
pub fn listen() -> std::io::Result<SignalReceiver> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!(signal = "SIGINT", "Signal received");
            if tx.send(RelaySignal::Interrupt).is_err() {
                break;
            }
        }
    });

    Ok(rx)
}

/// SIGKILL, used when escalating past a forwarded signal.
pub const SIGKILL: i32 = 9;

/// Deliver signal number `signal` to `child`, or to its whole process
/// group when `group` is set (the child must then have been spawned as a
/// group leader). A child that has already been reaped is silently
/// ignored.
#[cfg(unix)]
pub fn signal_child(child: &mut Child, signal: i32, group: bool) -> std::io::Result<()> {
    let Some(pid) = child.id() else {
        return Ok(());
    };
    let pid = libc::pid_t::try_from(pid)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let target = if group { -pid } else { pid };

    // SAFETY: kill(2) has no memory-safety preconditions; pid belongs to a
    // child we have not yet reaped, so neither it nor its group id can
    // have been recycled.
    let ret = unsafe { libc::kill(target, signal) };
    if ret == 0 {
        Ok(())
    } else {
        let err = std::io::Error::last_os_error();
        if err.raw_os_error() == Some(libc::ESRCH) {
            Ok(())
        } else {
            Err(err)
        }
    }
}

/// Without POSIX signals the closest equivalent is terminating the child.
#[cfg(not(unix))]
pub fn signal_child(child: &mut Child, _signal: i32, _group: bool) -> std::io::Result<()> {
    child.start_kill()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_numbers() {
        assert_eq!(RelaySignal::Interrupt.number(), 2);
        assert_eq!(RelaySignal::Terminate.number(), 15);
        assert_eq!(RelaySignal::Terminate.name(), "SIGTERM");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_signal_child_terminates_child() {
        let mut child = tokio::process::Command::new("sleep")
            .arg("30")
            .kill_on_drop(true)
            .spawn()
            .unwrap();

        signal_child(&mut child, RelaySignal::Terminate.number(), false).unwrap();
        let status = child.wait().await.unwrap();

        use std::os::unix::process::ExitStatusExt;
        assert_eq!(status.signal(), Some(15));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_group_signal_reaches_group_leader() {
        let mut child = tokio::process::Command::new("sleep")
            .arg("30")
            .process_group(0)
            .kill_on_drop(true)
            .spawn()
            .unwrap();

        signal_child(&mut child, SIGKILL, true).unwrap();
        let status = child.wait().await.unwrap();

        use std::os::unix::process::ExitStatusExt;
        assert_eq!(status.signal(), Some(9));
    }
}
