//! Supervision loop: wait for the child while relaying signals to it.

use tokio::process::Child;
use tokio::time::Instant;

use crate::error::LaunchError;
use crate::lifecycle::shutdown::{wait_for_deadline, ShutdownAction, ShutdownPolicy};
use crate::lifecycle::signals::{signal_child, RelaySignal, SignalReceiver, SIGKILL};
use crate::process::exit::ExitOutcome;

enum Event {
    Exited(std::process::ExitStatus),
    Signal(RelaySignal),
    GraceElapsed,
}

/// Block until `child` exits, forwarding every signal from `signals` and
/// escalating to SIGKILL per `policy`. When the policy targets process
/// groups, `child` must have been spawned as a group leader.
///
/// A closed signal channel is not an error; the child is simply awaited.
pub async fn supervise(
    mut child: Child,
    signals: &mut SignalReceiver,
    mut policy: ShutdownPolicy,
) -> Result<ExitOutcome, LaunchError> {
    let pid = child.id();
    let group = policy.process_group();

    loop {
        let event = tokio::select! {
            status = child.wait() => Event::Exited(status?),
            Some(signal) = signals.recv() => Event::Signal(signal),
            () = wait_for_deadline(policy.deadline()) => Event::GraceElapsed,
        };

        let action = match event {
            Event::Exited(status) => {
                return Ok(ExitOutcome::from_status(status, policy.interrupted()));
            }
            Event::Signal(signal) => policy.on_signal(signal, Instant::now()),
            Event::GraceElapsed => {
                tracing::warn!(pid = ?pid, "Grace period elapsed; child still running");
                policy.on_grace_elapsed()
            }
        };

        match action {
            ShutdownAction::Forward(signal) => {
                tracing::info!(pid = ?pid, signal = signal.name(), "Forwarding signal to child");
                if let Err(e) = signal_child(&mut child, signal.number(), group) {
                    tracing::error!(pid = ?pid, error = %e, "Failed to forward signal");
                }
            }
            ShutdownAction::Kill => {
                tracing::warn!(pid = ?pid, group, "Killing child");
                if let Err(e) = signal_child(&mut child, SIGKILL, group) {
                    tracing::error!(pid = ?pid, error = %e, "Failed to kill child");
                }
            }
            ShutdownAction::Ignore => {}
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::Duration;

    use tokio::sync::mpsc;

    use crate::config::{env, CommandSpec};
    use crate::process::spawn::spawn;

    fn sh(script: &str) -> Child {
        spawn(
            &CommandSpec::new("sh", ["-c", script]),
            Path::new("."),
            &env::snapshot(),
            true,
        )
        .unwrap()
    }

    fn grouped(grace: Duration) -> ShutdownPolicy {
        ShutdownPolicy::new(Some(grace)).with_process_group(true)
    }

    #[tokio::test]
    async fn test_exit_code_passes_through() {
        let (_tx, mut rx) = mpsc::unbounded_channel();
        let outcome = supervise(sh("exit 7"), &mut rx, grouped(Duration::from_secs(5)))
            .await
            .unwrap();
        assert_eq!(outcome, ExitOutcome::Exited(7));
    }

    #[tokio::test]
    async fn test_closed_signal_channel_still_waits() {
        let (tx, mut rx) = mpsc::unbounded_channel::<RelaySignal>();
        drop(tx);
        let outcome = supervise(sh("exit 0"), &mut rx, grouped(Duration::from_secs(5)))
            .await
            .unwrap();
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_interrupt_yields_130() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let child = sh("exec sleep 30");

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let _ = tx.send(RelaySignal::Interrupt);
            // Keep the sender alive until the child is gone.
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let outcome = supervise(child, &mut rx, grouped(Duration::from_secs(1)))
            .await
            .unwrap();
        assert_eq!(outcome.exit_code(), 130);
    }

    #[tokio::test]
    async fn test_terminate_is_forwarded_and_handled_by_child() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let child = sh("trap 'exit 3' TERM; sleep 30 & wait");

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            let _ = tx.send(RelaySignal::Terminate);
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let outcome = supervise(child, &mut rx, grouped(Duration::from_secs(5)))
            .await
            .unwrap();
        assert_eq!(outcome, ExitOutcome::Exited(3));
    }

    #[tokio::test]
    async fn test_grace_period_escalates_to_kill() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let child = sh("trap '' TERM; exec sleep 30");

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            let _ = tx.send(RelaySignal::Terminate);
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let policy = grouped(Duration::from_millis(200));
        let outcome = supervise(child, &mut rx, policy).await.unwrap();
        assert_eq!(outcome, ExitOutcome::Signaled(9));
        assert_eq!(outcome.exit_code(), 137);
    }

    /// Running (not exited or zombie) according to procfs.
    #[cfg(target_os = "linux")]
    fn is_running(pid: u32) -> bool {
        match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
            Ok(stat) => stat
                .rsplit(") ")
                .next()
                .is_some_and(|rest| !rest.starts_with('Z') && !rest.starts_with('X')),
            Err(_) => false,
        }
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_escalation_kills_grandchildren() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("grandchild.pid");
        let script = format!(
            "trap '' TERM; sleep 300 & echo $! > {}; wait",
            pid_file.display()
        );
        let child = sh(&script);

        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            let _ = tx.send(RelaySignal::Terminate);
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let outcome = supervise(child, &mut rx, grouped(Duration::from_millis(200)))
            .await
            .unwrap();
        assert_eq!(outcome, ExitOutcome::Signaled(9));

        let grandchild: u32 = std::fs::read_to_string(&pid_file)
            .unwrap()
            .trim()
            .parse()
            .unwrap();
        let mut running = true;
        for _ in 0..50 {
            running = is_running(grandchild);
            if !running {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(!running, "grandchild {} survived escalation", grandchild);
    }
}
