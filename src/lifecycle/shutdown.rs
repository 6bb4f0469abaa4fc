//! Shutdown escalation for a supervised child.
//!
//! The first SIGINT/SIGTERM is forwarded as-is and starts the grace
//! period. A second signal, or the grace period running out, escalates to
//! SIGKILL. With process-group signalling enabled every signal, SIGKILL
//! included, goes to the child's whole group.

use std::time::Duration;
use tokio::time::Instant;

use crate::config::ShutdownConfig;
use crate::lifecycle::signals::RelaySignal;

/// What the supervisor should do with the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownAction {
    /// Forward the signal unchanged.
    Forward(RelaySignal),
    /// Send SIGKILL.
    Kill,
    /// Nothing left to do (the child has already been killed).
    Ignore,
}

/// Tracks forwarded signals for one child.
#[derive(Debug, Clone)]
pub struct ShutdownPolicy {
    grace: Option<Duration>,
    process_group: bool,
    forwarded: u32,
    interrupted: bool,
    killed: bool,
    deadline: Option<Instant>,
}

impl ShutdownPolicy {
    /// `grace` of `None` (or zero) disables time-based escalation.
    pub fn new(grace: Option<Duration>) -> Self {
        Self {
            grace: grace.filter(|g| !g.is_zero()),
            process_group: false,
            forwarded: 0,
            interrupted: false,
            killed: false,
            deadline: None,
        }
    }

    pub fn from_secs(grace_period_secs: u64) -> Self {
        Self::new(Some(Duration::from_secs(grace_period_secs)))
    }

    pub fn from_config(config: &ShutdownConfig) -> Self {
        Self::from_secs(config.grace_period_secs).with_process_group(config.process_group)
    }

    /// Target the child's process group instead of the child alone.
    pub fn with_process_group(mut self, enabled: bool) -> Self {
        self.process_group = enabled;
        self
    }

    pub fn process_group(&self) -> bool {
        self.process_group
    }

    /// Record a received signal and decide what to do about it.
    pub fn on_signal(&mut self, signal: RelaySignal, now: Instant) -> ShutdownAction {
        if signal == RelaySignal::Interrupt {
            self.interrupted = true;
        }
        if self.killed {
            return ShutdownAction::Ignore;
        }

        self.forwarded += 1;
        if self.forwarded > 1 {
            return self.escalate();
        }

        self.deadline = self.grace.map(|g| now + g);
        ShutdownAction::Forward(signal)
    }

    /// Called when [`deadline`](Self::deadline) has passed.
    pub fn on_grace_elapsed(&mut self) -> ShutdownAction {
        if self.killed {
            ShutdownAction::Ignore
        } else {
            self.escalate()
        }
    }

    fn escalate(&mut self) -> ShutdownAction {
        self.killed = true;
        self.deadline = None;
        ShutdownAction::Kill
    }

    /// When the grace period ends, if one is running.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether any SIGINT arrived while the child was running.
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }
}

/// Sleep until `deadline`, or forever when there is none.
pub async fn wait_for_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
