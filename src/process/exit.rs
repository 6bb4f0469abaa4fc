//! How a supervised child finished, and the exit code that implies.

use std::process::ExitStatus;

use crate::error::EXIT_INTERRUPTED;

/// Final state of a supervised child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Exited on its own (or after a forwarded SIGTERM) with this code.
    Exited(i32),
    /// Terminated by this signal with no interrupt involved.
    Signaled(i32),
    /// A SIGINT reached the launcher before the child exited.
    Interrupted,
}

impl ExitOutcome {
    pub fn from_status(status: ExitStatus, interrupted: bool) -> Self {
        if interrupted {
            return ExitOutcome::Interrupted;
        }
        if let Some(code) = status.code() {
            return ExitOutcome::Exited(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ExitOutcome::Signaled(signal);
            }
        }
        ExitOutcome::Exited(1)
    }

    /// Exit code following the shell convention of `128 + signal`.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExitOutcome::Exited(code) => *code,
            ExitOutcome::Signaled(signal) => 128 + signal,
            ExitOutcome::Interrupted => EXIT_INTERRUPTED,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExitOutcome::Exited(0))
    }
}
