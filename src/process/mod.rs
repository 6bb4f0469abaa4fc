//! Child process subsystem.
//!
//! # Data Flow
//! ```text
//! CommandSpec + EnvMap
//!     → spawn.rs (tokio::process::Command, inherited stdio)
//!     → supervisor.rs (wait ⟷ relay signals ⟷ escalate)
//!     → exit.rs (ExitOutcome → exit code)
//! ```
//!
//! # Design Decisions
//! - One child at a time: the installer, then the dev server
//! - Children get an explicit environment, never the launcher's implicitly
//! - `kill_on_drop` so an aborted launch never leaks a child

pub mod exit;
pub mod spawn;
pub mod supervisor;

pub use exit::ExitOutcome;
pub use spawn::spawn;
pub use supervisor::supervise;
