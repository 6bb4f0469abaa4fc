//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Snapshot env → Apply defaults → Install deps → Spawn server → Supervise
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → channel → supervisor → forwarded to child
//!
//! Shutdown (shutdown.rs):
//!     First signal forwarded → second signal or grace timeout → SIGKILL
//! ```
//!
//! # Design Decisions
//! - Ordered startup: install must succeed before the server starts
//! - The launcher never exits before its child does
//! - Shutdown has a timeout: forced kill after the grace period

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::ShutdownPolicy;
pub use signals::RelaySignal;
pub use startup::{LaunchPlan, Launcher};
