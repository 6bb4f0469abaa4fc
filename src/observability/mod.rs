//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! launcher, installer, and supervisor events
//!     → logging.rs (tracing subscriber, stderr)
//! ```

pub mod logging;
