//! Structured logging.
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logs
//! - `RUST_LOG` wins; otherwise the configured level applies to this crate
//! - Logs go to stderr so they never interleave with the child's stdout

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(log_level: &str) -> String {
    format!("dev_launcher={}", log_level)
}

/// Install the global subscriber. Call once, early in `main`.
pub fn init(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(log_level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
