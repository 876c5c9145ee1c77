//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once, at the composition root
//! - Respect `RUST_LOG` over the configured level when set

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
pub fn init(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("characterology_chat={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
