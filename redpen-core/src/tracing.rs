//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Redpen tracing/logging system.
///
/// Reads the `REDPEN_LOG` environment variable for per-subsystem log levels.
/// Format: `REDPEN_LOG=redpen_analysis=debug,redpen_store=warn`
///
/// Falls back to `redpen=info` if `REDPEN_LOG` is not set or is invalid.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("REDPEN_LOG")
            .unwrap_or_else(|_| EnvFilter::new("redpen=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init();
    });
}
