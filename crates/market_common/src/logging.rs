//! Logging utilities for the marketplace backend.
//!
//! Provides a standardized tracing setup used by the binary and the
//! integration tests.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default INFO level.
///
/// Call once at startup. Respects `RUST_LOG` when present.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
pub fn init_with_level(level: Level) {
    // RUST_LOG wins when set; otherwise our crates log at `level` and
    // dependencies stay at warn.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let crates = [
            "market_backend",
            "market_auth",
            "market_checkout",
            "market_catalog",
            "market_stripe",
            "market_db",
            "market_common",
        ];
        let directives = crates
            .iter()
            .map(|name| format!("{name}={level}"))
            .collect::<Vec<_>>()
            .join(",");
        EnvFilter::new(format!("warn,{directives}"))
    });

    // try_init so tests that race to initialize don't panic
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
