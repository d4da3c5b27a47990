//! Logging bootstrap for binaries and tests embedding the bus.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the host application, with this helper as the shortcut.

use std::str::FromStr;

use tracing::Level;

/// Install a formatting subscriber capped at `level` ("error" .. "trace",
/// anything unrecognized falls back to "info").
///
/// Repeated calls are no-ops, so tests can call this freely.
pub fn init(level: &str) {
    let level = Level::from_str(level).unwrap_or(Level::INFO);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
