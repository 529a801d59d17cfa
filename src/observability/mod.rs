//! # Observability
//!
//! Structured logging setup for host applications embedding the adapters.
//! The adapters themselves only emit `tracing` events; installing a
//! subscriber is the host's choice, and [`init_tracing`] is a convenience
//! for hosts that do not bring their own.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::errors::{GantryError, Result};

/// Install a global `tracing` subscriber configured from [`Settings`].
///
/// The filter directive comes from `Settings::log_level` (overridable per
/// invocation via `RUST_LOG`), and output is human-readable text or JSON
/// per `Settings::log_json`. Fails with a `Config` error if a subscriber
/// is already installed.
pub fn init_tracing(settings: &Settings) -> Result<()> {
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .map_err(|err| {
            GantryError::config(format!("invalid log filter '{}': {}", settings.log_level, err))
        })?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = if settings.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|err| {
        GantryError::config(format!("failed to install tracing subscriber: {}", err))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_text() {
        let settings = Settings { log_level: "debug".to_string(), ..Default::default() };

        // First call may win the global subscriber slot; a second install
        // attempt must come back as a Config error, not a panic.
        let first = init_tracing(&settings);
        let second = init_tracing(&settings);

        assert!(first.is_ok() || matches!(first, Err(GantryError::Config { .. })));
        assert!(matches!(second, Err(GantryError::Config { .. })));
    }
}
