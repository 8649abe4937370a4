//! Opt-in tracing setup for hosts embedding the carousel.
//!
//! The library only emits `tracing` events. Hosts either install their own
//! subscriber or call one of these helpers once at startup.

/// Environment variable read for filter directives, `RUST_LOG` syntax.
pub const LOG_ENV_VAR: &str = "CAROUSEL_LOG";

/// Filter used when [`LOG_ENV_VAR`] is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "station_carousel=info";

/// Installs a compact stderr subscriber filtered by [`LOG_ENV_VAR`].
///
/// Returns `false` when the `telemetry` feature is disabled or the host
/// already installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    let directives = std::env::var(LOG_ENV_VAR).unwrap_or_default();
    init_tracing_with_filter(&directives)
}

/// Same as [`init_default_tracing`] with explicit filter directives, e.g.
/// `station_carousel::api=trace` to follow every timer fire and scroll
/// command. Empty or invalid directives fall back to [`DEFAULT_LOG_FILTER`].
#[must_use]
pub fn init_tracing_with_filter(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_new(directives)
            .ok()
            .filter(|_| !directives.trim().is_empty())
            .unwrap_or_else(|| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}

#[cfg(all(test, not(feature = "telemetry")))]
mod tests {
    use super::{init_default_tracing, init_tracing_with_filter};

    #[test]
    fn helpers_are_noops_without_telemetry_feature() {
        assert!(!init_default_tracing());
        assert!(!init_tracing_with_filter("station_carousel=trace"));
    }
}
