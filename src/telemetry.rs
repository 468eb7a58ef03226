//! Tracing setup for dashboards embedding `summary-plot-rs`.
//!
//! Builder and view assembly emit `debug`/`trace` events under the
//! `summary_plot` target. Hosts either call one of the helpers below or
//! install their own subscriber.

/// Default directive used when `RUST_LOG` is unset.
pub const DEFAULT_TRACING_DIRECTIVE: &str = "summary_plot=info";

/// Installs a compact subscriber filtered by `RUST_LOG`.
///
/// Falls back to [`DEFAULT_TRACING_DIRECTIVE`]. Returns `false` when the
/// `telemetry` feature is disabled or a global subscriber already exists.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_TRACING_DIRECTIVE));
        return install(filter);
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Installs a compact subscriber with an explicit directive such as
/// `"summary_plot=trace"`, ignoring `RUST_LOG`.
#[must_use]
pub fn init_tracing_with_directive(directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        return install(tracing_subscriber::EnvFilter::new(directive));
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directive;
        false
    }
}

#[cfg(feature = "telemetry")]
fn install(filter: tracing_subscriber::EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::{init_default_tracing, init_tracing_with_directive};

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn helpers_are_inert_without_feature() {
        assert!(!init_default_tracing());
        assert!(!init_tracing_with_directive("summary_plot=trace"));
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn second_install_is_refused() {
        let _ = init_tracing_with_directive("summary_plot=trace");
        assert!(!init_default_tracing());
    }
}
