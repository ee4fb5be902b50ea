//! Opt-in log output for hosts that do not install their own subscriber.
//!
//! Every module logs through `tracing`; nothing is printed unless a
//! subscriber is installed, either by the host or by [`init_tracing`].

/// Filter used when `RUST_LOG` is unset: this crate at `info`, everything else at `warn`.
pub const DEFAULT_LOG_FILTER: &str = "warn,burnup_lens=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG` or [`DEFAULT_LOG_FILTER`].
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_LOG_FILTER)
}

/// Like [`init_default_tracing`] with a caller-chosen fallback filter.
///
/// `RUST_LOG` still takes precedence; an unparsable `fallback` falls back to
/// [`DEFAULT_LOG_FILTER`].
#[must_use]
pub fn init_tracing(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
        if installed {
            tracing::debug!(fallback, "installed burnup-lens log subscriber");
        }
        installed
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
