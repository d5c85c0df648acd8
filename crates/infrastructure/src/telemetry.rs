//! Telemetry initialization

use tracing_subscriber::EnvFilter;

/// Initialize tracing with the default `info` filter
pub fn init() {
    init_with_filter("info");
}

/// Initialize tracing, honoring `RUST_LOG` when set
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
