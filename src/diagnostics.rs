//! Tracing bootstrap for hosts embedding the core (extension bridge,
//! CLI harnesses, tests).

use tracing_subscriber::EnvFilter;

/// Default filter: our own diagnostics at info, everything else quiet.
pub const DEFAULT_LOG_FILTER: &str = "biotrend=info";

/// Initialize the global subscriber. Safe to call more than once; the
/// second initialization is a no-op.
pub fn init_diagnostics() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .try_init();
}
