//! Logging bootstrap.

/// Install the global `tracing` subscriber, filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops. Hosts that install
/// their own subscriber simply skip this.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
