use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber with env-based filtering.
///
/// `RUST_LOG` wins when set; otherwise `level` (usually
/// [`AppConfig::log_level`](crate::AppConfig), read from `LOG_LEVEL`) is the
/// filter. Safe to call more than once; later calls keep the first
/// subscriber.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
