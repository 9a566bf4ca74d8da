//! Telemetry - structured logging setup

use tracing_subscriber::EnvFilter;

/// Map `-v` repetitions onto a tracing filter
#[must_use]
pub const fn log_filter_from_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global fmt subscriber, writing to stderr
///
/// `RUST_LOG` wins over the verbosity-derived filter when set.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
