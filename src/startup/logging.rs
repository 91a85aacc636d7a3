//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter, falling back to `default` when `directive` does not parse.
pub fn build_filter(directive: &str, default: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber, writing to stderr so command output on
/// stdout stays clean. Calling it twice is harmless.
pub fn init_tracing(directive: &str) {
    let filter = build_filter(directive, super::config::DEFAULT_LOG_FILTER);
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
