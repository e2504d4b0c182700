//! Log output for the CLI.
//!
//! Messages go to stderr so command output on stdout stays machine readable.
//! `RUST_LOG` takes precedence over the command-line level.

use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Filter directive for the requested level; `quiet` keeps only warnings and errors.
pub fn filter_directive(level: &str, quiet: bool) -> &str {
    if quiet { "warn" } else { level }
}

/// Install the global subscriber. A second call leaves the first one in place.
pub fn init_logging(level: &str, quiet: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level, quiet)));

    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    if Registry::default().with(env_filter).with(fmt_layer).try_init().is_ok() {
        tracing::debug!("Logging initialized: level={}, quiet={}", level, quiet);
    }
}
