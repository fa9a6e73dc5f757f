//! 日志初始化
//!
//! The libraries log through the `log` facade; `init()` installs the bridge so
//! those records reach the same subscriber as this binary's `tracing` events.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::LogLevel;

/// Default filter directives for `level` when `RUST_LOG` is not set.
pub fn default_directives(level: LogLevel) -> String {
    let level = level.as_str();
    format!("dns_purge={level},dns_purge_core={level},dns_purge_provider={level},reqwest=warn,hyper=warn")
}

/// Log to stderr; `RUST_LOG` takes precedence over `--log-level`.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}
