//! Logging setup utilities for the chat relay.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Logging is enabled for the server library crate, the shared crate and the
/// binary itself. The level can be overridden with the `RUST_LOG` environment
/// variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "chatrelay-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use chatrelay_shared::logger::setup_logger;
///
/// setup_logger("chatrelay-server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the default `EnvFilter` directive string.
///
/// Crate names are normalized to their Rust identifier form (`-` → `_`).
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    [
        "chatrelay_server",
        env!("CARGO_PKG_NAME"),
        binary_name,
        "tower_http",
    ]
    .iter()
    .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
    .collect::<Vec<_>>()
    .join(",")
}
