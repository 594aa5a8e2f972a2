//! Logging setup for the relay binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the given default log level.
///
/// The default filter enables `default_log_level` for the relay crates and for
/// the binary itself. `RUST_LOG` overrides it entirely.
///
/// # Examples
///
/// ```no_run
/// use relay_shared::logger::setup_logger;
///
/// setup_logger("relay_server", "debug");
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

/// Build the filter directive used when `RUST_LOG` is not set.
fn default_filter(binary_name: &str, level: &str) -> String {
    let binary = binary_name.replace('-', "_");
    format!(
        "relay_server={level},relay_client={level},relay_shared={level},{binary}={level},tower_http={level}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_normalizes_binary_name() {
        // given (前提条件):
        let binary = "relay-server";

        // when (操作):
        let filter = default_filter(binary, "info");

        // then (期待する結果):
        assert!(filter.contains("relay_server=info"));
        assert!(!filter.contains("relay-server"));
        assert!(filter.ends_with("tower_http=info"));
    }
}
