//! BIT College Observability
//!
//! Console logging for the BIT College binaries. Library crates only emit
//! `tracing` events; a binary calls [`init_basic_console_logging`] once at
//! startup to print them.
//!
//! # Examples
//!
//! ```no_run
//! use bitcollege_observability::init_basic_console_logging;
//!
//! init_basic_console_logging();
//! tracing::info!("ready");
//! ```

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events are shown at the configured level.
const TARGETS: [&str; 4] = [
    "bitcollege",
    "bitcollege_cli",
    "bitcollege_models",
    "bitcollege_core",
];

/// Build the default filter directive string for `log_level`.
pub fn default_directives(log_level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{}={}", target, log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize compact console logging.
///
/// # Configuration
///
/// - **Filter**: `RUST_LOG` when set, otherwise the BIT College crates at `LOG_LEVEL`
/// - **Log Level**: `LOG_LEVEL` environment variable (default: "info")
/// - **Format**: Compact, with targets and line numbers, written to stderr
pub fn init_basic_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&log_level)));

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    // try_init: tests and embedding hosts may already have a subscriber
    if tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives("debug"),
            "bitcollege=debug,bitcollege_cli=debug,bitcollege_models=debug,bitcollege_core=debug"
        );
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_basic_console_logging();
        init_basic_console_logging();
    }
}
