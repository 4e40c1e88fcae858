//! Logging setup
//!
//! Logs go to stderr so `--format json` / `--format yaml` output on stdout stays parseable.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides `--verbosity` with a full filter directive
pub const LOG_ENV: &str = "KUBEPUG_LOG";

/// Initializes `tracing` logging, preferring [`LOG_ENV`] over the CLI verbosity
pub fn initialize_logging(verbosity: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(verbosity));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(console::colors_enabled_stderr())
        .init();
}
