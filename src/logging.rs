//! Tracing initialization and configuration.

use std::io::IsTerminal;
use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "REPODUMP_LOG";

static INIT: Once = Once::new();

/// Initialize the process-wide logger.
///
/// Reads `REPODUMP_LOG` for directives such as `repodump::scanner=debug`.
/// Falls back to `repodump=debug` when `verbose`, `repodump=info` otherwise.
/// Output goes to stderr. Calling this more than once has no effect.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose { "repodump=debug" } else { "repodump=info" };
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_target(verbose)
                    .without_time(),
            )
            .with(filter)
            .init();
    });
}
