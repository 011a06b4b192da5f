//! Diagnostic logging on stderr.
//!
//! Command results go to stdout; everything emitted through `tracing` goes to
//! stderr so the results stay pipeable.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise `verbose` selects `debug` for this
/// crate and the default is `warn`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "utility_cli=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second initialisation (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
