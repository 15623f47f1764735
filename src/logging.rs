//! Diagnostic logging to stderr.
//!
//! `RUST_LOG` wins when set. Otherwise `--verbose` means `debug` and the
//! configured `logging.level` is used.

use tracing_subscriber::EnvFilter;

pub fn filter_directive(configured: &str, verbose: bool) -> String {
    if verbose {
        "debug".to_string()
    } else if configured.trim().is_empty() {
        "info".to_string()
    } else {
        configured.trim().to_string()
    }
}

pub fn init(configured: &str, verbose: bool) {
    let fallback = filter_directive(configured, verbose);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
