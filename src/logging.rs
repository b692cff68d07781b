//! Diagnostic logging for the CLI.
//!
//! Library code emits `tracing` events; only the binary installs a
//! subscriber. Events go to stderr so command output on stdout (BibTeX,
//! inventories) stays pipeable. `RUST_LOG` overrides the default filter.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter; `verbose` raises this crate to debug.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "scholar_page=debug,warn"
    } else {
        "scholar_page=info,warn"
    }
}

pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
