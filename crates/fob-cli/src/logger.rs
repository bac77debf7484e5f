//! Logging setup for the fob CLI.
//!
//! Library crates emit `tracing` events; the CLI installs the subscriber.
//! `RUST_LOG` replaces the default filter unless `--verbose` or `--quiet` is
//! given.
//!
//! # Example
//!
//! ```rust,no_run
//! use fob_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("Starting dev server");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: &[&str] = &["fob", "fob_cli", "fob_config", "fob_dev", "fob_plugin_nette"];

/// Filter directive for every fob crate at `level`.
fn directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(directives("debug"))
    } else if quiet {
        EnvFilter::new(directives("error"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives("info")))
    }
}

/// Initialize the tracing subscriber.
///
/// Call once at startup, before anything logs.
///
/// * `verbose` - debug level for fob crates
/// * `quiet` - errors only
/// * `no_color` - plain output without ANSI codes
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter(verbose, quiet))
        .with(fmt_layer)
        .init();
}
