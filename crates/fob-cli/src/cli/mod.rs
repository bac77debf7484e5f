//! Command-line interface definition for fob.
//!
//! # Command Structure
//!
//! - `fob dev` - Serve the project and publish the dev server URL to the backend
//! - `fob config` - Print the resolved configuration

mod commands;
mod validation;

use clap::Parser;

pub use commands::{Command, ConfigArgs, DevArgs, ProjectArgs};
pub use validation::parse_host;

/// Fob - dev server for Nette projects
#[derive(Parser, Debug)]
#[command(
    name = "fob",
    version,
    about = "Dev server for Nette projects",
    long_about = "Fob serves the frontend sources of a Nette project during development.\n\
                  While running it writes its URL to www/assets/.vite/nette.json so the\n\
                  PHP backend can load assets from the dev server instead of the build."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    ///
    /// Outputs plain text without ANSI color codes. Useful for logging to
    /// files or systems that don't support colored terminal output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
