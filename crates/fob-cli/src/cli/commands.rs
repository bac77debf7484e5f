use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::parse_host;

/// Available fob subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the development server
    ///
    /// Serves the project root, publishes the dev server URL for the Nette
    /// backend while listening and removes it again on shutdown.
    Dev(DevArgs),

    /// Print the resolved configuration as JSON
    ///
    /// Applies the same defaults, environment variables and flags as `fob dev`
    /// without starting the server.
    Config(ConfigArgs),
}

/// Options shared by every command that resolves the project configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Port for the development server
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Host to bind to
    ///
    /// Passing `--host` without a value binds every interface.
    #[arg(
        long,
        value_name = "HOST",
        num_args = 0..=1,
        default_missing_value = "0.0.0.0",
        value_parser = parse_host
    )]
    pub host: Option<String>,

    /// Serve over HTTPS
    #[arg(long)]
    pub https: bool,

    /// Project directory (defaults to the current directory)
    ///
    /// The config file is looked up here and all relative paths are resolved
    /// against it.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Path to the config file (defaults to fob.toml or the fob field of package.json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the dev command
#[derive(Args, Debug)]
pub struct DevArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print the configuration before plugin defaults are applied
    #[arg(long)]
    pub raw: bool,
}
