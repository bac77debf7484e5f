//! Fob CLI entry point.
//!
//! Parses arguments, sets up logging and dispatches to the command.

use clap::Parser;
use fob_cli::{cli, commands, logger, report, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Dev(dev_args) => commands::dev_execute(dev_args).await,
        cli::Command::Config(config_args) => commands::config_execute(config_args),
    };

    result.map_err(report::cli_error_to_miette)
}
