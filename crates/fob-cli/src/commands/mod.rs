//! Command implementations for the fob CLI.
//!
//! - [`dev`] - Development server
//! - [`config`] - Print the resolved configuration
//!
//! Each command provides an `execute` function that takes the parsed command
//! arguments and returns a Result.

pub mod config;
pub mod dev;

pub use config::execute as config_execute;
pub use dev::execute as dev_execute;
