//! Fob CLI - dev server for Nette projects.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - `fob dev` and `fob config`
//! - [`config`] - config file, environment and flag merging
//! - [`error`] - [`CliError`] and context helpers
//! - [`report`] - miette rendering of errors at the binary boundary
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages for humans
//!
//! # Example
//!
//! ```rust
//! use fob_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod report;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
