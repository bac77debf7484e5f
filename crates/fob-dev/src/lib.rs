//! Fob development server host.
//!
//! This crate owns the parts of the dev server that plugins interact with:
//!
//! - [`plugin`] - the [`DevPlugin`] hooks and the [`PluginDriver`] that runs them
//! - [`listener`] - the [`ServerListener`] lifecycle (`Listening` / `Close`)
//! - [`events`] - [`Emitter`] and [`Subscription`], the subscribe/dispose primitives
//! - [`signal`] - process interrupts and termination
//! - [`server`] - the axum-backed [`DevServer`]
//!
//! # Example
//!
//! ```rust,no_run
//! use fob_config::UserConfig;
//! use fob_dev::{ConfigEnv, DevServer, PluginDriver};
//!
//! # async fn run() -> fob_dev::Result<()> {
//! let driver = PluginDriver::default();
//! let config = driver.resolve_config(UserConfig::default(), &ConfigEnv::serve("."))?;
//!
//! let server = DevServer::new(config);
//! driver.configure_server(&server)?;
//! server.listen().await?;
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod error;
pub mod events;
pub mod listener;
pub mod plugin;
pub mod server;
pub mod signal;

#[cfg(feature = "testing")]
pub mod testing;

// Re-exports
pub use error::{DevError, Result};
pub use events::{Emitter, Handler, Subscription};
pub use listener::{CloseCallback, HttpListener, ListenerEvent, ServerListener};
pub use plugin::{Command, ConfigEnv, DevPlugin, PluginDriver};
pub use server::DevServer;
pub use signal::{CtrlC, Interrupt, InterruptSource, ProcessTerminator, Terminator};
