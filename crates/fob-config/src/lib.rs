//! Configuration for the fob dev server.
//!
//! - [`UserConfig`]: what the user wrote (every field optional)
//! - [`ResolvedConfig`]: the final configuration with defaults applied
//! - [`SharedConfig`]: the handle hooks use to read it, and to publish the
//!   dev server origin once it is known
//! - [`ConfigDiscovery`]: loading `fob.toml` or the `fob` field of `package.json`

pub mod config;
pub mod discovery;
pub mod error;
pub mod resolved;

// Re-export main types
pub use config::*;
pub use discovery::ConfigDiscovery;
pub use error::*;
pub use resolved::*;
