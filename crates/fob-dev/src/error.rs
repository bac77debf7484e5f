//! Error types for the dev server host.

use thiserror::Error;

pub type Result<T, E = DevError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DevError {
    /// The listener socket could not be bound
    #[error("Failed to bind to {addr}: {source}\n\nHint: Choose another port with --port or stop the process using it")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP server stopped with an error
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    /// A plugin hook or lifecycle handler failed
    #[error("Plugin '{plugin}' failed in {hook}: {source:#}")]
    Hook {
        plugin: String,
        hook: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// A listener lifecycle handler failed
    #[error("Listener {event:?} handler failed: {source:#}")]
    Lifecycle {
        event: crate::listener::ListenerEvent,
        #[source]
        source: anyhow::Error,
    },

    /// `listen` was called while the listener is already bound
    #[error("Dev server is already listening on {0}")]
    AlreadyListening(std::net::SocketAddr),

    /// Signal handling needs a running tokio runtime
    #[error("Interrupt handler requires a running tokio runtime")]
    NoRuntime,

    /// An allowed CORS origin is not a valid regular expression
    #[error("Invalid CORS origin pattern '{pattern}': {source}")]
    InvalidOrigin {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DevError {
    pub(crate) fn hook(plugin: impl Into<String>, hook: &'static str, source: anyhow::Error) -> Self {
        DevError::Hook {
            plugin: plugin.into(),
            hook,
            source,
        }
    }
}
