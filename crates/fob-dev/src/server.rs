//! Development HTTP server.
//!
//! Serves the project root as static files, applies the resolved CORS and
//! allowed-hosts policy, and drives [`HttpListener`] lifecycle events so
//! plugins can react to the socket being bound and closed.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header, request::Parts},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use fob_config::{ResolvedConfig, SharedConfig};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::access::{AllowedOrigins, HostFilter};
use crate::error::{DevError, Result};
use crate::listener::{HttpListener, ListenerEvent, ServerListener};

/// Development server.
pub struct DevServer {
    /// Resolved configuration shared with plugins
    config: SharedConfig,
    /// Lifecycle of the bound socket
    listener: Arc<HttpListener>,
}

impl DevServer {
    /// Create a new development server.
    ///
    /// Nothing is bound until [`DevServer::listen`] is called, so plugins can
    /// subscribe to listener events first.
    pub fn new(config: SharedConfig) -> Self {
        Self {
            config,
            listener: HttpListener::new(),
        }
    }

    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// Listener handle for subscribing to `Listening` / `Close`.
    pub fn listener(&self) -> Arc<dyn ServerListener> {
        self.listener.clone()
    }

    /// URL of the bound socket, `None` while not listening.
    pub fn server_url(&self) -> Option<String> {
        let addr = self.listener.local_addr()?;
        let protocol = self.config.read().protocol();
        Some(format!("{}://{}", protocol, addr))
    }

    /// Request a graceful shutdown.
    pub fn close(&self) {
        self.listener.close(Box::new(|| {}));
    }

    /// Bind the configured address and serve until closed.
    ///
    /// Emits `Listening` once bound and `Close` after the server stopped.
    ///
    /// # Errors
    ///
    /// Returns error if the address cannot be bound, if a lifecycle handler
    /// fails, or if serving fails.
    pub async fn listen(&self) -> Result<()> {
        if let Some(addr) = self.listener.local_addr() {
            return Err(DevError::AlreadyListening(addr));
        }

        let config = self.config.snapshot();
        let app = build_router(&config)?;

        let addr = config.bind_address();
        let tcp = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| DevError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = tcp.local_addr()?;

        tracing::info!(%local_addr, "dev server listening");

        if let Err(source) = self.listener.mark_listening(local_addr) {
            drop(tcp);
            if let Err(e) = self.listener.mark_closed() {
                tracing::error!("Close handler failed after listening error: {:#}", e);
            }
            return Err(DevError::Lifecycle {
                event: ListenerEvent::Listening,
                source,
            });
        }

        let listener = Arc::clone(&self.listener);
        let served = axum::serve(tcp, app)
            .with_graceful_shutdown(async move { listener.shutdown_requested().await })
            .await;

        tracing::info!(%local_addr, "dev server closed");
        let closed = self.listener.mark_closed();

        served.map_err(DevError::Serve)?;
        closed.map_err(|source| DevError::Lifecycle {
            event: ListenerEvent::Close,
            source,
        })
    }
}

/// Build the axum router for the given configuration.
///
/// - Static files from `root`
/// - `Host` header validation against `server.allowedHosts`
/// - CORS restricted to `server.cors`
fn build_router(config: &ResolvedConfig) -> Result<Router> {
    let origins = AllowedOrigins::new(&config.server.cors)?;
    let hosts = Arc::new(HostFilter::new(config.server.allowed_hosts.clone()));

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin.to_str().is_ok_and(|origin| origins.matches(origin))
            },
        ))
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .fallback_service(ServeDir::new(&config.root))
        .layer(middleware::from_fn_with_state(hosts, check_host))
        .layer(cors))
}

/// Reject requests whose `Host` header is not allowed.
async fn check_host(State(hosts): State<Arc<HostFilter>>, request: Request, next: Next) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    match host {
        Some(host) if !hosts.is_allowed(&host) => {
            tracing::warn!(%host, "blocked request");
            (
                StatusCode::FORBIDDEN,
                format!(
                    "Blocked request. This host ({host}) is not allowed.\n\
                     To allow this host, add it to server.allowedHosts in fob.toml."
                ),
            )
                .into_response()
        }
        _ => next.run(request).await,
    }
}
