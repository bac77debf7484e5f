//! Lifecycle of the dev server's bound socket.

use std::net::SocketAddr;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::events::{Emitter, Handler, Subscription};

/// Events emitted by a [`ServerListener`].
///
/// Each is delivered at most once per bind cycle, `Listening` before `Close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerEvent {
    /// The socket is bound and accepting connections
    Listening,
    /// The socket was closed and no longer accepts connections
    Close,
}

/// Callback run once a requested close has completed.
pub type CloseCallback = Box<dyn FnOnce() + Send>;

/// Handle to a listening socket, as seen by plugins.
pub trait ServerListener: Send + Sync {
    /// Address the socket is bound to, `None` while not listening.
    fn local_addr(&self) -> Option<SocketAddr>;

    /// Subscribe to a lifecycle event.
    fn on(&self, event: ListenerEvent, handler: Handler) -> Subscription;

    /// Ask the listener to stop accepting connections.
    ///
    /// `on_closed` runs after the `Close` handlers have run, or right away
    /// when the listener is not listening.
    fn close(&self, on_closed: CloseCallback);
}

/// Listener backing [`DevServer`](crate::DevServer).
#[derive(Default)]
pub struct HttpListener {
    events: Emitter<ListenerEvent>,
    addr: Mutex<Option<SocketAddr>>,
    shutdown: Notify,
    pending_close: Mutex<Vec<CloseCallback>>,
}

impl HttpListener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn is_listening(&self) -> bool {
        self.addr.lock().is_some()
    }

    pub(crate) fn mark_listening(&self, addr: SocketAddr) -> anyhow::Result<()> {
        *self.addr.lock() = Some(addr);
        self.events.emit(ListenerEvent::Listening)
    }

    /// Resolves once `close` has been requested.
    pub(crate) async fn shutdown_requested(&self) {
        self.shutdown.notified().await
    }

    /// Record that the socket is gone, run `Close` handlers, then the
    /// callbacks of whoever asked for the close.
    pub(crate) fn mark_closed(&self) -> anyhow::Result<()> {
        *self.addr.lock() = None;
        let result = self.events.emit(ListenerEvent::Close);

        let callbacks = std::mem::take(&mut *self.pending_close.lock());
        for callback in callbacks {
            callback();
        }

        result
    }
}

impl ServerListener for HttpListener {
    fn local_addr(&self) -> Option<SocketAddr> {
        *self.addr.lock()
    }

    fn on(&self, event: ListenerEvent, handler: Handler) -> Subscription {
        self.events.subscribe(event, handler)
    }

    fn close(&self, on_closed: CloseCallback) {
        if !self.is_listening() {
            on_closed();
            return;
        }

        tracing::debug!("close requested");
        self.pending_close.lock().push(on_closed);
        self.shutdown.notify_one();
    }
}
