//! Deterministic stand-ins for the listener, interrupt source and process
//! exit, for testing plugins without a socket or real signals.

use std::net::SocketAddr;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::events::{Emitter, Handler, Subscription};
use crate::listener::{CloseCallback, ListenerEvent, ServerListener};
use crate::signal::{Interrupt, InterruptSource, Terminator};

/// Listener whose lifecycle is driven by the test.
#[derive(Default)]
pub struct FakeListener {
    events: Emitter<ListenerEvent>,
    addr: Mutex<Option<SocketAddr>>,
    close_requests: Mutex<usize>,
}

impl FakeListener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Bind to `addr` and emit `Listening`.
    pub fn start(&self, addr: SocketAddr) -> anyhow::Result<()> {
        *self.addr.lock() = Some(addr);
        self.events.emit(ListenerEvent::Listening)
    }

    /// Unbind and emit `Close`.
    pub fn stop(&self) -> anyhow::Result<()> {
        *self.addr.lock() = None;
        self.events.emit(ListenerEvent::Close)
    }

    pub fn handler_count(&self, event: ListenerEvent) -> usize {
        self.events.handler_count(event)
    }

    /// How many times `close` was requested.
    pub fn close_requests(&self) -> usize {
        *self.close_requests.lock()
    }
}

impl ServerListener for FakeListener {
    fn local_addr(&self) -> Option<SocketAddr> {
        *self.addr.lock()
    }

    fn on(&self, event: ListenerEvent, handler: Handler) -> Subscription {
        self.events.subscribe(event, handler)
    }

    fn close(&self, on_closed: CloseCallback) {
        *self.close_requests.lock() += 1;
        if self.local_addr().is_some() {
            if let Err(e) = self.stop() {
                tracing::error!("Close handler failed: {:#}", e);
            }
        }
        on_closed();
    }
}

/// Interrupt source triggered by the test.
#[derive(Debug, Default, Clone)]
pub struct FakeInterrupts {
    events: Emitter<Interrupt>,
}

impl FakeInterrupts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) -> anyhow::Result<()> {
        self.events.emit(Interrupt)
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.handler_count(Interrupt)
    }
}

impl InterruptSource for FakeInterrupts {
    fn on_interrupt(&self, handler: Handler) -> Result<Subscription> {
        Ok(self.events.subscribe(Interrupt, handler))
    }
}

/// Records exit codes instead of exiting.
#[derive(Debug, Default)]
pub struct RecordingTerminator {
    codes: Mutex<Vec<i32>>,
}

impl RecordingTerminator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn codes(&self) -> Vec<i32> {
        self.codes.lock().clone()
    }
}

impl Terminator for RecordingTerminator {
    fn exit(&self, code: i32) {
        self.codes.lock().push(code);
    }
}
