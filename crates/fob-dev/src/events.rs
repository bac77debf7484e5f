//! Subscription primitives shared by the listener and the interrupt source.
//!
//! An [`Emitter`] keeps handlers per event kind. Subscribing returns a
//! [`Subscription`] that removes the handler when unsubscribed or dropped,
//! so whoever holds the subscription owns the registration.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// Callback invoked when an event fires.
///
/// Errors are returned to whoever emitted the event.
pub type Handler = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

struct Registry<E> {
    next_id: u64,
    handlers: Vec<(u64, E, Handler)>,
}

/// Registry of handlers keyed by event kind.
pub struct Emitter<E> {
    registry: Arc<Mutex<Registry<E>>>,
}

impl<E> Clone for Emitter<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }
}

impl<E> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("handlers", &self.registry.lock().handlers.len())
            .finish()
    }
}

impl<E> Emitter<E>
where
    E: Copy + PartialEq + Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event`.
    pub fn subscribe(&self, event: E, handler: Handler) -> Subscription {
        let id = {
            let mut registry = self.registry.lock();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.handlers.push((id, event, handler));
            id
        };

        let registry = Arc::downgrade(&self.registry);
        Subscription::new(move || remove(&registry, id))
    }

    /// Invoke every handler registered for `event`, in subscription order.
    ///
    /// Stops at the first failing handler and returns its error. Handlers are
    /// collected before any of them runs, so a handler may subscribe,
    /// unsubscribe or emit again without deadlocking.
    pub fn emit(&self, event: E) -> anyhow::Result<()> {
        let handlers: Vec<Handler> = self
            .registry
            .lock()
            .handlers
            .iter()
            .filter(|(_, kind, _)| *kind == event)
            .map(|(_, _, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            handler()?;
        }

        Ok(())
    }

    /// Number of handlers currently registered for `event`.
    pub fn handler_count(&self, event: E) -> usize {
        self.registry
            .lock()
            .handlers
            .iter()
            .filter(|(_, kind, _)| *kind == event)
            .count()
    }
}

fn remove<E>(registry: &Weak<Mutex<Registry<E>>>, id: u64) {
    if let Some(registry) = registry.upgrade() {
        registry.lock().handlers.retain(|(entry, _, _)| *entry != id);
    }
}

/// Disposer for a registered handler.
///
/// The handler stays registered for as long as the subscription is alive.
#[must_use = "dropping a Subscription unregisters its handler"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    /// Unregister the handler now.
    pub fn unsubscribe(mut self) {
        self.dispose_now();
    }

    fn dispose_now(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.dispose.is_some())
            .finish()
    }
}
