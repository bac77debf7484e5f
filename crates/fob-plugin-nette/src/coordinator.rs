//! Publishes the dev server URL while the server is listening.
//!
//! The coordinator subscribes to the listener lifecycle. Once the socket is
//! bound it writes the [`InfoFile`] and updates `server.origin`; when the
//! listener closes it removes the file again. An interrupt closes the
//! listener first and only then exits the process, so the file never
//! outlives the server.

use std::path::PathBuf;
use std::sync::{Arc, Weak};

use fob_config::SharedConfig;
use fob_dev::{Handler, InterruptSource, ListenerEvent, ServerListener, Subscription, Terminator};
use parking_lot::Mutex;

use crate::error::{NetteError, Result};
use crate::info_file::InfoFile;
use crate::options::NetteOptions;
use crate::url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorState {
    /// Not listening yet
    Idle,
    /// Listening; the info file holds `url`
    Active { url: String },
    /// The listener closed and the info file was removed
    Terminated,
}

/// Handle to a coordinator. Clones share the same state.
#[derive(Clone)]
pub struct DevServerCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    options: NetteOptions,
    config: SharedConfig,
    terminator: Arc<dyn Terminator>,
    state: Mutex<CoordinatorState>,
    attachment: Mutex<Attachment>,
}

#[derive(Default)]
struct Attachment {
    listener: Option<Arc<dyn ServerListener>>,
    lifecycle: Vec<Subscription>,
    interrupt: Option<Subscription>,
}

impl DevServerCoordinator {
    pub fn new(options: NetteOptions, config: SharedConfig, terminator: Arc<dyn Terminator>) -> Self {
        Self {
            inner: Arc::new(Inner {
                options,
                config,
                terminator,
                state: Mutex::new(CoordinatorState::Idle),
                attachment: Mutex::new(Attachment::default()),
            }),
        }
    }

    /// `<build.outDir>/<infoFilePath>`
    pub fn info_file_path(&self) -> PathBuf {
        self.inner.info_file_path()
    }

    pub fn state(&self) -> CoordinatorState {
        self.inner.state.lock().clone()
    }

    pub fn is_attached(&self) -> bool {
        self.inner.attachment.lock().listener.is_some()
    }

    /// Follow `listener` and react to interrupts from `interrupts`.
    ///
    /// Attaching again replaces the previous listener. The interrupt
    /// subscription is kept across re-attachment and always closes the
    /// listener attached at the time of the interrupt.
    pub fn attach(&self, listener: Arc<dyn ServerListener>, interrupts: &dyn InterruptSource) -> Result<()> {
        let weak = Arc::downgrade(&self.inner);
        let source = Arc::downgrade(&listener);

        let on_listening: Handler = Arc::new({
            let weak = weak.clone();
            move || {
                let (Some(inner), Some(listener)) = (weak.upgrade(), source.upgrade()) else {
                    return Ok(());
                };
                inner.activate(listener.as_ref())?;
                Ok(())
            }
        });

        let on_close: Handler = Arc::new({
            let weak = weak.clone();
            move || {
                if let Some(inner) = weak.upgrade() {
                    inner.deactivate()?;
                }
                Ok(())
            }
        });

        let lifecycle = vec![
            listener.on(ListenerEvent::Listening, on_listening),
            listener.on(ListenerEvent::Close, on_close),
        ];

        let mut attachment = self.inner.attachment.lock();
        if attachment.interrupt.is_none() {
            let on_interrupt: Handler = Arc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.interrupt();
                }
                Ok(())
            });
            attachment.interrupt = Some(interrupts.on_interrupt(on_interrupt)?);
        }

        attachment.listener = Some(listener);
        attachment.lifecycle = lifecycle;
        tracing::debug!(path = %self.info_file_path().display(), "coordinator attached");
        Ok(())
    }

    /// Drop every subscription and forget the listener.
    pub fn detach(&self) {
        let previous = std::mem::take(&mut *self.inner.attachment.lock());
        drop(previous);
    }
}

impl Inner {
    fn info_file_path(&self) -> PathBuf {
        self.config.read().build.out_dir.join(&self.options.info_file_path)
    }

    fn activate(&self, listener: &dyn ServerListener) -> Result<()> {
        let port = listener.local_addr().ok_or(NetteError::NotListening)?.port();

        let (protocol, host) = {
            let config = self.config.read();
            (
                url::protocol(config.server.https),
                url::advertised_host(self.options.host.as_deref(), config.server.host.as_ref()),
            )
        };
        let dev_server = url::dev_server_url(protocol, &host, port);

        let path = self.info_file_path();
        InfoFile::new(dev_server.clone()).write(&path)?;
        self.config.set_origin(dev_server.clone());

        tracing::info!(url = %dev_server, path = %path.display(), "dev server info written");
        *self.state.lock() = CoordinatorState::Active { url: dev_server };
        Ok(())
    }

    fn deactivate(&self) -> Result<()> {
        let path = self.info_file_path();
        if InfoFile::remove(&path)? {
            tracing::info!(path = %path.display(), "dev server info removed");
        }

        let mut state = self.state.lock();
        if matches!(*state, CoordinatorState::Active { .. }) {
            *state = CoordinatorState::Terminated;
        }
        Ok(())
    }

    fn interrupt(&self) {
        let listener = self.attachment.lock().listener.clone();
        let terminator = Arc::clone(&self.terminator);
        let exit = Box::new(move || terminator.exit(0));

        match listener {
            Some(listener) => {
                tracing::debug!("interrupted, closing dev server");
                listener.close(exit);
            }
            None => exit(),
        }
    }
}
