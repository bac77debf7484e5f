//! Process interrupt handling and termination.

use std::sync::OnceLock;

use crate::error::{DevError, Result};
use crate::events::{Emitter, Handler, Subscription};

/// The process-level interrupt (SIGINT / Ctrl+C).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupt;

/// Source of process interrupts that handlers can subscribe to.
pub trait InterruptSource: Send + Sync {
    fn on_interrupt(&self, handler: Handler) -> Result<Subscription>;
}

static CTRL_C: OnceLock<Emitter<Interrupt>> = OnceLock::new();

/// Interrupts delivered by the operating system.
///
/// A single tokio task per process waits for Ctrl+C and fans each signal out
/// to every live subscription, however many subscribers there are.
#[derive(Debug, Clone, Copy, Default)]
pub struct CtrlC;

impl InterruptSource for CtrlC {
    fn on_interrupt(&self, handler: Handler) -> Result<Subscription> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| DevError::NoRuntime)?;

        let emitter = CTRL_C.get_or_init(|| {
            let emitter = Emitter::new();
            let signals = emitter.clone();
            runtime.spawn(async move {
                while tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("Received Ctrl+C");
                    if let Err(e) = signals.emit(Interrupt) {
                        tracing::error!("Interrupt handler failed: {:#}", e);
                    }
                }
            });
            emitter
        });

        Ok(emitter.subscribe(Interrupt, handler))
    }
}

/// Ends the process once shutdown work is done.
pub trait Terminator: Send + Sync {
    fn exit(&self, code: i32);
}

/// Exits the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessTerminator;

impl Terminator for ProcessTerminator {
    fn exit(&self, code: i32) {
        tracing::debug!(code, "exiting");
        std::process::exit(code)
    }
}
