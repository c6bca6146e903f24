//! Flush completion bridge
//!
//! Carries the "buffer free to reuse" notification from the bus
//! transfer-done context back to the rendering surface. The completion
//! side only flips a signal: no allocation, no logging, no further bus
//! traffic, so it is safe from interrupt or DMA-completion context.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Per-display flush completion signal
///
/// One handle serves both sides: register a `&'static FlushReady` with
/// the bus transport at setup, and let the rendering surface wait on
/// the same handle. The typed reference replaces the untyped context
/// pointer hardware callback APIs usually thread through.
pub struct FlushReady {
    signal: Signal<CriticalSectionRawMutex, ()>,
}

impl FlushReady {
    /// Create an unsignaled handle
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Mark the in-flight transfer complete
    ///
    /// Callable from interrupt context; never blocks.
    pub fn finish(&self) {
        self.signal.signal(());
    }

    /// Whether a completion is pending
    pub fn is_ready(&self) -> bool {
        self.signal.signaled()
    }

    /// Consume the pending completion, if any
    pub fn try_take(&self) -> bool {
        self.signal.try_take().is_some()
    }

    /// Wait for the in-flight transfer to complete
    pub async fn wait(&self) {
        self.signal.wait().await;
    }
}

impl Default for FlushReady {
    fn default() -> Self {
        Self::new()
    }
}
