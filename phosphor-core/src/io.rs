//! Bus transport boundary
//!
//! The byte-level transfer mechanism (I2C, SPI, parallel) is external to
//! this layer; controller drivers consume it through [`PanelIo`] and
//! never see pins or peripherals.

use crate::error::PanelError;

/// Byte-oriented command/data transport to a panel controller
///
/// Implementations frame the bytes for their physical bus (control
/// phases, D/C line toggling). Failures surface as
/// [`PanelError::Transport`] and are not retried at this layer.
pub trait PanelIo {
    /// Send a command byte followed by its parameter bytes
    fn send_command(&mut self, code: u8, params: &[u8]) -> Result<(), PanelError>;

    /// Stream a pixel payload into the controller RAM
    ///
    /// Interrupt- or DMA-driven transports may return before the
    /// transfer has drained; completion then reaches the rendering
    /// surface through the notification handle registered with the
    /// transport at setup time.
    fn send_pixels(&mut self, payload: &[u8]) -> Result<(), PanelError>;
}
