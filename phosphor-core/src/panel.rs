//! Panel capability trait
//!
//! The contract every controller driver satisfies. The rendering side
//! talks to `dyn Panel` (or a concrete driver) and never learns which
//! controller family sits behind it; each driver owns its own state
//! struct, there is no common base layout.

use crate::error::PanelError;
use crate::geometry::Rect;

/// Driver lifecycle
///
/// There is no way back to `Uninitialized`; dropping the driver is
/// terminal from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelState {
    /// Constructed, no commands sent yet
    Uninitialized,
    /// Reset line pulsed (or skipped when absent)
    Reset,
    /// Power-up sequence accepted, draw calls allowed
    Active,
}

/// Capability contract for one physical display controller
///
/// Orientation setters (`swap_axes`, `set_offset`) mutate stored state
/// consulted by the next `draw_region`; command-backed setters
/// (`invert_color`, `mirror`, `set_power`) reach the controller
/// immediately. Dropping the driver (or calling its inherent `release`)
/// takes the place of an explicit destroy operation: the reset line and
/// bus handle go back to the caller and the handle cannot be used again.
pub trait Panel {
    /// Pulse the physical reset line, with settle delays either side
    ///
    /// Succeeds as a no-op when no reset line is configured; fails with
    /// [`PanelError::Transport`] only if toggling the line itself fails.
    fn reset(&mut self) -> Result<(), PanelError>;

    /// Issue the controller's fixed power-up command sequence
    ///
    /// The requested bit depth is checked before any bus traffic; a
    /// mismatch is [`PanelError::Unsupported`]. A rejected command
    /// aborts the sequence without rollback - the controller is left
    /// powered off, which is safe.
    fn init(&mut self) -> Result<(), PanelError>;

    /// Push a pixel payload to a rectangular region
    ///
    /// `rect` is in logical coordinates, exclusive on the high side.
    /// Malformed rectangles are rejected before any bus traffic.
    fn draw_region(&mut self, rect: Rect, pixels: &[u8]) -> Result<(), PanelError>;

    /// Invert the displayed colors
    fn invert_color(&mut self, invert: bool) -> Result<(), PanelError>;

    /// Mirror the scan direction per axis
    fn mirror(&mut self, mirror_x: bool, mirror_y: bool) -> Result<(), PanelError>;

    /// Exchange the x and y axes for subsequent draws
    fn swap_axes(&mut self, swap: bool) -> Result<(), PanelError>;

    /// Set the gap added to every draw coordinate, compensating for
    /// non-visible controller memory margins
    fn set_offset(&mut self, x_gap: i32, y_gap: i32) -> Result<(), PanelError>;

    /// Toggle the display output without losing RAM contents
    fn set_power(&mut self, on: bool) -> Result<(), PanelError>;
}
