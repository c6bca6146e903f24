//! Shared error taxonomy for the panel driver layer

/// Errors surfaced by panel drivers and the flush pipeline
///
/// Argument checks happen before any bus traffic, so a rejected call
/// leaves the controller untouched. Transport failures are reported as
/// seen; nothing at this layer retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Malformed rectangle, or a pixel buffer too small for the region
    InvalidArgument,
    /// Bit depth or color format this driver cannot serve
    Unsupported,
    /// A bus command or pixel payload transfer was rejected
    Transport,
    /// Temporary rotation/conversion buffer allocation failed
    OutOfMemory,
}
