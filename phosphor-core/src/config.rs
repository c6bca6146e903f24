//! Display configuration resolved once at startup
//!
//! Orientation, gaps and transform strategy are decided when the display
//! is brought up and carried by a plain configuration value; nothing in
//! the flush hot path re-derives them.

use crate::color::ColorFormat;

/// Rendering-surface rotation relative to the physical panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    None,
    Deg90,
    Deg180,
    Deg270,
}

/// Per-display configuration
///
/// One value per physical display, built by the board bring-up code and
/// handed to the flush pipeline at construction.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Horizontal resolution in pixels
    pub hor_res: u32,
    /// Vertical resolution in pixels
    pub ver_res: u32,
    /// Format the rendering surface draws in
    pub color_format: ColorFormat,
    /// Rotation between rendering and panel coordinates
    pub rotation: Rotation,
    /// Whether the controller applies the rotation itself (via its
    /// scan-direction/remap commands) so the pipeline does not have to
    pub hardware_rotation: bool,
    /// IPS panels need inverted colors
    pub invert_colors: bool,
    /// Swap x/y axes at setup
    pub swap_xy: bool,
    /// Mirror horizontally at setup
    pub mirror_x: bool,
    /// Mirror vertically at setup
    pub mirror_y: bool,
    /// Horizontal offset into non-visible controller memory
    pub x_gap: i32,
    /// Vertical offset into non-visible controller memory
    pub y_gap: i32,
}

impl DisplayConfig {
    /// Configuration with no rotation, mirroring or gap
    pub const fn new(hor_res: u32, ver_res: u32, color_format: ColorFormat) -> Self {
        Self {
            hor_res,
            ver_res,
            color_format,
            rotation: Rotation::None,
            hardware_rotation: false,
            invert_colors: false,
            swap_xy: false,
            mirror_x: false,
            mirror_y: false,
            x_gap: 0,
            y_gap: 0,
        }
    }
}
