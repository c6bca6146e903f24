//! Logical display coordinates
//!
//! A [`Rect`] is exclusive on the high side: `x2`/`y2` are one past the
//! last column/row, so an 8x8 region at the origin is `(0, 0, 8, 8)`.
//! Degenerate rectangles are rejected, never clamped.

use crate::error::PanelError;

/// A rectangle in logical display coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    /// One past the last column
    pub x2: i32,
    /// One past the last row
    pub y2: i32,
}

impl Rect {
    /// Create a rectangle; no validation happens here
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Reject empty or inverted rectangles
    pub fn validate(&self) -> Result<(), PanelError> {
        if self.x1 >= self.x2 || self.y1 >= self.y2 {
            return Err(PanelError::InvalidArgument);
        }
        Ok(())
    }

    /// Width in pixels
    pub const fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    /// Height in pixels
    pub const fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Shift all four coordinates by an offset
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
        }
    }

    /// Swap the x and y axes
    pub const fn transpose(&self) -> Self {
        Self {
            x1: self.y1,
            y1: self.x1,
            x2: self.y2,
            y2: self.x2,
        }
    }
}
