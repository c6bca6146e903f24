//! Flush transform pipeline and completion bridge
//!
//! Adapts rectangles rendered by a drawing surface to what a panel
//! controller can do natively:
//!
//! - Strategy selection fixed once per display configuration
//! - In-place byte-order correction for 16-bit formats
//! - Software rotation with destination-rect remapping
//! - Monochrome page tiling with a reusable conversion buffer
//! - ISR-safe flush-completion signaling back to the surface
//!
//! Rotation buffers are heap-allocated on the flush thread only; the
//! completion context never allocates.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod flush;
pub mod ready;
pub mod rotate;
pub mod tiling;

// Re-export key types at crate root for convenience
pub use flush::{setup_panel, Completion, FlushPipeline, FlushStrategy};
pub use ready::FlushReady;
