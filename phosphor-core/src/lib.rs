//! Controller-agnostic panel abstractions for the Phosphor display stack
//!
//! This crate contains everything that does not depend on a specific
//! controller or bus:
//!
//! - The [`Panel`] capability trait every controller driver implements
//! - The [`PanelIo`] bus transport boundary
//! - Geometry ([`Rect`]) and pixel format ([`ColorFormat`]) types
//! - Display configuration resolved once at startup
//! - The shared error taxonomy ([`PanelError`])

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod panel;

// Re-export key types at crate root for convenience
pub use color::ColorFormat;
pub use config::{DisplayConfig, Rotation};
pub use error::PanelError;
pub use geometry::Rect;
pub use io::PanelIo;
pub use panel::{Panel, PanelState};
