//! Flush transform pipeline
//!
//! One strategy is fixed when the display is configured; per-flush work
//! is only the transform itself plus the controller's draw call. The
//! caller serializes flushes: a new one must not start until the
//! previous completion has been observed.

use alloc::vec::Vec;

use phosphor_core::{ColorFormat, DisplayConfig, Panel, PanelError, Rect, Rotation};

use crate::ready::FlushReady;
use crate::rotate;
use crate::tiling;

/// How flush completion reaches the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Completion {
    /// The transport blocks; the pipeline signals after the draw
    /// returns
    Blocking,
    /// The transport signals the registered [`FlushReady`] from its
    /// transfer-done context
    External,
}

/// Transform strategy, selected once per display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlushStrategy {
    /// Controller rotates internally; only byte order needs correcting
    Direct,
    /// Rotate in software before handing the buffer to the controller
    Rotate,
    /// Retile 1-bit buffers into pages and push the whole panel
    MonoPages,
}

impl FlushStrategy {
    /// Pick the strategy for a display configuration
    pub fn select(config: &DisplayConfig) -> Self {
        if config.color_format == ColorFormat::Mono1 {
            FlushStrategy::MonoPages
        } else if config.hardware_rotation {
            FlushStrategy::Direct
        } else {
            FlushStrategy::Rotate
        }
    }
}

/// Apply a display configuration to a freshly reset panel
///
/// Runs the controller's power-up sequence, then the orientation and
/// offset the configuration calls for, then turns the output on.
pub fn setup_panel<P: Panel>(panel: &mut P, config: &DisplayConfig) -> Result<(), PanelError> {
    panel.init()?;
    if config.invert_colors {
        panel.invert_color(true)?;
    }
    if config.swap_xy {
        panel.swap_axes(true)?;
    }
    if config.mirror_x || config.mirror_y {
        panel.mirror(config.mirror_x, config.mirror_y)?;
    }
    if config.x_gap != 0 || config.y_gap != 0 {
        panel.set_offset(config.x_gap, config.y_gap)?;
    }
    panel.set_power(true)
}

/// Flush transform pipeline for one display
///
/// Owns the panel driver and, for the monochrome strategy, the
/// full-panel conversion buffer (allocated once here, reused across
/// flushes).
pub struct FlushPipeline<'a, P: Panel> {
    panel: P,
    config: DisplayConfig,
    strategy: FlushStrategy,
    completion: Completion,
    ready: &'a FlushReady,
    page_buf: Vec<u8>,
}

impl<'a, P: Panel> FlushPipeline<'a, P> {
    /// Build the pipeline for a configured display
    pub fn new(
        panel: P,
        config: DisplayConfig,
        ready: &'a FlushReady,
        completion: Completion,
    ) -> Result<Self, PanelError> {
        let strategy = FlushStrategy::select(&config);
        let page_buf = match strategy {
            FlushStrategy::MonoPages => {
                // One byte per column per page, whole pages even when
                // the height is not a multiple of 8
                let pages = (config.ver_res as usize).div_ceil(8);
                try_alloc(config.hor_res as usize * pages)?
            }
            _ => Vec::new(),
        };
        Ok(Self {
            panel,
            config,
            strategy,
            completion,
            ready,
            page_buf,
        })
    }

    /// Strategy fixed at construction
    pub fn strategy(&self) -> FlushStrategy {
        self.strategy
    }

    /// The panel behind the pipeline
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Mutable access to the panel, e.g. for contrast adjustment
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Tear down, handing the panel back
    pub fn release(self) -> P {
        self.panel
    }

    /// Push one rendered rectangle to the panel
    ///
    /// Exactly one completion notification reaches the surface per
    /// call: from here for blocking transports and for flushes that
    /// fail before the surface buffer is handed to the bus, from the
    /// transport's transfer-done context otherwise.
    pub fn flush(&mut self, area: Rect, px_map: &mut [u8]) -> Result<(), PanelError> {
        let res = self.dispatch(area, px_map);
        match (&res, self.completion) {
            // In-flight transfer: the bus signals when it drains
            (Ok(()), Completion::External) => {}
            // Blocking transport, or nothing in flight: the surface
            // buffer is free now
            _ => self.ready.finish(),
        }
        res
    }

    fn dispatch(&mut self, area: Rect, px_map: &mut [u8]) -> Result<(), PanelError> {
        area.validate()?;
        match self.strategy {
            FlushStrategy::Direct => self.flush_direct(area, px_map),
            FlushStrategy::Rotate => self.flush_rotated(area, px_map),
            FlushStrategy::MonoPages => self.flush_mono(px_map),
        }
    }

    /// Byte-order correction only; the controller handles orientation
    fn flush_direct(&mut self, area: Rect, px_map: &mut [u8]) -> Result<(), PanelError> {
        if self.config.color_format == ColorFormat::Rgb565 {
            rotate::swap_bytes16(px_map);
        }
        self.panel.draw_region(area, px_map)
    }

    /// Software rotation with destination-rect remapping
    fn flush_rotated(&mut self, area: Rect, px_map: &mut [u8]) -> Result<(), PanelError> {
        let hor = self.config.hor_res as i32;
        let ver = self.config.ver_res as i32;
        let Rect { x1, y1, x2, y2 } = area;
        let (w, h) = (x2 - x1, y2 - y1);

        let dest = match self.config.rotation {
            // Fast path: nothing to transform, no allocation
            Rotation::None => return self.panel.draw_region(area, px_map),
            // Quarter turn: the panel's vertical axis carries the
            // source's horizontal extent
            Rotation::Deg90 => Rect::new(y1, ver - x1 - w, y1 + h, ver - x1),
            // Point reflection through the panel center
            Rotation::Deg180 => Rect::new(hor - x1 - w, ver - y1 - h, hor - x1, ver - y1),
            // Complementary quarter turn
            Rotation::Deg270 => Rect::new(hor - y2, x1, hor - y2 + h, x2),
        };

        let px = self
            .config
            .color_format
            .bytes_per_pixel()
            .ok_or(PanelError::Unsupported)?;
        let len = w as usize * h as usize * px;
        if px_map.len() < len {
            return Err(PanelError::InvalidArgument);
        }
        let mut rotated = try_alloc(len)?;
        rotate::rotate(
            px_map,
            &mut rotated,
            w as usize,
            h as usize,
            px,
            self.config.rotation,
        );

        // `rotated` is dropped on return, success or failure
        self.panel.draw_region(dest, &rotated)
    }

    /// Full-frame monochrome retiling
    ///
    /// The rendering surface provides whole-panel buffers for 1-bit
    /// formats, and partial updates buy nothing once paging overhead is
    /// counted, so the entire panel goes out regardless of the dirty
    /// rectangle.
    fn flush_mono(&mut self, px_map: &[u8]) -> Result<(), PanelError> {
        let width = self.config.hor_res as usize;
        let height = self.config.ver_res as usize;
        let needed = tiling::PALETTE_HEADER_BYTES + width.div_ceil(8) * height;
        if px_map.len() < needed {
            return Err(PanelError::InvalidArgument);
        }

        tiling::pack_pages(px_map, &mut self.page_buf, width, height);
        let full = Rect::new(0, 0, width as i32, height as i32);
        self.panel.draw_region(full, &self.page_buf)
    }
}

/// Fallible allocation of a zeroed transform buffer
fn try_alloc(len: usize) -> Result<Vec<u8>, PanelError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| PanelError::OutOfMemory)?;
    buf.resize(len, 0);
    Ok(buf)
}
