//! SSD1306 OLED panel driver
//!
//! Driver for 128x64-class SSD1306 monochrome OLEDs. The controller
//! addresses its RAM in pages of 8 rows: a draw maps the target
//! rectangle to a column range and a page range, then streams the
//! payload in a single transfer. Orientation state (gap, axis swap)
//! lives in the driver and is applied to the next draw, not
//! retroactively.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use phosphor_core::{ColorFormat, Panel, PanelError, PanelIo, PanelState, Rect};

/// SSD1306 command set
#[allow(dead_code)]
pub mod cmd {
    pub const SET_MEMORY_ADDR_MODE: u8 = 0x20;
    pub const SET_COLUMN_RANGE: u8 = 0x21;
    pub const SET_PAGE_RANGE: u8 = 0x22;
    pub const RIGHT_HORIZONTAL_SCROLL: u8 = 0x26;
    pub const LEFT_HORIZONTAL_SCROLL: u8 = 0x27;
    pub const VERTICAL_AND_RIGHT_HORIZONTAL_SCROLL: u8 = 0x29;
    pub const VERTICAL_AND_LEFT_HORIZONTAL_SCROLL: u8 = 0x2A;
    pub const DEACTIVATE_SCROLL: u8 = 0x2E;
    pub const ACTIVATE_SCROLL: u8 = 0x2F;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const MIRROR_X_OFF: u8 = 0xA0;
    pub const MIRROR_X_ON: u8 = 0xA1;
    pub const SET_VERTICAL_SCROLL_AREA: u8 = 0xA3;
    pub const ALL_ON_RESUME: u8 = 0xA4;
    pub const ALL_ON: u8 = 0xA5;
    pub const INVERT_OFF: u8 = 0xA6;
    pub const INVERT_ON: u8 = 0xA7;
    pub const SET_MULTIPLEX: u8 = 0xA8;
    pub const DISP_OFF: u8 = 0xAE;
    pub const DISP_ON: u8 = 0xAF;
    pub const MIRROR_Y_OFF: u8 = 0xC0;
    pub const MIRROR_Y_ON: u8 = 0xC8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_COMPINS: u8 = 0xDA;
    pub const SET_VCOM_DESELECT_LEVEL: u8 = 0xDB;
}

/// Rows per addressing page
const PAGE_HEIGHT: i32 = 8;
/// Column addresses are 7 bits wide
const COLUMN_MASK: u8 = 0x7F;
/// Page addresses are 3 bits wide
const PAGE_MASK: u8 = 0x07;
/// Settle time on either side of the reset pulse
const RESET_SETTLE_MS: u32 = 10;

/// SSD1306 device configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ssd1306Config {
    /// Panel width in pixels
    pub width: u16,
    /// Panel height in pixels; sets the multiplex ratio
    pub height: u16,
    /// Bit depth requested by the rendering surface (must be 1)
    pub bits_per_pixel: u8,
    /// Color format requested by the rendering surface (must be Mono1)
    pub color_format: ColorFormat,
    /// Reset line polarity
    pub reset_active_high: bool,
}

impl Default for Ssd1306Config {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            bits_per_pixel: 1,
            color_format: ColorFormat::Mono1,
            reset_active_high: false,
        }
    }
}

/// SSD1306 panel driver
///
/// Generic over the byte transport `IO`, the optional reset line `RST`
/// and the delay provider used for reset settle times.
pub struct Ssd1306<IO, RST, D> {
    io: IO,
    reset: Option<RST>,
    delay: D,
    config: Ssd1306Config,
    x_gap: i32,
    y_gap: i32,
    swap_xy: bool,
    state: PanelState,
}

impl<IO, RST, D> Ssd1306<IO, RST, D>
where
    IO: PanelIo,
    RST: OutputPin,
    D: DelayNs,
{
    /// Create a driver for one panel
    ///
    /// The color format is checked here, so no handle exists for an
    /// unsupported configuration; the requested bit depth is checked by
    /// [`Panel::init`] before the power-up sequence goes out.
    pub fn new(
        io: IO,
        reset: Option<RST>,
        delay: D,
        config: Ssd1306Config,
    ) -> Result<Self, PanelError> {
        if config.color_format != ColorFormat::Mono1 {
            return Err(PanelError::Unsupported);
        }
        Ok(Self {
            io,
            reset,
            delay,
            config,
            x_gap: 0,
            y_gap: 0,
            swap_xy: false,
            state: PanelState::Uninitialized,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Device configuration
    pub fn config(&self) -> &Ssd1306Config {
        &self.config
    }

    /// Set display contrast (0x00 dimmest, 0xFF brightest)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), PanelError> {
        self.io.send_command(cmd::SET_CONTRAST, &[contrast])
    }

    /// Tear the driver down, handing back the transport and reset line
    pub fn release(self) -> (IO, Option<RST>) {
        (self.io, self.reset)
    }
}

impl<IO, RST, D> Panel for Ssd1306<IO, RST, D>
where
    IO: PanelIo,
    RST: OutputPin,
    D: DelayNs,
{
    fn reset(&mut self) -> Result<(), PanelError> {
        if let Some(rst) = self.reset.as_mut() {
            let active = self.config.reset_active_high;
            rst.set_state(PinState::from(active))
                .map_err(|_| PanelError::Transport)?;
            self.delay.delay_ms(RESET_SETTLE_MS);
            rst.set_state(PinState::from(!active))
                .map_err(|_| PanelError::Transport)?;
            self.delay.delay_ms(RESET_SETTLE_MS);
        }
        self.state = PanelState::Reset;
        Ok(())
    }

    fn init(&mut self) -> Result<(), PanelError> {
        // Bit depth is validated before any bus traffic goes out
        if self.config.bits_per_pixel != 1 {
            return Err(PanelError::Unsupported);
        }

        // Fixed power-up order; the first rejected command aborts the
        // sequence and the panel stays powered off.
        self.io.send_command(cmd::DISP_OFF, &[])?;
        // Clock divide ratio / oscillator frequency
        self.io.send_command(cmd::SET_CLOCK_DIV, &[0x80])?;
        // Multiplex ratio follows the panel height
        let multiplex = (self.config.height - 1) as u8;
        self.io.send_command(cmd::SET_MULTIPLEX, &[multiplex])?;
        self.io.send_command(cmd::SET_DISPLAY_OFFSET, &[0x00])?;
        self.io.send_command(cmd::SET_START_LINE, &[])?;
        // 0x14 = internal DC-DC charge pump, 0x10 = external Vcc
        self.io.send_command(cmd::SET_CHARGE_PUMP, &[0x14])?;
        // 0x00 = horizontal addressing
        self.io.send_command(cmd::SET_MEMORY_ADDR_MODE, &[0x00])?;
        self.io.send_command(cmd::MIRROR_X_OFF, &[])?;
        self.io.send_command(cmd::MIRROR_Y_OFF, &[])?;
        // Alternative COM pin configuration for 128x64
        self.io.send_command(cmd::SET_COMPINS, &[0x12])?;
        // 0xCF suits internal Vcc, 0x9F external
        self.io.send_command(cmd::SET_CONTRAST, &[0xCF])?;
        self.io.send_command(cmd::SET_PRECHARGE, &[0xF1])?;
        self.io.send_command(cmd::SET_VCOM_DESELECT_LEVEL, &[0x40])?;
        // Output follows RAM content
        self.io.send_command(cmd::ALL_ON_RESUME, &[])?;
        self.io.send_command(cmd::INVERT_OFF, &[])?;
        self.io.send_command(cmd::DEACTIVATE_SCROLL, &[])?;
        self.io.send_command(cmd::DISP_ON, &[])?;

        self.state = PanelState::Active;
        Ok(())
    }

    fn draw_region(&mut self, rect: Rect, pixels: &[u8]) -> Result<(), PanelError> {
        // No bus traffic for malformed input
        rect.validate()?;

        // Correct for the configured gap, then honor axis swap
        let mut r = rect.translate(self.x_gap, self.y_gap);
        if self.swap_xy {
            r = r.transpose();
        }

        let len = (r.width() * r.height()) as usize * self.config.bits_per_pixel as usize / 8;
        if pixels.len() < len {
            return Err(PanelError::InvalidArgument);
        }

        // One page covers 8 rows (COMs)
        let page_start = (r.y1 / PAGE_HEIGHT) as u8 & PAGE_MASK;
        let page_end = ((r.y2 - 1) / PAGE_HEIGHT) as u8 & PAGE_MASK;

        self.io.send_command(
            cmd::SET_COLUMN_RANGE,
            &[r.x1 as u8 & COLUMN_MASK, (r.x2 - 1) as u8 & COLUMN_MASK],
        )?;
        self.io
            .send_command(cmd::SET_PAGE_RANGE, &[page_start, page_end])?;

        // A failed transfer needs no cleanup: the controller's own
        // addressing pointers are re-armed by the next range command.
        self.io.send_pixels(&pixels[..len])
    }

    fn invert_color(&mut self, invert: bool) -> Result<(), PanelError> {
        let code = if invert {
            cmd::INVERT_ON
        } else {
            cmd::INVERT_OFF
        };
        self.io.send_command(code, &[])
    }

    fn mirror(&mut self, mirror_x: bool, mirror_y: bool) -> Result<(), PanelError> {
        let x_code = if mirror_x {
            cmd::MIRROR_X_ON
        } else {
            cmd::MIRROR_X_OFF
        };
        self.io.send_command(x_code, &[])?;

        let y_code = if mirror_y {
            cmd::MIRROR_Y_ON
        } else {
            cmd::MIRROR_Y_OFF
        };
        self.io.send_command(y_code, &[])
    }

    fn swap_axes(&mut self, swap: bool) -> Result<(), PanelError> {
        // Takes effect on the next draw
        self.swap_xy = swap;
        Ok(())
    }

    fn set_offset(&mut self, x_gap: i32, y_gap: i32) -> Result<(), PanelError> {
        self.x_gap = x_gap;
        self.y_gap = y_gap;
        Ok(())
    }

    fn set_power(&mut self, on: bool) -> Result<(), PanelError> {
        let code = if on { cmd::DISP_ON } else { cmd::DISP_OFF };
        self.io.send_command(code, &[])
    }
}
