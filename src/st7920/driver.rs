//! ST7920 Display Driver Implementation
//!
//! Main driver for the ST7920 controller: lifecycle and instruction-mode
//! state, the shadow page buffer, and the pixel/page/text operations on top
//! of it.
//!
//! ## Architecture
//!
//! The driver splits into three layers:
//!
//! - buffer calls (`buffer_set_*`, `buffer_get_*`, `buffer_toggle_*`) mutate
//!   the in-memory page buffer only and never touch the bus
//! - paint calls (`buffer_paint_*`, `clear_graphics`, `clear_display`)
//!   transmit buffer contents to the controller and never mutate the buffer
//! - text calls write straight through to the controller's DDRAM at the
//!   hardware cursor, the buffer is not involved
//!
//! Coordinate translation lives in [`crate::st7920::coords`]; the strobe
//! timing in [`crate::st7920::interface`].
//!
//! ## Error contract
//!
//! Every operation either completes or returns a [`DriverError`] having done
//! nothing: no partial buffer mutation, no partial transmission. Nothing here
//! panics and nothing retries; recovery is the caller's call.

use core::fmt;

use crate::st7920::cmd::Cmd;
use crate::st7920::coords;
use crate::st7920::flag::Flag;
use crate::st7920::interface::{ParallelBus, PortIo, CMD_LONG_DELAY_US, CMD_SHORT_DELAY_US};
use crate::st7920::pins::Pinout;
use crate::st7920::{
    BUFFER_PAGES, NATIVE_CHARS, NATIVE_HEIGHT, NATIVE_WCHARS, NATIVE_WIDTH_PAGES, PAGE_WIDTH,
};

/// Lifecycle state of one driver instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// `begin()` failed validation; cleared by `reset_pinout` + `begin`
    Error,
    /// Constructed or pinout reset, `begin()` not yet run
    Uninitialized,
    /// Ready; all operations available
    Initialized,
}

/// Display Control modes of the basic instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Off,
    CursorOff,
    CursorOn,
    CursorBlink,
}

impl DisplayMode {
    fn instruction(self) -> u8 {
        match self {
            DisplayMode::Off => Cmd::DISPLAY_OFF,
            DisplayMode::CursorOff => Cmd::DISPLAY_ON_CURSOR_OFF,
            DisplayMode::CursorOn => Cmd::DISPLAY_ON_CURSOR_ON,
            DisplayMode::CursorBlink => Cmd::DISPLAY_ON_CURSOR_BLINK,
        }
    }
}

/// Failure of a driver operation. The operation performed no mutation and no
/// transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// Operation requires a successful `begin()` first
    NotInitialized,
    /// Coordinate outside the logical display geometry
    OutOfBounds,
    /// A required pin is still unassigned
    InvalidPinout,
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::NotInitialized => write!(f, "display is not initialized"),
            DriverError::OutOfBounds => write!(f, "coordinate out of display bounds"),
            DriverError::InvalidPinout => write!(f, "pinout has unassigned lines"),
        }
    }
}

impl std::error::Error for DriverError {}

/// ST7920 Graphic LCD Driver
///
/// Owns the parallel bus, the lifecycle state and the shadow page buffer.
/// Multiple instances can coexist as long as their pinouts do not overlap.
pub struct St7920<IO> {
    bus: ParallelBus<IO>,
    buffer: [u16; BUFFER_PAGES],
    status: Status,
    graphic_display_enabled: bool,
}

impl<IO: PortIo> St7920<IO> {
    /// Create a driver over `io` with the given pin assignment. Nothing is
    /// transmitted until [`St7920::begin`].
    pub fn new(io: IO, pinout: Pinout) -> Self {
        St7920 {
            bus: ParallelBus::new(io, pinout),
            buffer: [0; BUFFER_PAGES],
            status: Status::Uninitialized,
            graphic_display_enabled: false,
        }
    }

    /// Current lifecycle state.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Replace the pin assignment. Forces the state back to
    /// [`Status::Uninitialized`]; `begin()` must run again before use.
    pub fn reset_pinout(&mut self, pinout: Pinout) {
        self.bus.set_pinout(pinout);
        self.status = Status::Uninitialized;
    }

    /// Validate the pinout, configure line directions, run the controller's
    /// power-on sequence and zero the page buffer.
    ///
    /// Idempotent once initialized. A pinout with unassigned lines moves the
    /// driver to [`Status::Error`], where it stays until a complete pinout is
    /// installed via [`St7920::reset_pinout`] and `begin()` is retried.
    pub fn begin(&mut self) -> Result<(), DriverError> {
        if self.status == Status::Initialized {
            return Ok(());
        }

        self.status = Status::Uninitialized;

        if !self.bus.pinout().is_complete() {
            log::warn!("begin() refused: pinout has unassigned lines");
            self.status = Status::Error;
            return Err(DriverError::InvalidPinout);
        }

        log::info!("initializing ST7920 on the parallel bus");
        self.bus.configure_lines();

        // Power-on defaults: basic instruction set, cleared text, DDRAM at
        // the origin, display on with the cursor hidden.
        self.set_instruction_mode(false);
        self.bus.send(false, Cmd::CLEAR_SCREEN, CMD_SHORT_DELAY_US);
        self.bus.send(false, Cmd::SET_DDRAM_TOP_ROW, CMD_SHORT_DELAY_US);
        self.bus
            .send(false, Cmd::DISPLAY_ON_CURSOR_OFF, CMD_SHORT_DELAY_US);

        self.buffer = [0; BUFFER_PAGES];

        self.status = Status::Initialized;
        Ok(())
    }

    /// Turn the graphic display engine on or off.
    ///
    /// The extended instruction set is selected on both sides of flipping the
    /// G bit; the controller expects the Function Set byte twice when G
    /// changes.
    pub fn enable_graphic_display(&mut self, enable: bool) -> Result<(), DriverError> {
        self.require_initialized()?;

        self.set_instruction_mode(true);
        self.graphic_display_enabled = enable;
        self.set_instruction_mode(true);

        log::debug!("graphic display {}", if enable { "on" } else { "off" });
        Ok(())
    }

    /// Whether the graphic display engine is currently on.
    pub fn graphic_display_enabled(&self) -> Result<bool, DriverError> {
        self.require_initialized()?;
        Ok(self.graphic_display_enabled)
    }

    // ==================== Buffer mutation ====================

    /// Set one pixel in the buffer.
    pub fn buffer_set_pixel(&mut self, cx: usize, cy: usize, lit: bool) -> Result<(), DriverError> {
        self.require_initialized()?;
        let addr = coords::pixel_address(cx, cy).ok_or(DriverError::OutOfBounds)?;

        if lit {
            self.buffer[addr.buffer_index] |= 1 << addr.bit_offset;
        } else {
            self.buffer[addr.buffer_index] &= !(1 << addr.bit_offset);
        }
        Ok(())
    }

    /// Read one pixel from the buffer.
    pub fn buffer_get_pixel(&self, cx: usize, cy: usize) -> Result<bool, DriverError> {
        self.require_initialized()?;
        let addr = coords::pixel_address(cx, cy).ok_or(DriverError::OutOfBounds)?;

        Ok(self.buffer[addr.buffer_index] & (1 << addr.bit_offset) != 0)
    }

    /// Invert one pixel in the buffer.
    pub fn buffer_toggle_pixel(&mut self, cx: usize, cy: usize) -> Result<(), DriverError> {
        self.require_initialized()?;
        let addr = coords::pixel_address(cx, cy).ok_or(DriverError::OutOfBounds)?;

        self.buffer[addr.buffer_index] ^= 1 << addr.bit_offset;
        Ok(())
    }

    /// Overwrite a whole 16-pixel page in the buffer.
    pub fn buffer_set_page(
        &mut self,
        page_index: usize,
        cy: usize,
        value: u16,
    ) -> Result<(), DriverError> {
        self.require_initialized()?;
        let addr = coords::page_address(page_index, cy).ok_or(DriverError::OutOfBounds)?;

        self.buffer[addr.buffer_index] = value;
        Ok(())
    }

    /// Read a whole page from the buffer.
    pub fn buffer_get_page(&self, page_index: usize, cy: usize) -> Result<u16, DriverError> {
        self.require_initialized()?;
        let addr = coords::page_address(page_index, cy).ok_or(DriverError::OutOfBounds)?;

        Ok(self.buffer[addr.buffer_index])
    }

    /// XOR a page in the buffer with `mask`. A zero mask is a no-op.
    pub fn buffer_toggle_page(
        &mut self,
        page_index: usize,
        cy: usize,
        mask: u16,
    ) -> Result<(), DriverError> {
        self.require_initialized()?;
        let addr = coords::page_address(page_index, cy).ok_or(DriverError::OutOfBounds)?;

        if mask == 0 {
            return Ok(());
        }

        self.buffer[addr.buffer_index] ^= mask;
        Ok(())
    }

    /// Set every pixel in the buffer on or off.
    pub fn buffer_set_all(&mut self, lit: bool) -> Result<(), DriverError> {
        self.require_initialized()?;

        self.buffer = [if lit { 0xFFFF } else { 0x0000 }; BUFFER_PAGES];
        Ok(())
    }

    /// Invert every pixel in the buffer.
    pub fn buffer_toggle_all(&mut self) -> Result<(), DriverError> {
        self.require_initialized()?;

        for cell in self.buffer.iter_mut() {
            *cell = !*cell;
        }
        Ok(())
    }

    // ==================== Paint (buffer -> controller) ====================

    /// Paint the page containing the given logical pixel.
    pub fn buffer_paint_pixel(&mut self, cx: usize, cy: usize) -> Result<(), DriverError> {
        self.buffer_paint_page(cx / PAGE_WIDTH, cy)
    }

    /// Transmit one buffered page to the controller's graphic RAM.
    pub fn buffer_paint_page(&mut self, page_index: usize, cy: usize) -> Result<(), DriverError> {
        self.require_initialized()?;
        let addr = coords::page_address(page_index, cy).ok_or(DriverError::OutOfBounds)?;

        let value = self.buffer[addr.buffer_index];

        self.set_instruction_mode(true);

        // Vertical then horizontal address, each with the GDRAM prefix,
        // followed by the page high byte first.
        self.bus.send(
            false,
            Cmd::SET_GRAPHIC_ADDRESS | addr.line_index as u8,
            CMD_SHORT_DELAY_US,
        );
        self.bus.send(
            false,
            Cmd::SET_GRAPHIC_ADDRESS | addr.page_index as u8,
            CMD_SHORT_DELAY_US,
        );
        self.bus.send(true, (value >> 8) as u8, CMD_SHORT_DELAY_US);
        self.bus.send(true, (value & 0xFF) as u8, CMD_SHORT_DELAY_US);

        Ok(())
    }

    /// Stream the whole buffer to the controller, row-major, re-addressing at
    /// the start of every native line.
    pub fn buffer_paint_all(&mut self) -> Result<(), DriverError> {
        self.require_initialized()?;

        self.set_instruction_mode(true);

        let mut buffer_index = 0usize;
        for line_index in 0..NATIVE_HEIGHT {
            self.bus.send(
                false,
                Cmd::SET_GRAPHIC_ADDRESS | line_index as u8,
                CMD_SHORT_DELAY_US,
            );
            self.bus
                .send(false, Cmd::SET_GRAPHIC_ADDRESS, CMD_SHORT_DELAY_US);

            for _ in 0..NATIVE_WIDTH_PAGES {
                // Unreachable with the fixed geometry; abort rather than
                // stream past the buffer.
                if buffer_index >= BUFFER_PAGES {
                    return Err(DriverError::OutOfBounds);
                }

                let value = self.buffer[buffer_index];
                self.bus.send(true, (value >> 8) as u8, CMD_SHORT_DELAY_US);
                self.bus.send(true, (value & 0xFF) as u8, CMD_SHORT_DELAY_US);

                buffer_index += 1;
            }
        }

        Ok(())
    }

    /// Zero the buffer and paint it, clearing all graphics on the panel.
    /// Text is unaffected.
    pub fn clear_graphics(&mut self) -> Result<(), DriverError> {
        self.require_initialized()?;

        self.buffer_set_all(false)?;
        self.buffer_paint_all()?;
        Ok(())
    }

    /// Clear graphics and text both.
    pub fn clear_display(&mut self) -> Result<(), DriverError> {
        self.require_initialized()?;

        self.clear_graphics()?;

        self.set_instruction_mode(false);
        self.bus.send(false, Cmd::CLEAR_SCREEN, CMD_SHORT_DELAY_US);
        Ok(())
    }

    // ==================== Text ====================

    /// Select one of the basic Display Control modes.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), DriverError> {
        self.require_initialized()?;

        self.set_instruction_mode(false);
        self.bus.send(false, mode.instruction(), CMD_SHORT_DELAY_US);
        Ok(())
    }

    /// Overwrite every text cell with spaces and return the cursor to the
    /// origin. Graphics are unaffected.
    pub fn clear_text(&mut self) -> Result<(), DriverError> {
        self.require_initialized()?;

        self.fill_screen_char(b' ')?;

        self.set_instruction_mode(false);
        self.bus.send(false, Cmd::SET_DDRAM_TOP_ROW, CMD_SHORT_DELAY_US);
        Ok(())
    }

    /// Return the text cursor to the first column of the first line.
    pub fn cursor_home(&mut self) -> Result<(), DriverError> {
        self.require_initialized()?;

        self.set_instruction_mode(false);
        self.bus.send(false, Cmd::CURSOR_HOME, CMD_SHORT_DELAY_US);
        Ok(())
    }

    /// Position the cursor at a logical 8-bit character cell.
    ///
    /// The controller can only address wide cells, and only step the cursor
    /// right one wide cell at a time; an odd logical column additionally gets
    /// a space written into the first half of its wide cell.
    pub fn set_text_cursor(&mut self, cx: usize, cy: usize) -> Result<(), DriverError> {
        self.require_initialized()?;
        let addr = coords::text_address(cx, cy).ok_or(DriverError::OutOfBounds)?;

        self.set_instruction_mode(false);

        let row_base = if addr.row == 0 {
            Cmd::SET_DDRAM_TOP_ROW
        } else {
            Cmd::SET_DDRAM_BOTTOM_ROW
        };
        self.bus.send(false, row_base, CMD_SHORT_DELAY_US);

        for _ in 0..addr.column {
            self.bus
                .send(false, Cmd::MOVE_CURSOR_RIGHT, CMD_SHORT_DELAY_US);
        }

        if addr.pad_space {
            self.bus.send(true, b' ', CMD_SHORT_DELAY_US);
        }

        Ok(())
    }

    /// Position the cursor at a wide-character cell.
    pub fn set_wide_text_cursor(&mut self, cx: usize, cy: usize) -> Result<(), DriverError> {
        self.require_initialized()?;
        let addr = coords::wide_text_address(cx, cy).ok_or(DriverError::OutOfBounds)?;

        self.set_instruction_mode(false);

        let row_base = if addr.row == 0 {
            Cmd::SET_DDRAM_TOP_ROW
        } else {
            Cmd::SET_DDRAM_BOTTOM_ROW
        };
        self.bus.send(false, row_base, CMD_SHORT_DELAY_US);

        for _ in 0..addr.column {
            self.bus
                .send(false, Cmd::MOVE_CURSOR_RIGHT, CMD_SHORT_DELAY_US);
        }

        Ok(())
    }

    /// Write one 8-bit character at the hardware cursor.
    pub fn print_char(&mut self, c: u8) -> Result<(), DriverError> {
        self.require_initialized()?;

        self.set_instruction_mode(false);
        self.bus.send(true, c, CMD_SHORT_DELAY_US);
        Ok(())
    }

    /// Write a string at the hardware cursor, byte by byte.
    ///
    /// The controller auto-advances and wraps on its own; keeping a string
    /// inside the line is the caller's responsibility.
    pub fn print_text(&mut self, text: &str) -> Result<(), DriverError> {
        self.require_initialized()?;

        self.set_instruction_mode(false);
        for byte in text.bytes() {
            self.bus.send(true, byte, CMD_SHORT_DELAY_US);
        }
        Ok(())
    }

    /// Write one 16-bit wide character at the hardware cursor. The cursor
    /// must sit on a wide-cell boundary.
    pub fn print_wide_char(&mut self, wc: u16) -> Result<(), DriverError> {
        self.require_initialized()?;

        self.set_instruction_mode(false);
        self.bus.send(true, (wc >> 8) as u8, CMD_SHORT_DELAY_US);
        self.bus.send(true, (wc & 0xFF) as u8, CMD_SHORT_DELAY_US);
        Ok(())
    }

    /// Write a sequence of wide characters at the hardware cursor.
    pub fn print_wide_text(&mut self, wtext: &[u16]) -> Result<(), DriverError> {
        self.require_initialized()?;

        self.set_instruction_mode(false);
        for &wc in wtext {
            self.bus.send(true, (wc >> 8) as u8, CMD_SHORT_DELAY_US);
            self.bus.send(true, (wc & 0xFF) as u8, CMD_SHORT_DELAY_US);
        }
        Ok(())
    }

    /// Fill both text rows with one 8-bit character.
    pub fn fill_screen_char(&mut self, c: u8) -> Result<(), DriverError> {
        self.require_initialized()?;

        self.set_instruction_mode(false);

        self.bus.send(false, Cmd::SET_DDRAM_TOP_ROW, CMD_SHORT_DELAY_US);
        for _ in 0..NATIVE_CHARS {
            self.bus.send(true, c, CMD_SHORT_DELAY_US);
        }

        self.bus
            .send(false, Cmd::SET_DDRAM_BOTTOM_ROW, CMD_SHORT_DELAY_US);
        for _ in 0..NATIVE_CHARS {
            self.bus.send(true, c, CMD_SHORT_DELAY_US);
        }

        Ok(())
    }

    /// Fill both text rows with one wide character.
    pub fn fill_screen_wide_char(&mut self, wc: u16) -> Result<(), DriverError> {
        self.require_initialized()?;

        self.set_instruction_mode(false);

        self.bus.send(false, Cmd::SET_DDRAM_TOP_ROW, CMD_SHORT_DELAY_US);
        for _ in 0..NATIVE_WCHARS {
            self.bus.send(true, (wc >> 8) as u8, CMD_SHORT_DELAY_US);
            self.bus.send(true, (wc & 0xFF) as u8, CMD_SHORT_DELAY_US);
        }

        self.bus
            .send(false, Cmd::SET_DDRAM_BOTTOM_ROW, CMD_SHORT_DELAY_US);
        for _ in 0..NATIVE_WCHARS {
            self.bus.send(true, (wc >> 8) as u8, CMD_SHORT_DELAY_US);
            self.bus.send(true, (wc & 0xFF) as u8, CMD_SHORT_DELAY_US);
        }

        Ok(())
    }

    // ==================== Internals ====================

    fn require_initialized(&self) -> Result<(), DriverError> {
        if self.status == Status::Initialized {
            Ok(())
        } else {
            Err(DriverError::NotInitialized)
        }
    }

    /// Issue a Function Set byte selecting the basic or the extended
    /// instruction set; in extended mode the current graphic-engine bit rides
    /// along. Mode switches get the long settle time.
    fn set_instruction_mode(&mut self, extended: bool) {
        let mode = if extended {
            let mut mode = Flag::EXT_INSTRUCTION;
            if self.graphic_display_enabled {
                mode |= Flag::GRAPHIC_DISPLAY_ON;
            }
            mode
        } else {
            Flag::BASIC_INSTRUCTION
        };

        self.bus.send(false, mode, CMD_LONG_DELAY_US);
    }

    #[cfg(test)]
    pub(crate) fn bus(&self) -> &ParallelBus<IO> {
        &self.bus
    }
}
