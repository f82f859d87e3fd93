//! ST7920 Graphic LCD Driver
//!
//! Driver for the ST7920 monochrome dot-matrix controller behind the common
//! 128x64 "12864" panel modules, wired over the 8-bit bit-banged parallel bus
//! (DB0..DB7 plus RS and E, R/W tied low).
//!
//! The controller addresses the panel as a 256x32 matrix of 16-pixel pages and
//! the module folds that in half: the bottom 32 logical rows sit to the right
//! of the top 32 rows in controller memory, at the same line index. This
//! driver hides the fold behind logical 128x64 coordinates and keeps a full
//! shadow of display RAM in a page buffer.
//!
//! ### Usage
//!
//! 1. build a [`pins::Pinout`] and construct [`driver::St7920`] with a
//!    [`interface::PortIo`] backend ([`hal::EspPort`] on the ESP32)
//! 1. call [`driver::St7920::begin`] once
//! 1. mutate the page buffer (pixel/page calls, or `embedded_graphics` via the
//!    [`graphics`] integration), then flush with
//!    [`driver::St7920::buffer_paint_all`]
//!
//! Buffer mutation never touches the bus; only the paint and text calls do.

pub mod cmd;
pub mod driver;
pub mod flag;
pub mod graphics;
pub mod interface;
pub mod pins;

pub mod coords;
pub mod hal;


/// Pixels in one page, the controller's 16-bit addressing unit
pub const PAGE_WIDTH: usize = 16;

/// Bytes per page on the wire
pub const PAGE_BYTES: usize = 2;

/// Controller-native pixels per scan line
pub const NATIVE_WIDTH: usize = 256;

/// Controller-native scan lines
pub const NATIVE_HEIGHT: usize = 32;

/// Controller-native pages per scan line
pub const NATIVE_WIDTH_PAGES: usize = NATIVE_WIDTH / PAGE_WIDTH;

/// Page cells in the shadow buffer (one per native page per native line)
pub const BUFFER_PAGES: usize = NATIVE_WIDTH_PAGES * NATIVE_HEIGHT;

/// Controller-native wide-character columns per text row
pub const NATIVE_WCHARS: usize = 16;

/// Controller-native 8-bit character columns per text row
pub const NATIVE_CHARS: usize = 2 * NATIVE_WCHARS;

/// Controller-native text rows
pub const NATIVE_TEXT_LINES: usize = 2;

/// Logical display width, pixels (the panel is folded, half the native width)
pub const WIDTH: usize = NATIVE_WIDTH / 2;

/// Logical display height, pixels (double the native height)
pub const HEIGHT: usize = NATIVE_HEIGHT * 2;

/// Logical pages per display row
pub const WIDTH_PAGES: usize = NATIVE_WIDTH_PAGES / 2;

/// Logical 8-bit character columns
pub const N_CHARS: usize = NATIVE_CHARS / 2;

/// Logical text rows
pub const N_LINES: usize = NATIVE_TEXT_LINES * 2;

/// Logical wide-character columns
pub const N_WCHARS: usize = NATIVE_WCHARS / 2;
