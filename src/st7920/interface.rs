//! Display interface using the bit-banged 8-bit parallel bus
//!
//! The ST7920 here is written through ten GPIO lines with fixed settle times;
//! there is no ready/busy handshake because R/W is tied low. All GPIO access
//! goes through the [`PortIo`] capability so the bus can run against the real
//! ESP-IDF pins or against a recording fake on the host.

use crate::st7920::pins::Pinout;

/// Enable strobe width
const ENABLE_SETTLE_US: u32 = 1;

/// Settle time after an ordinary instruction or data byte
pub const CMD_SHORT_DELAY_US: u32 = 128;

/// Settle time after an instruction-mode (Function Set) switch; the
/// controller latches the new instruction set slowly
pub const CMD_LONG_DELAY_US: u32 = 1024;

/// GPIO line direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

/// Minimal GPIO capability the bus needs: line direction, line level, and a
/// busy-wait. Injected so host tests can observe the byte stream instead of
/// driving physical lines.
pub trait PortIo {
    /// Configure a line as input or output.
    fn set_direction(&mut self, pin: u8, dir: Direction);

    /// Drive an output line high or low.
    fn write_level(&mut self, pin: u8, high: bool);

    /// Block for at least `us` microseconds.
    fn delay_us(&mut self, us: u32);
}

/// The write-only parallel connection to the controller.
///
/// Owns the pin assignment and the [`PortIo`] backend; knows nothing about
/// framebuffers or instruction sets beyond the RS line and the two settle
/// classes.
pub struct ParallelBus<IO> {
    io: IO,
    pinout: Pinout,
}

impl<IO> ParallelBus<IO> {
    /// Create a bus over `io` with the given pin assignment. No lines are
    /// touched until [`ParallelBus::configure_lines`].
    pub fn new(io: IO, pinout: Pinout) -> Self {
        ParallelBus { io, pinout }
    }

    /// Current pin assignment.
    pub fn pinout(&self) -> &Pinout {
        &self.pinout
    }

    /// Replace the pin assignment. The caller re-runs line configuration.
    pub fn set_pinout(&mut self, pinout: Pinout) {
        self.pinout = pinout;
    }

    /// Access the backend, for tests that inspect recorded traffic.
    #[cfg(test)]
    pub fn io(&self) -> &IO {
        &self.io
    }
}

impl<IO: PortIo> ParallelBus<IO> {
    /// Set up line directions for writing: E low, RS and the data bus driven
    /// as outputs.
    pub fn configure_lines(&mut self) {
        self.io.set_direction(self.pinout.e, Direction::Output);
        self.io.write_level(self.pinout.e, false);
        self.io.set_direction(self.pinout.rs, Direction::Output);
        self.set_data_direction(Direction::Output);
    }

    /// Switch the whole data bus between input and output.
    pub fn set_data_direction(&mut self, dir: Direction) {
        let data = self.pinout.data;
        for pin in data {
            self.io.set_direction(pin, dir);
        }
    }

    /// Clock one byte into the controller: present RS and the data bits, then
    /// pulse E and hold for the byte's settle class.
    pub fn send(&mut self, rs: bool, byte: u8, settle_us: u32) {
        self.io.write_level(self.pinout.e, false);
        self.io.write_level(self.pinout.rs, rs);
        self.io.delay_us(ENABLE_SETTLE_US);
        self.write_byte(byte);
        self.io.write_level(self.pinout.e, true);
        self.io.delay_us(ENABLE_SETTLE_US);
        self.io.write_level(self.pinout.e, false);
        self.io.delay_us(settle_us);
    }

    /// Present one byte on DB7..DB0.
    fn write_byte(&mut self, byte: u8) {
        let data = self.pinout.data;
        for bit in (0..8).rev() {
            self.io.write_level(data[bit], byte & (1 << bit) != 0);
        }
    }
}
