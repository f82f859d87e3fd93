//! ESP-IDF GPIO backend for the display bus
//!
//! Implements [`PortIo`] on top of `esp-idf-svc` pin drivers. Lines are
//! claimed lazily by GPIO number the first time the bus configures them,
//! which is what lets the pin assignment live in a plain [`Pinout`] value
//! instead of the type system.

use std::collections::HashMap;

use embedded_hal::delay::DelayNs;
use esp_idf_svc::hal::delay::Delay;
use esp_idf_svc::hal::gpio::{AnyIOPin, Input, Level, Output, PinDriver};

use crate::st7920::interface::{Direction, PortIo};

enum Line {
    Input(PinDriver<'static, AnyIOPin, Input>),
    Output(PinDriver<'static, AnyIOPin, Output>),
}

/// [`PortIo`] over real ESP32 pins.
pub struct EspPort {
    lines: HashMap<u8, Line>,
    delay: Delay,
}

impl EspPort {
    /// Backend with no lines claimed yet.
    ///
    /// The caller guarantees exclusive use of every GPIO number later handed
    /// over through the pinout; the drivers are created from raw numbers and
    /// the type system cannot check that here.
    pub fn new() -> Self {
        EspPort {
            lines: HashMap::new(),
            delay: Delay::default(),
        }
    }
}

impl Default for EspPort {
    fn default() -> Self {
        Self::new()
    }
}

impl PortIo for EspPort {
    fn set_direction(&mut self, pin: u8, dir: Direction) {
        // Take the line out, convert in place if the direction changed.
        let converted = match (self.lines.remove(&pin), dir) {
            (Some(Line::Input(drv)), Direction::Input) => Ok(Line::Input(drv)),
            (Some(Line::Output(drv)), Direction::Output) => Ok(Line::Output(drv)),
            (Some(Line::Input(drv)), Direction::Output) => drv.into_output().map(Line::Output),
            (Some(Line::Output(drv)), Direction::Input) => drv.into_input().map(Line::Input),
            (None, dir) => {
                // SAFETY: exclusivity of the GPIO number is guaranteed by the
                // EspPort owner, see `new`.
                let pin = unsafe { AnyIOPin::new(i32::from(pin)) };
                match dir {
                    Direction::Input => PinDriver::input(pin).map(Line::Input),
                    Direction::Output => PinDriver::output(pin).map(Line::Output),
                }
            }
        };

        match converted {
            Ok(line) => {
                self.lines.insert(pin, line);
            }
            Err(e) => log::warn!("failed to configure GPIO {pin}: {e}"),
        }
    }

    fn write_level(&mut self, pin: u8, high: bool) {
        match self.lines.get_mut(&pin) {
            Some(Line::Output(drv)) => {
                if let Err(e) = drv.set_level(Level::from(high)) {
                    log::warn!("failed to drive GPIO {pin}: {e}");
                }
            }
            _ => log::warn!("GPIO {pin} written while not configured as output"),
        }
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}
