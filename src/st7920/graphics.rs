//! `embedded-graphics` support
//!
//! Draws land in the shadow page buffer through the same bounds-checked
//! pixel path as the raw API; call [`crate::st7920::driver::St7920::buffer_paint_all`]
//! afterwards to flush. Pixels outside the 128x64 area are dropped, per the
//! `DrawTarget` contract, but drawing on an uninitialized driver still fails.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::st7920::driver::{DriverError, St7920};
use crate::st7920::interface::PortIo;
use crate::st7920::{HEIGHT, WIDTH};

impl<IO: PortIo> DrawTarget for St7920<IO> {
    type Color = BinaryColor;
    type Error = DriverError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }

            match self.buffer_set_pixel(point.x as usize, point.y as usize, color.is_on()) {
                Ok(()) => {}
                Err(DriverError::OutOfBounds) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

impl<IO> OriginDimensions for St7920<IO> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}
