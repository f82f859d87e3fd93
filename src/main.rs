use embedded_graphics::mono_font::iso_8859_15::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::{prelude::*, text::Text};

mod st7920;

pub use crate::st7920::cmd::Cmd;
pub use crate::st7920::driver::{DisplayMode, DriverError, St7920, Status};
pub use crate::st7920::flag::Flag;
pub use crate::st7920::hal::EspPort;
pub use crate::st7920::pins::{Pinout, Pins};

use esp_idf_svc::hal::delay::Delay;
use esp_idf_svc::hal::peripherals::Peripherals;

// Pre-converted splash image in page-cell format (generated at build time)
const SPLASH_IMAGE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/splash.bin"));

/// Load the build-time splash blob into the page buffer: one big-endian
/// 16-bit cell per logical page, row-major.
fn load_splash(lcd: &mut St7920<EspPort>) -> Result<(), DriverError> {
    let mut cells = SPLASH_IMAGE.chunks_exact(2);

    for cy in 0..st7920::HEIGHT {
        for page in 0..st7920::WIDTH_PAGES {
            let Some(cell) = cells.next() else {
                return Ok(());
            };
            lcd.buffer_set_page(page, cy, u16::from_be_bytes([cell[0], cell[1]]))?;
        }
    }
    Ok(())
}

// https://docs.esp-rs.org/esp-idf-svc/esp_idf_svc/
fn main() -> anyhow::Result<()> {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    // Taken and held so nothing else in the firmware claims the GPIOs the
    // pinout below hands to the driver by number.
    let _peripherals = Peripherals::take().expect("Could not take peripherals");

    let delay = Delay::default();

    log::info!("Creating ST7920 driver with the board pinout");
    let mut lcd = St7920::new(EspPort::new(), Pins::board_pinout());

    if let Err(e) = lcd.begin() {
        log::error!("Display init failed: {e}");
        return Err(anyhow::anyhow!("display init failed: {e}"));
    }
    log::info!("Display initialized, status: {:?}", lcd.status());

    lcd.enable_graphic_display(true)?;

    // Scene 1: checkerboard, one page row at a time
    log::info!("Scene 1: checkerboard");
    for cy in 0..st7920::HEIGHT {
        let pattern = if (cy / 8) % 2 == 0 { 0xFF00 } else { 0x00FF };
        for page in 0..st7920::WIDTH_PAGES {
            lcd.buffer_set_page(page, cy, pattern)?;
        }
    }
    lcd.buffer_paint_all()?;
    delay.delay_ms(2000);

    // Scene 2: invert in place twice; the panel should end up unchanged
    log::info!("Scene 2: double inversion");
    lcd.buffer_toggle_all()?;
    lcd.buffer_paint_all()?;
    delay.delay_ms(1000);
    lcd.buffer_toggle_all()?;
    lcd.buffer_paint_all()?;
    delay.delay_ms(1000);

    // Scene 3: a line straddling the fold; rows 31 and 32 are adjacent on
    // the glass but far apart in controller memory
    log::info!("Scene 3: fold crossing");
    lcd.buffer_set_all(false)?;
    for cx in 0..st7920::WIDTH {
        lcd.buffer_set_pixel(cx, 31, true)?;
        lcd.buffer_set_pixel(cx, 32, true)?;
    }
    for cy in 0..st7920::HEIGHT {
        lcd.buffer_set_pixel(st7920::WIDTH / 2, cy, true)?;
    }
    lcd.buffer_paint_all()?;
    delay.delay_ms(2000);

    // Scene 4: embedded-graphics over the same buffer
    log::info!("Scene 4: embedded-graphics");
    lcd.buffer_set_all(false)?;
    Rectangle::new(Point::new(2, 2), Size::new(124, 60))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(&mut lcd)?;
    let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
    Text::new("ST7920 128x64", Point::new(8, 14), style).draw(&mut lcd)?;
    Text::new("folded panel", Point::new(8, 44), style).draw(&mut lcd)?;
    lcd.buffer_paint_all()?;
    delay.delay_ms(3000);

    // Scene 5: splash image, if one was embedded at build time
    if SPLASH_IMAGE.is_empty() {
        log::warn!("Splash image not available (logo.png not found at build time)");
    } else {
        log::info!("Scene 5: splash image, {} bytes", SPLASH_IMAGE.len());
        load_splash(&mut lcd)?;
        lcd.buffer_paint_all()?;
        delay.delay_ms(3000);
    }

    // Scene 6: text layer on top of the graphics
    log::info!("Scene 6: text");
    lcd.clear_text()?;
    lcd.set_text_cursor(0, 0)?;
    lcd.print_text("ST7920 demo")?;
    lcd.set_text_cursor(1, 1)?; // odd column, gets a leading padding space
    lcd.print_text("offset text")?;
    lcd.set_text_cursor(0, 2)?; // folded row
    lcd.print_text("bottom half")?;
    delay.delay_ms(3000);

    lcd.set_display_mode(DisplayMode::CursorBlink)?;
    lcd.set_wide_text_cursor(0, 3)?;
    lcd.print_wide_char(0xA3D2)?; // full-width 'R', GB character code
    delay.delay_ms(2000);
    lcd.set_display_mode(DisplayMode::CursorOff)?;

    // Scene 7: repaint a single page in place
    log::info!("Scene 7: single-page repaint");
    for _ in 0..6 {
        lcd.buffer_toggle_page(3, 20, 0xFFFF)?;
        lcd.buffer_paint_page(3, 20)?;
        delay.delay_ms(300);
    }

    log::info!("Cleaning up");
    lcd.clear_display()?;
    lcd.cursor_home()?;

    log::info!("Demo complete");
    Ok(())
}
