//! SSD1306 OLED wrapper presenting the 16×2 character grid.
//!
//! An 8×13 font makes sixteen columns fill the 128 px width exactly; the
//! two rows sit in the upper and lower half of the panel.

use chessterm::ui::Row;
use chessterm::Error;
use embedded_graphics::mono_font::ascii::FONT_8X13;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Top edge of each character row (px).
const ROW_Y: [i32; 2] = [12, 40];

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Result<Display<I2C>, Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().map_err(|_| Error::Display)?;
    display.clear_buffer();
    display.flush().map_err(|_| Error::Display)?;
    Ok(display)
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_8X13)
        .text_color(BinaryColor::On)
        .build()
}

/// Redraw both rows.
pub fn draw_rows<I2C>(display: &mut Display<I2C>, rows: &[Row; 2]) -> Result<(), Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();
    for (row, y) in rows.iter().zip(ROW_Y) {
        let _ = Text::with_baseline(row.as_str(), Point::new(0, y), text_style(), Baseline::Top)
            .draw(display);
    }
    display.flush().map_err(|_| Error::Display)
}
