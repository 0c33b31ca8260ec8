//! Common-anode RGB LED on three GPIOs (active low).

use chessterm::ui::Color;
use embassy_nrf::gpio::{AnyPin, Level, Output, OutputDrive};

pub struct Indicator {
    red: Output<'static>,
    green: Output<'static>,
    blue: Output<'static>,
}

impl Indicator {
    pub fn new(red: AnyPin, green: AnyPin, blue: AnyPin) -> Self {
        let off = |pin| Output::new(pin, Level::High, OutputDrive::Standard);
        Self {
            red: off(red),
            green: off(green),
            blue: off(blue),
        }
    }

    pub fn set(&mut self, color: Color) {
        let (r, g, b) = color.channels();
        drive(&mut self.red, r);
        drive(&mut self.green, g);
        drive(&mut self.blue, b);
    }
}

fn drive(pin: &mut Output<'static>, lit: bool) {
    pin.set_level(if lit { Level::Low } else { Level::High });
}
