//! 4×4 matrix keypad scan.
//!
//! Rows are outputs idling high; columns are inputs with pull-up. Each
//! row is driven low in turn and a column reading low means that key is
//! closed. The raw matrix goes to the library, which resolves and
//! debounces it.

use embassy_nrf::gpio::{AnyPin, Input, Level, Output, OutputDrive, Pull};
use embassy_time::Timer;

/// Column settle time after a row is pulled low (µs).
const SETTLE_US: u64 = 10;

pub struct Keypad {
    rows: [Output<'static>; 4],
    cols: [Input<'static>; 4],
}

impl Keypad {
    pub fn new(rows: [AnyPin; 4], cols: [AnyPin; 4]) -> Self {
        Self {
            rows: rows.map(|pin| Output::new(pin, Level::High, OutputDrive::Standard)),
            cols: cols.map(|pin| Input::new(pin, Pull::Up)),
        }
    }

    /// One full pass over the matrix, `[row][col]`, `true` = closed.
    pub async fn scan(&mut self) -> [[bool; 4]; 4] {
        let mut pressed = [[false; 4]; 4];
        for (row, out) in self.rows.iter_mut().enumerate() {
            out.set_low();
            Timer::after_micros(SETTLE_US).await;
            for (col, input) in self.cols.iter().enumerate() {
                pressed[row][col] = input.is_low();
            }
            out.set_high();
        }
        pressed
    }
}
