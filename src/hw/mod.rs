//! Thin drivers for the terminal's peripherals.
//!
//! None of these decide anything: the keypad reports a raw matrix and the
//! others render what [`chessterm::ui::Outputs`] asked for.

pub mod buzzer;
pub mod indicator;
pub mod keypad;
pub mod oled;

use embassy_nrf::peripherals;
use embassy_nrf::rng::{self, Rng};
use embassy_nrf::bind_interrupts;

bind_interrupts!(struct Irqs {
    RNG => rng::InterruptHandler<peripherals::RNG>;
});

/// Seed for the reaction picker, from the hardware RNG.
pub fn random_seed(rng: peripherals::RNG) -> u64 {
    let mut rng = Rng::new(rng, Irqs);
    let mut bytes = [0u8; 8];
    rng.blocking_fill_bytes(&mut bytes);
    u64::from_le_bytes(bytes)
}
