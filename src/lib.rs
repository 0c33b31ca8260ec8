//! Host-testable core of the chessterm keypad chess terminal.
//!
//! Everything that decides what the terminal does lives here as plain
//! `no_std` logic: keypad debouncing, the game clock, animations, the host
//! line protocol, move history and the UI state machine. Time is passed in
//! as milliseconds; nothing reads a clock or touches a peripheral.
//!
//! Usage: `cargo test` on the host.
//!
//! Note: The embedded binary in main.rs adds the nRF52840 drivers and
//! runs [`ui::Terminal`] from a cooperative control loop.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod logging;

pub mod animation;
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod keypad;
pub mod protocol;
pub mod ui;

pub use error::{Error, ProtocolError};
pub use keypad::Key;
pub use ui::{DeviceState, Terminal};
