//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, buffer limits and
//! option tables live here so they can be tuned in one place.

// Keypad

/// Raw reading must be stable this long before it counts as a press (ms).
pub const DEBOUNCE_MS: u64 = 30;

/// Minimum gap before a still-held key fires again (ms).
///
/// Covers release edges the matrix scan missed.
pub const FIRE_COOLDOWN_MS: u64 = 250;

// UI timing

/// How long the "Illegal Move!" screen stays up (ms).
pub const ILLEGAL_DURATION_MS: u64 = 2_000;

/// How long the opponent's move is shown before input resumes (ms).
pub const MOVE_DISPLAY_MS: u64 = 3_000;

/// How long a received hint replaces row 0 of the input screen (ms).
pub const HINT_DISPLAY_MS: u64 = 2_000;

/// After this much keypad silence, row 0 shows the last move instead of
/// the half-typed buffer (ms).
pub const INPUT_IDLE_MS: u64 = 4_000;

/// Real-time clock granularity (ms).
pub const CLOCK_TICK_MS: u64 = 1_000;

/// Sleep between control loop passes on target (ms).
pub const CONTROL_LOOP_PERIOD_MS: u64 = 5;

// Move entry

/// Longest move the keypad buffer accepts (from + to + promotion letter).
pub const MAX_MOVE_LEN: usize = 5;

/// Shortest submittable move. Two characters is the destination-square
/// shorthand the analysis host resolves on its side.
pub const MIN_MOVE_LEN: usize = 2;

/// Capacity of a move string coming back from the host (UCI or SAN).
pub const MOVE_TEXT_LEN: usize = 8;

/// Number of moves kept in the in-game history.
pub const HISTORY_CAPACITY: usize = 64;

/// Past-game results kept from the host's archive (it sends its latest five).
pub const ARCHIVE_CAPACITY: usize = 5;

// Display

/// Character columns per display row.
pub const LCD_COLS: usize = 16;

/// Display rows.
pub const LCD_ROWS: usize = 2;

// Control channel

/// Longest accepted incoming line, terminator excluded.
pub const LINE_BUFFER_LEN: usize = 48;

/// Outgoing commands buffered between two drains of the control loop.
pub const OUTBOX_CAPACITY: usize = 8;

// Game options

/// Selectable clock presets (minutes per side, 0 = no clock).
pub const TIMER_OPTIONS_MIN: [u32; 7] = [0, 1, 3, 5, 10, 15, 30];

/// Selectable increments (seconds per move).
pub const INCREMENT_OPTIONS_SECS: [u32; 6] = [0, 1, 2, 3, 5, 10];

/// Engine difficulty range (search depth on the host).
pub const DIFFICULTY_MIN: u8 = 1;
pub const DIFFICULTY_MAX: u8 = 10;

/// Defaults shown when the configuration screen first opens.
pub const DEFAULT_TIMER_INDEX: usize = 4; // 10 min
pub const DEFAULT_INCREMENT_INDEX: usize = 0;
pub const DEFAULT_DIFFICULTY: u8 = 5;

// Tones (Hz, ms)

pub const TONE_CLICK: (u32, u32) = (2_000, 15);
pub const TONE_ERROR: (u32, u32) = (220, 400);
pub const TONE_GOOD: (u32, u32) = (1_320, 120);
pub const TONE_BAD: (u32, u32) = (330, 250);
pub const TONE_GAME_END: (u32, u32) = (880, 600);

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "chessterm";
pub const USB_PRODUCT: &str = "Keypad Chess Terminal";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// CDC-ACM bulk endpoint packet size.
pub const USB_CDC_PACKET_SIZE: u16 = 64;

// GPIO pin assignments (nRF52840-DK defaults)
//
// Actual `embassy_nrf::peripherals::*` types are selected in `main.rs`.
// Adjust for your custom PCB.
//
//   Keypad rows    → P0.03 P0.04 P0.28 P0.29  (outputs, idle high)
//   Keypad cols    → P0.30 P0.31 P1.14 P1.15  (inputs, pull-up)
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27
//   LED R/G/B      → P0.13 P0.14 P0.15        (active low)
//   Buzzer (PWM0)  → P1.10
