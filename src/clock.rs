//! Per-side countdown clock with Fischer increment.
//!
//! The clock never looks at wall time on its own: the control loop passes
//! `now_ms` into [`ClockState::tick`] on every pass and the clock acts at
//! most once per elapsed second.

use core::fmt::Write;

use heapless::String;

use crate::config::{CLOCK_TICK_MS, LCD_COLS};

/// Largest value the two-digit readout can show (99:59).
const READOUT_MAX_SECS: u32 = 99 * 60 + 59;

/// A side of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Upper-case name as used on the wire and on screen.
    pub const fn name(self) -> &'static str {
        match self {
            Side::White => "WHITE",
            Side::Black => "BLACK",
        }
    }

    /// Single-letter code used by `START:`.
    pub const fn code(self) -> char {
        match self {
            Side::White => 'W',
            Side::Black => 'B',
        }
    }
}

/// Outcome of one [`ClockState::tick`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockTick {
    /// Nothing to do this pass.
    Idle,
    /// A second was taken off the active side.
    Decremented,
    /// The active side just ran out; the game is over.
    Expired(Side),
}

/// Both counters plus the bookkeeping needed to run them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockState {
    white_secs: u32,
    black_secs: u32,
    active: Side,
    enabled: bool,
    increment_secs: u32,
    paused: bool,
    last_tick_ms: u64,
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockState {
    /// A disabled, paused clock at 0:00 / 0:00.
    pub const fn new() -> Self {
        Self {
            white_secs: 0,
            black_secs: 0,
            active: Side::White,
            enabled: false,
            increment_secs: 0,
            paused: true,
            last_tick_ms: 0,
        }
    }

    /// Reset for a new game. `minutes == 0` disables the clock.
    pub fn seed(&mut self, minutes: u32, increment_secs: u32, now_ms: u64) {
        let secs = minutes.saturating_mul(60);
        self.white_secs = secs;
        self.black_secs = secs;
        self.active = Side::White;
        self.enabled = minutes > 0;
        self.increment_secs = increment_secs;
        self.paused = true;
        self.last_tick_ms = now_ms;
    }

    pub fn white_secs(&self) -> u32 {
        self.white_secs
    }

    pub fn black_secs(&self) -> u32 {
        self.black_secs
    }

    pub fn remaining(&self, side: Side) -> u32 {
        match side {
            Side::White => self.white_secs,
            Side::Black => self.black_secs,
        }
    }

    pub fn active(&self) -> Side {
        self.active
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn increment_secs(&self) -> u32 {
        self.increment_secs
    }

    /// Stop decrementing; counts are preserved.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume decrementing. The next decrement happens one full second
    /// after `now_ms`, never in a burst for time spent paused.
    pub fn resume(&mut self, now_ms: u64) {
        if self.paused {
            self.paused = false;
            self.last_tick_ms = now_ms;
        }
    }

    /// Overwrite both counters (host `TIME:` sync).
    pub fn sync(&mut self, white_secs: u32, black_secs: u32) {
        self.white_secs = white_secs;
        self.black_secs = black_secs;
    }

    /// A move was completed by the active side: credit the increment to
    /// that side, then hand the clock to the opponent.
    pub fn complete_move(&mut self) {
        let increment = self.increment_secs;
        if self.enabled && increment > 0 {
            let counter = self.counter_mut(self.active);
            *counter = counter.saturating_add(increment);
        }
        self.active = self.active.opponent();
    }

    /// Advance by at most one second.
    ///
    /// `gameplay` is whether the UI is in a state where the clock may run
    /// at all.
    pub fn tick(&mut self, now_ms: u64, gameplay: bool) -> ClockTick {
        if !self.enabled || self.paused || !gameplay {
            self.last_tick_ms = now_ms;
            return ClockTick::Idle;
        }
        // A sync can leave the running side at zero.
        if self.remaining(self.active) == 0 {
            self.paused = true;
            return ClockTick::Expired(self.active);
        }
        if now_ms.saturating_sub(self.last_tick_ms) < CLOCK_TICK_MS {
            return ClockTick::Idle;
        }
        self.last_tick_ms = self.last_tick_ms.saturating_add(CLOCK_TICK_MS);

        let active = self.active;
        let counter = self.counter_mut(active);
        *counter -= 1;
        if *counter == 0 {
            self.paused = true;
            ClockTick::Expired(active)
        } else {
            ClockTick::Decremented
        }
    }

    /// `W<mm>:<ss>  B<mm>:<ss>` readout for display row 1.
    ///
    /// Counters past 99:59 show as 99:59.
    pub fn readout(&self) -> String<LCD_COLS> {
        let white = self.white_secs.min(READOUT_MAX_SECS);
        let black = self.black_secs.min(READOUT_MAX_SECS);
        let mut s = String::new();
        let _ = write!(
            s,
            "W{:02}:{:02}  B{:02}:{:02}",
            white / 60,
            white % 60,
            black / 60,
            black % 60
        );
        s
    }

    fn counter_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::White => &mut self.white_secs,
            Side::Black => &mut self.black_secs,
        }
    }
}
