//! What a pass produced for the hardware: the two display rows, the RGB
//! indicator, a tone and the commands for the host.
//!
//! The library never touches a peripheral. The control loop drains an
//! [`Outputs`] after each pass and forwards whatever changed.

use core::fmt::Write;

use heapless::{Deque, String};

use crate::config::{LCD_COLS, LCD_ROWS, OUTBOX_CAPACITY};
use crate::error::Error;
use crate::protocol::Command;

/// One display row, always exactly [`LCD_COLS`] characters.
pub type Row = String<LCD_COLS>;

/// Pad with spaces or truncate to the display width.
pub fn fit(text: &str) -> Row {
    let mut row = Row::new();
    for c in text.chars().take(LCD_COLS) {
        let _ = row.push(c);
    }
    while row.len() < LCD_COLS {
        let _ = row.push(' ');
    }
    row
}

/// [`fit`] applied to formatted text.
pub fn fit_fmt(args: core::fmt::Arguments<'_>) -> Row {
    let mut scratch: String<{ LCD_COLS * 2 }> = String::new();
    // Overlong text is cut, which is what fitting does anyway.
    let _ = scratch.write_fmt(args);
    fit(&scratch)
}

/// RGB indicator colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Off,
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
}

impl Color {
    /// Channels lit, as (red, green, blue).
    pub const fn channels(self) -> (bool, bool, bool) {
        match self {
            Color::Off => (false, false, false),
            Color::Red => (true, false, false),
            Color::Green => (false, true, false),
            Color::Blue => (false, false, true),
            Color::Yellow => (true, true, false),
            Color::Cyan => (false, true, true),
            Color::Magenta => (true, false, true),
        }
    }
}

/// A buzzer beep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    pub freq_hz: u32,
    pub duration_ms: u32,
}

impl Tone {
    pub const fn new((freq_hz, duration_ms): (u32, u32)) -> Self {
        Self {
            freq_hz,
            duration_ms,
        }
    }
}

/// Pending hardware side effects.
#[derive(Clone, Debug)]
pub struct Outputs {
    rows: [Row; LCD_ROWS],
    rows_dirty: bool,
    indicator: Color,
    indicator_dirty: bool,
    tone: Option<Tone>,
    outbox: Deque<Command, OUTBOX_CAPACITY>,
}

impl Default for Outputs {
    fn default() -> Self {
        Self::new()
    }
}

impl Outputs {
    pub fn new() -> Self {
        Self {
            rows: [fit(""), fit("")],
            rows_dirty: true,
            indicator: Color::Off,
            indicator_dirty: true,
            tone: None,
            outbox: Deque::new(),
        }
    }

    /// Replace one row. Out-of-range rows are ignored.
    pub fn set_row(&mut self, index: usize, text: &str) {
        let row = fit(text);
        self.write_row(index, row);
    }

    pub(crate) fn write_row(&mut self, index: usize, row: Row) {
        if let Some(slot) = self.rows.get_mut(index) {
            if *slot != row {
                *slot = row;
                self.rows_dirty = true;
            }
        }
    }

    pub fn rows(&self) -> &[Row; LCD_ROWS] {
        &self.rows
    }

    /// Row text without the trailing padding.
    pub fn row(&self, index: usize) -> &str {
        self.rows.get(index).map_or("", |r| r.trim_end())
    }

    /// Both rows, once per change.
    pub fn take_rows(&mut self) -> Option<[Row; LCD_ROWS]> {
        if self.rows_dirty {
            self.rows_dirty = false;
            Some(self.rows.clone())
        } else {
            None
        }
    }

    pub fn set_indicator(&mut self, color: Color) {
        if self.indicator != color {
            self.indicator = color;
            self.indicator_dirty = true;
        }
    }

    pub fn indicator(&self) -> Color {
        self.indicator
    }

    pub fn take_indicator(&mut self) -> Option<Color> {
        if self.indicator_dirty {
            self.indicator_dirty = false;
            Some(self.indicator)
        } else {
            None
        }
    }

    /// Queue a tone; a later one in the same pass wins.
    pub fn play(&mut self, tone: Tone) {
        self.tone = Some(tone);
    }

    pub fn tone(&self) -> Option<Tone> {
        self.tone
    }

    pub fn take_tone(&mut self) -> Option<Tone> {
        self.tone.take()
    }

    /// Queue a command for the host. When the queue is full the new
    /// command is dropped.
    pub fn send(&mut self, command: Command) -> Result<(), Error> {
        self.outbox.push_back(command).map_err(|_| Error::OutboxFull)
    }

    pub fn pop_command(&mut self) -> Option<Command> {
        self.outbox.pop_front()
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.outbox.iter()
    }

    pub fn pending_commands(&self) -> usize {
        self.outbox.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::MoveText;

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("Hi").as_str(), "Hi              ");
        assert_eq!(fit("0123456789abcdefXYZ").as_str(), "0123456789abcdef");
        assert_eq!(fit_fmt(format_args!("Best: {}", "E2E4")).len(), LCD_COLS);
    }

    #[test]
    fn rows_are_dirty_only_on_change() {
        let mut out = Outputs::new();
        assert!(out.take_rows().is_some());
        assert!(out.take_rows().is_none());
        out.set_row(0, "");
        assert!(out.take_rows().is_none());
        out.set_row(0, "Thinking");
        let rows = out.take_rows().unwrap();
        assert_eq!(rows[0].as_str(), "Thinking        ");
        assert_eq!(out.row(0), "Thinking");
        out.set_row(7, "ignored");
        assert!(out.take_rows().is_none());
    }

    #[test]
    fn indicator_reports_changes_once() {
        let mut out = Outputs::new();
        assert_eq!(out.take_indicator(), Some(Color::Off));
        out.set_indicator(Color::Cyan);
        assert_eq!(out.take_indicator(), Some(Color::Cyan));
        out.set_indicator(Color::Cyan);
        assert_eq!(out.take_indicator(), None);
    }

    #[test]
    fn outbox_drops_newest_when_full() {
        let mut out = Outputs::new();
        for _ in 0..OUTBOX_CAPACITY {
            out.send(Command::Hint).unwrap();
        }
        let mv = MoveText::try_from("e2e4").unwrap();
        assert_eq!(out.send(Command::Move(mv)), Err(Error::OutboxFull));
        assert_eq!(out.pending_commands(), OUTBOX_CAPACITY);
        assert!(out.commands().all(|c| *c == Command::Hint));
        assert_eq!(out.pop_command(), Some(Command::Hint));
    }

    #[test]
    fn colour_channels() {
        assert_eq!(Color::Off.channels(), (false, false, false));
        assert_eq!(Color::Magenta.channels(), (true, false, true));
    }
}
