//! Menu rows, option tables and help pages.

use crate::clock::Side;
use crate::config::{
    DEFAULT_DIFFICULTY, DEFAULT_INCREMENT_INDEX, DEFAULT_TIMER_INDEX, DIFFICULTY_MAX,
    DIFFICULTY_MIN, INCREMENT_OPTIONS_SECS, TIMER_OPTIONS_MIN,
};
use crate::protocol::GameSetup;

use super::display::{fit_fmt, Row};
use super::input_logic::cycle_next;

/// Items of the start screen.
pub const MAIN_MENU_ITEMS: [&str; 1] = ["New Game"];

/// Rows of the in-game settings overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsRow {
    History,
    Hint,
    Difficulty,
    Tutorial,
    Resign,
    Draw,
    Timer,
    Increment,
    Side,
    Archive,
}

impl SettingsRow {
    pub const ALL: [SettingsRow; 10] = [
        SettingsRow::History,
        SettingsRow::Hint,
        SettingsRow::Difficulty,
        SettingsRow::Tutorial,
        SettingsRow::Resign,
        SettingsRow::Draw,
        SettingsRow::Timer,
        SettingsRow::Increment,
        SettingsRow::Side,
        SettingsRow::Archive,
    ];

    pub fn at(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|r| *r == self).unwrap_or(0)
    }

    pub fn label(self, selections: &Selections) -> Row {
        match self {
            SettingsRow::History => fit_fmt(format_args!("Move History")),
            SettingsRow::Hint => fit_fmt(format_args!("Hint")),
            SettingsRow::Difficulty => {
                fit_fmt(format_args!("Difficulty: {}", selections.difficulty()))
            }
            SettingsRow::Tutorial => fit_fmt(format_args!("Tutorial")),
            SettingsRow::Resign => fit_fmt(format_args!("Resign")),
            SettingsRow::Draw => fit_fmt(format_args!("Offer Draw")),
            SettingsRow::Timer => timer_label(selections),
            SettingsRow::Increment => increment_label(selections),
            SettingsRow::Side => side_label(selections),
            SettingsRow::Archive => fit_fmt(format_args!("Past Games")),
        }
    }
}

/// Rows of the pre-game configuration screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigRow {
    Timer,
    Increment,
    Side,
    Difficulty,
    Start,
}

impl ConfigRow {
    pub const ALL: [ConfigRow; 5] = [
        ConfigRow::Timer,
        ConfigRow::Increment,
        ConfigRow::Side,
        ConfigRow::Difficulty,
        ConfigRow::Start,
    ];

    pub fn at(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self, selections: &Selections) -> Row {
        match self {
            ConfigRow::Timer => timer_label(selections),
            ConfigRow::Increment => increment_label(selections),
            ConfigRow::Side => side_label(selections),
            ConfigRow::Difficulty => {
                fit_fmt(format_args!("Difficulty: {}", selections.difficulty()))
            }
            ConfigRow::Start => fit_fmt(format_args!("Start Game")),
        }
    }
}

/// What the history screen lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HistoryView {
    /// This game's moves, two plies per row.
    Moves,
    /// The host's past-game results, one per row.
    Games,
}

impl HistoryView {
    /// Scroll step.
    pub const fn step(self) -> usize {
        match self {
            HistoryView::Moves => 2,
            HistoryView::Games => 1,
        }
    }

    /// Settings row that opens this view.
    pub const fn row(self) -> SettingsRow {
        match self {
            HistoryView::Moves => SettingsRow::History,
            HistoryView::Games => SettingsRow::Archive,
        }
    }
}

/// A game-ending action waiting for confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfirmAction {
    Resign,
    Draw,
}

impl ConfirmAction {
    pub const fn question(self) -> &'static str {
        match self {
            ConfirmAction::Resign => "Resign game?",
            ConfirmAction::Draw => "Offer draw?",
        }
    }

    /// Settings row that opened the confirmation.
    pub const fn row(self) -> SettingsRow {
        match self {
            ConfirmAction::Resign => SettingsRow::Resign,
            ConfirmAction::Draw => SettingsRow::Draw,
        }
    }
}

/// Game options as picked on the keypad.
///
/// Timer and increment are indices into the option tables; difficulty
/// also tracks the live engine depth during a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selections {
    timer_index: usize,
    increment_index: usize,
    side: Side,
    difficulty: u8,
}

impl Default for Selections {
    fn default() -> Self {
        Self::new()
    }
}

impl Selections {
    pub const fn new() -> Self {
        Self {
            timer_index: DEFAULT_TIMER_INDEX,
            increment_index: DEFAULT_INCREMENT_INDEX,
            side: Side::White,
            difficulty: DEFAULT_DIFFICULTY,
        }
    }

    pub fn timer_minutes(&self) -> u32 {
        TIMER_OPTIONS_MIN.get(self.timer_index).copied().unwrap_or(0)
    }

    pub fn increment_secs(&self) -> u32 {
        INCREMENT_OPTIONS_SECS
            .get(self.increment_index)
            .copied()
            .unwrap_or(0)
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn cycle_timer(&mut self) {
        self.timer_index = cycle_next(self.timer_index, TIMER_OPTIONS_MIN.len());
    }

    pub fn cycle_increment(&mut self) {
        self.increment_index = cycle_next(self.increment_index, INCREMENT_OPTIONS_SECS.len());
    }

    pub fn toggle_side(&mut self) {
        self.side = self.side.opponent();
    }

    /// Next difficulty, wrapping from the maximum back to the minimum.
    pub fn cycle_difficulty(&mut self) -> u8 {
        self.difficulty = if self.difficulty >= DIFFICULTY_MAX {
            DIFFICULTY_MIN
        } else {
            self.difficulty + 1
        };
        self.difficulty
    }

    /// Store a difficulty coming from elsewhere, clamped to the valid range.
    pub fn set_difficulty(&mut self, difficulty: u8) -> u8 {
        self.difficulty = difficulty.clamp(DIFFICULTY_MIN, DIFFICULTY_MAX);
        self.difficulty
    }

    /// Adopt the options of a game started elsewhere. Values missing from
    /// the option tables leave the matching index alone.
    pub fn adopt(&mut self, setup: &GameSetup) {
        if let Some(i) = TIMER_OPTIONS_MIN
            .iter()
            .position(|m| *m == setup.timer_minutes)
        {
            self.timer_index = i;
        }
        if let Some(i) = INCREMENT_OPTIONS_SECS
            .iter()
            .position(|s| *s == setup.increment_secs)
        {
            self.increment_index = i;
        }
        self.side = setup.side;
        self.set_difficulty(setup.difficulty);
    }

    pub fn setup(&self) -> GameSetup {
        GameSetup {
            difficulty: self.difficulty,
            timer_minutes: self.timer_minutes(),
            increment_secs: self.increment_secs(),
            side: self.side,
        }
    }
}

fn timer_label(selections: &Selections) -> Row {
    match selections.timer_minutes() {
        0 => fit_fmt(format_args!("Timer: off")),
        m => fit_fmt(format_args!("Timer: {}m", m)),
    }
}

fn increment_label(selections: &Selections) -> Row {
    fit_fmt(format_args!("Increment: {}s", selections.increment_secs()))
}

fn side_label(selections: &Selections) -> Row {
    match selections.side() {
        Side::White => fit_fmt(format_args!("Side: White")),
        Side::Black => fit_fmt(format_args!("Side: Black")),
    }
}

/// Help screens, two rows each.
pub const TUTORIAL_PAGES: [[&str; 2]; 5] = [
    ["Type moves like", "e2e4 on keypad"],
    ["A-D = files a-d", "# shifts to e-h"],
    ["1-8 = ranks", "0 send  9 clear"],
    ["Promotion: 1=B", "2=N 3=R 4=Q"],
    ["* opens menu", "C ok  D back"],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config() {
        let s = Selections::new();
        assert_eq!(s.timer_minutes(), 10);
        assert_eq!(s.increment_secs(), 0);
        assert_eq!(s.side(), Side::White);
        assert_eq!(s.difficulty(), 5);
    }

    #[test]
    fn timer_cycles_through_table_and_wraps() {
        let mut s = Selections::new();
        let mut seen = [0u32; 7];
        for slot in seen.iter_mut() {
            s.cycle_timer();
            *slot = s.timer_minutes();
        }
        assert_eq!(seen, [15, 30, 0, 1, 3, 5, 10]);
    }

    #[test]
    fn difficulty_wraps_and_clamps() {
        let mut s = Selections::new();
        assert_eq!(s.set_difficulty(10), 10);
        assert_eq!(s.cycle_difficulty(), 1);
        assert_eq!(s.set_difficulty(0), 1);
        assert_eq!(s.set_difficulty(42), 10);
    }

    #[test]
    fn adopt_copies_known_values() {
        let mut s = Selections::new();
        s.adopt(&GameSetup {
            difficulty: 3,
            timer_minutes: 7,
            increment_secs: 5,
            side: Side::Black,
        });
        assert_eq!(s.timer_minutes(), 10);
        assert_eq!(s.increment_secs(), 5);
        assert_eq!(s.side(), Side::Black);
        assert_eq!(s.difficulty(), 3);
    }

    #[test]
    fn labels_fit_and_show_values() {
        let s = Selections::new();
        assert_eq!(SettingsRow::Timer.label(&s).trim_end(), "Timer: 10m");
        assert_eq!(ConfigRow::Difficulty.label(&s).trim_end(), "Difficulty: 5");
        assert_eq!(SettingsRow::Side.index(), 8);
        assert_eq!(SettingsRow::Archive.label(&s).trim_end(), "Past Games");
        assert_eq!(HistoryView::Games.row(), SettingsRow::Archive);
        for page in TUTORIAL_PAGES {
            for line in page {
                assert!(line.len() <= crate::config::LCD_COLS);
            }
        }
    }
}
