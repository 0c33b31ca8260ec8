//! Entry actions and the two-row projection of each screen.

use crate::clock::ClockState;
use crate::config::{TONE_ERROR, TONE_GAME_END};

use super::display::{fit, fit_fmt, Color, Row, Tone};
use super::menu::{ConfigRow, HistoryView, SettingsRow, MAIN_MENU_ITEMS, TUTORIAL_PAGES};
use super::{Terminal, UiState};

impl Terminal {
    /// Side effects of arriving on the current screen.
    pub(super) fn on_enter(&mut self) {
        match &self.ui {
            UiState::MainMenu { .. } | UiState::PlayerInput { .. } | UiState::PlayConfig { .. } => {
                self.outputs.set_indicator(Color::Off);
            }
            UiState::Illegal { .. } => {
                self.outputs.set_indicator(Color::Red);
                self.outputs.play(Tone::new(TONE_ERROR));
            }
            UiState::GameEnd { .. } => {
                self.outputs.set_indicator(Color::Blue);
                self.outputs.play(Tone::new(TONE_GAME_END));
            }
            _ => {}
        }
    }

    /// Rewrite both rows from the current state.
    pub(super) fn render(&mut self, now_ms: u64) {
        let [top, bottom] = self.compose(now_ms);
        self.outputs.write_row(0, top);
        self.outputs.write_row(1, bottom);
    }

    fn compose(&self, now_ms: u64) -> [Row; 2] {
        match &self.ui {
            UiState::MainMenu { cursor } => {
                let item = MAIN_MENU_ITEMS.get(*cursor).copied().unwrap_or("");
                [fit_fmt(format_args!(">{}", item)), fit("  C: select")]
            }
            UiState::PlayerInput { session, cursor } => {
                let top = if let Some((hint, _)) = &self.hint {
                    fit_fmt(format_args!("Hint: {}", Upper(hint.as_str())))
                } else if let (true, Some(last)) = (session.is_idle(now_ms), &self.last_move) {
                    fit_fmt(format_args!("Last: {}", Upper(last.as_str())))
                } else {
                    let range = if session.shift() { "e-h" } else { "a-d" };
                    let mut entry: heapless::String<8> = heapless::String::new();
                    let _ = entry.push_str(session.buffer());
                    let _ = entry.push_str(cursor.current_frame());
                    fit_fmt(format_args!("Move: {:<6}{}", entry.as_str(), range))
                };
                [top, clock_row(&self.clock)]
            }
            UiState::Thinking { anim } | UiState::EvalAnimation { anim } => {
                [fit(anim.current_frame()), clock_row(&self.clock)]
            }
            UiState::MoveDisplay { mv, .. } => [
                fit_fmt(format_args!("Best: {}", Upper(mv.as_str()))),
                clock_row(&self.clock),
            ],
            UiState::Illegal { .. } => [fit("Illegal Move!"), clock_row(&self.clock)],
            UiState::Promotion => [fit("1=B 2=N 3=R 4=Q"), clock_row(&self.clock)],
            UiState::Settings { cursor } => {
                let label = |index: usize| {
                    SettingsRow::at(index).map(|row| row.label(&self.selections))
                };
                list_rows(label(*cursor), label(*cursor + 1))
            }
            UiState::SettingsConfirm { action } => [fit(action.question()), fit("C: yes  D: no")],
            UiState::MoveHistory {
                offset,
                view: HistoryView::Moves,
            } => {
                if self.history.is_empty() {
                    [fit("No moves yet"), fit("D: back")]
                } else {
                    [
                        fit(&self.history.pair_row(*offset)),
                        fit(&self.history.pair_row(*offset + 2)),
                    ]
                }
            }
            UiState::MoveHistory {
                offset,
                view: HistoryView::Games,
            } => {
                if self.archive.is_empty() {
                    [fit("No past games"), fit("D: back")]
                } else {
                    [
                        fit(self.archive.get(*offset).unwrap_or("")),
                        fit(self.archive.get(*offset + 1).unwrap_or("")),
                    ]
                }
            }
            UiState::GameEnd { headline, reason } => [headline.clone(), reason.clone()],
            UiState::PlayConfig { cursor } => {
                let label =
                    |index: usize| ConfigRow::at(index).map(|row| row.label(&self.selections));
                list_rows(label(*cursor), label(*cursor + 1))
            }
            UiState::Tutorial { page } => {
                let [a, b] = TUTORIAL_PAGES
                    .get(*page)
                    .copied()
                    .unwrap_or(["", ""]);
                [fit(a), fit(b)]
            }
        }
    }
}

/// Selected item with a marker, the next one below it.
fn list_rows(current: Option<Row>, next: Option<Row>) -> [Row; 2] {
    let top = current.map_or_else(|| fit(""), |r| fit_fmt(format_args!(">{}", r.as_str())));
    let bottom = next.map_or_else(|| fit(""), |r| fit_fmt(format_args!(" {}", r.as_str())));
    [top, bottom]
}

/// Displays a move upper-cased, the way the host prints it.
struct Upper<'a>(&'a str);

impl core::fmt::Display for Upper<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use core::fmt::Write;
        for c in self.0.chars() {
            f.write_char(c.to_ascii_uppercase())?;
        }
        Ok(())
    }
}

fn clock_row(clock: &ClockState) -> Row {
    fit(&clock.readout())
}
