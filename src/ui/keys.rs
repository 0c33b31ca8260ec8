//! Key handlers, one per screen, behind the global menu key.

use crate::config::TONE_CLICK;
use crate::keypad::Key;
use crate::protocol::Command;

use super::display::Tone;
use super::input_logic::{move_char, select_next, select_prev};
use super::menu::{
    ConfigRow, ConfirmAction, HistoryView, SettingsRow, MAIN_MENU_ITEMS, TUTORIAL_PAGES,
};
use super::{DeviceState, Terminal, UiState};

impl Terminal {
    /// Route one debounced key. Accepted keys click.
    pub fn dispatch_key(&mut self, key: Key, now_ms: u64) {
        debug!("key {:?} in {:?}", key, self.ui.kind());
        let accepted = if key == Key::Star && self.menu_key(now_ms) {
            true
        } else {
            self.handle_key(key, now_ms)
        };
        if accepted {
            self.outputs.play(Tone::new(TONE_CLICK));
        }
        self.render(now_ms);
    }

    /// Menu key: open the overlay over a game, or close it again.
    fn menu_key(&mut self, now_ms: u64) -> bool {
        let kind = self.ui.kind();
        if kind.is_gameplay() {
            let game = self.transition(UiState::Settings { cursor: 0 }, now_ms);
            self.overlay_return = Some(game);
            true
        } else if kind.is_overlay() {
            self.close_overlay(now_ms);
            true
        } else {
            false
        }
    }

    pub(super) fn close_overlay(&mut self, now_ms: u64) {
        let back = self
            .overlay_return
            .take()
            .unwrap_or(UiState::MainMenu { cursor: 0 });
        self.transition(back, now_ms);
    }

    fn handle_key(&mut self, key: Key, now_ms: u64) -> bool {
        match self.ui.kind() {
            DeviceState::MainMenu => self.main_menu_key(key, now_ms),
            DeviceState::PlayerInput => self.player_input_key(key, now_ms),
            DeviceState::MoveDisplay => {
                if key == Key::C {
                    self.finish_move_display(now_ms);
                    true
                } else {
                    false
                }
            }
            DeviceState::Promotion => self.promotion_key(key, now_ms),
            DeviceState::Settings => self.settings_key(key, now_ms),
            DeviceState::SettingsConfirm => self.confirm_key(key, now_ms),
            DeviceState::MoveHistory => self.history_key(key, now_ms),
            DeviceState::GameEnd => {
                if key == Key::C {
                    self.transition(UiState::MainMenu { cursor: 0 }, now_ms);
                    true
                } else {
                    false
                }
            }
            DeviceState::PlayConfig => self.play_config_key(key, now_ms),
            DeviceState::Tutorial => self.tutorial_key(key, now_ms),
            // Waiting on the host or on a timer.
            DeviceState::Thinking | DeviceState::EvalAnimation | DeviceState::Illegal => false,
        }
    }

    fn main_menu_key(&mut self, key: Key, now_ms: u64) -> bool {
        let UiState::MainMenu { cursor } = &mut self.ui else {
            return false;
        };
        match key {
            Key::A => *cursor = select_prev(*cursor),
            Key::B => *cursor = select_next(*cursor, MAIN_MENU_ITEMS.len()),
            Key::C => {
                self.transition(UiState::PlayConfig { cursor: 0 }, now_ms);
            }
            _ => return false,
        }
        true
    }

    fn player_input_key(&mut self, key: Key, now_ms: u64) -> bool {
        let UiState::PlayerInput { session, .. } = &mut self.ui else {
            return false;
        };
        match key {
            Key::Hash => {
                session.toggle_shift(now_ms);
                true
            }
            Key::Num9 => {
                session.clear(now_ms);
                true
            }
            Key::Num0 => {
                if !session.is_submittable() {
                    debug!("move too short: {}", session.buffer());
                    return false;
                }
                self.pending_move.clear();
                let _ = self.pending_move.push_str(session.buffer());
                self.hint = None;
                info!("submit {}", self.pending_move.as_str());
                self.send(Command::Move(self.pending_move.clone()));
                self.transition(UiState::thinking(now_ms), now_ms);
                true
            }
            _ => match move_char(key, session.shift()) {
                Some(c) => match session.push(c, now_ms) {
                    Ok(()) => true,
                    Err(e) => {
                        debug!("keystroke dropped: {:?}", e);
                        false
                    }
                },
                None => false,
            },
        }
    }

    fn promotion_key(&mut self, key: Key, now_ms: u64) -> bool {
        let piece = match key {
            Key::Num1 => 'b',
            Key::Num2 => 'n',
            Key::Num3 => 'r',
            Key::Num4 => 'q',
            _ => return false,
        };
        if self.pending_move.push(piece).is_err() {
            warn!("no room for promotion piece");
            return false;
        }
        self.send(Command::Move(self.pending_move.clone()));
        self.transition(UiState::thinking(now_ms), now_ms);
        true
    }

    fn settings_key(&mut self, key: Key, now_ms: u64) -> bool {
        let UiState::Settings { cursor } = &mut self.ui else {
            return false;
        };
        match key {
            Key::A => *cursor = select_prev(*cursor),
            Key::B => *cursor = select_next(*cursor, SettingsRow::ALL.len()),
            Key::C => {
                let Some(row) = SettingsRow::at(*cursor) else {
                    return false;
                };
                self.settings_action(row, now_ms);
            }
            Key::D => self.close_overlay(now_ms),
            _ => return false,
        }
        true
    }

    fn settings_action(&mut self, row: SettingsRow, now_ms: u64) {
        match row {
            SettingsRow::History => {
                let offset = self.history.max_offset().saturating_sub(2);
                let view = HistoryView::Moves;
                self.transition(UiState::MoveHistory { offset, view }, now_ms);
            }
            SettingsRow::Hint => {
                self.send(Command::Hint);
                self.close_overlay(now_ms);
            }
            SettingsRow::Difficulty => {
                let depth = self.selections.cycle_difficulty();
                self.send(Command::Depth(depth));
            }
            SettingsRow::Tutorial => {
                self.transition(UiState::Tutorial { page: 0 }, now_ms);
            }
            SettingsRow::Resign => {
                let action = ConfirmAction::Resign;
                self.transition(UiState::SettingsConfirm { action }, now_ms);
            }
            SettingsRow::Draw => {
                let action = ConfirmAction::Draw;
                self.transition(UiState::SettingsConfirm { action }, now_ms);
            }
            SettingsRow::Timer => self.selections.cycle_timer(),
            SettingsRow::Increment => self.selections.cycle_increment(),
            SettingsRow::Side => self.selections.toggle_side(),
            SettingsRow::Archive => {
                self.send(Command::ReqHistory);
                let view = HistoryView::Games;
                self.transition(UiState::MoveHistory { offset: 0, view }, now_ms);
            }
        }
    }

    fn confirm_key(&mut self, key: Key, now_ms: u64) -> bool {
        let UiState::SettingsConfirm { action } = self.ui else {
            return false;
        };
        match key {
            Key::C => {
                match action {
                    ConfirmAction::Resign => {
                        self.send(Command::Resign);
                        self.resigned(self.player, now_ms);
                    }
                    ConfirmAction::Draw => {
                        self.send(Command::Draw);
                        self.drawn(now_ms);
                    }
                }
                true
            }
            Key::D => {
                let cursor = action.row().index();
                self.transition(UiState::Settings { cursor }, now_ms);
                true
            }
            _ => false,
        }
    }

    fn history_key(&mut self, key: Key, now_ms: u64) -> bool {
        let UiState::MoveHistory { offset, view } = &mut self.ui else {
            return false;
        };
        let max = match view {
            HistoryView::Moves => self.history.max_offset(),
            HistoryView::Games => self.archive.max_offset(),
        };
        let step = view.step();
        match key {
            Key::A => *offset = offset.saturating_sub(step),
            Key::B => *offset = (*offset + step).min(max),
            Key::D => {
                let cursor = view.row().index();
                self.transition(UiState::Settings { cursor }, now_ms);
            }
            _ => return false,
        }
        true
    }

    fn play_config_key(&mut self, key: Key, now_ms: u64) -> bool {
        let UiState::PlayConfig { cursor } = &mut self.ui else {
            return false;
        };
        match key {
            Key::A => *cursor = select_prev(*cursor),
            Key::B => *cursor = select_next(*cursor, ConfigRow::ALL.len()),
            Key::C => match ConfigRow::at(*cursor) {
                Some(ConfigRow::Timer) => self.selections.cycle_timer(),
                Some(ConfigRow::Increment) => self.selections.cycle_increment(),
                Some(ConfigRow::Side) => self.selections.toggle_side(),
                Some(ConfigRow::Difficulty) => {
                    self.selections.cycle_difficulty();
                }
                Some(ConfigRow::Start) => {
                    let setup = self.selections.setup();
                    self.start_game(setup, true, now_ms);
                }
                None => return false,
            },
            Key::D => {
                self.transition(UiState::MainMenu { cursor: 0 }, now_ms);
            }
            _ => return false,
        }
        true
    }

    fn tutorial_key(&mut self, key: Key, now_ms: u64) -> bool {
        let UiState::Tutorial { page } = &mut self.ui else {
            return false;
        };
        match key {
            Key::C if *page + 1 < TUTORIAL_PAGES.len() => *page += 1,
            Key::C | Key::D => {
                let cursor = SettingsRow::Tutorial.index();
                self.transition(UiState::Settings { cursor }, now_ms);
            }
            _ => return false,
        }
        true
    }
}
