//! Time-driven part of a pass: clock, animations and timed screens.
//!
//! Nothing here waits. Each step compares `now_ms` with a stored
//! timestamp and acts if enough time has gone by.

use crate::clock::ClockTick;
use crate::config::{HINT_DISPLAY_MS, ILLEGAL_DURATION_MS, MOVE_DISPLAY_MS};

use super::{DeviceState, Terminal, UiState};

impl Terminal {
    /// Advance everything that moves on its own.
    pub fn advance(&mut self, now_ms: u64) {
        if let ClockTick::Expired(loser) = self.clock.tick(now_ms, self.ui.kind().clock_runs()) {
            info!("{:?} flag fell", loser);
            self.out_of_time(loser, now_ms);
        }

        if self.ui.kind() == DeviceState::PlayerInput {
            let expired = match &mut self.hint {
                Some((_, until_ms)) => match *until_ms {
                    None => {
                        *until_ms = Some(now_ms.saturating_add(HINT_DISPLAY_MS));
                        false
                    }
                    Some(until) => now_ms >= until,
                },
                None => false,
            };
            if expired {
                self.hint = None;
            }
        }

        match &mut self.ui {
            UiState::PlayerInput { cursor, .. } => {
                *cursor = cursor.step(now_ms).state;
            }
            UiState::Thinking { anim } => {
                *anim = anim.step(now_ms).state;
            }
            UiState::EvalAnimation { anim } => {
                let step = anim.step(now_ms);
                *anim = step.state;
                if step.completed {
                    self.reaction_done(now_ms);
                }
            }
            UiState::MoveDisplay { since_ms, .. } => {
                if now_ms.saturating_sub(*since_ms) >= MOVE_DISPLAY_MS {
                    self.finish_move_display(now_ms);
                }
            }
            UiState::Illegal { since_ms } => {
                if now_ms.saturating_sub(*since_ms) >= ILLEGAL_DURATION_MS {
                    self.transition(UiState::player_input(now_ms), now_ms);
                }
            }
            _ => {}
        }

        self.render(now_ms);
    }

    /// Reaction over: wait for the host's move, or show it straight away
    /// if it already came in.
    fn reaction_done(&mut self, now_ms: u64) {
        self.transition(UiState::thinking(now_ms), now_ms);
        if let Some(mv) = self.queued_best.take() {
            self.transition(UiState::MoveDisplay { since_ms: now_ms, mv }, now_ms);
        }
    }
}
