//! Host message handlers.

use crate::animation::{reaction_entry, AnimationState};
use crate::config::{HINT_DISPLAY_MS, TONE_BAD, TONE_GOOD};
use crate::error::Error;
use crate::protocol::{parse_line, Message, MoveText, Quality};

use super::display::{Color, Tone};
use super::{DeviceState, Terminal, UiState};

impl Terminal {
    /// Feed bytes from the host; every completed line is handled at once.
    pub fn receive_bytes(&mut self, rx: &[u8], now_ms: u64) {
        for &byte in rx {
            match self.lines.push(byte) {
                None => {}
                Some(Ok(line)) => self.receive_line(&line, now_ms),
                Some(Err(e)) => debug!("line dropped: {:?}", e),
            }
        }
    }

    /// Decode and act on one line. Lines that do not decode are dropped.
    pub fn receive_line(&mut self, line: &str, now_ms: u64) {
        match parse_line(line) {
            Ok(message) => self.handle_message(message, now_ms),
            Err(e) => debug!("ignored line {}: {:?}", line, Error::from(e)),
        }
        self.render(now_ms);
    }

    pub fn handle_message(&mut self, message: Message, now_ms: u64) {
        let game = self.game_state();
        match message {
            Message::Eval(quality) if game == DeviceState::Thinking => {
                self.evaluated(quality, now_ms);
            }
            Message::Best(mv) => match game {
                DeviceState::Thinking => {
                    self.record_move(&mv);
                    self.route(UiState::MoveDisplay { since_ms: now_ms, mv }, now_ms);
                }
                DeviceState::EvalAnimation => {
                    self.record_move(&mv);
                    self.queued_best = Some(mv);
                }
                _ => debug!("unexpected BEST in {:?}", game),
            },
            Message::Illegal if game == DeviceState::Thinking => {
                self.pending_move.clear();
                self.confirmed_move = None;
                self.route(UiState::Illegal { since_ms: now_ms }, now_ms);
            }
            Message::Promote if game == DeviceState::Thinking => {
                self.route(UiState::Promotion, now_ms);
            }
            Message::Checkmate(winner) if self.game_active => {
                if game == DeviceState::Thinking {
                    self.record_player_move();
                }
                self.checkmated(winner, now_ms);
            }
            Message::Stalemate if self.game_active => {
                if game == DeviceState::Thinking {
                    self.record_player_move();
                }
                self.stalemated(now_ms);
            }
            Message::Resign if self.game_active => self.resigned(self.player, now_ms),
            Message::Draw if self.game_active => self.drawn(now_ms),
            Message::Hint(mv) => {
                // Shown only on the input screen; the countdown starts there.
                let until_ms = (self.ui.kind() == DeviceState::PlayerInput)
                    .then(|| now_ms.saturating_add(HINT_DISPLAY_MS));
                self.hint = Some((mv, until_ms));
            }
            Message::Last(mv) => self.confirmed_move = Some(mv),
            Message::Time {
                white_secs,
                black_secs,
            } => self.clock.sync(white_secs, black_secs),
            Message::Depth(depth) => {
                let depth = self.selections.set_difficulty(depth);
                debug!("difficulty now {}", depth);
            }
            Message::Start(setup) => self.start_game(setup, false, now_ms),
            Message::HistoryClear => self.archive.clear(),
            Message::HistoryAdd(entry) => {
                if let Err(e) = self.archive.push(entry) {
                    debug!("past game dropped: {:?}", e);
                }
            }
            other => debug!("{:?} ignored in {:?}", MessageKind::of(&other), game),
        }
    }

    /// The host judged the player's move: record it, pass the clock and
    /// play the reaction.
    fn evaluated(&mut self, quality: Quality, now_ms: u64) {
        self.record_player_move();
        self.clock.complete_move();

        let entry = reaction_entry(quality, &mut self.rng);
        self.outputs.set_indicator(quality_color(quality));
        match quality {
            Quality::Brilliant | Quality::Good => self.outputs.play(Tone::new(TONE_GOOD)),
            Quality::Mistake | Quality::Blunder => self.outputs.play(Tone::new(TONE_BAD)),
            Quality::Inaccuracy => {}
        }
        let anim = AnimationState::start(entry, now_ms);
        self.route(UiState::EvalAnimation { anim }, now_ms);
    }

    /// The host accepted the player's move: record it in the host's
    /// notation when it sent one.
    fn record_player_move(&mut self) {
        let mv = self
            .confirmed_move
            .take()
            .unwrap_or_else(|| self.pending_move.clone());
        if !mv.is_empty() {
            self.record_move(&mv);
        }
        self.pending_move = MoveText::new();
    }
}

const fn quality_color(quality: Quality) -> Color {
    match quality {
        Quality::Brilliant => Color::Cyan,
        Quality::Good => Color::Green,
        Quality::Inaccuracy => Color::Yellow,
        Quality::Mistake => Color::Magenta,
        Quality::Blunder => Color::Red,
    }
}

/// Payload-free name of a message, for logging.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum MessageKind {
    Eval,
    Best,
    Illegal,
    Promote,
    Checkmate,
    Stalemate,
    Hint,
    Last,
    Time,
    Depth,
    Resign,
    Draw,
    Start,
    HistoryClear,
    HistoryAdd,
}

impl MessageKind {
    fn of(message: &Message) -> Self {
        match message {
            Message::Eval(_) => MessageKind::Eval,
            Message::Best(_) => MessageKind::Best,
            Message::Illegal => MessageKind::Illegal,
            Message::Promote => MessageKind::Promote,
            Message::Checkmate(_) => MessageKind::Checkmate,
            Message::Stalemate => MessageKind::Stalemate,
            Message::Hint(_) => MessageKind::Hint,
            Message::Last(_) => MessageKind::Last,
            Message::Time { .. } => MessageKind::Time,
            Message::Depth(_) => MessageKind::Depth,
            Message::Resign => MessageKind::Resign,
            Message::Draw => MessageKind::Draw,
            Message::Start(_) => MessageKind::Start,
            Message::HistoryClear => MessageKind::HistoryClear,
            Message::HistoryAdd(_) => MessageKind::HistoryAdd,
        }
    }
}
