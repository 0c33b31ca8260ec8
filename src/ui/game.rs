//! Game lifecycle: start, the hand-over between sides, and the ways a
//! game ends.

use crate::clock::Side;
use crate::protocol::{Command, GameSetup, MoveText};

use super::display::{fit, fit_fmt, Row};
use super::{Terminal, UiState};

impl Terminal {
    /// Reset everything for a new game and enter the first gameplay screen.
    ///
    /// `announce` sends `START:` to the host; a game started by the host
    /// itself is not echoed back.
    pub(super) fn start_game(&mut self, setup: GameSetup, announce: bool, now_ms: u64) {
        info!(
            "new game: depth {} timer {}m +{}s",
            setup.difficulty,
            setup.timer_minutes,
            setup.increment_secs
        );
        self.selections.adopt(&setup);
        self.player = setup.side;
        self.game_active = true;
        self.clock
            .seed(setup.timer_minutes, setup.increment_secs, now_ms);
        self.clock.resume(now_ms);
        self.history.clear();
        self.pending_move.clear();
        self.confirmed_move = None;
        self.queued_best = None;
        self.last_move = None;
        self.hint = None;
        self.overlay_return = None;

        if announce {
            let mut setup = setup;
            setup.difficulty = self.selections.difficulty();
            self.send(Command::Start(setup));
        }

        let first = match setup.side {
            Side::White => UiState::player_input(now_ms),
            // The engine opens.
            Side::Black => UiState::thinking(now_ms),
        };
        self.transition(first, now_ms);
    }

    /// Leave the opponent's move: the clock passes to the player.
    pub(super) fn finish_move_display(&mut self, now_ms: u64) {
        self.clock.complete_move();
        self.transition(UiState::player_input(now_ms), now_ms);
    }

    /// Record a move in the history. A full history just stops growing.
    pub(super) fn record_move(&mut self, mv: &MoveText) {
        if let Err(e) = self.history.push(mv) {
            warn!("move {} not recorded: {:?}", mv.as_str(), e);
        }
        self.last_move = Some(mv.clone());
    }

    pub(super) fn checkmated(&mut self, winner: Side, now_ms: u64) {
        let headline = fit_fmt(format_args!("{} Wins!", winner.name()));
        self.end_game(headline, fit("Checkmate"), now_ms);
    }

    pub(super) fn out_of_time(&mut self, loser: Side, now_ms: u64) {
        let headline = fit_fmt(format_args!("{} Wins!", loser.opponent().name()));
        self.end_game(headline, fit("Time Expired"), now_ms);
    }

    pub(super) fn resigned(&mut self, loser: Side, now_ms: u64) {
        let headline = fit_fmt(format_args!("{} Resigned", loser.name()));
        let reason = fit_fmt(format_args!("{} Wins!", loser.opponent().name()));
        self.end_game(headline, reason, now_ms);
    }

    pub(super) fn drawn(&mut self, now_ms: u64) {
        self.end_game(fit("Draw Agreed"), fit(""), now_ms);
    }

    pub(super) fn stalemated(&mut self, now_ms: u64) {
        self.end_game(fit("Stalemate!"), fit("Draw"), now_ms);
    }

    /// Stop the game and show the result, whatever screen is up.
    fn end_game(&mut self, headline: Row, reason: Row, now_ms: u64) {
        info!("game over: {}", headline.trim_end());
        self.game_active = false;
        self.clock.pause();
        self.overlay_return = None;
        self.queued_best = None;
        self.hint = None;
        self.transition(UiState::GameEnd { headline, reason }, now_ms);
    }
}
