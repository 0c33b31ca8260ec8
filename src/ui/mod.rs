//! User interface subsystem - the terminal's state machine.
//!
//! [`Terminal`] owns every piece of volatile state and is advanced by the
//! control loop one pass at a time: one debounced key, then every complete
//! host line, then the clock and any timed screen. Whatever the pass
//! changed ends up in [`Outputs`] for the hardware to pick up.
//!
//! ## Components
//!
//! - **keys**: per-screen key handlers and the global menu key
//! - **messages**: host message handlers
//! - **scheduler**: clock, animations and timed screens
//! - **render**: entry actions and the two-row projection of each screen

pub mod display;
pub mod input_logic;
pub mod menu;

mod game;
mod keys;
mod messages;
mod render;
mod scheduler;


use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::animation::{self, AnimationState};
use crate::clock::{ClockState, Side};
use crate::history::{GameArchive, MoveHistory};
use crate::keypad::{resolve_scan, Debouncer};
use crate::protocol::{Command, LineBuffer, MoveText};

pub use display::{Color, Outputs, Row, Tone};
pub use input_logic::InputSession;
pub use menu::{ConfirmAction, HistoryView, Selections};

/// Screens the terminal can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    MainMenu,
    PlayerInput,
    Thinking,
    EvalAnimation,
    MoveDisplay,
    Illegal,
    Promotion,
    Settings,
    SettingsConfirm,
    MoveHistory,
    GameEnd,
    PlayConfig,
    Tutorial,
}

impl DeviceState {
    pub const ALL: [DeviceState; 13] = [
        DeviceState::MainMenu,
        DeviceState::PlayerInput,
        DeviceState::Thinking,
        DeviceState::EvalAnimation,
        DeviceState::MoveDisplay,
        DeviceState::Illegal,
        DeviceState::Promotion,
        DeviceState::Settings,
        DeviceState::SettingsConfirm,
        DeviceState::MoveHistory,
        DeviceState::GameEnd,
        DeviceState::PlayConfig,
        DeviceState::Tutorial,
    ];

    /// Part of a game in progress; the menu key opens settings from here.
    pub const fn is_gameplay(self) -> bool {
        matches!(
            self,
            DeviceState::PlayerInput
                | DeviceState::Thinking
                | DeviceState::EvalAnimation
                | DeviceState::MoveDisplay
                | DeviceState::Illegal
                | DeviceState::Promotion
        )
    }

    /// The player's clock may run. Waiting on the host does not count.
    pub const fn clock_runs(self) -> bool {
        matches!(
            self,
            DeviceState::PlayerInput
                | DeviceState::Illegal
                | DeviceState::Promotion
                | DeviceState::MoveDisplay
        )
    }

    /// Screens layered over a game by the menu key.
    pub const fn is_overlay(self) -> bool {
        matches!(
            self,
            DeviceState::Settings
                | DeviceState::SettingsConfirm
                | DeviceState::MoveHistory
                | DeviceState::Tutorial
        )
    }
}

/// The active screen together with the data only it needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiState {
    MainMenu { cursor: usize },
    PlayerInput { session: InputSession, cursor: AnimationState },
    Thinking { anim: AnimationState },
    EvalAnimation { anim: AnimationState },
    MoveDisplay { since_ms: u64, mv: MoveText },
    Illegal { since_ms: u64 },
    Promotion,
    Settings { cursor: usize },
    SettingsConfirm { action: ConfirmAction },
    MoveHistory { offset: usize, view: HistoryView },
    GameEnd { headline: Row, reason: Row },
    PlayConfig { cursor: usize },
    Tutorial { page: usize },
}

impl UiState {
    pub fn kind(&self) -> DeviceState {
        match self {
            UiState::MainMenu { .. } => DeviceState::MainMenu,
            UiState::PlayerInput { .. } => DeviceState::PlayerInput,
            UiState::Thinking { .. } => DeviceState::Thinking,
            UiState::EvalAnimation { .. } => DeviceState::EvalAnimation,
            UiState::MoveDisplay { .. } => DeviceState::MoveDisplay,
            UiState::Illegal { .. } => DeviceState::Illegal,
            UiState::Promotion => DeviceState::Promotion,
            UiState::Settings { .. } => DeviceState::Settings,
            UiState::SettingsConfirm { .. } => DeviceState::SettingsConfirm,
            UiState::MoveHistory { .. } => DeviceState::MoveHistory,
            UiState::GameEnd { .. } => DeviceState::GameEnd,
            UiState::PlayConfig { .. } => DeviceState::PlayConfig,
            UiState::Tutorial { .. } => DeviceState::Tutorial,
        }
    }

    pub fn player_input(now_ms: u64) -> Self {
        UiState::PlayerInput {
            session: InputSession::new(now_ms),
            cursor: AnimationState::start(animation::CURSOR, now_ms),
        }
    }

    pub fn thinking(now_ms: u64) -> Self {
        UiState::Thinking {
            anim: AnimationState::start(animation::THINKING, now_ms),
        }
    }
}

/// The whole terminal: screen, game and I/O buffers.
pub struct Terminal {
    ui: UiState,
    /// Screen to go back to when the settings overlay closes.
    overlay_return: Option<UiState>,
    debouncer: Debouncer,
    lines: LineBuffer,
    clock: ClockState,
    history: MoveHistory,
    /// Past games as last listed by the host.
    archive: GameArchive,
    selections: Selections,
    rng: SmallRng,
    game_active: bool,
    player: Side,
    /// Move sent to the host and not yet judged.
    pending_move: MoveText,
    /// Host's rendering of the player's move (`LAST:`).
    confirmed_move: Option<MoveText>,
    /// Host move that arrived while a reaction was still playing.
    queued_best: Option<MoveText>,
    last_move: Option<MoveText>,
    /// Hint text and when it stops being shown, once it is on screen.
    hint: Option<(MoveText, Option<u64>)>,
    outputs: Outputs,
}

impl Terminal {
    /// Power-on state: main menu, no game.
    pub fn new(seed: u64, now_ms: u64) -> Self {
        let mut terminal = Self {
            ui: UiState::MainMenu { cursor: 0 },
            overlay_return: None,
            debouncer: Debouncer::new(),
            lines: LineBuffer::new(),
            clock: ClockState::new(),
            history: MoveHistory::new(),
            archive: GameArchive::new(),
            selections: Selections::new(),
            rng: SmallRng::seed_from_u64(seed),
            game_active: false,
            player: Side::White,
            pending_move: MoveText::new(),
            confirmed_move: None,
            queued_best: None,
            last_move: None,
            hint: None,
            outputs: Outputs::new(),
        };
        terminal.on_enter();
        terminal.render(now_ms);
        terminal
    }

    /// One scheduler pass.
    ///
    /// `scan` is the raw keypad matrix, `rx` whatever bytes the host sent
    /// since the last pass.
    pub fn run_pass(&mut self, scan: &[[bool; 4]; 4], rx: &[u8], now_ms: u64) {
        if let Some(key) = self.debouncer.update(resolve_scan(scan), now_ms) {
            self.dispatch_key(key, now_ms);
        }
        self.receive_bytes(rx, now_ms);
        self.advance(now_ms);
        self.render(now_ms);
    }

    pub fn state(&self) -> DeviceState {
        self.ui.kind()
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn archive(&self) -> &GameArchive {
        &self.archive
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn difficulty(&self) -> u8 {
        self.selections.difficulty()
    }

    pub fn player_side(&self) -> Side {
        self.player
    }

    pub fn is_game_active(&self) -> bool {
        self.game_active
    }

    pub fn last_move(&self) -> Option<&str> {
        self.last_move.as_deref()
    }

    /// Characters typed so far, when entering a move.
    pub fn input_buffer(&self) -> Option<&str> {
        match &self.ui {
            UiState::PlayerInput { session, .. } => Some(session.buffer()),
            _ => None,
        }
    }

    /// Remembered screen while the settings overlay is open.
    pub fn overlay_return(&self) -> Option<DeviceState> {
        self.overlay_return.as_ref().map(UiState::kind)
    }

    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn outputs_mut(&mut self) -> &mut Outputs {
        &mut self.outputs
    }

    /// Switch screens. Every state change goes through here.
    ///
    /// Returns the screen that was left.
    fn transition(&mut self, next: UiState, now_ms: u64) -> UiState {
        info!("state {:?} -> {:?}", self.ui.kind(), next.kind());
        let previous = core::mem::replace(&mut self.ui, next);
        self.on_enter();
        self.render(now_ms);
        let rows = self.outputs.rows().clone();
        self.send(Command::Lcd(rows));
        previous
    }

    /// Change the game's screen, or only the remembered one while the
    /// settings overlay is up.
    fn route(&mut self, next: UiState, now_ms: u64) {
        if self.ui.kind().is_overlay() {
            debug!("overlay open, return to {:?}", next.kind());
            self.overlay_return = Some(next);
        } else {
            self.transition(next, now_ms);
        }
    }

    /// Screen of the game underneath any overlay.
    fn game_state(&self) -> DeviceState {
        if self.ui.kind().is_overlay() {
            self.overlay_return
                .as_ref()
                .map_or(DeviceState::MainMenu, UiState::kind)
        } else {
            self.ui.kind()
        }
    }

    fn send(&mut self, command: Command) {
        if self.outputs.send(command).is_err() {
            warn!("outbox full, command dropped");
        }
    }
}
