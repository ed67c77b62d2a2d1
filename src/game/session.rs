//! # Game Session
//!
//! Orchestrates a whole game: setup validation, adversary spawning, the
//! turn loop, capture resolution, and win/lose evaluation.
//!
//! One turn is: check the lamp, render, read one command line, apply each
//! movement token with an immediate capture check, optionally relocate the
//! adversaries, evaluate the win condition, then burn one turn of lamp.

use crate::game::{Board, Direction, Piece, Position};
use crate::io::{CommandSource, GameDisplay};
use crate::{LamplightError, LamplightResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The five scalars that define a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Board width in cells
    pub width: u32,
    /// Board height in cells
    pub height: u32,
    /// Number of adversaries to spawn
    pub adversaries: u32,
    /// Lamp lifespan: the turn budget
    pub lamp_lifespan: u32,
    /// Whether adversaries relocate after every processed command line
    pub adversaries_move: bool,
}

impl SessionConfig {
    /// Validates the configuration before any session state is built.
    ///
    /// The board must have at least one cell, and the adversaries must
    /// leave the explorer's cell free; with no free cell the spawn's
    /// rejection sampling would never terminate.
    pub fn validate(&self) -> LamplightResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LamplightError::InvalidConfig(format!(
                "board dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        let cells = self.width.checked_mul(self.height).ok_or_else(|| {
            LamplightError::InvalidConfig(format!(
                "board {}x{} is too large to index",
                self.width, self.height
            ))
        })?;
        if self.adversaries >= cells {
            return Err(LamplightError::InvalidConfig(format!(
                "{} adversaries cannot fit on a {}-cell board with the explorer",
                self.adversaries, cells
            )));
        }
        Ok(())
    }
}

/// The session state machine. Setup happens in the constructors; a session
/// starts in `Playing` and ends in exactly one of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Turns are still being played
    Playing,
    /// Every adversary was captured while the lamp still burned
    Won,
    /// The lamp burned out with adversaries remaining
    Lost,
}

impl GamePhase {
    /// Returns true once the session has ended.
    pub fn is_terminal(self) -> bool {
        self != GamePhase::Playing
    }
}

/// Snapshot of one turn, handed to the display collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnView {
    pub remaining_turns: u32,
    pub width: u32,
    pub height: u32,
    pub explorer: Piece,
    /// Surviving adversaries, ordered by cell index
    pub adversaries: Vec<Piece>,
}

/// One game from setup to a terminal phase.
///
/// # Examples
///
/// ```
/// use lamplight::{GamePhase, GameSession, SessionConfig};
///
/// let config = SessionConfig {
///     width: 4,
///     height: 3,
///     adversaries: 2,
///     lamp_lifespan: 10,
///     adversaries_move: false,
/// };
/// let session = GameSession::new(config, 42).unwrap();
/// assert_eq!(session.phase(), GamePhase::Playing);
/// assert_eq!(session.adversaries_left(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    explorer: Piece,
    remaining_turns: u32,
    adversaries_left: u32,
    phase: GamePhase,
    rng: StdRng,
}

impl GameSession {
    /// Sets up a session: validates the configuration, creates the explorer
    /// at the origin, and spawns the configured number of adversaries at
    /// uniformly random free cells.
    pub fn new(config: SessionConfig, seed: u64) -> LamplightResult<Self> {
        config.validate()?;
        let mut session = Self {
            board: Board::new(config.width, config.height),
            explorer: Piece::explorer(),
            remaining_turns: config.lamp_lifespan,
            adversaries_left: config.adversaries,
            phase: GamePhase::Playing,
            rng: StdRng::seed_from_u64(seed),
            config,
        };
        let spawned = session.sample_adversaries(config.adversaries);
        session.board.rebuild(session.explorer, &spawned);
        info!(
            "session ready: {}x{} board, {} adversaries, lamp lifespan {}",
            config.width, config.height, config.adversaries, config.lamp_lifespan
        );
        Ok(session)
    }

    /// Sets up a session with adversaries at scripted cells instead of
    /// random ones, for tests and tooling.
    ///
    /// The adversary count of `config` is overridden by `positions.len()`.
    /// Positions must be in bounds, distinct, and off the explorer's
    /// origin cell.
    pub fn new_with_adversaries(
        config: SessionConfig,
        seed: u64,
        positions: &[Position],
    ) -> LamplightResult<Self> {
        let mut config = config;
        config.adversaries = positions.len() as u32;
        config.validate()?;

        let mut session = Self {
            board: Board::new(config.width, config.height),
            explorer: Piece::explorer(),
            remaining_turns: config.lamp_lifespan,
            adversaries_left: config.adversaries,
            phase: GamePhase::Playing,
            rng: StdRng::seed_from_u64(seed),
            config,
        };
        session.board.place(session.explorer);
        for &position in positions {
            if position.x < 0
                || position.x >= config.width as i32
                || position.y < 0
                || position.y >= config.height as i32
            {
                return Err(LamplightError::InvalidPlacement(format!(
                    "({}, {}) is outside the {}x{} board",
                    position.x, position.y, config.width, config.height
                )));
            }
            let index = session.board.index_of(position);
            if !session.board.is_free(index) {
                return Err(LamplightError::InvalidPlacement(format!(
                    "cell {} is already occupied",
                    index
                )));
            }
            session.board.place(Piece::adversary_at(position));
        }
        Ok(session)
    }

    /// Current phase of the state machine.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Turns left on the lamp.
    pub fn remaining_turns(&self) -> u32 {
        self.remaining_turns
    }

    /// Adversaries not yet captured.
    pub fn adversaries_left(&self) -> u32 {
        self.adversaries_left
    }

    /// The explorer piece.
    pub fn explorer(&self) -> &Piece {
        &self.explorer
    }

    /// The board occupancy state.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The configuration the session was built from.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Snapshot of the current turn for rendering.
    pub fn turn_view(&self) -> TurnView {
        TurnView {
            remaining_turns: self.remaining_turns,
            width: self.config.width,
            height: self.config.height,
            explorer: self.explorer,
            adversaries: self.board.adversaries(),
        }
    }

    /// Plays one full turn from a single command line.
    ///
    /// Tokens are applied in order; each recognized token steps the
    /// explorer one cell and immediately resolves a capture at the new
    /// cell, so a multi-token line can capture mid-path. Unrecognized
    /// tokens are ignored. Calling on a terminal session is a no-op.
    pub fn play_turn(&mut self, command_line: &str) -> GamePhase {
        if self.begin_turn().is_terminal() {
            return self.phase;
        }
        for token in command_line.chars() {
            if let Some(direction) = Direction::from_command(token) {
                self.step_explorer(direction);
            }
        }
        if self.config.adversaries_move && self.adversaries_left > 0 {
            let relocated = self.sample_adversaries(self.adversaries_left);
            self.board.rebuild(self.explorer, &relocated);
        }
        if self.adversaries_left == 0 {
            info!("all adversaries captured, session won");
            self.phase = GamePhase::Won;
            return self.phase;
        }
        self.remaining_turns -= 1;
        self.phase
    }

    /// Runs the session to completion against the two collaborators,
    /// blocking on the command source once per turn.
    pub fn run<I, D>(&mut self, input: &mut I, display: &mut D) -> LamplightResult<GamePhase>
    where
        I: CommandSource + ?Sized,
        D: GameDisplay + ?Sized,
    {
        while !self.begin_turn().is_terminal() {
            display.show_turn(&self.turn_view())?;
            let line = input.next_command_line()?;
            self.play_turn(&line);
        }
        display.show_outcome(self.phase)?;
        Ok(self.phase)
    }

    /// Turn-entry check: an exhausted lamp loses the session before any
    /// rendering or command collection happens.
    fn begin_turn(&mut self) -> GamePhase {
        if self.phase == GamePhase::Playing && self.remaining_turns == 0 {
            info!(
                "lamp burned out with {} adversaries left",
                self.adversaries_left
            );
            self.phase = GamePhase::Lost;
        }
        self.phase
    }

    /// Steps the explorer one cell and resolves a capture at the new cell.
    fn step_explorer(&mut self, direction: Direction) {
        let from = self.explorer.position;
        self.explorer
            .step(direction, self.config.width, self.config.height);
        let to = self.explorer.position;
        debug!("explorer {:?}: ({}, {}) to ({}, {})", direction, from.x, from.y, to.x, to.y);
        if to == from {
            // clamped at the edge
            return;
        }

        self.board.remove(from.to_index(self.config.width));
        let target = to.to_index(self.config.width);
        if self
            .board
            .occupant_at(target)
            .map_or(false, |piece| piece.is_adversary())
        {
            self.board.remove(target);
            self.adversaries_left -= 1;
            info!(
                "captured adversary at cell {}, {} remaining",
                target, self.adversaries_left
            );
        }
        self.board.place(self.explorer);
    }

    /// Draws `count` adversaries by rejection sampling: each draw is
    /// retried until its cell is neither the explorer's nor an earlier
    /// draw's. Setup validation guarantees a free cell always exists.
    fn sample_adversaries(&mut self, count: u32) -> Vec<Piece> {
        let width = self.config.width;
        let mut taken: HashSet<u32> = HashSet::new();
        taken.insert(self.explorer.position.to_index(width));

        let mut spawned = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let mut adversary =
                Piece::random_adversary(width, self.config.height, &mut self.rng);
            while !taken.insert(adversary.position.to_index(width)) {
                adversary = Piece::random_adversary(width, self.config.height, &mut self.rng);
            }
            spawned.push(adversary);
        }
        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: u32, height: u32, adversaries: u32, lamp_lifespan: u32) -> SessionConfig {
        SessionConfig {
            width,
            height,
            adversaries,
            lamp_lifespan,
            adversaries_move: false,
        }
    }

    #[test]
    fn test_setup_registers_all_pieces() {
        let session = GameSession::new(config(6, 4, 5, 10), 7).unwrap();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.remaining_turns(), 10);
        assert_eq!(session.adversaries_left(), 5);
        // explorer + adversaries, one cell each
        assert_eq!(session.board().occupied_cells(), 6);
        assert_eq!(session.explorer().position, Position::origin());
    }

    #[test]
    fn test_setup_rejects_zero_dimensions() {
        let err = GameSession::new(config(0, 4, 1, 10), 7).unwrap_err();
        assert!(matches!(err, LamplightError::InvalidConfig(_)));
        let err = GameSession::new(config(4, 0, 1, 10), 7).unwrap_err();
        assert!(matches!(err, LamplightError::InvalidConfig(_)));
    }

    #[test]
    fn test_setup_rejects_overfull_board() {
        // 2x2 board: the explorer takes one cell, so 4 adversaries can't fit
        let err = GameSession::new(config(2, 2, 4, 10), 7).unwrap_err();
        assert!(matches!(err, LamplightError::InvalidConfig(_)));
        assert!(GameSession::new(config(2, 2, 3, 10), 7).is_ok());
    }

    #[test]
    fn test_scripted_setup_rejects_bad_positions() {
        let cfg = config(3, 3, 0, 5);
        let err =
            GameSession::new_with_adversaries(cfg, 7, &[Position::new(3, 0)]).unwrap_err();
        assert!(matches!(err, LamplightError::InvalidPlacement(_)));

        let err = GameSession::new_with_adversaries(cfg, 7, &[Position::origin()]).unwrap_err();
        assert!(matches!(err, LamplightError::InvalidPlacement(_)));

        let err = GameSession::new_with_adversaries(
            cfg,
            7,
            &[Position::new(1, 1), Position::new(1, 1)],
        )
        .unwrap_err();
        assert!(matches!(err, LamplightError::InvalidPlacement(_)));
    }

    #[test]
    fn test_spawns_never_collide() {
        for seed in 0..20 {
            let session = GameSession::new(config(3, 3, 8, 5), seed).unwrap();
            assert_eq!(session.board().occupied_cells(), 9);
            assert_eq!(session.board().adversaries().len(), 8);
        }
    }

    #[test]
    fn test_turn_decrements_lamp() {
        let mut session = GameSession::new(config(4, 4, 2, 3), 7).unwrap();
        session.play_turn("");
        assert_eq!(session.remaining_turns(), 2);
        session.play_turn("qqq");
        assert_eq!(session.remaining_turns(), 1);
    }

    #[test]
    fn test_exhausted_lamp_loses_before_commands() {
        let mut session = GameSession::new_with_adversaries(
            config(4, 1, 0, 0),
            7,
            &[Position::new(3, 0)],
        )
        .unwrap();
        assert_eq!(session.play_turn("ddd"), GamePhase::Lost);
        // the command line was never processed
        assert_eq!(session.explorer().position, Position::origin());
    }

    #[test]
    fn test_terminal_session_ignores_turns() {
        let mut session = GameSession::new(config(2, 2, 0, 5), 7).unwrap();
        assert_eq!(session.play_turn(""), GamePhase::Won);
        assert_eq!(session.play_turn("d"), GamePhase::Won);
        assert_eq!(session.remaining_turns(), 5);
    }

    #[test]
    fn test_capture_updates_board_and_counter() {
        let mut session = GameSession::new_with_adversaries(
            config(4, 1, 0, 5),
            7,
            &[Position::new(1, 0), Position::new(3, 0)],
        )
        .unwrap();
        session.play_turn("d");
        assert_eq!(session.adversaries_left(), 1);
        assert_eq!(session.board().adversaries().len(), 1);
        // the explorer now occupies the captured adversary's cell
        let explorer_cell = session.board().occupant_at(1).unwrap();
        assert!(!explorer_cell.is_adversary());
    }

    #[test]
    fn test_relocation_preserves_invariants() {
        let cfg = SessionConfig {
            width: 4,
            height: 4,
            adversaries: 5,
            lamp_lifespan: 50,
            adversaries_move: true,
        };
        let mut session = GameSession::new(cfg, 11).unwrap();
        for _ in 0..20 {
            if session.play_turn("d").is_terminal() {
                break;
            }
            let survivors = session.board().adversaries();
            assert_eq!(survivors.len() as u32, session.adversaries_left());
            assert_eq!(
                session.board().occupied_cells() as u32,
                session.adversaries_left() + 1
            );
            let explorer_index = session.board().index_of(session.explorer().position);
            for adversary in &survivors {
                assert_ne!(session.board().index_of(adversary.position), explorer_index);
            }
        }
    }

    #[test]
    fn test_config_serde_round_trip() {
        let cfg = config(5, 4, 3, 12);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_turn_view_snapshot() {
        let session = GameSession::new_with_adversaries(
            config(3, 2, 0, 4),
            7,
            &[Position::new(1, 1)],
        )
        .unwrap();
        let view = session.turn_view();
        assert_eq!(view.remaining_turns, 4);
        assert_eq!((view.width, view.height), (3, 2));
        assert_eq!(view.explorer.position, Position::origin());
        assert_eq!(view.adversaries.len(), 1);
        assert_eq!(view.adversaries[0].position, Position::new(1, 1));
    }
}
