//! # Lamplight
//!
//! A turn-based dungeon chase. The explorer starts in a corner of a dark
//! rectangular board, carrying a lamp with a fixed lifespan measured in
//! turns. Adversaries lurk at random cells; stepping onto one captures it.
//! Capture them all before the lamp burns out to win.
//!
//! ## Architecture Overview
//!
//! The crate is split along the seam between the engine and its terminal
//! frontend:
//!
//! - **Grid Geometry**: pure coordinate/index mapping on a fixed-size board
//! - **Pieces**: the explorer and adversaries as a tagged variant over a
//!   shared position
//! - **Board State**: the cell-index → piece occupancy map, one piece per
//!   cell at all times
//! - **Game Session**: the turn loop state machine (Playing → Won/Lost)
//! - **Collaborators**: `CommandSource` and `GameDisplay` traits so the
//!   session never touches stdin/stdout directly; console implementations
//!   are provided
//!
//! The session is fully synchronous: each turn blocks on the next command
//! line and everything inside the playing loop is total.

pub mod game;
pub mod io;

// Core module re-exports
pub use game::*;
pub use io::*;

// Explicit re-exports for commonly used types
pub use game::{
    Board, Direction, GamePhase, GameSession, Piece, PieceKind, Position, SessionConfig, TurnView,
};
pub use io::{CommandSource, ConsoleDisplay, ConsoleInput, GameDisplay};

/// Core error type for the Lamplight engine.
#[derive(thiserror::Error, Debug)]
pub enum LamplightError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Session configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Scripted piece placement is invalid
    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),
}

/// Result type used throughout the Lamplight codebase.
pub type LamplightResult<T> = Result<T, LamplightError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default board width in cells
    pub const DEFAULT_BOARD_WIDTH: u32 = 10;

    /// Default board height in cells
    pub const DEFAULT_BOARD_HEIGHT: u32 = 10;

    /// Default number of adversaries
    pub const DEFAULT_ADVERSARIES: u32 = 3;

    /// Default lamp lifespan in turns
    pub const DEFAULT_LAMP_LIFESPAN: u32 = 20;

    /// Marker printed for the explorer's cell
    pub const EXPLORER_MARKER: char = '@';

    /// Marker printed for an adversary's cell
    pub const ADVERSARY_MARKER: char = 'v';

    /// Marker printed for an empty cell
    pub const EMPTY_MARKER: char = '.';
}
