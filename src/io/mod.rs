//! # Collaborator Seams
//!
//! The session talks to the outside world through two traits: one that
//! supplies command lines and one that consumes turn snapshots and the
//! terminal outcome. Console implementations live in [`console`]; tests
//! drive the same traits with in-memory buffers.

pub mod console;

pub use console::*;

use crate::game::{GamePhase, TurnView};
use crate::LamplightResult;

/// Supplies one line of movement commands per turn.
///
/// The call blocks until a line is available; the session places no bound
/// on how long that takes.
pub trait CommandSource {
    fn next_command_line(&mut self) -> LamplightResult<String>;
}

/// Consumes the per-turn snapshot and, once, the terminal outcome.
pub trait GameDisplay {
    fn show_turn(&mut self, view: &TurnView) -> LamplightResult<()>;
    fn show_outcome(&mut self, phase: GamePhase) -> LamplightResult<()>;
}
