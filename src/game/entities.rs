//! # Pieces
//!
//! The things that occupy board cells. There are exactly two kinds, so a
//! piece is a tagged variant over a shared position rather than a trait
//! object: dispatch is a match on the kind.

use crate::game::{Direction, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Discriminator between the player-controlled explorer and the adversaries
/// it hunts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Explorer,
    Adversary,
}

/// A piece on the board: a kind plus its current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub position: Position,
}

impl Piece {
    /// Creates the explorer at the origin, where every session begins.
    pub fn explorer() -> Self {
        Self {
            kind: PieceKind::Explorer,
            position: Position::origin(),
        }
    }

    /// Creates an adversary at the given cell.
    pub fn adversary_at(position: Position) -> Self {
        Self {
            kind: PieceKind::Adversary,
            position,
        }
    }

    /// Draws an adversary at a uniformly random cell of the board.
    ///
    /// The draw does not consider occupancy; the session retries until the
    /// drawn cell is free.
    pub fn random_adversary<R: Rng>(width: u32, height: u32, rng: &mut R) -> Self {
        let x = rng.gen_range(0..width) as i32;
        let y = rng.gen_range(0..height) as i32;
        Self::adversary_at(Position::new(x, y))
    }

    /// Returns true for adversary pieces.
    pub fn is_adversary(&self) -> bool {
        self.kind == PieceKind::Adversary
    }

    /// Moves this piece one cell in the given direction.
    ///
    /// A step that would leave the `width` × `height` board is a silent
    /// no-op, not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use lamplight::{Direction, Piece, Position};
    ///
    /// let mut explorer = Piece::explorer();
    /// explorer.step(Direction::Up, 5, 5); // clamped at the top edge
    /// assert_eq!(explorer.position, Position::origin());
    ///
    /// explorer.step(Direction::Right, 5, 5);
    /// assert_eq!(explorer.position, Position::new(1, 0));
    /// ```
    pub fn step(&mut self, direction: Direction, width: u32, height: u32) {
        let next = self.position + direction.to_delta();
        if next.x >= 0 && next.x < width as i32 && next.y >= 0 && next.y < height as i32 {
            self.position = next;
        }
    }
}
