//! # Game Module
//!
//! The engine proper: grid geometry, pieces, board occupancy, and the
//! session state machine. Nothing in here performs I/O; rendering and
//! command collection go through the traits in [`crate::io`].

pub mod board;
pub mod entities;
pub mod session;

pub use board::*;
pub use entities::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// A 2D coordinate on the board.
///
/// Coordinates grow rightward in `x` and downward in `y`, with the origin
/// in the top-left corner where the explorer starts.
///
/// # Examples
///
/// ```
/// use lamplight::Position;
///
/// let pos = Position::new(2, 1);
/// assert_eq!(pos.to_index(3), 5);
/// assert_eq!(Position::from_index(5, 3), pos);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Maps this position to its linear cell index, `y * width + x`.
    ///
    /// No bounds checking beyond what the caller guarantees; out-of-bounds
    /// coordinates produce indices that alias other rows.
    pub fn to_index(self, width: u32) -> u32 {
        self.y as u32 * width + self.x as u32
    }

    /// Inverse of [`Position::to_index`].
    pub fn from_index(index: u32, width: u32) -> Self {
        Self::new((index % width) as i32, (index / width) as i32)
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// Directions the explorer can step in, one cell at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use lamplight::{Direction, Position};
    ///
    /// assert_eq!(Direction::Up.to_delta(), Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// Maps a single command character to a direction.
    ///
    /// The accepted commands are `w` (up), `a` (left), `s` (down) and
    /// `d` (right); every other character yields `None` and is ignored by
    /// the session.
    ///
    /// # Examples
    ///
    /// ```
    /// use lamplight::Direction;
    ///
    /// assert_eq!(Direction::from_command('w'), Some(Direction::Up));
    /// assert_eq!(Direction::from_command('x'), None);
    /// ```
    pub fn from_command(command: char) -> Option<Direction> {
        match command {
            'w' => Some(Direction::Up),
            'a' => Some(Direction::Left),
            's' => Some(Direction::Down),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }

    /// Returns all four directions.
    pub fn all() -> Vec<Direction> {
        vec![
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}
