//! # Board State
//!
//! Occupancy tracking for the dungeon floor: a map from linear cell index
//! to the piece standing there. The board owns its pieces; the invariant is
//! at most one piece per cell at any time.

use crate::game::{Piece, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The occupancy map for one fixed-size board.
///
/// Dimensions are set at construction and never change for the lifetime of
/// a session. Callers are responsible for keeping the one-piece-per-cell
/// invariant when placing: either verify the cell is free first or use
/// rejection sampling, as the session does for adversary spawns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    width: u32,
    height: u32,
    cells: HashMap<u32, Piece>,
}

impl Board {
    /// Creates an empty board with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: HashMap::new(),
        }
    }

    /// Board width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Board height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> u32 {
        self.width * self.height
    }

    /// Linear index of a position on this board.
    pub fn index_of(&self, position: Position) -> u32 {
        position.to_index(self.width)
    }

    /// Looks up the piece occupying a cell, if any.
    pub fn occupant_at(&self, index: u32) -> Option<&Piece> {
        self.cells.get(&index)
    }

    /// Returns true if no piece occupies the cell.
    pub fn is_free(&self, index: u32) -> bool {
        !self.cells.contains_key(&index)
    }

    /// Inserts a piece at its own position.
    ///
    /// The caller must have already verified the cell is free; placing onto
    /// an occupied cell replaces the occupant.
    pub fn place(&mut self, piece: Piece) {
        let index = self.index_of(piece.position);
        self.cells.insert(index, piece);
    }

    /// Removes and returns the occupant of a cell, used when an adversary
    /// is captured or the explorer steps away.
    pub fn remove(&mut self, index: u32) -> Option<Piece> {
        self.cells.remove(&index)
    }

    /// Clears the map and re-inserts the explorer, then every surviving
    /// adversary. Used when adversaries relocate between turns.
    pub fn rebuild(&mut self, explorer: Piece, adversaries: &[Piece]) {
        self.cells.clear();
        self.place(explorer);
        for adversary in adversaries {
            self.place(*adversary);
        }
    }

    /// Surviving adversaries, ordered by cell index for stable rendering.
    pub fn adversaries(&self) -> Vec<Piece> {
        let mut pieces: Vec<Piece> = self
            .cells
            .values()
            .filter(|piece| piece.is_adversary())
            .copied()
            .collect();
        pieces.sort_by_key(|piece| self.index_of(piece.position));
        pieces
    }

    /// Number of occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(4, 3);
        assert_eq!(board.cell_count(), 12);
        assert_eq!(board.occupied_cells(), 0);
        assert!(board.is_free(0));
    }

    #[test]
    fn test_place_and_lookup() {
        let mut board = Board::new(4, 3);
        let adversary = Piece::adversary_at(Position::new(2, 1));
        board.place(adversary);

        let index = board.index_of(Position::new(2, 1));
        assert_eq!(board.occupant_at(index), Some(&adversary));
        assert!(!board.is_free(index));
        assert!(board.is_free(0));
    }

    #[test]
    fn test_remove_returns_occupant() {
        let mut board = Board::new(4, 3);
        let adversary = Piece::adversary_at(Position::new(1, 2));
        board.place(adversary);

        let index = board.index_of(Position::new(1, 2));
        assert_eq!(board.remove(index), Some(adversary));
        assert_eq!(board.remove(index), None);
        assert_eq!(board.occupied_cells(), 0);
    }

    #[test]
    fn test_rebuild_replaces_contents() {
        let mut board = Board::new(5, 5);
        board.place(Piece::adversary_at(Position::new(4, 4)));

        let explorer = Piece::explorer();
        let survivors = [
            Piece::adversary_at(Position::new(1, 0)),
            Piece::adversary_at(Position::new(3, 2)),
        ];
        board.rebuild(explorer, &survivors);

        assert_eq!(board.occupied_cells(), 3);
        assert!(board.is_free(board.index_of(Position::new(4, 4))));
        assert_eq!(board.occupant_at(0), Some(&explorer));
    }

    #[test]
    fn test_adversaries_sorted_by_index() {
        let mut board = Board::new(3, 3);
        board.place(Piece::explorer());
        board.place(Piece::adversary_at(Position::new(1, 2)));
        board.place(Piece::adversary_at(Position::new(2, 0)));
        board.place(Piece::adversary_at(Position::new(0, 1)));

        let indices: Vec<u32> = board
            .adversaries()
            .iter()
            .map(|piece| board.index_of(piece.position))
            .collect();
        assert_eq!(indices, vec![2, 3, 5]);
    }
}
