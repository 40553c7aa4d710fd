//! Board representation for the 4x4 sliding-tile puzzle.
//!
//! A board is a value: every transformation returns a new `Board`, so search
//! nodes never alias each other's layouts. Tile `0` is the empty cell.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::moves::{advance_empty, Move};

/// Side length of the board
pub const SIZE: usize = 4;
/// Number of cells on the board
pub const CELLS: usize = SIZE * SIZE;
/// Value of the empty cell
pub const BLANK: u8 = 0;

/// Cell coordinate, zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn from_index(index: usize) -> Self {
        Self::new(index / SIZE, index % SIZE)
    }

    /// Row-major index into the flattened board
    pub fn index(self) -> usize {
        self.row * SIZE + self.col
    }

    /// Where `value` sits on the solved board. The empty cell belongs in the
    /// bottom-right corner.
    pub fn goal_of(value: u8) -> Self {
        if value == BLANK {
            Self::new(SIZE - 1, SIZE - 1)
        } else {
            Self::from_index(usize::from(value) - 1)
        }
    }

    pub fn manhattan(self, other: Position) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }
}

const GOAL_CELLS: [u8; CELLS] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 0];

/// A validated 4x4 arrangement of the values 0..=15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[[u8; 4]; 4]", into = "[[u8; 4]; 4]")]
pub struct Board {
    cells: [u8; CELLS],
}

impl Board {
    /// Build a board from its rows, checking that each value appears once.
    pub fn new(rows: [[u8; SIZE]; SIZE]) -> Result<Self, BoardError> {
        let mut seen = 0u16;
        let mut cells = [BLANK; CELLS];
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if usize::from(value) >= CELLS {
                    return Err(BoardError::OutOfRange { value, row, col });
                }
                let bit = 1u16 << value;
                if seen & bit != 0 {
                    return Err(BoardError::Duplicate { value });
                }
                seen |= bit;
                cells[Position::new(row, col).index()] = value;
            }
        }
        Ok(Self { cells })
    }

    /// The solved board
    pub fn goal() -> Self {
        Self { cells: GOAL_CELLS }
    }

    pub fn is_goal(&self) -> bool {
        self.cells == GOAL_CELLS
    }

    pub fn tile(&self, pos: Position) -> u8 {
        self.cells[pos.index()]
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    pub fn rows(&self) -> [[u8; SIZE]; SIZE] {
        let mut rows = [[BLANK; SIZE]; SIZE];
        for (index, &value) in self.cells.iter().enumerate() {
            let pos = Position::from_index(index);
            rows[pos.row][pos.col] = value;
        }
        rows
    }

    /// Position of `value`.
    ///
    /// # Panics
    ///
    /// Panics if the value is absent, which a board built through
    /// [`Board::new`] rules out.
    pub fn locate(&self, value: u8) -> Position {
        self.cells
            .iter()
            .position(|&v| v == value)
            .map(Position::from_index)
            .unwrap_or_else(|| panic!("tile {} missing from board", value))
    }

    pub fn blank(&self) -> Position {
        self.locate(BLANK)
    }

    /// Exact 64-bit key: one nibble per cell, first cell most significant.
    pub fn hash(&self) -> u64 {
        self.cells
            .iter()
            .fold(0u64, |acc, &value| (acc << 4) | u64::from(value))
    }

    /// Pairs of tiles out of row-major order. Tiles below 2 and the empty
    /// cell are skipped as the left member of a pair.
    pub fn inversions(&self) -> usize {
        let mut count = 0;
        for (i, &value) in self.cells.iter().enumerate().take(CELLS - 1) {
            if value < 2 {
                continue;
            }
            count += self.cells[i + 1..]
                .iter()
                .filter(|&&later| later != BLANK && later < value)
                .count();
        }
        count
    }

    /// Inversion parity must match the parity of the empty cell's row plus one.
    pub fn is_solvable(&self) -> bool {
        self.inversions() % 2 == (self.blank().row + 1) % 2
    }

    /// Apply `mv` if it is legal from the current empty cell.
    pub fn apply(&self, mv: &Move) -> Option<Board> {
        let blank = self.blank();
        let line = if mv.direction.is_vertical() {
            blank.col
        } else {
            blank.row
        };
        if usize::from(mv.line) != line || !(1..=3).contains(&mv.tiles) {
            return None;
        }

        let mut cells = self.cells;
        let mut empty = blank;
        for _ in 0..mv.tiles {
            let next = advance_empty(empty, mv.direction)?;
            cells.swap(empty.index(), next.index());
            empty = next;
        }
        Some(Board { cells })
    }

    /// Apply a move taken from the catalog for this board's empty cell.
    pub(crate) fn slide(&self, blank: Position, mv: &Move) -> Board {
        let mut cells = self.cells;
        let mut empty = blank;
        for _ in 0..mv.tiles {
            match advance_empty(empty, mv.direction) {
                Some(next) => {
                    cells.swap(empty.index(), next.index());
                    empty = next;
                }
                None => unreachable!("catalog move {} leaves the board from {:?}", mv, blank),
            }
        }
        Board { cells }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::goal()
    }
}

impl TryFrom<[[u8; SIZE]; SIZE]> for Board {
    type Error = BoardError;

    fn try_from(rows: [[u8; SIZE]; SIZE]) -> Result<Self, Self::Error> {
        Board::new(rows)
    }
}

impl From<Board> for [[u8; SIZE]; SIZE] {
    fn from(board: Board) -> Self {
        board.rows()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row
                .iter()
                .map(|&value| {
                    if value == BLANK {
                        "--".to_string()
                    } else {
                        format!("{:2}", value)
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Direction;

    fn board(rows: [[u8; 4]; 4]) -> Board {
        Board::new(rows).unwrap()
    }

    #[test]
    fn test_locate_empty_cell() {
        let b = board([[0, 1, 2, 3], [4, 5, 6, 7], [8, 9, 10, 11], [12, 13, 14, 15]]);
        assert_eq!(b.blank(), Position::new(0, 0));
        assert_eq!(b.locate(11), Position::new(2, 3));
    }

    #[test]
    fn test_new_rejects_malformed_boards() {
        let dup = Board::new([[1, 1, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 15, 0]]);
        assert_eq!(dup, Err(BoardError::Duplicate { value: 1 }));

        let big = Board::new([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 16, 0]]);
        assert_eq!(
            big,
            Err(BoardError::OutOfRange {
                value: 16,
                row: 3,
                col: 2
            })
        );
    }

    #[test]
    fn test_solvability() {
        let swapped = board([[2, 1, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 15, 0]]);
        assert!(!swapped.is_solvable());

        let scrambled = board([[1, 2, 3, 4], [7, 5, 6, 12], [8, 9, 10, 11], [13, 14, 15, 0]]);
        assert!(scrambled.is_solvable());

        assert!(Board::goal().is_solvable());
    }

    #[test]
    fn test_hash_is_exact_and_content_only() {
        let a = Board::goal();
        let b = board([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 15, 0]]);
        assert_eq!(a.hash(), b.hash());
        assert_eq!(a.hash(), 0x1234_5678_9ABC_DEF0);

        let swapped = board([[2, 1, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 15, 0]]);
        assert_ne!(a.hash(), swapped.hash());
    }

    #[test]
    fn test_apply_multi_tile_slide() {
        // Empty cell bottom-right: sliding three tiles down column 4.
        let mv = Move::new(Direction::Down, 3, 3);
        let moved = Board::goal().apply(&mv).unwrap();
        assert_eq!(
            moved.rows(),
            [[1, 2, 3, 0], [5, 6, 7, 4], [9, 10, 11, 8], [13, 14, 15, 12]]
        );

        // Wrong column for the empty cell.
        assert!(Board::goal().apply(&Move::new(Direction::Down, 1, 0)).is_none());
        // Would push the empty cell off the board.
        assert!(Board::goal().apply(&Move::new(Direction::Up, 1, 3)).is_none());
    }

    #[test]
    fn test_display_marks_empty_cell() {
        let text = Board::goal().to_string();
        assert!(text.starts_with(" 1  2  3  4\n"));
        assert!(text.ends_with("13 14 15 --\n"));
    }
}
