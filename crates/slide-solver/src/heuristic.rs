//! Remaining-moves estimate: Manhattan distance plus linear conflicts.
//!
//! One move can shift up to three tiles one cell each, so the per-tile sum is
//! divided by three to stay admissible under the multi-tile move model. To
//! keep priorities exact, search arithmetic is done in thirds of a move
//! ([`Cost`]) and only converted to `f64` for reporting.

use smallvec::SmallVec;

use crate::board::{Board, Position, BLANK, SIZE};

/// Extra tile steps charged per linear conflict
const CONFLICT_PENALTY: u32 = 2;
/// Tiles a single move can shift
const TILES_PER_MOVE: u32 = 3;

/// Sum over tiles 1..=15 of the distance to their goal cell.
pub fn manhattan(board: &Board) -> u32 {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value != BLANK)
        .map(|(index, &value)| Position::from_index(index).manhattan(Position::goal_of(value)))
        .sum()
}

/// Inverted pairs among the tiles that already sit in their goal row (and
/// likewise for columns).
pub fn linear_conflicts(board: &Board) -> u32 {
    let mut conflicts = 0;
    for line in 0..SIZE {
        let row = (0..SIZE)
            .map(|col| board.tile(Position::new(line, col)))
            .filter(|&value| value != BLANK && Position::goal_of(value).row == line)
            .collect::<SmallVec<[u8; SIZE]>>();
        conflicts += inverted_pairs(&row);

        let col = (0..SIZE)
            .map(|row| board.tile(Position::new(row, line)))
            .filter(|&value| value != BLANK && Position::goal_of(value).col == line)
            .collect::<SmallVec<[u8; SIZE]>>();
        conflicts += inverted_pairs(&col);
    }
    conflicts
}

fn inverted_pairs(tiles: &[u8]) -> u32 {
    let mut count = 0;
    for (i, &a) in tiles.iter().enumerate() {
        count += tiles[i + 1..].iter().filter(|&&b| b < a).count() as u32;
    }
    count
}

/// Estimate in thirds of a move: `manhattan + 2 * conflicts`.
pub fn raw_estimate(board: &Board) -> u32 {
    manhattan(board) + CONFLICT_PENALTY * linear_conflicts(board)
}

/// Estimated moves to the goal.
pub fn estimate(board: &Board) -> f64 {
    f64::from(raw_estimate(board)) / f64::from(TILES_PER_MOVE)
}

/// A priority `g + h` held exactly as a count of thirds of a move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cost(u32);

impl Cost {
    /// `moves` taken so far plus a raw estimate from [`raw_estimate`].
    pub fn new(moves: u32, raw_estimate: u32) -> Self {
        Cost(moves * TILES_PER_MOVE + raw_estimate)
    }

    pub fn thirds(self) -> u32 {
        self.0
    }

    pub fn as_moves(self) -> f64 {
        f64::from(self.0) / f64::from(TILES_PER_MOVE)
    }
}
