//! Move encoding and the per-position move catalog.
//!
//! A move slides 1-3 tiles into the empty cell along one row or column. From
//! any empty-cell position exactly six moves stay on the board: three along
//! its column and three along its row.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Position, CELLS, SIZE};
use crate::error::ParseMoveError;

/// Number of legal moves from any empty-cell position
pub const MOVES_PER_POSITION: usize = 6;
/// Longest slide, in tiles
pub const MAX_TILES: u8 = 3;

/// Direction the tiles travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Catalog order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Step taken by the empty cell, as (row, col). It moves against the tiles.
    pub fn empty_delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
            Direction::Left => (0, 1),
            Direction::Right => (0, -1),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }

    pub fn from_letter(letter: char) -> Option<Direction> {
        match letter.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// One unit step of the empty cell, or `None` if it would leave the board.
pub fn advance_empty(position: Position, direction: Direction) -> Option<Position> {
    let (dr, dc) = direction.empty_delta();
    let row = position.row.checked_add_signed(dr)?;
    let col = position.col.checked_add_signed(dc)?;
    (row < SIZE && col < SIZE).then(|| Position::new(row, col))
}

/// Slide `tiles` tiles in `direction`, along column `line` for vertical moves
/// or row `line` for horizontal ones (zero-based).
///
/// Renders as `<direction><tiles><line + 1>`, so `D13` slides one tile down
/// in the third column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Move {
    pub direction: Direction,
    pub tiles: u8,
    pub line: u8,
}

impl Move {
    pub fn new(direction: Direction, tiles: u8, line: u8) -> Self {
        Self {
            direction,
            tiles,
            line,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.direction.letter(), self.tiles, self.line + 1)
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMoveError(s.to_string());
        let mut chars = s.trim().chars();
        let (Some(letter), Some(tiles), Some(line), None) =
            (chars.next(), chars.next(), chars.next(), chars.next())
        else {
            return Err(err());
        };

        let direction = Direction::from_letter(letter).ok_or_else(err)?;
        let tiles = tiles.to_digit(10).ok_or_else(err)? as u8;
        let line = line.to_digit(10).ok_or_else(err)? as u8;
        if !(1..=MAX_TILES).contains(&tiles) || !(1..=SIZE as u8).contains(&line) {
            return Err(err());
        }
        Ok(Move::new(direction, tiles, line - 1))
    }
}

impl TryFrom<String> for Move {
    type Error = ParseMoveError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Move> for String {
    fn from(mv: Move) -> Self {
        mv.to_string()
    }
}

/// Parse a whitespace- or comma-separated move list such as `"D13 L13 U14"`.
pub fn parse_moves(text: &str) -> Result<Vec<Move>, ParseMoveError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

/// Legal moves for every empty-cell position, derived from board geometry.
#[derive(Debug, Clone)]
pub struct MoveCatalog {
    entries: Vec<SmallVec<[Move; MOVES_PER_POSITION]>>,
}

impl MoveCatalog {
    pub fn new() -> Self {
        let entries = (0..CELLS)
            .map(|index| Self::moves_from(Position::from_index(index)))
            .collect();
        Self { entries }
    }

    fn moves_from(empty: Position) -> SmallVec<[Move; MOVES_PER_POSITION]> {
        let mut moves = SmallVec::new();
        for direction in Direction::ALL {
            let line = if direction.is_vertical() {
                empty.col
            } else {
                empty.row
            };
            let mut reach = Some(empty);
            for tiles in 1..=MAX_TILES {
                reach = reach.and_then(|pos| advance_empty(pos, direction));
                if reach.is_none() {
                    break;
                }
                moves.push(Move::new(direction, tiles, line as u8));
            }
        }
        moves
    }

    /// Moves available when the empty cell is at `empty`, in catalog order.
    pub fn moves(&self, empty: Position) -> &[Move] {
        &self.entries[empty.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &[Move])> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, moves)| (Position::from_index(index), moves.as_slice()))
    }
}

impl Default for MoveCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notation(moves: &[Move]) -> Vec<String> {
        moves.iter().map(Move::to_string).collect()
    }

    #[test]
    fn test_every_position_has_six_moves() {
        let catalog = MoveCatalog::new();
        for (_, moves) in catalog.iter() {
            assert_eq!(moves.len(), MOVES_PER_POSITION);
        }
    }

    #[test]
    fn test_catalog_matches_known_table() {
        let catalog = MoveCatalog::new();
        assert_eq!(
            notation(catalog.moves(Position::new(0, 0))),
            ["U11", "U21", "U31", "L11", "L21", "L31"]
        );
        assert_eq!(
            notation(catalog.moves(Position::new(1, 2))),
            ["U13", "U23", "D13", "L12", "R12", "R22"]
        );
        assert_eq!(
            notation(catalog.moves(Position::new(2, 1))),
            ["U12", "D12", "D22", "L13", "L23", "R13"]
        );
        assert_eq!(
            notation(catalog.moves(Position::new(3, 3))),
            ["D14", "D24", "D34", "R14", "R24", "R34"]
        );
    }

    #[test]
    fn test_moves_stay_on_board() {
        let catalog = MoveCatalog::new();
        for (empty, moves) in catalog.iter() {
            for mv in moves {
                let mut pos = empty;
                for _ in 0..mv.tiles {
                    pos = advance_empty(pos, mv.direction).unwrap();
                }
            }
        }
    }

    #[test]
    fn test_advance_empty() {
        let corner = Position::new(0, 0);
        assert_eq!(advance_empty(corner, Direction::Up), Some(Position::new(1, 0)));
        assert_eq!(advance_empty(corner, Direction::Left), Some(Position::new(0, 1)));
        assert_eq!(advance_empty(corner, Direction::Down), None);
        assert_eq!(advance_empty(corner, Direction::Right), None);
    }

    #[test]
    fn test_parse_notation() {
        assert_eq!("D13".parse::<Move>(), Ok(Move::new(Direction::Down, 1, 2)));
        assert_eq!(
            parse_moves("D13, L13 U14").unwrap(),
            vec![
                Move::new(Direction::Down, 1, 2),
                Move::new(Direction::Left, 1, 2),
                Move::new(Direction::Up, 1, 3),
            ]
        );
        assert!("D43".parse::<Move>().is_err());
        assert!("X11".parse::<Move>().is_err());
        assert!("D15".parse::<Move>().is_err());
        assert!("D1".parse::<Move>().is_err());
    }

    #[test]
    fn test_move_serializes_as_notation() {
        let mv = Move::new(Direction::Right, 2, 0);
        assert_eq!(serde_json::to_string(&mv).unwrap(), "\"R21\"");
        let back: Move = serde_json::from_str("\"R21\"").unwrap();
        assert_eq!(back, mv);
    }
}
