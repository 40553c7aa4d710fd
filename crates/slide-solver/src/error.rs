//! Fault types surfaced by the library.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::solver::SearchStats;

/// A 4x4 layout that is not a permutation of 0..=15.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    OutOfRange { value: u8, row: usize, col: usize },
    Duplicate { value: u8 },
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            BoardError::OutOfRange { value, row, col } => {
                write!(f, "tile {} at ({}, {}) is outside 0..=15", value, row, col)
            }
            BoardError::Duplicate { value } => write!(f, "tile {} appears more than once", value),
        }
    }
}

impl Error for BoardError {}

/// A move string that is not of the form `<U|D|L|R><1-3><1-4>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMoveError(pub String);

impl Display for ParseMoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "invalid move {:?}, expected e.g. \"D13\"", self.0)
    }
}

impl Error for ParseMoveError {}

#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The start board has the wrong permutation parity; nothing was searched.
    Unsolvable { inversions: usize, blank_row: usize },
    /// The open list ran dry. Unreachable for a solvable board unless the
    /// heuristic, move catalog or board hash is broken.
    Exhausted { stats: SearchStats },
    Timeout { stats: SearchStats },
    ExpansionLimit { stats: SearchStats },
}

impl SolveError {
    /// Stats of the search that was cut short, if one ran at all.
    pub fn stats(&self) -> Option<&SearchStats> {
        match self {
            SolveError::Unsolvable { .. } => None,
            SolveError::Exhausted { stats }
            | SolveError::Timeout { stats }
            | SolveError::ExpansionLimit { stats } => Some(stats),
        }
    }

    /// Short machine-readable tag, used in the CLI report.
    pub fn reason(&self) -> &'static str {
        match self {
            SolveError::Unsolvable { .. } => "unsolvable",
            SolveError::Exhausted { .. } => "search_exhausted",
            SolveError::Timeout { .. } => "timeout",
            SolveError::ExpansionLimit { .. } => "expansion_limit",
        }
    }
}

impl Display for SolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Unsolvable {
                inversions,
                blank_row,
            } => write!(
                f,
                "board is unsolvable: {} inversions with the empty cell in row {}",
                inversions, blank_row
            ),
            SolveError::Exhausted { stats } => write!(
                f,
                "open list exhausted after {} expansions without reaching the goal",
                stats.expanded
            ),
            SolveError::Timeout { stats } => write!(
                f,
                "search timed out after {} ms ({} expansions)",
                stats.elapsed_ms, stats.expanded
            ),
            SolveError::ExpansionLimit { stats } => {
                write!(f, "expansion limit of {} reached", stats.expanded)
            }
        }
    }
}

impl Error for SolveError {}
