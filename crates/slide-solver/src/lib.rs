//! Optimal solver for the 4x4 sliding-tile puzzle with multi-tile moves.
//!
//! A move slides one to three tiles into the empty cell and costs one move no
//! matter how many tiles it shifts. [`solve`] runs A* with a Manhattan plus
//! linear-conflict estimate scaled for that move model, and returns a shortest
//! sequence of moves to the solved board.

pub mod board;
pub mod error;
pub mod heuristic;
pub mod moves;
pub mod queue;
pub mod solver;
pub mod successor;

// Re-export main types
pub use board::{Board, Position};
pub use error::{BoardError, ParseMoveError, SolveError};
pub use moves::{advance_empty, parse_moves, Direction, Move, MoveCatalog};
pub use queue::{Admission, IndexedQueue};
pub use solver::{solve, SearchStats, Solution, Solver, SolverConfig};
pub use successor::{expand, NodeId, SearchNode};
