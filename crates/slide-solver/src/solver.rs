//! A* search for a shortest move sequence to the solved board.
//!
//! The open list is an [`IndexedQueue`] keyed by board hash, so each board has
//! at most one live node on the frontier. Closed boards are never reopened,
//! which relies on the heuristic being consistent. Nodes live in an arena and
//! point at their parent by index; the solution is read back along that chain.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use crate::board::Board;
use crate::error::SolveError;
use crate::heuristic::Cost;
use crate::moves::{Move, MoveCatalog};
use crate::queue::{Admission, IndexedQueue};
use crate::successor::{expand, NodeId, SearchNode};

/// Configuration for the solver
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Maximum time to search
    pub timeout: Option<Duration>,
    /// Maximum number of node expansions
    pub max_expansions: Option<usize>,
}

/// Counters collected during one search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped and expanded
    pub expanded: usize,
    /// Successor nodes produced
    pub generated: usize,
    /// Candidates discarded as closed or no better than a queued node
    pub rejected: usize,
    /// Queued nodes tombstoned by a better path
    pub superseded: usize,
    /// Tombstoned nodes discarded when popped
    pub tombstones_skipped: usize,
    /// Largest number of live nodes on the open list
    pub max_open: usize,
    pub elapsed_ms: u64,
}

/// A shortest solution and how it was found
#[derive(Debug, Clone)]
pub struct Solution {
    pub moves: Vec<Move>,
    pub stats: SearchStats,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Owns the move catalog and limits; reusable across boards.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
    catalog: MoveCatalog,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            catalog: MoveCatalog::new(),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn catalog(&self) -> &MoveCatalog {
        &self.catalog
    }

    /// Find a shortest move sequence from `board` to the solved board.
    pub fn solve(&self, board: &Board) -> Result<Solution, SolveError> {
        let search = Search::start(board, &self.catalog)?;
        search.run(&self.config)
    }
}

/// Solve with no time or expansion limit.
pub fn solve(board: &Board) -> Result<Vec<Move>, SolveError> {
    Solver::default().solve(board).map(|solution| solution.moves)
}

/// State of a single A* run
struct Search<'a> {
    catalog: &'a MoveCatalog,
    nodes: Vec<SearchNode>,
    open: IndexedQueue<u64, Cost, NodeId>,
    closed: HashSet<u64>,
    stats: SearchStats,
    started: Instant,
}

impl<'a> Search<'a> {
    /// Reject unsolvable boards before any node exists, then queue the root.
    fn start(board: &Board, catalog: &'a MoveCatalog) -> Result<Self, SolveError> {
        if !board.is_solvable() {
            return Err(SolveError::Unsolvable {
                inversions: board.inversions(),
                blank_row: board.blank().row,
            });
        }

        let mut search = Search {
            catalog,
            nodes: Vec::new(),
            open: IndexedQueue::new(),
            closed: HashSet::new(),
            stats: SearchStats::default(),
            started: Instant::now(),
        };
        let root = SearchNode::root(*board);
        debug!("Search started, root estimate {:.2}", root.heuristic());
        search.admit(root);
        Ok(search)
    }

    fn admit(&mut self, node: SearchNode) {
        if self.closed.contains(&node.hash) {
            self.stats.rejected += 1;
            return;
        }

        let id = self.nodes.len();
        match self.open.offer(node.hash, node.f(), id) {
            Admission::Rejected => {
                self.stats.rejected += 1;
                return;
            }
            Admission::Superseded => self.stats.superseded += 1,
            Admission::Inserted => {}
        }
        self.nodes.push(node);
        self.stats.max_open = self.stats.max_open.max(self.open.len());
    }

    /// Next live node; its board is closed from here on.
    fn pop(&mut self) -> Option<NodeId> {
        let (hash, _, id) = self.open.pop()?;
        self.closed.insert(hash);
        Some(id)
    }

    fn run(mut self, config: &SolverConfig) -> Result<Solution, SolveError> {
        let deadline = config.timeout.map(|timeout| self.started + timeout);

        while let Some(id) = self.pop() {
            if self.nodes[id].is_goal() {
                let moves = self.path_to(id);
                let stats = self.finish();
                debug!(
                    "Solved in {} moves: {} expanded, {} generated, {} ms",
                    moves.len(),
                    stats.expanded,
                    stats.generated,
                    stats.elapsed_ms
                );
                return Ok(Solution { moves, stats });
            }

            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return Err(SolveError::Timeout {
                    stats: self.finish(),
                });
            }
            if config
                .max_expansions
                .is_some_and(|limit| self.stats.expanded >= limit)
            {
                return Err(SolveError::ExpansionLimit {
                    stats: self.finish(),
                });
            }

            let children = expand(self.catalog, id, &self.nodes[id]);
            self.stats.expanded += 1;
            self.stats.generated += children.len();
            trace!(
                "Expanded node {} (g={}, f={:.2}), open={}",
                id,
                self.nodes[id].g,
                self.nodes[id].f().as_moves(),
                self.open.len()
            );
            for child in children {
                self.admit(child);
            }
        }

        let stats = self.finish();
        warn!(
            "Open list exhausted after {} expansions; heuristic, catalog or hashing is broken",
            stats.expanded
        );
        Err(SolveError::Exhausted { stats })
    }

    /// Moves from the root to `id`, in play order.
    fn path_to(&self, id: NodeId) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current.map(|id| &self.nodes[id]) {
            moves.extend(node.mv);
            current = node.parent;
        }
        moves.reverse();
        moves
    }

    fn finish(&mut self) -> SearchStats {
        self.stats.tombstones_skipped = self.open.skipped();
        self.stats.elapsed_ms = self.started.elapsed().as_millis() as u64;
        self.stats.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: [[u8; 4]; 4]) -> Board {
        Board::new(rows).unwrap()
    }

    #[test]
    fn test_three_move_solution() {
        let start = board([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 15, 11], [13, 14, 0, 12]]);
        let moves = solve(&start).unwrap();
        let notation: Vec<String> = moves.iter().map(Move::to_string).collect();
        assert_eq!(notation, ["D13", "L13", "U14"]);
    }

    #[test]
    fn test_goal_needs_no_moves() {
        let solution = Solver::default().solve(&Board::goal()).unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.stats.expanded, 0);
    }

    #[test]
    fn test_unsolvable_board_fails_before_search() {
        let start = board([[2, 1, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 15, 0]]);
        let catalog = MoveCatalog::new();
        let err = Search::start(&start, &catalog).err().unwrap();
        assert_eq!(
            err,
            SolveError::Unsolvable {
                inversions: 1,
                blank_row: 3
            }
        );
        assert!(err.stats().is_none());
    }

    #[test]
    fn test_expansion_limit() {
        let start = board([[2, 9, 10, 4], [1, 11, 3, 8], [5, 0, 7, 6], [13, 14, 15, 12]]);
        let solver = Solver::new(SolverConfig {
            max_expansions: Some(10),
            ..Default::default()
        });
        match solver.solve(&start) {
            Err(SolveError::ExpansionLimit { stats }) => {
                assert_eq!(stats.expanded, 10);
                assert_eq!(stats.generated, 60);
            }
            other => panic!("expected expansion limit, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_timeout_stops_search() {
        let start = board([[2, 9, 10, 4], [1, 11, 3, 8], [5, 0, 7, 6], [13, 14, 15, 12]]);
        let solver = Solver::new(SolverConfig {
            timeout: Some(Duration::ZERO),
            ..Default::default()
        });
        let err = solver.solve(&start).unwrap_err();
        assert_eq!(err.reason(), "timeout");
    }

    #[test]
    fn test_first_expansion_admits_all_children() {
        let start = board([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 15, 11], [13, 14, 0, 12]]);
        let catalog = MoveCatalog::new();
        let mut search = Search::start(&start, &catalog).unwrap();
        let root = search.pop().unwrap();
        assert!(search.closed.contains(&start.hash()));

        for child in expand(&catalog, root, &search.nodes[root]) {
            search.admit(child);
        }
        assert_eq!(search.open.len(), 6);
        assert_eq!(search.nodes.len(), 7);

        // Re-offering the closed root board is refused.
        search.admit(SearchNode::root(start));
        assert_eq!(search.stats.rejected, 1);
    }
}
