//! Search nodes and their expansion into successor boards.

use smallvec::SmallVec;

use crate::board::Board;
use crate::heuristic::{raw_estimate, Cost};
use crate::moves::{Move, MoveCatalog, MOVES_PER_POSITION};

/// Index of a node in the search arena
pub type NodeId = usize;

/// A board reached during search, linked to the node it was expanded from.
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub board: Board,
    pub parent: Option<NodeId>,
    /// Move that produced this board from its parent
    pub mv: Option<Move>,
    /// Moves taken from the start board
    pub g: u32,
    /// Heuristic in thirds of a move
    pub h: u32,
    pub hash: u64,
}

impl SearchNode {
    pub fn root(board: Board) -> Self {
        Self::with_parent(board, None, None, 0)
    }

    fn with_parent(board: Board, parent: Option<NodeId>, mv: Option<Move>, g: u32) -> Self {
        Self {
            h: raw_estimate(&board),
            hash: board.hash(),
            board,
            parent,
            mv,
            g,
        }
    }

    /// Priority `g + h`
    pub fn f(&self) -> Cost {
        Cost::new(self.g, self.h)
    }

    /// Estimated moves remaining
    pub fn heuristic(&self) -> f64 {
        Cost::new(0, self.h).as_moves()
    }

    /// A zero estimate only happens when every tile is home.
    pub fn is_goal(&self) -> bool {
        self.h == 0
    }
}

/// Apply every catalog move for the node's empty cell. Always six children,
/// each one move deeper regardless of how many tiles it slides.
pub fn expand(
    catalog: &MoveCatalog,
    id: NodeId,
    node: &SearchNode,
) -> SmallVec<[SearchNode; MOVES_PER_POSITION]> {
    let empty = node.board.blank();
    catalog
        .moves(empty)
        .iter()
        .map(|mv| {
            let board = node.board.slide(empty, mv);
            SearchNode::with_parent(board, Some(id), Some(*mv), node.g + 1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Position, BLANK};

    #[test]
    fn test_root_node() {
        let node = SearchNode::root(Board::goal());
        assert!(node.is_goal());
        assert_eq!(node.g, 0);
        assert!(node.parent.is_none() && node.mv.is_none());
        assert_eq!(node.hash, Board::goal().hash());
    }

    #[test]
    fn test_expand_produces_six_one_move_children() {
        let catalog = MoveCatalog::new();
        let start = Board::new([[5, 1, 2, 3], [9, 6, 7, 4], [13, 10, 11, 8], [0, 14, 15, 12]])
            .unwrap();
        let parent = SearchNode::root(start);
        let children = expand(&catalog, 7, &parent);

        assert_eq!(children.len(), 6);
        for child in &children {
            let mv = child.mv.unwrap();
            assert_eq!(child.parent, Some(7));
            assert_eq!(child.g, 1);
            assert_eq!(start.apply(&mv), Some(child.board));
            assert_eq!(child.h, raw_estimate(&child.board));
            assert_eq!(child.hash, child.board.hash());
            let blanks = child.board.cells().iter().filter(|&&v| v == BLANK).count();
            assert_eq!(blanks, 1);
            assert_ne!(child.board.blank(), Position::new(3, 0));
        }
    }
}
