use crate::bits::{Bits, EMPTY, FULL};
use crate::{Outcome, Player};

/// Represents a single position in the game tree.
///
/// The tree links (parent and children) live in the arena that owns the node; the node itself
/// only stores what the move sequence leading to it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameNode {
    mv: Option<Bits>,
    height: u8,
    occupied: Bits,
    outcome: Outcome,
}

impl Default for GameNode {
    fn default() -> Self {
        GameNode::root()
    }
}

impl GameNode {
    /// The empty board.
    pub fn root() -> Self {
        GameNode {
            mv: None,
            height: 0,
            occupied: EMPTY,
            outcome: Outcome::Undetermined,
        }
    }

    /// Creates the position reached by playing `mv` from `parent`.
    ///
    /// The outcome is fixed here and cannot change afterwards.
    pub fn child(parent: &GameNode, mv: Bits, outcome: Outcome) -> Self {
        GameNode {
            mv: Some(mv),
            height: parent.height + 1,
            occupied: parent.occupied | mv,
            outcome,
        }
    }

    /// The cell placed to reach this node. `None` for the root.
    pub fn mv(&self) -> Option<Bits> {
        self.mv
    }

    /// Number of plies played from the empty board.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Every cell filled on the way to this node, by either player.
    pub fn occupied(&self) -> Bits {
        self.occupied
    }

    /// Fixed when the node is created.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The player whose mark this node placed.
    pub fn mover(&self) -> Player {
        Player::from_height(self.height)
    }

    /// The player who moves next from this node.
    pub fn to_move(&self) -> Player {
        self.mover().opponent()
    }

    /// Returns `true` once all nine cells are taken.
    pub fn is_full(&self) -> bool {
        self.occupied == FULL
    }
}

#[cfg(test)]
mod tests {
    use crate::bits::{CELLS, CENTER, EMPTY, TOP_LEFT};
    use crate::node::GameNode;
    use crate::{Outcome, Player};

    #[test]
    fn child_accumulates_occupied_and_height() {
        let root = GameNode::root();
        let first = GameNode::child(&root, CENTER, Outcome::Undetermined);
        let second = GameNode::child(&first, TOP_LEFT, Outcome::Undetermined);

        assert_eq!(root.occupied(), EMPTY);
        assert_eq!(root.mv(), None);
        assert_eq!(second.height(), 2);
        assert_eq!(second.occupied(), CENTER | TOP_LEFT);
        assert_eq!(second.occupied().len(), u32::from(second.height()));
        assert_eq!(second.mv(), Some(TOP_LEFT));
        assert_eq!(first.mover(), Player::First);
        assert_eq!(second.to_move(), Player::First);
        assert_eq!(root.to_move(), Player::First);
    }

    #[test]
    fn full_board() {
        let mut node = GameNode::root();
        for &cell in &CELLS {
            assert!(!node.is_full());
            node = GameNode::child(&node, cell, Outcome::Undetermined);
        }
        assert!(node.is_full());
        assert_eq!(node.height(), 9);
    }
}
