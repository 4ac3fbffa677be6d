use crate::bits::{Bits, CELLS, bit_to_index};
use crate::error::{Error, Result};
use crate::evaluator;
use crate::node::GameNode;
use crate::Player;
use ego_tree::{NodeId, NodeRef, Tree};
use tracing::{debug, instrument};

/// Number of nodes in the fully explored tree, root included.
pub const FULL_TREE_SIZE: usize = 549_946;

/// The game tree of tic-tac-toe.
///
/// Nodes live in an arena and are addressed by `NodeId`. Parents own their children through the
/// arena's child lists; the parent link is a plain lookup. Children are only ever appended.
#[derive(Debug, Clone)]
pub struct GameTree {
    tree: Tree<GameNode>,
}

impl Default for GameTree {
    fn default() -> Self {
        GameTree::new()
    }
}

impl GameTree {
    /// Creates a tree holding only the empty board.
    pub fn new() -> Self {
        Self {
            tree: Tree::new(GameNode::root()),
        }
    }

    /// Creates a tree holding only the empty board, with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: Tree::with_capacity(GameNode::root(), capacity),
        }
    }

    /// Creates a tree and explores every continuation from the empty board.
    pub fn explored() -> Self {
        let mut tree = GameTree::with_capacity(FULL_TREE_SIZE);
        tree.explore(tree.root_id());
        tree
    }

    /// Returns an immutable reference to the underlying arena.
    pub fn get_tree(&self) -> &Tree<GameNode> {
        &self.tree
    }

    /// The empty board.
    pub fn root_id(&self) -> NodeId {
        self.tree.root().id()
    }

    /// Returns the arena node for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn get(&self, id: NodeId) -> NodeRef<'_, GameNode> {
        self.tree
            .get(id)
            .expect("node id does not belong to this tree")
    }

    /// Returns the position stored at `id`.
    pub fn node(&self, id: NodeId) -> &GameNode {
        self.get(id).value()
    }

    /// The position before the move that produced `id`; `None` at the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent().map(|p| p.id())
    }

    /// Iterates over the explored children of `id` in the order they were created.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.get(id).children().map(|c| c.id())
    }

    /// Returns the already created child reached by playing `mv`, if any.
    pub fn child(&self, id: NodeId, mv: Bits) -> Option<NodeId> {
        self.get(id)
            .children()
            .find(|c| c.value().mv() == Some(mv))
            .map(|c| c.id())
    }

    /// Total number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.tree.nodes().count()
    }

    /// Always `false`: the root is created with the tree.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Plays `mv` from the position at `id` and returns the resulting position.
    ///
    /// If the move was already played from this position the existing child is returned, so
    /// calling this twice with the same arguments yields the same `NodeId`. Otherwise a new child
    /// is created with its outcome already resolved.
    pub fn apply_move(&mut self, id: NodeId, mv: Bits) -> Result<NodeId> {
        let node = self.get(id);
        let data = node.value();
        if data.outcome().is_decided() {
            return Err(Error::GameOver);
        }
        if mv.len() != 1 || data.occupied().intersects(mv) {
            return Err(Error::IllegalMove { mv });
        }
        if let Some(existing) = node.children().find(|c| c.value().mv() == Some(mv)) {
            return Ok(existing.id());
        }

        let outcome = evaluator::evaluate_move(node, mv);
        let child = GameNode::child(data, mv, outcome);
        let mut parent = self
            .tree
            .get_mut(id)
            .expect("node id does not belong to this tree");
        Ok(parent.append(child).id())
    }

    /// Materializes every legal continuation below `id`, down to every terminal position.
    ///
    /// Cells are tried in canonical order and symmetric positions are kept apart, so each move
    /// order gets its own branch. Exploring an already explored subtree adds nothing.
    #[instrument(skip(self))]
    pub fn explore(&mut self, id: NodeId) {
        self.expand(id);
        debug!(nodes = self.count(id), "subtree explored");
    }

    fn expand(&mut self, id: NodeId) {
        if self.node(id).outcome().is_decided() {
            return;
        }
        for &cell in &CELLS {
            if let Ok(child) = self.apply_move(id, cell) {
                self.expand(child);
            }
        }
    }

    /// Number of nodes in the subtree rooted at `id`, including `id`.
    pub fn count(&self, id: NodeId) -> usize {
        fn size(node: NodeRef<'_, GameNode>) -> usize {
            1 + node.children().map(size).sum::<usize>()
        }
        size(self.get(id))
    }

    /// Iterates over the terminal positions below `id` (inclusive) in pre-order.
    pub fn terminals(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.get(id)
            .descendants()
            .filter(|n| n.value().outcome().is_decided())
            .map(|n| n.id())
    }

    /// Returns who holds each of the nine cells at `id`.
    pub fn marks(&self, id: NodeId) -> [Option<Player>; 9] {
        let node = self.get(id);
        let mut cells = [None; 9];
        for data in std::iter::once(node).chain(node.ancestors()).map(|n| n.value()) {
            if let Some(index) = data.mv().and_then(bit_to_index) {
                cells[index] = Some(data.mover());
            }
        }
        cells
    }
}

/// One fully explored tree shared by the tests of every module.
#[cfg(test)]
pub(crate) fn explored_tree() -> &'static GameTree {
    static TREE: std::sync::OnceLock<GameTree> = std::sync::OnceLock::new();
    TREE.get_or_init(GameTree::explored)
}
