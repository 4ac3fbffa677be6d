use ego_tree::NodeRef;

use crate::bits::{Bits, EMPTY, FULL, WINNING_LINES};
use crate::node::GameNode;
use crate::{Outcome, Player};

/// Collects the cells `player` marked on the path from the root down to `node`, inclusive.
pub fn marks_of(node: NodeRef<'_, GameNode>, player: Player) -> Bits {
    std::iter::once(node)
        .chain(node.ancestors())
        .map(|n| n.value())
        .filter(|n| n.height() > 0 && n.mover() == player)
        .filter_map(GameNode::mv)
        .fold(EMPTY, |acc, mv| acc | mv)
}

/// Classifies a position from the marks of the player who just moved.
///
/// Only the mover can have completed a line on this ply, so the opponent's marks are not needed.
pub fn classify(mover_marks: Bits, occupied: Bits, mover: Player) -> Outcome {
    if WINNING_LINES.iter().any(|&line| mover_marks.contains(line)) {
        mover.winning_outcome()
    } else if occupied == FULL {
        Outcome::Draw
    } else {
        Outcome::Undetermined
    }
}

/// Computes the outcome of the position reached by playing `mv` from `parent`.
///
/// Called before the child is inserted, so the stored outcome is final from the start.
pub fn evaluate_move(parent: NodeRef<'_, GameNode>, mv: Bits) -> Outcome {
    let data = parent.value();
    let mover = Player::from_height(data.height() + 1);
    classify(marks_of(parent, mover) | mv, data.occupied() | mv, mover)
}

/// Recomputes the outcome of an existing node from its move history.
pub fn evaluate_node(node: NodeRef<'_, GameNode>) -> Outcome {
    let data = node.value();
    if data.height() == 0 {
        return Outcome::Undetermined;
    }
    let mover = data.mover();
    classify(marks_of(node, mover), data.occupied(), mover)
}
