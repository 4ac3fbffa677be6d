use crate::bits::{Bits, bit_to_index};
use crate::node::GameNode;
use crate::tree::GameTree;
use crate::{Outcome, Player};
use ego_tree::{NodeId, NodeRef};
use tracing::{debug, instrument};

/// Terminal outcomes counted over a subtree.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct OutcomeCounts {
    /// Positions where `x` completed a line.
    pub first_wins: u64,
    /// Positions where `o` completed a line.
    pub second_wins: u64,
    /// Full boards without a line.
    pub draws: u64,
}

impl OutcomeCounts {
    /// Adds one position with the given outcome. Undetermined positions are not counted.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::FirstPlayerWins => self.first_wins += 1,
            Outcome::SecondPlayerWins => self.second_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Undetermined => {}
        }
    }

    /// Every decided position counted.
    pub fn total(&self) -> u64 {
        self.first_wins + self.second_wins + self.draws
    }

    /// Positions `player` won.
    pub fn wins_for(&self, player: Player) -> u64 {
        match player {
            Player::First => self.first_wins,
            Player::Second => self.second_wins,
        }
    }

    /// Fraction of counted outcomes that `player` wins or draws.
    pub fn non_loss_rate(&self, player: Player) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            ((self.wins_for(player) + self.draws) as f64) / (total as f64)
        }
    }
}

/// The statistics behind one candidate move.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct MoveScore {
    /// The cell played.
    pub mv: Bits,
    /// The position the move leads to.
    pub node: NodeId,
    /// Outcomes below that position, the position itself included.
    pub counts: OutcomeCounts,
    /// Non-loss rate of the player making the move.
    pub score: f64,
}

fn tally(node: NodeRef<'_, GameNode>, counts: &mut OutcomeCounts) {
    counts.record(node.value().outcome());
    for child in node.children() {
        tally(child, counts);
    }
}

impl GameTree {
    /// Counts the decided positions in the subtree rooted at `id`, `id` included.
    pub fn count_outcomes(&self, id: NodeId) -> OutcomeCounts {
        let mut counts = OutcomeCounts::default();
        tally(self.get(id), &mut counts);
        counts
    }

    /// Scores every explored move from `id`, in child order.
    pub fn move_scores(&self, id: NodeId) -> Vec<MoveScore> {
        self.get(id)
            .children()
            .filter_map(|child| {
                let data = child.value();
                let mv = data.mv()?;
                let mut counts = OutcomeCounts::default();
                tally(child, &mut counts);
                Some(MoveScore {
                    mv,
                    node: child.id(),
                    counts,
                    score: counts.non_loss_rate(data.mover()),
                })
            })
            .collect()
    }

    /// Picks the move whose subtree is most often a win or a draw for the player making it.
    ///
    /// Ties keep the earliest child. This counts outcomes over every continuation, good and bad
    /// replies alike, so it is a heuristic and can pick a losing move against a careful opponent.
    /// Returns `None` when `id` has no explored children.
    #[instrument(skip(self), level = "debug")]
    pub fn best_move(&self, id: NodeId) -> Option<Bits> {
        let mut best: Option<MoveScore> = None;
        for candidate in self.move_scores(id) {
            if best.is_none_or(|b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }

        let best = best?;
        debug!(
            cell = ?bit_to_index(best.mv),
            score = best.score,
            "best move selected"
        );
        Some(best.mv)
    }
}
