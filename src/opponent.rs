use crate::bits::{Bits, CELLS};
use crate::error::{Error, Result};
use crate::tree::GameTree;
use crate::{Outcome, Player};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{info, instrument};

/// An opponent that plays a uniformly random free cell.
pub struct RandomOpponent {
    rng: StdRng,
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomOpponent {
    /// Creates an opponent that replays the same moves for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks a free cell, or `None` on a full board.
    pub fn choose(&mut self, occupied: Bits) -> Option<Bits> {
        let free: Vec<Bits> = CELLS
            .iter()
            .copied()
            .filter(|&cell| !occupied.intersects(cell))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}

/// Results of the computer playing a series of games against a `RandomOpponent`.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct SelfPlaySummary {
    /// Games the computer won.
    pub computer_wins: u32,
    /// Games the random opponent won.
    pub computer_losses: u32,
    /// Games that ended full without a line.
    pub draws: u32,
}

impl SelfPlaySummary {
    /// Adds one finished game, seen from the side `computer` played.
    pub fn record(&mut self, outcome: Outcome, computer: Player) {
        match outcome.winner() {
            Some(winner) if winner == computer => self.computer_wins += 1,
            Some(_) => self.computer_losses += 1,
            None => self.draws += 1,
        }
    }

    /// Total games recorded.
    pub fn games(&self) -> u32 {
        self.computer_wins + self.computer_losses + self.draws
    }
}

/// Plays one game from the empty board, the computer using `GameTree::best_move`.
///
/// The tree must already be explored below the root.
pub fn play_against_random(
    tree: &mut GameTree,
    opponent: &mut RandomOpponent,
    computer_first: bool,
) -> Result<Outcome> {
    let mut id = tree.root_id();
    let mut computer_turn = computer_first;
    loop {
        let node = tree.node(id);
        let outcome = node.outcome();
        if outcome.is_decided() {
            return Ok(outcome);
        }

        let mv = if computer_turn {
            tree.best_move(id)
        } else {
            opponent.choose(node.occupied())
        };
        id = tree.apply_move(id, mv.ok_or(Error::GameOver)?)?;
        computer_turn = !computer_turn;
    }
}

/// Plays `games` games, alternating who moves first, starting with the computer.
#[instrument(skip(tree, opponent))]
pub fn run_selfplay(
    tree: &mut GameTree,
    opponent: &mut RandomOpponent,
    games: usize,
) -> Result<SelfPlaySummary> {
    let mut summary = SelfPlaySummary::default();
    for game in 0..games {
        let computer_first = game % 2 == 0;
        let outcome = play_against_random(tree, opponent, computer_first)?;
        let computer = if computer_first {
            Player::First
        } else {
            Player::Second
        };
        summary.record(outcome, computer);
    }

    info!(
        wins = summary.computer_wins,
        losses = summary.computer_losses,
        draws = summary.draws,
        "self-play finished"
    );
    Ok(summary)
}
