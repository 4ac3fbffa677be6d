//! An exhaustive tic-tac-toe game tree with a statistics-driven computer opponent.
//!
//! This library enumerates every reachable tic-tac-toe position, annotates each one with its
//! outcome and picks moves by counting how often each candidate move leads to a non-losing
//! terminal position for the player making it.
//! The selection is a frequency heuristic over all continuations, not minimax play.
//!
//! # Example
//!
//! ```rust
//! use tictree::bits::{bit_to_index, index_to_bit};
//! use tictree::tree::GameTree;
//! use tictree::Outcome;
//!
//! // Build the root position and materialize every continuation
//! let mut tree = GameTree::explored();
//!
//! // Ask for the most favourable opening move
//! let root = tree.root_id();
//! let best = tree.best_move(root).unwrap();
//! println!("The best opening is cell {:?}", bit_to_index(best));
//!
//! // Walk a game through the already materialized tree
//! let mut game = tree.apply_move(root, best).unwrap();
//! game = tree.apply_move(game, index_to_bit(0).unwrap()).unwrap();
//! assert_eq!(tree.node(game).outcome(), Outcome::Undetermined);
//! ```

/// Bit-level encoding of board cells and winning lines.
pub mod bits;
/// Error type shared by the tree model and the interactive shell.
pub mod error;
/// Win and draw detection for freshly created positions.
pub mod evaluator;
/// Contains the `GameNode` struct, the payload stored for every position in the tree.
pub mod node;
/// A seeded random opponent used to exercise the move selection.
pub mod opponent;
/// Text rendering of a position.
pub mod render;
/// The line-oriented game loop between a human and the computer.
pub mod shell;
/// Outcome tallies and statistics-based move selection.
pub mod stats;
/// The core module of the library, containing the `GameTree` arena and its exploration.
pub mod tree;

/// The classification of a position.
///
/// Every node gets its outcome exactly once, when it is created.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Outcome {
    /// More moves can still be played.
    Undetermined = 0,
    /// The player who moves first (`x`) completed a line.
    FirstPlayerWins = 1,
    /// The player who moves second (`o`) completed a line.
    SecondPlayerWins = 2,
    /// The board is full and no line was completed.
    Draw = 3,
}

impl Outcome {
    /// Returns `true` once the game at this position is over.
    pub fn is_decided(self) -> bool {
        self != Outcome::Undetermined
    }

    /// Returns the winning player, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::FirstPlayerWins => Some(Player::First),
            Outcome::SecondPlayerWins => Some(Player::Second),
            Outcome::Undetermined | Outcome::Draw => None,
        }
    }
}

/// The two sides of a game. Ownership of a move is never stored, it follows from the height
/// of the node that placed it.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Player {
    /// Places marks at odd heights. Rendered as `x`.
    First = 1,
    /// Places marks at even heights. Rendered as `o`.
    Second = 2,
}

impl Player {
    /// Returns the player whose mark was placed by the node at `height`.
    ///
    /// The root (height 0) has no move; it maps to `Second` so that the player to move next is
    /// always `Player::from_height(height).opponent()`.
    pub fn from_height(height: u8) -> Self {
        if height % 2 == 1 {
            Player::First
        } else {
            Player::Second
        }
    }

    /// Returns the other player.
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// The outcome in which this player wins.
    pub fn winning_outcome(self) -> Outcome {
        match self {
            Player::First => Outcome::FirstPlayerWins,
            Player::Second => Outcome::SecondPlayerWins,
        }
    }

    /// The character used to draw this player's marks.
    pub fn mark(self) -> char {
        match self {
            Player::First => 'x',
            Player::Second => 'o',
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Outcome, Player};

    #[test]
    fn height_parity_matches_winning_outcome() {
        assert_eq!(Player::from_height(1), Player::First);
        assert_eq!(Player::from_height(2), Player::Second);
        assert_eq!(Player::from_height(9), Player::First);
        assert_eq!(Player::from_height(0), Player::Second);
        assert_eq!(
            Player::from_height(5).winning_outcome(),
            Outcome::FirstPlayerWins
        );
        assert_eq!(
            Player::from_height(6).winning_outcome(),
            Outcome::SecondPlayerWins
        );
    }

    #[test]
    fn marks_and_winners() {
        assert_eq!(Player::First.mark(), 'x');
        assert_eq!(Player::Second.mark(), 'o');
        assert_eq!(Player::First.opponent(), Player::Second);
        assert_eq!(Outcome::Draw.winner(), None);
        assert_eq!(Outcome::SecondPlayerWins.winner(), Some(Player::Second));
        assert!(!Outcome::Undetermined.is_decided());
        assert!(Outcome::Draw.is_decided());
    }
}
