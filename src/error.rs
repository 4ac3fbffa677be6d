//! Error types for the tictree crate

use thiserror::Error;

use crate::bits::Bits;

/// Everything that can go wrong while playing on a `GameTree`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A move was asked for on a position that is already won or drawn.
    #[error("the game is over")]
    GameOver,

    /// The move is not a single free cell.
    #[error("move {mv} is not available")]
    IllegalMove { mv: Bits },

    /// Reading from or writing to the player failed.
    #[error("failed to talk to the player: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
