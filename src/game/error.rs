//! Error types for the rules engine.

use super::mv::MoveError;
use super::piece::Color;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    /// Square text that is not a file letter `a`-`h` followed by a rank `1`-`8`.
    #[error("invalid square notation: {0:?}")]
    InvalidNotation(String),

    #[error("illegal move: {0}")]
    IllegalMove(#[from] MoveError),

    /// Every game has both kings on the board; hitting this is a bug in the caller.
    #[error("no {0} king on the board")]
    NoKingFound(Color),
}
