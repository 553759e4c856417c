//! Move representation and move rejection reasons.

use std::fmt;

use super::piece::{Color, Promotion};
use super::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Only consulted when a pawn reaches the last rank.
    pub promotion: Option<Promotion>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(mut self, promotion: Promotion) -> Self {
        self.promotion = Some(promotion);
        self
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.from, self.to)?;
        if let Some(p) = self.promotion {
            write!(f, " {}", p.letter())?;
        }
        Ok(())
    }
}

/// Why a move was refused. The board is unchanged whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("no piece on {0}")]
    NoPiece(Square),

    #[error("it is {expected}'s turn")]
    WrongTurn { expected: Color },

    #[error("the piece on {from} cannot move to {to}")]
    RuleViolation { from: Square, to: Square },

    #[error("castling is not allowed")]
    CastlingNotAllowed,

    #[error("the move would leave the {0} king in check")]
    LeavesKingInCheck(Color),

    #[error("the game is over")]
    GameOver,
}
