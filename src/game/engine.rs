//! Turn bookkeeping on top of [`Board`].
//!
//! A turn goes: the status is checked first (a finished game accepts no more
//! moves), the move is applied speculatively, and it is kept only if the
//! mover's king is not attacked afterwards. Accepted moves hand the turn over.

use log::{debug, info};

use super::board::Board;
use super::error::ChessError;
use super::mv::{Move, MoveError};
use super::piece::{Color, Piece, PieceKind, PromotionChooser};
use super::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// The side to move is in check but has a way out.
    Check,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Game::from_board(Board::new())
    }

    /// Continue from an arbitrary position; the board's current player moves next.
    pub fn from_board(board: Board) -> Self {
        Game { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.board.current_player()
    }

    /// Status of the side to move.
    pub fn status(&mut self) -> Result<GameStatus, ChessError> {
        let side = self.board.current_player();
        self.board.king_square(side)?;
        let in_check = self.board.is_check(side);
        let can_move = self.board.has_legal_move(side);
        let status = match (in_check, can_move) {
            (true, false) => GameStatus::Checkmate {
                winner: side.opposite(),
            },
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::InProgress,
        };
        Ok(status)
    }

    /// Play `from -> to` for the side to move and return the status the opponent now faces.
    ///
    /// `chooser` is asked for the new piece only if a pawn promotes. On any
    /// error the board is exactly as it was.
    pub fn play<C>(
        &mut self,
        from: Square,
        to: Square,
        chooser: &mut C,
    ) -> Result<GameStatus, ChessError>
    where
        C: PromotionChooser + ?Sized,
    {
        if self.status()?.is_over() {
            return Err(MoveError::GameOver.into());
        }

        let mover = self.board.current_player();
        let piece = self.board.piece_at(from).ok_or(MoveError::NoPiece(from))?;
        if piece.color != mover {
            return Err(MoveError::WrongTurn { expected: mover }.into());
        }

        let Some(patch) = self.board.try_move(from, to, chooser) else {
            return Err(reject_reason(&piece, from, to).into());
        };
        if self.board.is_check(mover) {
            self.board.undo(patch);
            debug!("rolled back {} -> {}: {} king left in check", from, to, mover);
            return Err(MoveError::LeavesKingInCheck(mover).into());
        }

        self.board.set_current_player(mover.opposite());
        let status = match self.status() {
            Ok(status) => status,
            Err(err) => {
                // e.g. the move captured the opposing king
                self.board.set_current_player(mover);
                self.board.undo(patch);
                debug!("rolled back {} -> {}: {}", from, to, err);
                return Err(err);
            }
        };
        match status {
            GameStatus::Checkmate { winner } => info!("checkmate, {} wins", winner),
            GameStatus::Stalemate => info!("stalemate"),
            _ => {}
        }
        Ok(status)
    }

    /// [`Game::play`] for a [`Move`] value; a missing promotion choice means queen.
    pub fn play_move(&mut self, mv: Move) -> Result<GameStatus, ChessError> {
        let mut promotion = mv.promotion.unwrap_or_default();
        self.play(mv.from, mv.to, &mut promotion)
    }
}

fn reject_reason(piece: &Piece, from: Square, to: Square) -> MoveError {
    let castling_shape = piece.kind == PieceKind::King
        && from.row() == to.row()
        && from.col().abs_diff(to.col()) == 2;
    if castling_shape {
        MoveError::CastlingNotAllowed
    } else {
        MoveError::RuleViolation { from, to }
    }
}
