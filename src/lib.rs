//! Rules engine for two-player chess: move legality, check and checkmate
//! detection, and the authoritative board state of a game.

pub mod game;
pub mod ui;

pub use game::board::{Board, MovePatch};
pub use game::engine::{Game, GameStatus};
pub use game::error::ChessError;
pub use game::mv::{Move, MoveError};
pub use game::piece::{Color, Piece, PieceKind, Promotion, PromotionChooser};
pub use game::square::{parse_square, Square, SquareSet};
