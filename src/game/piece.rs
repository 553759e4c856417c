use std::fmt;

use super::board::Board;
use super::movement;
use super::square::{Square, SquareSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row step of a pawn advance: White moves toward row 0.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn back_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub fn promotion_row(self) -> u8 {
        self.opposite().back_row()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// The pieces a pawn may become on the last rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Promotion {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    pub fn kind(self) -> PieceKind {
        match self {
            Promotion::Queen => PieceKind::Queen,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Knight => PieceKind::Knight,
        }
    }

    pub fn letter(self) -> char {
        self.kind().letter()
    }

    /// Accepts `Q`, `R`, `B`, `N` in either case.
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'Q' => Some(Promotion::Queen),
            'R' => Some(Promotion::Rook),
            'B' => Some(Promotion::Bishop),
            'N' => Some(Promotion::Knight),
            _ => None,
        }
    }
}

/// Supplies the promotion piece when a pawn reaches the last rank.
///
/// The board asks only at the moment a promotion actually happens, so a front
/// end can prompt the player lazily.
pub trait PromotionChooser {
    fn choose(&mut self, color: Color, square: Square) -> Promotion;
}

impl PromotionChooser for Promotion {
    fn choose(&mut self, _color: Color, _square: Square) -> Promotion {
        *self
    }
}

impl<F> PromotionChooser for F
where
    F: FnMut(Color, Square) -> Promotion,
{
    fn choose(&mut self, color: Color, square: Square) -> Promotion {
        self(color, square)
    }
}

/// A piece as stored on the board.
///
/// `square` mirrors the grid cell holding the piece; the board rewrites it on
/// every placement so the two never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind, square: Square) -> Self {
        Piece {
            color,
            kind,
            square,
            has_moved: false,
        }
    }

    /// Whether this piece may go from `from` to `to` on the current board.
    ///
    /// Ignores whether the mover's own king ends up in check, and does not
    /// cover castling; both are the board's concern.
    pub fn can_move_to(&self, from: Square, to: Square, board: &Board) -> bool {
        if from == to {
            return false;
        }
        if let Some(target) = board.piece_at(to) {
            if target.color == self.color {
                return false;
            }
        }
        match self.kind {
            PieceKind::Pawn => movement::pawn_can_move(self.color, from, to, board),
            PieceKind::Knight => movement::knight_can_move(from, to),
            PieceKind::Bishop => movement::bishop_can_move(from, to, board),
            PieceKind::Rook => movement::rook_can_move(from, to, board),
            PieceKind::Queen => movement::queen_can_move(from, to, board),
            PieceKind::King => movement::king_can_move(from, to),
        }
    }

    /// Squares this piece could capture on right now.
    pub fn attacked_squares(&self, board: &Board) -> SquareSet {
        let mut set = match self.kind {
            PieceKind::Pawn => movement::pawn_attacks(self.color, self.square),
            PieceKind::Knight => movement::knight_attacks(self.square),
            PieceKind::Bishop => movement::bishop_attacks(self.square, board),
            PieceKind::Rook => movement::rook_attacks(self.square, board),
            PieceKind::Queen => movement::queen_attacks(self.square, board),
            PieceKind::King => movement::king_attacks(self.square),
        };
        for sq in set {
            if board.piece_at(sq).is_some_and(|p| p.color == self.color) {
                set.remove(sq);
            }
        }
        set
    }

    /// Whether this piece threatens `target`, regardless of what stands there.
    ///
    /// Differs from [`Piece::can_move_to`] for pawns (only the diagonals count)
    /// and for squares held by this piece's own side.
    pub fn attacks(&self, target: Square, board: &Board) -> bool {
        let from = self.square;
        if from == target {
            return false;
        }
        match self.kind {
            PieceKind::Pawn => movement::pawn_attacks(self.color, from).contains(target),
            PieceKind::Knight => movement::knight_can_move(from, target),
            PieceKind::Bishop => movement::bishop_can_move(from, target, board),
            PieceKind::Rook => movement::rook_can_move(from, target, board),
            PieceKind::Queen => movement::queen_can_move(from, target, board),
            PieceKind::King => movement::king_can_move(from, target),
        }
    }

    /// Short name used by the plain-text renderer, e.g. `wK`, `bp`.
    pub fn name(&self) -> String {
        let c = match self.color {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!("{}{}", c, self.kind.letter())
    }
}
