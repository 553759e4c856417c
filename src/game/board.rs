// The board owns every piece in an 8x8 array of optional occupants.
// Row 0 is Black's back rank, row 7 is White's.

use log::{debug, trace, warn};

use super::error::ChessError;
use super::movement::{self, en_passant_victim};
use super::piece::{Color, Piece, PieceKind, Promotion, PromotionChooser};
use super::square::{Square, SquareSet};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

const KING_COL: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    fn rook_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// Column the rook lands on, next to the king's destination.
    fn rook_target_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }

    /// Columns between king and rook that must be empty.
    fn between_cols(self) -> &'static [u8] {
        match self {
            CastleSide::Kingside => &[5, 6],
            CastleSide::Queenside => &[1, 2, 3],
        }
    }

    /// Columns the king crosses or lands on.
    fn king_path_cols(self) -> &'static [u8] {
        match self {
            CastleSide::Kingside => &[5, 6],
            CastleSide::Queenside => &[3, 2],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellSnapshot {
    square: Square,
    occupant: Option<Piece>,
    has_moved: bool,
}

/// Everything a move changed, so it can be reverted in one step.
///
/// Returned by [`Board::try_move`]; pass it to [`Board::undo`] to roll back or
/// drop it to keep the move.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "dropping a patch commits the move; call Board::undo to roll back"]
pub struct MovePatch {
    cells: Vec<CellSnapshot>,
    last_double_step: Option<Square>,
}

impl MovePatch {
    fn record(&mut self, board: &Board, square: Square) {
        self.cells.push(CellSnapshot {
            square,
            occupant: board.piece_at(square),
            has_moved: board.has_moved(square),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    has_moved: [[bool; 8]; 8],
    current_player: Color,
    last_double_step: Option<Square>,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            for color in [Color::White, Color::Black] {
                if let Some(sq) = Square::new(color.back_row(), col) {
                    board.set_piece_at(Some(Piece::new(color, *kind, sq)), sq);
                }
                if let Some(sq) = Square::new(color.pawn_row(), col) {
                    board.set_piece_at(Some(Piece::new(color, PieceKind::Pawn, sq)), sq);
                }
            }
        }
        board
    }

    /// A board with no pieces, White to move.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
            has_moved: [[false; 8]; 8],
            current_player: Color::White,
            last_double_step: None,
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row() as usize][square.col() as usize]
    }

    /// Put `piece` (or nothing) on `square`, rewriting the piece's own square to match.
    ///
    /// A placed piece also resets the square's moved flag to its own.
    pub fn set_piece_at(&mut self, piece: Option<Piece>, square: Square) {
        let (r, c) = (square.row() as usize, square.col() as usize);
        let piece = piece.map(|mut p| {
            p.square = square;
            p
        });
        if let Some(p) = piece {
            self.has_moved[r][c] = p.has_moved;
        }
        self.squares[r][c] = piece;
    }

    /// Convenience for setting up positions.
    pub fn place(&mut self, color: Color, kind: PieceKind, square: Square) {
        self.set_piece_at(Some(Piece::new(color, kind, square)), square);
    }

    /// Whether a move has started or ended on `square` since a piece was last
    /// placed there with [`Board::set_piece_at`].
    pub fn has_moved(&self, square: Square) -> bool {
        self.has_moved[square.row() as usize][square.col() as usize]
    }

    fn mark_moved(&mut self, square: Square) {
        self.has_moved[square.row() as usize][square.col() as usize] = true;
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn set_current_player(&mut self, color: Color) {
        self.current_player = color;
    }

    /// The pawn that advanced two squares on the last half-move, if any.
    pub fn last_double_step(&self) -> Option<Square> {
        self.last_double_step
    }

    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().flatten().copied()
    }

    fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.square)
    }

    pub fn king_square(&self, color: Color) -> Result<Square, ChessError> {
        self.find_king(color).ok_or(ChessError::NoKingFound(color))
    }

    /// Move for the current player, promoting to a queen if a pawn reaches the last rank.
    ///
    /// Does not test whether the mover's king is left in check; see
    /// [`Board::is_legal_move`] and [`Game::play`](super::engine::Game::play).
    pub fn move_piece(&mut self, from: Square, to: Square) -> bool {
        self.move_piece_with(from, to, &mut Promotion::Queen)
    }

    pub fn move_piece_with<C>(&mut self, from: Square, to: Square, chooser: &mut C) -> bool
    where
        C: PromotionChooser + ?Sized,
    {
        self.try_move(from, to, chooser).is_some()
    }

    /// Apply a move for the current player and return the patch that reverts it.
    ///
    /// Returns `None`, leaving the board untouched, when there is no piece on
    /// `from`, the piece belongs to the other side, or its rules forbid the move.
    pub fn try_move<C>(&mut self, from: Square, to: Square, chooser: &mut C) -> Option<MovePatch>
    where
        C: PromotionChooser + ?Sized,
    {
        let patch = self.apply(self.current_player, from, to, chooser);
        match &patch {
            Some(_) => debug!("{} moved {} -> {}", self.current_player, from, to),
            None => debug!("rejected {} -> {} for {}", from, to, self.current_player),
        }
        patch
    }

    /// Revert a move applied by [`Board::try_move`].
    ///
    /// Patches must be undone in reverse order of application.
    pub fn undo(&mut self, patch: MovePatch) {
        for cell in patch.cells.iter().rev() {
            let (r, c) = (cell.square.row() as usize, cell.square.col() as usize);
            self.squares[r][c] = cell.occupant;
            self.has_moved[r][c] = cell.has_moved;
        }
        self.last_double_step = patch.last_double_step;
    }

    fn apply<C>(
        &mut self,
        mover: Color,
        from: Square,
        to: Square,
        chooser: &mut C,
    ) -> Option<MovePatch>
    where
        C: PromotionChooser + ?Sized,
    {
        let piece = self.piece_at(from)?;
        if piece.color != mover {
            return None;
        }

        let castle = castle_side(&piece, from, to);
        match castle {
            Some(side) => {
                if !self.can_castle(mover, side) {
                    return None;
                }
            }
            None => {
                if !piece.can_move_to(from, to, self) {
                    return None;
                }
            }
        }
        let victim = if piece.kind == PieceKind::Pawn && from.col() != to.col() {
            en_passant_victim(mover, from, to, self)
        } else {
            None
        };
        let rook_move = castle.and_then(|side| {
            let row = mover.back_row();
            Some((Square::new(row, side.rook_col())?, Square::new(row, side.rook_target_col())?))
        });

        let mut patch = MovePatch {
            cells: Vec::with_capacity(4),
            last_double_step: self.last_double_step,
        };
        patch.record(self, from);
        patch.record(self, to);
        if let Some(v) = victim {
            patch.record(self, v);
        }
        if let Some((rook_from, rook_to)) = rook_move {
            patch.record(self, rook_from);
            patch.record(self, rook_to);
        }

        let mut moved = Piece {
            has_moved: true,
            ..piece
        };
        if piece.kind == PieceKind::Pawn && to.row() == mover.promotion_row() {
            moved.kind = chooser.choose(mover, to).kind();
            debug!("{} pawn promoted to {:?} on {}", mover, moved.kind, to);
        }
        self.set_piece_at(None, from);
        self.set_piece_at(Some(moved), to);
        self.mark_moved(from);
        self.mark_moved(to);

        if let Some(v) = victim {
            self.set_piece_at(None, v);
        }
        if let Some((rook_from, rook_to)) = rook_move {
            if let Some(rook) = self.piece_at(rook_from) {
                self.set_piece_at(None, rook_from);
                self.set_piece_at(Some(Piece { has_moved: true, ..rook }), rook_to);
                self.mark_moved(rook_from);
                self.mark_moved(rook_to);
            }
        }

        let double_step = piece.kind == PieceKind::Pawn && from.row().abs_diff(to.row()) == 2;
        self.last_double_step = double_step.then_some(to);

        Some(patch)
    }

    /// Whether `color` may castle on `side` right now.
    ///
    /// King and rook must be unmoved and the squares between them empty. No
    /// square the king stands on or passes over may be attacked.
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        let row = color.back_row();
        let king_sq = Square::new(row, KING_COL);
        let rook_sq = Square::new(row, side.rook_col());
        let (Some(king_sq), Some(rook_sq)) = (king_sq, rook_sq) else {
            return false;
        };
        let unmoved = |sq: Square, kind: PieceKind| {
            self.piece_at(sq)
                .is_some_and(|p| p.kind == kind && p.color == color && !p.has_moved)
                && !self.has_moved(sq)
        };
        if !unmoved(king_sq, PieceKind::King) || !unmoved(rook_sq, PieceKind::Rook) {
            return false;
        }

        let on_row = |col: u8| Square::new(row, col);
        let path_empty = side
            .between_cols()
            .iter()
            .filter_map(|&c| on_row(c))
            .all(|sq| self.piece_at(sq).is_none());
        if !path_empty {
            return false;
        }

        let enemy = color.opposite();
        !self.is_square_attacked(king_sq, enemy)
            && side
                .king_path_cols()
                .iter()
                .filter_map(|&c| on_row(c))
                .all(|sq| !self.is_square_attacked(sq, enemy))
    }

    /// True if some enemy piece could move onto `color`'s king right now.
    pub fn is_check(&self, color: Color) -> bool {
        let Some(king_sq) = self.find_king(color) else {
            warn!("no {} king on the board", color);
            return false;
        };
        self.pieces_of(color.opposite())
            .any(|p| p.can_move_to(p.square, king_sq, self))
    }

    /// True if `color` is in check and no move gets it out.
    pub fn is_checkmate(&mut self, color: Color) -> bool {
        self.is_check(color) && !self.has_legal_move(color)
    }

    /// True if `color` is not in check but has no legal move.
    pub fn is_stalemate(&mut self, color: Color) -> bool {
        !self.is_check(color) && !self.has_legal_move(color)
    }

    /// Search every piece of `color` for a move that leaves its king safe.
    ///
    /// Each candidate is applied, tested and rolled back before the next one,
    /// so the board is unchanged on return.
    pub fn has_legal_move(&mut self, color: Color) -> bool {
        let movers: Vec<Piece> = self.pieces_of(color).collect();
        for piece in movers {
            for to in self.candidate_destinations(&piece) {
                if self.probe(color, piece.square, to) {
                    trace!("{} escapes with {} -> {}", color, piece.square, to);
                    return true;
                }
            }
        }
        false
    }

    /// Whether the owner of the piece on `from` may legally play `from -> to`,
    /// including the rule that their own king may not be left in check.
    pub fn is_legal_move(&mut self, from: Square, to: Square) -> bool {
        match self.piece_at(from) {
            Some(piece) => self.probe(piece.color, from, to),
            None => false,
        }
    }

    /// Every square the piece on `from` can legally reach, castling included.
    pub fn legal_destinations(&mut self, from: Square) -> SquareSet {
        let Some(piece) = self.piece_at(from) else {
            return SquareSet::EMPTY;
        };
        let mut candidates = self.candidate_destinations(&piece);
        if piece.kind == PieceKind::King {
            candidates.extend([from.offset(0, 2), from.offset(0, -2)].into_iter().flatten());
        }
        candidates
            .into_iter()
            .filter(|&to| self.probe(piece.color, from, to))
            .collect()
    }

    /// Squares worth trying for `piece` when searching for a legal move.
    ///
    /// King: all eight neighbours. Pawn: its diagonals plus forward pushes.
    /// Everything else: its attacked squares, which equal its destinations.
    fn candidate_destinations(&self, piece: &Piece) -> SquareSet {
        match piece.kind {
            PieceKind::King => movement::king_attacks(piece.square),
            PieceKind::Pawn => {
                piece.attacked_squares(self) | movement::pawn_pushes(piece.color, piece.square)
            }
            _ => piece.attacked_squares(self),
        }
    }

    /// Speculatively play a move for `color` and report whether its king is safe afterwards.
    fn probe(&mut self, color: Color, from: Square, to: Square) -> bool {
        let Some(patch) = self.apply(color, from, to, &mut Promotion::Queen) else {
            return false;
        };
        let safe = !self.is_check(color);
        trace!("probe {} -> {} for {}: safe={}", from, to, color, safe);
        self.undo(patch);
        safe
    }

    /// True if some piece of `by` threatens `square`.
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        self.pieces_of(by).any(|p| p.attacks(square, self))
    }

    /// Union of the attacked squares of every piece opposing `color`.
    pub fn enemy_attack_squares(&self, color: Color) -> SquareSet {
        self.pieces_of(color.opposite())
            .fold(SquareSet::EMPTY, |acc, p| acc | p.attacked_squares(self))
    }
}

/// The castling side a king move from `from` to `to` requests, if it is one.
fn castle_side(piece: &Piece, from: Square, to: Square) -> Option<CastleSide> {
    if piece.kind != PieceKind::King
        || from.row() != piece.color.back_row()
        || from.row() != to.row()
        || from.col() != KING_COL
    {
        return None;
    }
    match to.col() as i8 - from.col() as i8 {
        2 => Some(CastleSide::Kingside),
        -2 => Some(CastleSide::Queenside),
        _ => None,
    }
}
