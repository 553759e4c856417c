//! Movement geometry for each piece kind.
//!
//! The `*_can_move` functions assume the caller already rejected a destination
//! held by the mover's own side; the `*_attacks` functions return raw threat
//! sets that [`Piece::attacked_squares`](super::piece::Piece::attacked_squares)
//! filters.

use super::board::Board;
use super::piece::{Color, PieceKind};
use super::square::{Square, SquareSet};

/// (row, col) steps.
pub const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

fn delta(from: Square, to: Square) -> (i8, i8) {
    (
        to.row() as i8 - from.row() as i8,
        to.col() as i8 - from.col() as i8,
    )
}

/// True if every square strictly between `from` and `to` is empty.
/// The two squares must share a rank, file, or diagonal.
fn path_clear(from: Square, to: Square, board: &Board) -> bool {
    let (dr, dc) = delta(from, to);
    let step = (dr.signum(), dc.signum());
    let mut cur = from;
    loop {
        cur = match cur.offset(step.0, step.1) {
            Some(sq) => sq,
            None => return false,
        };
        if cur == to {
            return true;
        }
        if board.piece_at(cur).is_some() {
            return false;
        }
    }
}

/// Walk each direction until the edge, stopping at (and including) the first occupied square.
fn ray_attacks(from: Square, dirs: &[(i8, i8)], board: &Board) -> SquareSet {
    let mut set = SquareSet::EMPTY;
    for &(dr, dc) in dirs {
        let mut cur = from;
        while let Some(next) = cur.offset(dr, dc) {
            set.insert(next);
            if board.piece_at(next).is_some() {
                break;
            }
            cur = next;
        }
    }
    set
}

fn step_attacks(from: Square, steps: &[(i8, i8)]) -> SquareSet {
    steps
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .collect()
}

pub fn pawn_can_move(color: Color, from: Square, to: Square, board: &Board) -> bool {
    let forward = color.forward();
    let (dr, dc) = delta(from, to);

    if dc == 0 {
        if dr == forward {
            return board.piece_at(to).is_none();
        }
        if dr == 2 * forward && from.row() == color.pawn_row() {
            let between = from.offset(forward, 0);
            return between.is_some_and(|sq| board.piece_at(sq).is_none())
                && board.piece_at(to).is_none();
        }
        return false;
    }

    if dc.abs() != 1 || dr != forward {
        return false;
    }
    match board.piece_at(to) {
        Some(target) => target.color != color,
        None => en_passant_victim(color, from, to, board).is_some(),
    }
}

/// The square of the pawn an en passant capture from `from` to `to` would take.
///
/// Only the pawn that advanced two squares on the previous half-move is
/// eligible, and it must stand beside `from` on the destination file.
pub fn en_passant_victim(color: Color, from: Square, to: Square, board: &Board) -> Option<Square> {
    let victim_sq = board.last_double_step()?;
    let victim = board.piece_at(victim_sq)?;
    if victim.kind != PieceKind::Pawn || victim.color == color {
        return None;
    }
    let beside = victim_sq.row() == from.row() && victim_sq.col() == to.col();
    let behind = victim_sq.offset(color.forward(), 0) == Some(to);
    if beside && behind && board.piece_at(to).is_none() {
        Some(victim_sq)
    } else {
        None
    }
}

/// Both forward diagonals.
pub fn pawn_attacks(color: Color, from: Square) -> SquareSet {
    step_attacks(from, &[(color.forward(), -1), (color.forward(), 1)])
}

/// Forward pushes a pawn might make, before occupancy is considered.
pub fn pawn_pushes(color: Color, from: Square) -> SquareSet {
    let mut set = step_attacks(from, &[(color.forward(), 0)]);
    if from.row() == color.pawn_row() {
        if let Some(sq) = from.offset(2 * color.forward(), 0) {
            set.insert(sq);
        }
    }
    set
}

pub fn knight_can_move(from: Square, to: Square) -> bool {
    let (dr, dc) = delta(from, to);
    matches!((dr.abs(), dc.abs()), (1, 2) | (2, 1))
}

pub fn knight_attacks(from: Square) -> SquareSet {
    step_attacks(from, &KNIGHT_JUMPS)
}

pub fn bishop_can_move(from: Square, to: Square, board: &Board) -> bool {
    let (dr, dc) = delta(from, to);
    dr != 0 && dr.abs() == dc.abs() && path_clear(from, to, board)
}

pub fn bishop_attacks(from: Square, board: &Board) -> SquareSet {
    ray_attacks(from, &BISHOP_DIRS, board)
}

pub fn rook_can_move(from: Square, to: Square, board: &Board) -> bool {
    let (dr, dc) = delta(from, to);
    (dr == 0) != (dc == 0) && path_clear(from, to, board)
}

pub fn rook_attacks(from: Square, board: &Board) -> SquareSet {
    ray_attacks(from, &ROOK_DIRS, board)
}

pub fn queen_can_move(from: Square, to: Square, board: &Board) -> bool {
    rook_can_move(from, to, board) || bishop_can_move(from, to, board)
}

pub fn queen_attacks(from: Square, board: &Board) -> SquareSet {
    rook_attacks(from, board) | bishop_attacks(from, board)
}

/// One step in any direction. Castling is handled by the board.
pub fn king_can_move(from: Square, to: Square) -> bool {
    let (dr, dc) = delta(from, to);
    dr.abs() <= 1 && dc.abs() <= 1 && (dr, dc) != (0, 0)
}

pub fn king_attacks(from: Square) -> SquareSet {
    step_attacks(from, &KING_STEPS)
}
