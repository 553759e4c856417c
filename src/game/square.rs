//! Board coordinates.
//!
//! Squares are stored as zero-based `(row, col)` pairs in display order:
//! row 0 is rank 8, row 7 is rank 1, col 0 is file `a`.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use super::error::ChessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Build a square from a row/column pair. Returns `None` off the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square { row, col })
        } else {
            None
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// The square `dr` rows and `dc` columns away, if it is on the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if in_bounds(row, col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        square_to_index(self)
    }

    /// Algebraic notation, e.g. `e4`.
    pub fn notation(self) -> String {
        self.to_string()
    }

    /// Iterate all 64 squares, row by row from the rank 8 side.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(index_to_square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = (b'8' - self.row) as char;
        write!(f, "{}{}", file, rank)
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_square(s)
    }
}

/// Parse two-character algebraic notation (`a1` .. `h8`).
pub fn parse_square(text: &str) -> Result<Square, ChessError> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidNotation(text.to_string()));
    }
    let (file, rank) = (bytes[0], bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidNotation(text.to_string()));
    }
    // 8 -> row 0, 1 -> row 7
    Ok(Square {
        row: b'8' - rank,
        col: file - b'a',
    })
}

pub fn square_to_index(square: Square) -> usize {
    square.row as usize * 8 + square.col as usize
}

pub fn index_to_square(index: usize) -> Option<Square> {
    if index < 64 {
        Some(Square {
            row: (index / 8) as u8,
            col: (index % 8) as u8,
        })
    } else {
        None
    }
}

#[inline]
pub fn in_bounds(row: i8, col: i8) -> bool {
    (0..8).contains(&row) && (0..8).contains(&col)
}

/// A set of squares, one bit per square index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square.index();
    }

    pub fn remove(&mut self, square: Square) {
        self.0 &= !(1u64 << square.index());
    }

    pub fn contains(&self, square: Square) -> bool {
        (self.0 >> square.index()) & 1 == 1
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

impl BitOr for SquareSet {
    type Output = SquareSet;

    fn bitor(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for SquareSet {
    fn bitor_assign(&mut self, rhs: SquareSet) {
        self.0 |= rhs.0;
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        set.extend(iter);
        set
    }
}

impl Extend<Square> for SquareSet {
    fn extend<I: IntoIterator<Item = Square>>(&mut self, iter: I) {
        for sq in iter {
            self.insert(sq);
        }
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

/// Yields squares in ascending index order.
pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        index_to_square(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_corners() {
        assert_eq!(parse_square("a8").unwrap(), Square::new(0, 0).unwrap());
        assert_eq!(parse_square("h1").unwrap(), Square::new(7, 7).unwrap());
        assert_eq!(parse_square("e2").unwrap(), Square::new(6, 4).unwrap());
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["", "e", "e22", "i1", "a0", "a9", "E2", "2e"] {
            assert_eq!(
                parse_square(bad),
                Err(ChessError::InvalidNotation(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn notation_round_trip_all_squares() {
        for sq in Square::all() {
            assert_eq!(parse_square(&sq.notation()).unwrap(), sq);
        }
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn index_mapping_is_bijective() {
        for i in 0..64 {
            let sq = index_to_square(i).unwrap();
            assert_eq!(square_to_index(sq), i);
        }
        assert_eq!(index_to_square(64), None);
    }

    #[test]
    fn bounds_and_offsets() {
        assert!(in_bounds(0, 7));
        assert!(!in_bounds(-1, 3));
        assert!(!in_bounds(3, 8));
        let a1 = parse_square("a1").unwrap();
        assert_eq!(a1.offset(1, 0), None);
        assert_eq!(a1.offset(-1, 1), Some(parse_square("b2").unwrap()));
    }

    #[test]
    fn square_set_union_and_iteration() {
        let a: SquareSet = ["a1", "e4"].iter().map(|s| parse_square(s).unwrap()).collect();
        let b: SquareSet = ["e4", "h8"].iter().map(|s| parse_square(s).unwrap()).collect();
        let u = a | b;
        assert_eq!(u.len(), 3);
        assert!(u.contains(parse_square("h8").unwrap()));
        let names: Vec<String> = u.iter().map(|s| s.notation()).collect();
        assert_eq!(names, vec!["h8", "e4", "a1"]);
    }
}
