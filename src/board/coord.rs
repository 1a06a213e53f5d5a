use crate::error::CoordParseError;
use std::fmt;

/// A square index 0..63. Row 0 is rank 8 (Black's back rank); A1 = (7, 0), H8 = (0, 7).
/// This matches the teacher's `index / 8` / `index % 8` convention used throughout move
/// generation, wrapped in a named type instead of a bare `usize`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Coord(u8);

impl Coord {
    pub const COUNT: usize = 64;

    /// Panics if `index >= 64`; only ever constructed from generator-internal math or
    /// parsed input that has already been range-checked.
    pub fn new(index: usize) -> Self {
        debug_assert!(index < 64, "square index {index} out of range");
        Coord(index as u8)
    }

    pub fn from_row_col(row: i32, col: i32) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Coord((row * 8 + col) as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// 0..7, rank 8 = row 0.
    pub fn row(self) -> i32 {
        (self.0 / 8) as i32
    }

    pub fn column(self) -> i32 {
        (self.0 % 8) as i32
    }

    /// 1-indexed rank as printed in FEN/algebraic notation (row 0 -> rank 8).
    pub fn rank(self) -> u8 {
        8 - (self.0 / 8)
    }

    pub fn file(self) -> u8 {
        self.0 % 8
    }

    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Self> {
        Coord::from_row_col(self.row() + d_row, self.column() + d_col)
    }

    /// Parses algebraic coordinates such as `"e4"`.
    pub fn parse(s: &str) -> Result<Self, CoordParseError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(CoordParseError::WrongLength(s.to_string()));
        }
        let file = bytes[0];
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) {
            return Err(CoordParseError::InvalidFile(file as char));
        }
        if !(b'1'..=b'8').contains(&rank) {
            return Err(CoordParseError::InvalidRank(rank as char));
        }
        let col = (file - b'a') as i32;
        let row = 7 - (rank - b'1') as i32;
        Ok(Coord::from_row_col(row, col).expect("validated range"))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        write!(f, "{}{}", file, self.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a1_is_row7_col0() {
        let a1 = Coord::parse("a1").unwrap();
        assert_eq!(a1.row(), 7);
        assert_eq!(a1.column(), 0);
    }

    #[test]
    fn h8_is_row0_col7() {
        let h8 = Coord::parse("h8").unwrap();
        assert_eq!(h8.row(), 0);
        assert_eq!(h8.column(), 7);
    }

    #[test]
    fn display_round_trips_parse() {
        for s in ["a1", "e4", "h8", "d5"] {
            let c = Coord::parse(s).unwrap();
            assert_eq!(c.to_string(), s);
        }
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(Coord::parse("z9").is_err());
        assert!(Coord::parse("e").is_err());
        assert!(Coord::parse("e44").is_err());
    }

    #[test]
    fn offset_out_of_bounds_is_none() {
        let a1 = Coord::parse("a1").unwrap();
        assert_eq!(a1.offset(1, -1), None);
    }
}
