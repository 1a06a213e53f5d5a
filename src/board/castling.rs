use super::Color;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    KingSide,
    QueenSide,
}

/// A 2-bit-per-color eligibility set, packed into one byte. Once a bit is cleared it
/// is only ever re-set by `Board::undo_move` restoring a prior snapshot (spec §8
/// invariant 5).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct CastlingRights(u8);

impl CastlingRights {
    const WHITE_KING_SIDE: u8 = 0b0001;
    const WHITE_QUEEN_SIDE: u8 = 0b0010;
    const BLACK_KING_SIDE: u8 = 0b0100;
    const BLACK_QUEEN_SIDE: u8 = 0b1000;

    pub const fn empty() -> Self {
        CastlingRights(0)
    }

    pub const fn full() -> Self {
        CastlingRights(0b1111)
    }

    fn flag(color: Color, side: Side) -> u8 {
        match (color, side) {
            (Color::White, Side::KingSide) => Self::WHITE_KING_SIDE,
            (Color::White, Side::QueenSide) => Self::WHITE_QUEEN_SIDE,
            (Color::Black, Side::KingSide) => Self::BLACK_KING_SIDE,
            (Color::Black, Side::QueenSide) => Self::BLACK_QUEEN_SIDE,
            (Color::None, _) => 0,
        }
    }

    pub fn has(&self, color: Color, side: Side) -> bool {
        (self.0 & Self::flag(color, side)) != 0
    }

    pub fn remove(&mut self, color: Color, side: Side) {
        self.0 &= !Self::flag(color, side);
    }

    pub fn add(&mut self, color: Color, side: Side) {
        self.0 |= Self::flag(color, side);
    }

    /// Clears both bits for `color`, used when the king moves or castles.
    pub fn clear_color(&mut self, color: Color) {
        self.remove(color, Side::KingSide);
        self.remove(color, Side::QueenSide);
    }

    /// Raw 4-bit mask, used as the Zobrist castling-key index (spec §4.1).
    pub fn mask(self) -> u8 {
        self.0
    }

    pub fn from_mask(mask: u8) -> Self {
        CastlingRights(mask & 0b1111)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_rights() {
        let rights = CastlingRights::empty();
        assert!(!rights.has(Color::White, Side::KingSide));
        assert!(!rights.has(Color::White, Side::QueenSide));
        assert!(!rights.has(Color::Black, Side::KingSide));
        assert!(!rights.has(Color::Black, Side::QueenSide));
    }

    #[test]
    fn full_has_all_rights() {
        let rights = CastlingRights::full();
        assert!(rights.has(Color::White, Side::KingSide));
        assert!(rights.has(Color::White, Side::QueenSide));
        assert!(rights.has(Color::Black, Side::KingSide));
        assert!(rights.has(Color::Black, Side::QueenSide));
    }

    #[test]
    fn remove_is_scoped_to_color_and_side() {
        let mut rights = CastlingRights::full();
        rights.remove(Color::White, Side::KingSide);
        assert!(!rights.has(Color::White, Side::KingSide));
        assert!(rights.has(Color::White, Side::QueenSide));
        assert!(rights.has(Color::Black, Side::KingSide));
        assert!(rights.has(Color::Black, Side::QueenSide));
    }

    #[test]
    fn clear_color_removes_both_sides() {
        let mut rights = CastlingRights::full();
        rights.clear_color(Color::White);
        assert!(!rights.has(Color::White, Side::KingSide));
        assert!(!rights.has(Color::White, Side::QueenSide));
        assert!(rights.has(Color::Black, Side::KingSide));
    }

    #[test]
    fn mask_round_trips_through_from_mask() {
        let mut rights = CastlingRights::full();
        rights.remove(Color::Black, Side::QueenSide);
        let mask = rights.mask();
        assert_eq!(CastlingRights::from_mask(mask), rights);
    }
}
