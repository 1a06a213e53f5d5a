/// A side to move. `None` is a sentinel used only outside the hot path (e.g. an
/// empty-square placeholder never appears paired with `Color::None`, since empty
/// squares are represented as `ColoredPiece::EMPTY`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Color {
    White,
    Black,
    None,
}

impl Color {
    /// Flips White/Black; invalid (but harmless) on `None`.
    pub fn invert(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
            Color::None => Color::None,
        }
    }

    /// Kept for call sites that read better as "the opponent of".
    pub fn opponent(self) -> Color {
        self.invert()
    }

    /// 0/1 index for keying per-color arrays. Panics on `Color::None`.
    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
            Color::None => panic!("Color::None has no array index"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_swaps_white_and_black() {
        assert_eq!(Color::White.invert(), Color::Black);
        assert_eq!(Color::Black.invert(), Color::White);
    }

    #[test]
    fn invert_is_its_own_inverse() {
        assert_eq!(Color::White.invert().invert(), Color::White);
    }

    #[test]
    fn index_matches_convention() {
        assert_eq!(Color::White.index(), 0);
        assert_eq!(Color::Black.index(), 1);
    }
}
