use super::Color;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Piece {
    None,
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    /// Material value in centipawns. King is a convention value only — it is never
    /// actually captured, so it never contributes to a real material comparison.
    pub fn value(self) -> i32 {
        match self {
            Piece::None => 0,
            Piece::Pawn => 100,
            Piece::Knight | Piece::Bishop => 320,
            Piece::Rook => 500,
            Piece::Queen => 1000,
            Piece::King => 1500,
        }
    }

    /// Zobrist/piece-square-table row index, 0..6, for the six real piece kinds.
    pub(crate) fn table_index(self) -> usize {
        match self {
            Piece::Pawn => 0,
            Piece::Knight => 1,
            Piece::Bishop => 2,
            Piece::Rook => 3,
            Piece::Queen => 4,
            Piece::King => 5,
            Piece::None => panic!("Piece::None has no table index"),
        }
    }
}

/// A piece together with its color; empty square = `ColoredPiece::EMPTY`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ColoredPiece {
    pub piece: Piece,
    pub color: Color,
}

impl ColoredPiece {
    pub const EMPTY: ColoredPiece = ColoredPiece {
        piece: Piece::None,
        color: Color::None,
    };

    pub const fn new(piece: Piece, color: Color) -> Self {
        ColoredPiece { piece, color }
    }

    pub fn is_empty(self) -> bool {
        self.piece == Piece::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn king_value_never_decides_material_balance_alone() {
        assert!(Piece::Queen.value() < Piece::King.value());
    }

    #[test]
    fn minor_pieces_share_a_value() {
        assert_eq!(Piece::Knight.value(), Piece::Bishop.value());
    }

    #[test]
    fn empty_colored_piece_is_empty() {
        assert!(ColoredPiece::EMPTY.is_empty());
        assert!(!ColoredPiece::new(Piece::Pawn, Color::White).is_empty());
    }
}
