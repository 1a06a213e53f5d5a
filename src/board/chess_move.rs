use super::castling::CastlingRights;
use super::{Color, ColoredPiece, Coord, Piece};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MoveCategory {
    Default,
    NormalCapturing,
    EnPassant,
    Castling,
}

/// A fully-specified move: source, destination, the piece to promote to (meaningless
/// unless `is_promoting()`), and the category that disambiguates capture/en-passant/
/// castling handling in `Board::apply_move`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Move {
    pub src: Coord,
    pub dst: Coord,
    pub promoted_piece: Piece,
    pub category: MoveCategory,
}

impl Move {
    pub fn new(src: Coord, dst: Coord, category: MoveCategory) -> Self {
        Move {
            src,
            dst,
            promoted_piece: Piece::None,
            category,
        }
    }

    pub fn promoting(src: Coord, dst: Coord, category: MoveCategory, promoted: Piece) -> Self {
        Move {
            src,
            dst,
            promoted_piece: promoted,
            category,
        }
    }

    pub fn is_castling(&self) -> bool {
        self.category == MoveCategory::Castling
    }

    pub fn is_en_passant(&self) -> bool {
        self.category == MoveCategory::EnPassant
    }

    pub fn is_promoting(&self) -> bool {
        self.promoted_piece != Piece::None
    }

    pub fn is_any_capturing(&self) -> bool {
        matches!(
            self.category,
            MoveCategory::NormalCapturing | MoveCategory::EnPassant
        )
    }

    /// Castling direction is inferred from the king's destination file, per spec §3.
    pub fn is_kingside_castle(&self) -> bool {
        self.is_castling() && self.dst.column() == 6
    }

    pub fn is_queenside_castle(&self) -> bool {
        self.is_castling() && self.dst.column() == 2
    }
}

/// An en-passant capture target: the square a pawn just skipped over, and which
/// color's pawn is entitled to capture there. Cleared on any move that is not a
/// two-square pawn push.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EnPassantTarget {
    pub square: Coord,
    pub vulnerable_color: Color,
}

/// The minimum information needed to reverse exactly one `Board::apply_move` call
/// (spec §3 "UndoToken"). Deliberately a small `Copy` stack value — no heap allocation
/// per move (spec §9).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveUndo {
    pub mv: Move,
    pub captured: Option<ColoredPiece>,
    pub prior_castling: CastlingRights,
    pub prior_en_passant: Option<EnPassantTarget>,
    pub prior_half_moves_since_progress: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn castling_direction_is_inferred_from_destination_file() {
        let kingside = Move::new(Coord::new(4), Coord::new(6), MoveCategory::Castling);
        assert!(kingside.is_kingside_castle());
        assert!(!kingside.is_queenside_castle());

        let queenside = Move::new(Coord::new(4), Coord::new(2), MoveCategory::Castling);
        assert!(queenside.is_queenside_castle());
        assert!(!queenside.is_kingside_castle());
    }

    #[test]
    fn is_any_capturing_covers_normal_and_en_passant() {
        let normal = Move::new(Coord::new(10), Coord::new(19), MoveCategory::NormalCapturing);
        let ep = Move::new(Coord::new(10), Coord::new(19), MoveCategory::EnPassant);
        let quiet = Move::new(Coord::new(10), Coord::new(18), MoveCategory::Default);
        assert!(normal.is_any_capturing());
        assert!(ep.is_any_capturing());
        assert!(!quiet.is_any_capturing());
    }

    #[test]
    fn is_promoting_depends_only_on_promoted_piece() {
        let quiet = Move::new(Coord::new(8), Coord::new(0), MoveCategory::Default);
        assert!(!quiet.is_promoting());
        let promo = Move::promoting(Coord::new(8), Coord::new(0), MoveCategory::Default, Piece::Queen);
        assert!(promo.is_promoting());
    }
}
