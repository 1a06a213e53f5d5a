//! A process-wide Zobrist hash table (spec §4.1). Built once, seeded deterministically,
//! and shared by every `Board` so that two boards reaching the same position always
//! hash identically regardless of which process constructed them.

use crate::board::{CastlingRights, Color, Coord, Piece};
use std::sync::OnceLock;

static ZOBRIST_TABLE: OnceLock<ZobristTable> = OnceLock::new();

/// Random 64-bit keys for every board component that can change between positions.
/// A position's hash is the XOR of the keys for everything currently true about it;
/// since XOR is its own inverse, `Board` maintains the hash incrementally rather than
/// recomputing it on every move.
pub struct ZobristTable {
    pieces: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

impl ZobristTable {
    fn new() -> Self {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x5A5A_5A5A_1234_5678);

        let mut pieces = [[[0u64; 64]; 6]; 2];
        for color_table in &mut pieces {
            for piece_table in color_table {
                for key in piece_table {
                    *key = rng.random::<u64>();
                }
            }
        }

        let side_to_move = rng.random::<u64>();

        let mut castling = [0u64; 16];
        for key in &mut castling {
            *key = rng.random::<u64>();
        }

        let mut en_passant_file = [0u64; 8];
        for key in &mut en_passant_file {
            *key = rng.random::<u64>();
        }

        Self {
            pieces,
            side_to_move,
            castling,
            en_passant_file,
        }
    }

    pub fn get() -> &'static ZobristTable {
        ZOBRIST_TABLE.get_or_init(ZobristTable::new)
    }

    #[inline]
    pub fn piece(&self, piece: Piece, color: Color, square: Coord) -> u64 {
        self.pieces[color.index()][piece.table_index()][square.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> u64 {
        self.side_to_move
    }

    /// Keyed by the raw 4-bit castling mask, so flipping any single right changes the
    /// XOR contribution without needing four separate lookups.
    #[inline]
    pub fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling[rights.mask() as usize]
    }

    #[inline]
    pub fn en_passant_file(&self, file: u8) -> u64 {
        debug_assert!(file < 8);
        self.en_passant_file[file as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_deterministic_across_calls() {
        let a = ZobristTable::get();
        let b = ZobristTable::get();
        assert_eq!(
            a.piece(Piece::Pawn, Color::White, Coord::new(0)),
            b.piece(Piece::Pawn, Color::White, Coord::new(0))
        );
    }

    #[test]
    fn distinct_squares_get_distinct_keys() {
        let table = ZobristTable::get();
        let a = table.piece(Piece::Knight, Color::Black, Coord::new(10));
        let b = table.piece(Piece::Knight, Color::Black, Coord::new(11));
        assert_ne!(a, b);
    }

    #[test]
    fn empty_castling_mask_contributes_a_stable_key() {
        let table = ZobristTable::get();
        assert_eq!(
            table.castling(CastlingRights::empty()),
            table.castling(CastlingRights::empty())
        );
        assert_ne!(
            table.castling(CastlingRights::empty()),
            table.castling(CastlingRights::full())
        );
    }
}
