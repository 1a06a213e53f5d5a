use super::castling::{CastlingRights, Side};
use super::chess_move::{EnPassantTarget, Move, MoveCategory, MoveUndo};
use super::{Color, ColoredPiece, Coord, Piece};
use crate::eval::piece_square_value;
use crate::zobrist::ZobristTable;

/// The mailbox board (spec §3/§4): an 8x8 piece array plus every derived quantity the
/// search and evaluator need maintained incrementally rather than recomputed every
/// node — material, positional score, Zobrist hash, king squares, castling
/// eligibility, en-passant target, and the fifty/seventy-five-move counters.
#[derive(Clone, Debug)]
pub struct Board {
    squares: [ColoredPiece; 64],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant_target: Option<EnPassantTarget>,
    king_coord: [Coord; 2],
    material: [i32; 2],
    position_score: [i32; 2],
    hash: u64,
    half_moves_since_progress: u32,
    full_move_number: u32,
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [ColoredPiece::EMPTY; 64],
            side_to_move: Color::White,
            castling: CastlingRights::empty(),
            en_passant_target: None,
            king_coord: [Coord::new(0), Coord::new(0)],
            material: [0, 0],
            position_score: [0, 0],
            hash: 0,
            half_moves_since_progress: 0,
            full_move_number: 1,
        }
    }

    /// The standard chess starting position (spec §6 `create_standard_game`).
    pub fn new_standard() -> Self {
        use Piece::*;
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = Board::empty();

        // Row 0 is rank 8 (`Coord`'s FEN-order convention), so Black's back rank sits
        // at indices 0-7 and White's at 56-63.
        for file in 0..8 {
            board.place(Coord::new(file), ColoredPiece::new(back_rank[file], Color::Black));
            board.place(Coord::new(8 + file), ColoredPiece::new(Pawn, Color::Black));
            board.place(Coord::new(48 + file), ColoredPiece::new(Pawn, Color::White));
            board.place(Coord::new(56 + file), ColoredPiece::new(back_rank[file], Color::White));
        }

        board.king_coord[Color::White.index()] = Coord::new(60);
        board.king_coord[Color::Black.index()] = Coord::new(4);
        board.castling = CastlingRights::full();
        board.side_to_move = Color::White;
        board.recompute_hash();
        board
    }

    pub(crate) fn place(&mut self, at: Coord, piece: ColoredPiece) {
        self.squares[at.index()] = piece;
        if !piece.is_empty() {
            self.material[piece.color.index()] += piece.piece.value();
            self.position_score[piece.color.index()] +=
                piece_square_value(piece.piece, piece.color, at.index());
            if piece.piece == Piece::King {
                self.king_coord[piece.color.index()] = at;
            }
        }
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub(crate) fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }

    pub(crate) fn set_en_passant_target(&mut self, target: Option<EnPassantTarget>) {
        self.en_passant_target = target;
    }

    pub(crate) fn set_half_moves_since_progress(&mut self, count: u32) {
        self.half_moves_since_progress = count;
    }

    pub(crate) fn set_full_move_number(&mut self, count: u32) {
        self.full_move_number = count;
    }

    pub fn piece_at(&self, at: Coord) -> ColoredPiece {
        self.squares[at.index()]
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant_target(&self) -> Option<EnPassantTarget> {
        self.en_passant_target
    }

    pub fn king_coord(&self, color: Color) -> Coord {
        self.king_coord[color.index()]
    }

    pub fn material(&self, color: Color) -> i32 {
        self.material[color.index()]
    }

    pub fn position_score(&self, color: Color) -> i32 {
        self.position_score[color.index()]
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn half_moves_since_progress(&self) -> u32 {
        self.half_moves_since_progress
    }

    pub fn full_move_number(&self) -> u32 {
        self.full_move_number
    }

    /// Recomputes the Zobrist hash from scratch. Used only by board construction
    /// (`create_from_fen`, `new_standard`) and debug validation — the hot path keeps
    /// the hash current through `apply_move`/`undo_move`'s incremental XORs.
    pub fn recompute_hash(&mut self) {
        let table = ZobristTable::get();
        let mut hash = 0u64;
        for i in 0..64 {
            let occupant = self.squares[i];
            if !occupant.is_empty() {
                hash ^= table.piece(occupant.piece, occupant.color, Coord::new(i));
            }
        }
        hash ^= table.castling(self.castling);
        if let Some(ep) = self.en_passant_target {
            hash ^= table.en_passant_file(ep.square.file());
        }
        if self.side_to_move == Color::Black {
            hash ^= table.side_to_move();
        }
        self.hash = hash;
    }

    /// Applies `mv` as `who` and returns the token needed to reverse it (spec §3/§4.4).
    /// The captured piece is snapshotted *before* any mutation touches the board,
    /// including the rook-capture-while-castling case — taking the snapshot after the
    /// capture already landed would record the post-capture state as "prior", which is
    /// the bug this rewrite deliberately does not reproduce.
    pub fn apply_move(&mut self, who: Color, mv: Move) -> MoveUndo {
        debug_assert_eq!(self.side_to_move, who, "apply_move called out of turn");

        let table = ZobristTable::get();
        let moving = self.squares[mv.src.index()];
        debug_assert!(!moving.is_empty() && moving.color == who, "no mover at src");

        let capture_square = if mv.is_en_passant() {
            Coord::from_row_col(mv.src.row(), mv.dst.column()).expect("en passant geometry")
        } else {
            mv.dst
        };
        let captured = self.squares[capture_square.index()];
        let captured = if captured.is_empty() { None } else { Some(captured) };

        let undo = MoveUndo {
            mv,
            captured,
            prior_castling: self.castling,
            prior_en_passant: self.en_passant_target,
            prior_half_moves_since_progress: self.half_moves_since_progress,
        };

        // --- mutate ---
        self.hash ^= table.castling(self.castling);
        if let Some(ep) = self.en_passant_target {
            self.hash ^= table.en_passant_file(ep.square.file());
        }

        if let Some(victim) = captured {
            self.hash ^= table.piece(victim.piece, victim.color, capture_square);
            self.material[victim.color.index()] -= victim.piece.value();
            self.position_score[victim.color.index()] -=
                piece_square_value(victim.piece, victim.color, capture_square.index());
            self.squares[capture_square.index()] = ColoredPiece::EMPTY;
        }

        self.hash ^= table.piece(moving.piece, moving.color, mv.src);
        self.position_score[who.index()] -=
            piece_square_value(moving.piece, moving.color, mv.src.index());
        self.squares[mv.src.index()] = ColoredPiece::EMPTY;

        let placed_piece = if mv.is_promoting() { mv.promoted_piece } else { moving.piece };
        if mv.is_promoting() {
            self.material[who.index()] += placed_piece.value() - moving.piece.value();
        }
        self.hash ^= table.piece(placed_piece, who, mv.dst);
        self.position_score[who.index()] += piece_square_value(placed_piece, who, mv.dst.index());
        self.squares[mv.dst.index()] = ColoredPiece::new(placed_piece, who);

        if mv.is_castling() {
            let (rook_from, rook_to) = castle_rook_squares(mv);
            let rook = self.squares[rook_from.index()];
            self.hash ^= table.piece(rook.piece, rook.color, rook_from);
            self.position_score[who.index()] -=
                piece_square_value(rook.piece, rook.color, rook_from.index());
            self.squares[rook_from.index()] = ColoredPiece::EMPTY;
            self.hash ^= table.piece(rook.piece, rook.color, rook_to);
            self.position_score[who.index()] +=
                piece_square_value(rook.piece, rook.color, rook_to.index());
            self.squares[rook_to.index()] = rook;
        }

        if moving.piece == Piece::King {
            self.king_coord[who.index()] = mv.dst;
            self.castling.clear_color(who);
        }
        if moving.piece == Piece::Rook {
            clear_rook_right(&mut self.castling, who, mv.src);
        }
        if let Some(victim) = captured
            && victim.piece == Piece::Rook
        {
            clear_rook_right(&mut self.castling, victim.color, capture_square);
        }

        self.en_passant_target = None;
        if moving.piece == Piece::Pawn && (mv.src.row() - mv.dst.row()).abs() == 2 {
            let skipped_row = (mv.src.row() + mv.dst.row()) / 2;
            let skipped =
                Coord::from_row_col(skipped_row, mv.src.column()).expect("pawn push geometry");
            self.en_passant_target = Some(EnPassantTarget {
                square: skipped,
                vulnerable_color: who.opponent(),
            });
        }

        self.hash ^= table.castling(self.castling);
        if let Some(ep) = self.en_passant_target {
            self.hash ^= table.en_passant_file(ep.square.file());
        }

        if moving.piece == Piece::Pawn || captured.is_some() {
            self.half_moves_since_progress = 0;
        } else {
            self.half_moves_since_progress += 1;
        }
        if who == Color::Black {
            self.full_move_number += 1;
        }

        self.hash ^= table.side_to_move();
        self.side_to_move = who.opponent();

        undo
    }

    /// Reverses exactly the `apply_move` call that produced `undo`. `who` must be the
    /// same color passed to `apply_move`.
    pub fn undo_move(&mut self, who: Color, undo: MoveUndo) {
        let mv = undo.mv;
        let table = ZobristTable::get();

        self.hash ^= table.side_to_move();
        self.side_to_move = who;
        if who == Color::Black {
            self.full_move_number -= 1;
        }
        self.half_moves_since_progress = undo.prior_half_moves_since_progress;

        self.hash ^= table.castling(self.castling);
        if let Some(ep) = self.en_passant_target {
            self.hash ^= table.en_passant_file(ep.square.file());
        }

        let placed = self.squares[mv.dst.index()];
        self.hash ^= table.piece(placed.piece, placed.color, mv.dst);
        self.position_score[who.index()] -= piece_square_value(placed.piece, who, mv.dst.index());
        self.squares[mv.dst.index()] = ColoredPiece::EMPTY;

        let original_piece = if mv.is_promoting() { Piece::Pawn } else { placed.piece };
        if mv.is_promoting() {
            self.material[who.index()] += original_piece.value() - placed.piece.value();
        }
        self.hash ^= table.piece(original_piece, who, mv.src);
        self.position_score[who.index()] += piece_square_value(original_piece, who, mv.src.index());
        self.squares[mv.src.index()] = ColoredPiece::new(original_piece, who);

        if mv.is_castling() {
            let (rook_from, rook_to) = castle_rook_squares(mv);
            let rook = self.squares[rook_to.index()];
            self.hash ^= table.piece(rook.piece, rook.color, rook_to);
            self.position_score[who.index()] -=
                piece_square_value(rook.piece, rook.color, rook_to.index());
            self.squares[rook_to.index()] = ColoredPiece::EMPTY;
            self.hash ^= table.piece(rook.piece, rook.color, rook_from);
            self.position_score[who.index()] +=
                piece_square_value(rook.piece, rook.color, rook_from.index());
            self.squares[rook_from.index()] = rook;
        }

        if original_piece == Piece::King {
            self.king_coord[who.index()] = mv.src;
        }

        let capture_square = if mv.is_en_passant() {
            Coord::from_row_col(mv.src.row(), mv.dst.column()).expect("en passant geometry")
        } else {
            mv.dst
        };
        if let Some(victim) = undo.captured {
            self.material[victim.color.index()] += victim.piece.value();
            self.position_score[victim.color.index()] +=
                piece_square_value(victim.piece, victim.color, capture_square.index());
            self.squares[capture_square.index()] = victim;
            self.hash ^= table.piece(victim.piece, victim.color, capture_square);
        }

        self.castling = undo.prior_castling;
        self.en_passant_target = undo.prior_en_passant;
        self.hash ^= table.castling(self.castling);
        if let Some(ep) = self.en_passant_target {
            self.hash ^= table.en_passant_file(ep.square.file());
        }
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        super::threats::is_square_attacked(self, self.king_coord(color), color.opponent())
    }

    pub fn squares(&self) -> &[ColoredPiece; 64] {
        &self.squares
    }
}

fn clear_rook_right(castling: &mut CastlingRights, color: Color, square: Coord) {
    let home_rank = match color {
        Color::White => 7,
        _ => 0,
    };
    if square.row() != home_rank {
        return;
    }
    match square.column() {
        0 => castling.remove(color, Side::QueenSide),
        7 => castling.remove(color, Side::KingSide),
        _ => {}
    }
}

fn castle_rook_squares(mv: Move) -> (Coord, Coord) {
    let row = mv.src.row();
    if mv.is_kingside_castle() {
        (
            Coord::from_row_col(row, 7).expect("rook home"),
            Coord::from_row_col(row, 5).expect("rook dest"),
        )
    } else {
        (
            Coord::from_row_col(row, 0).expect("rook home"),
            Coord::from_row_col(row, 3).expect("rook dest"),
        )
    }
}
