//! Pseudo-legal and legal move generation (spec §4.5), grounded on the teacher's
//! per-piece `generate_*_moves` family and `generate_legal_moves` filter, generalized
//! to `Coord`/`Move` and to the `Board`'s incrementally-maintained castling rights
//! instead of six separate moved-flags.

use super::chess_move::MoveCategory;
use super::threats::is_square_attacked;
use super::{Board, CastlingRights, Color, Coord, Move, Piece, Side};

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_DELTAS: [(i32, i32); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];
const KING_DELTAS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

/// All pseudo-legal moves for the side to move: geometrically valid, but possibly
/// leaving (or passing through) the mover's own king in check.
pub fn generate_pseudo_legal_moves(board: &Board) -> Vec<Move> {
    let side = board.side_to_move();
    let mut moves = Vec::with_capacity(48);
    for i in 0..64 {
        let square = Coord::new(i);
        let occupant = board.piece_at(square);
        if occupant.is_empty() || occupant.color != side {
            continue;
        }
        match occupant.piece {
            Piece::Pawn => generate_pawn_moves(board, square, side, &mut moves),
            Piece::Knight => generate_jump_moves(board, square, side, &KNIGHT_DELTAS, &mut moves),
            Piece::Bishop => generate_sliding_moves(board, square, side, &BISHOP_DIRECTIONS, &mut moves),
            Piece::Rook => generate_sliding_moves(board, square, side, &ROOK_DIRECTIONS, &mut moves),
            Piece::Queen => {
                generate_sliding_moves(board, square, side, &ROOK_DIRECTIONS, &mut moves);
                generate_sliding_moves(board, square, side, &BISHOP_DIRECTIONS, &mut moves);
            }
            Piece::King => {
                generate_jump_moves(board, square, side, &KING_DELTAS, &mut moves);
                generate_castling_moves(board, square, side, &mut moves);
            }
            Piece::None => {}
        }
    }
    moves
}

/// Pseudo-legal moves filtered to those that do not leave the mover's own king in
/// check — the spec's "legal move" (§4.5). Each candidate is applied, tested, and
/// undone; this is the natural place the apply/undo pair earns its keep.
pub fn generate_legal_moves(board: &Board) -> Vec<Move> {
    let side = board.side_to_move();
    let mut board = board.clone();
    generate_pseudo_legal_moves(&board)
        .into_iter()
        .filter(|&mv| {
            let undo = board.apply_move(side, mv);
            let still_in_check = board.is_in_check(side);
            board.undo_move(side, undo);
            !still_in_check
        })
        .collect()
}

fn generate_pawn_moves(board: &Board, from: Coord, color: Color, moves: &mut Vec<Move>) {
    let forward = match color {
        Color::White => -1,
        _ => 1,
    };
    let start_row = match color {
        Color::White => 6,
        _ => 1,
    };
    let promotion_row = match color {
        Color::White => 0,
        _ => 7,
    };

    if let Some(one_step) = from.offset(forward, 0)
        && board.piece_at(one_step).is_empty()
    {
        push_pawn_move(from, one_step, promotion_row, MoveCategory::Default, moves);
        if from.row() == start_row
            && let Some(two_step) = from.offset(2 * forward, 0)
            && board.piece_at(two_step).is_empty()
        {
            moves.push(Move::new(from, two_step, MoveCategory::Default));
        }
    }

    for dc in [-1, 1] {
        let Some(to) = from.offset(forward, dc) else { continue };
        let occupant = board.piece_at(to);
        if !occupant.is_empty() && occupant.color != color {
            push_pawn_move(from, to, promotion_row, MoveCategory::NormalCapturing, moves);
        } else if occupant.is_empty()
            && let Some(ep) = board.en_passant_target()
            && ep.square == to
            && ep.vulnerable_color == color
        {
            moves.push(Move::new(from, to, MoveCategory::EnPassant));
        }
    }
}

fn push_pawn_move(
    from: Coord,
    to: Coord,
    promotion_row: i32,
    category: MoveCategory,
    moves: &mut Vec<Move>,
) {
    if to.row() == promotion_row {
        for &promoted in &PROMOTION_PIECES {
            moves.push(Move::promoting(from, to, category, promoted));
        }
    } else {
        moves.push(Move::new(from, to, category));
    }
}

fn generate_jump_moves(
    board: &Board,
    from: Coord,
    color: Color,
    deltas: &[(i32, i32)],
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in deltas {
        let Some(to) = from.offset(dr, dc) else { continue };
        let occupant = board.piece_at(to);
        if occupant.is_empty() {
            moves.push(Move::new(from, to, MoveCategory::Default));
        } else if occupant.color != color {
            moves.push(Move::new(from, to, MoveCategory::NormalCapturing));
        }
    }
}

fn generate_sliding_moves(
    board: &Board,
    from: Coord,
    color: Color,
    directions: &[(i32, i32)],
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(to) = current.offset(dr, dc) {
            let occupant = board.piece_at(to);
            if occupant.is_empty() {
                moves.push(Move::new(from, to, MoveCategory::Default));
                current = to;
                continue;
            }
            if occupant.color != color {
                moves.push(Move::new(from, to, MoveCategory::NormalCapturing));
            }
            break;
        }
    }
}

fn generate_castling_moves(board: &Board, king_square: Coord, color: Color, moves: &mut Vec<Move>) {
    let rights = board.castling_rights();
    let row = king_square.row();
    let opponent = color.opponent();

    if rights.has(color, Side::KingSide) {
        let f = Coord::from_row_col(row, 5).unwrap();
        let g = Coord::from_row_col(row, 6).unwrap();
        if board.piece_at(f).is_empty()
            && board.piece_at(g).is_empty()
            && !is_square_attacked(board, king_square, opponent)
            && !is_square_attacked(board, f, opponent)
            && !is_square_attacked(board, g, opponent)
        {
            moves.push(Move::new(king_square, g, MoveCategory::Castling));
        }
    }
    if rights.has(color, Side::QueenSide) {
        let d = Coord::from_row_col(row, 3).unwrap();
        let c = Coord::from_row_col(row, 2).unwrap();
        let b = Coord::from_row_col(row, 1).unwrap();
        if board.piece_at(d).is_empty()
            && board.piece_at(c).is_empty()
            && board.piece_at(b).is_empty()
            && !is_square_attacked(board, king_square, opponent)
            && !is_square_attacked(board, d, opponent)
            && !is_square_attacked(board, c, opponent)
        {
            moves.push(Move::new(king_square, c, MoveCategory::Castling));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ColoredPiece;

    #[test]
    fn starting_position_has_twenty_legal_moves() {
        let board = Board::new_standard();
        assert_eq!(generate_legal_moves(&board).len(), 20);
    }

    #[test]
    fn pinned_piece_cannot_move_out_of_pin() {
        let mut board = Board::empty();
        board.place(Coord::new(60), ColoredPiece::new(Piece::King, Color::White)); // e1
        board.place(Coord::new(52), ColoredPiece::new(Piece::Bishop, Color::White)); // e2, pinned
        board.place(Coord::new(4), ColoredPiece::new(Piece::Rook, Color::Black)); // e8
        board.place(Coord::new(0), ColoredPiece::new(Piece::King, Color::Black)); // a8
        board.set_side_to_move(Color::White);
        board.recompute_hash();

        let moves = generate_legal_moves(&board);
        assert!(moves.iter().all(|m| m.src == Coord::new(52) && m.dst.column() == 4 || m.src != Coord::new(52)));
    }

    #[test]
    fn castling_requires_king_not_pass_through_check() {
        let mut board = Board::empty();
        board.place(Coord::new(60), ColoredPiece::new(Piece::King, Color::White));
        board.place(Coord::new(63), ColoredPiece::new(Piece::Rook, Color::White));
        board.place(Coord::new(5), ColoredPiece::new(Piece::Rook, Color::Black)); // f8, attacks f1
        board.place(Coord::new(4), ColoredPiece::new(Piece::King, Color::Black));
        board.set_castling_rights(CastlingRights::full());
        board.set_side_to_move(Color::White);
        board.recompute_hash();

        let moves = generate_pseudo_legal_moves(&board);
        assert!(!moves.iter().any(|m| m.is_castling()));
    }

    #[test]
    fn castling_through_check_is_rejected_from_fen() {
        let board = Board::create_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let kingside: Vec<Move> = generate_legal_moves(&board).into_iter().filter(|m| m.is_kingside_castle()).collect();
        assert_eq!(kingside.len(), 1, "O-O should be legal with an open board");

        let with_black_rook = Board::create_from_fen("k3r3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let blocked: Vec<Move> = generate_legal_moves(&with_black_rook).into_iter().filter(|m| m.is_kingside_castle()).collect();
        assert!(blocked.is_empty(), "O-O must be rejected: king passes through an attacked square");
    }
}
