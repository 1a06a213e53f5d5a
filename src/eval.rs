//! Static position evaluation (spec §4.7-§4.8): material balance plus piece-square
//! tables, and the terminal-state classifiers (`checkmate`/`stalemate`/draw) the search
//! and `Game` facade both rely on.

use crate::board::{Board, Color, Piece};
use crate::history::History;

/// Large enough that any checkmate outscores any material imbalance (spec §4.7).
pub const CHECKMATE_SCORE: i32 = 100_000;
pub const INITIAL_ALPHA: i32 = CHECKMATE_SCORE + 1;

/// Centipawn bonus/penalty for a piece sitting on a given square, from White's
/// perspective. Tables are written as an 8x8 grid with index 0 = a8 (matching
/// `Coord`'s row-0-is-rank-8 convention), so they read top-to-bottom the same way a
/// printed board diagram does; Black's score is read by mirroring the square
/// vertically (`square ^ 56`).
pub(crate) fn piece_square_value(piece: Piece, color: Color, square: usize) -> i32 {
    let sq = match color {
        Color::White => square,
        _ => square ^ 56,
    };
    match piece {
        Piece::Pawn => PAWN_TABLE[sq],
        Piece::Knight => KNIGHT_TABLE[sq],
        Piece::Bishop => BISHOP_TABLE[sq],
        Piece::Rook => ROOK_TABLE[sq],
        Piece::Queen => QUEEN_TABLE[sq],
        Piece::King => KING_MIDDLEGAME_TABLE[sq],
        Piece::None => 0,
    }
}

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10,-20,-20, 10, 10,  5,
     5, -5,-10,  0,  0,-10, -5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5,  5, 10, 25, 25, 10,  5,  5,
    10, 10, 20, 30, 30, 20, 10, 10,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  5,  5,  0,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -10,  5,  5,  5,  5,  5,  0,-10,
      0,  0,  5,  5,  5,  5,  0, -5,
     -5,  0,  5,  5,  5,  5,  0, -5,
    -10,  0,  5,  5,  5,  5,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_MIDDLEGAME_TABLE: [i32; 64] = [
     20, 30, 10,  0,  0, 10, 30, 20,
     20, 20,  0,  0,  0,  0, 20, 20,
    -10,-20,-20,-20,-20,-20,-20,-10,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
];

/// Material plus positional score from White's perspective, then flipped to the side
/// to move (spec §4.7). `Board` maintains both terms incrementally; this free function
/// exists for from-scratch validation (`Board::create_from_fen`, tests) rather than the
/// search hot path.
pub fn evaluate(board: &Board) -> i32 {
    let total = board.material(Color::White) - board.material(Color::Black)
        + board.position_score(Color::White)
        - board.position_score(Color::Black);
    match board.side_to_move() {
        Color::Black => -total,
        _ => total,
    }
}

/// A side's material is judged insufficient to deliver checkmate against any
/// resistance (spec §4.8): bare kings, a single minor against a bare king, and king +
/// same-or-opposite-colored single bishop vs king + single bishop. Any pawn, rook, or
/// queen, or two or more minor pieces on one side, disqualifies the position.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut minors = [0u32; 2];

    for square in 0..64 {
        let occupant = board.piece_at(crate::board::Coord::new(square));
        if occupant.is_empty() {
            continue;
        }
        let idx = occupant.color.index();
        match occupant.piece {
            Piece::Pawn | Piece::Rook | Piece::Queen => return false,
            Piece::Knight | Piece::Bishop => minors[idx] += 1,
            Piece::King | Piece::None => {}
        }
    }

    minors[0] < 2 && minors[1] < 2
}

/// True if the position is a forced draw independent of whose move it is: insufficient
/// material, fivefold repetition, or seventy-five half-moves without progress (spec
/// §4.8). Threefold repetition and the fifty-move rule are *offers*, surfaced by
/// `Game::status` rather than forced here.
pub fn is_forced_draw(board: &Board, history: &History) -> bool {
    is_insufficient_material(board)
        || history.is_nth_repetition(board.hash(), 5)
        || history.half_moves_since_progress() >= 150
}

/// Score for a position where `generateLegalMoves` returned empty (spec §4.7):
/// checkmate if the side to move is in check, scored so that faster mates score
/// higher in absolute value; otherwise stalemate, scored as a draw.
pub fn evaluate_without_legal_moves(board: &Board, ply: u32) -> i32 {
    if board.is_in_check(board.side_to_move()) {
        -CHECKMATE_SCORE + ply as i32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn starting_position_is_close_to_balanced() {
        let board = Board::new_standard();
        let score = evaluate(&board);
        assert!(score.abs() < 50, "expected near-zero eval, got {score}");
    }

    #[test]
    fn bare_kings_are_insufficient_material() {
        let board = Board::create_from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(is_insufficient_material(&board));
    }

    #[test]
    fn king_and_rook_is_sufficient_material() {
        let board = Board::create_from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert!(!is_insufficient_material(&board));
    }

    #[test]
    fn king_and_two_knights_is_reported_sufficient() {
        let board = Board::create_from_fen("4k3/8/8/8/8/8/8/NN2K3 w - - 0 1").unwrap();
        assert!(!is_insufficient_material(&board));
    }

    #[test]
    fn checkmate_score_prefers_the_faster_mate() {
        // Black king on e8 is in check along the open e-file from White's rook.
        let board = Board::create_from_fen("4k3/8/8/8/8/8/4R3/4K3 b - - 0 1").unwrap();
        let mate_in_one = evaluate_without_legal_moves(&board, 1);
        let mate_in_three = evaluate_without_legal_moves(&board, 3);
        assert!(mate_in_one.abs() > mate_in_three.abs());
    }

    #[test]
    fn insufficient_material_is_a_forced_draw() {
        let board = Board::create_from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let history = History::new();
        assert!(is_forced_draw(&board, &history));
    }

    #[test]
    fn checkmate_scores_negative_checkmate_for_the_mated_side() {
        use crate::board::generate_legal_moves;

        let board = Board::create_from_fen("4k3/8/8/8/8/8/4R3/4K1R1 b - - 0 1").unwrap();
        assert!(generate_legal_moves(&board).is_empty());
        assert!(board.is_in_check(crate::board::Color::Black));
        let score = evaluate_without_legal_moves(&board, 0);
        assert_eq!(score, -CHECKMATE_SCORE);
    }

    #[test]
    fn seventy_five_move_rule_is_forced() {
        let board = Board::new_standard();
        let mut history = History::new();
        for _ in 0..150 {
            history.record(0, false);
        }
        assert!(is_forced_draw(&board, &history));
    }
}
