//! Square-attacked queries (spec §4.6), shared by legality filtering and check
//! detection. Ray-walks for sliders, jump tables for knights/kings, and the pawn
//! attack pattern mirrored per color — grounded on the teacher's
//! `board/board.rs::is_square_attacked`, generalized off the old "regenerate every
//! piece's pseudo-legal moves and see if any lands on the square" approach (expensive
//! and circular once castling needs to probe through it) to direct geometric checks.

use super::{Board, Color, Coord, Piece};

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

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// True if any `attacker` piece could move to `square` on the next ply, ignoring whose
/// turn it actually is. Used both for check detection and for filtering castling
/// through an attacked square.
pub fn is_square_attacked(board: &Board, square: Coord, attacker: Color) -> bool {
    if pawn_attacks_square(board, square, attacker) {
        return true;
    }
    for (dr, dc) in KNIGHT_DELTAS {
        if let Some(from) = square.offset(dr, dc) {
            let occupant = board.piece_at(from);
            if occupant.color == attacker && occupant.piece == Piece::Knight {
                return true;
            }
        }
    }
    for (dr, dc) in KING_DELTAS {
        if let Some(from) = square.offset(dr, dc) {
            let occupant = board.piece_at(from);
            if occupant.color == attacker && occupant.piece == Piece::King {
                return true;
            }
        }
    }
    if ray_attacks_square(board, square, attacker, &ROOK_DIRECTIONS, Piece::Rook) {
        return true;
    }
    if ray_attacks_square(board, square, attacker, &BISHOP_DIRECTIONS, Piece::Bishop) {
        return true;
    }
    false
}

fn pawn_attacks_square(board: &Board, square: Coord, attacker: Color) -> bool {
    // A pawn attacks diagonally forward; to ask "is this square attacked" we look
    // backward from the pawn's point of view. Row 0 is rank 8 (`Coord`'s convention),
    // so White's forward direction decreases the row index and Black's increases it.
    let back = match attacker {
        Color::White => 1,
        _ => -1,
    };
    for dc in [-1, 1] {
        if let Some(from) = square.offset(back, dc) {
            let occupant = board.piece_at(from);
            if occupant.color == attacker && occupant.piece == Piece::Pawn {
                return true;
            }
        }
    }
    false
}

fn ray_attacks_square(
    board: &Board,
    square: Coord,
    attacker: Color,
    directions: &[(i32, i32)],
    slider: Piece,
) -> bool {
    for &(dr, dc) in directions {
        let mut current = square;
        while let Some(next) = current.offset(dr, dc) {
            let occupant = board.piece_at(next);
            if occupant.is_empty() {
                current = next;
                continue;
            }
            if occupant.color == attacker
                && (occupant.piece == slider || occupant.piece == Piece::Queen)
            {
                return true;
            }
            break;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ColoredPiece;

    #[test]
    fn rook_on_open_file_attacks_along_it() {
        let mut board = Board::empty();
        board.place(Coord::new(0), ColoredPiece::new(Piece::Rook, Color::Black));
        assert!(is_square_attacked(&board, Coord::new(56), Color::Black));
    }

    #[test]
    fn blocked_rook_does_not_attack_through_a_piece() {
        let mut board = Board::empty();
        board.place(Coord::new(0), ColoredPiece::new(Piece::Rook, Color::Black));
        board.place(Coord::new(24), ColoredPiece::new(Piece::Pawn, Color::White));
        assert!(!is_square_attacked(&board, Coord::new(56), Color::Black));
    }

    #[test]
    fn white_pawn_attacks_diagonally_forward_only() {
        let mut board = Board::empty();
        board.place(Coord::new(52), ColoredPiece::new(Piece::Pawn, Color::White)); // e2
        assert!(is_square_attacked(&board, Coord::new(43), Color::White)); // d3
        assert!(is_square_attacked(&board, Coord::new(45), Color::White)); // f3
        assert!(!is_square_attacked(&board, Coord::new(60), Color::White)); // e1, behind it
    }
}
