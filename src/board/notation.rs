//! Coordinate-notation move parsing and formatting (spec §6): `e2e4`, `e4xd5`,
//! promotion suffix `(Q)`/`(R)`/`(B)`/`(N)`, en-passant suffix `ep`, castling
//! `O-O`/`O-O-O` (color supplied separately, since the string alone can't disambiguate
//! which king castles).

use super::chess_move::MoveCategory;
use super::{Color, Coord, Move, Piece};
use crate::error::ParseMoveError;

/// Parses a non-castling move such as `e2e4`, `e4xd5`, or `b7a8(Q)`. The `x` and
/// promotion suffix are accepted but not required to disambiguate the move itself —
/// `category`/`promoted_piece` are derived from the board by the caller if omitted
/// here would be ambiguous; this parser trusts the string's own markers.
pub fn parse_coordinate_move(s: &str) -> Result<Move, ParseMoveError> {
    if s.len() < 4 {
        return Err(ParseMoveError::TooShort(s.to_string()));
    }

    let bytes = s.as_bytes();
    let capturing = bytes[2] == b'x';
    let dst_start = if capturing { 3 } else { 2 };

    let src = Coord::parse(&s[0..2])?;
    let rest = &s[dst_start..];
    if rest.len() < 2 {
        return Err(ParseMoveError::UnrecognizedFormat(s.to_string()));
    }

    let en_passant = rest.ends_with("ep");
    let promotion_piece = parse_promotion_suffix(rest)?;
    let dst = Coord::parse(&rest[0..2])?;

    let category = match (capturing, en_passant) {
        (_, true) => MoveCategory::EnPassant,
        (true, false) => MoveCategory::NormalCapturing,
        (false, false) => MoveCategory::Default,
    };

    Ok(match promotion_piece {
        Some(piece) => Move::promoting(src, dst, category, piece),
        None => Move::new(src, dst, category),
    })
}

fn parse_promotion_suffix(rest: &str) -> Result<Option<Piece>, ParseMoveError> {
    let body = match rest.strip_suffix("ep") {
        Some(stripped) => stripped,
        None => rest,
    };
    if body.len() < 5 || !body.ends_with(')') {
        return Ok(None);
    }
    let tail = &body[body.len() - 3..];
    let mut chars = tail.chars();
    if chars.next() != Some('(') {
        return Ok(None);
    }
    let letter = chars.next().expect("checked length");
    let piece = match letter {
        'Q' => Piece::Queen,
        'R' => Piece::Rook,
        'B' => Piece::Bishop,
        'N' => Piece::Knight,
        other => return Err(ParseMoveError::UnknownPromotionPiece(other)),
    };
    Ok(Some(piece))
}

/// Parses castling notation; the mover's color must be supplied since `O-O` alone
/// doesn't say which side's king moves.
pub fn parse_castling_move(s: &str, mover: Color, king_square: Coord) -> Result<Move, ParseMoveError> {
    if mover == Color::None {
        return Err(ParseMoveError::MissingCastlingColor);
    }
    let row = king_square.row();
    match s {
        "O-O" => {
            let dst = Coord::from_row_col(row, 6).expect("row in range");
            Ok(Move::new(king_square, dst, MoveCategory::Castling))
        }
        "O-O-O" => {
            let dst = Coord::from_row_col(row, 2).expect("row in range");
            Ok(Move::new(king_square, dst, MoveCategory::Castling))
        }
        _ => Err(ParseMoveError::UnrecognizedFormat(s.to_string())),
    }
}

/// Renders a move back to coordinate notation, matching whatever `parse_coordinate_move`
/// and `parse_castling_move` together accept.
pub fn format_move(mv: Move) -> String {
    if mv.is_castling() {
        return match mv.is_kingside_castle() {
            true => "O-O".to_string(),
            false => "O-O-O".to_string(),
        };
    }

    let mut out = mv.src.to_string();
    if mv.is_en_passant() {
        out.push_str(&mv.dst.to_string());
        if let Some(suffix) = promotion_suffix(mv.promoted_piece) {
            out.push_str(&suffix);
        }
        out.push_str("ep");
        return out;
    }
    if mv.is_any_capturing() {
        out.push('x');
    }
    out.push_str(&mv.dst.to_string());
    if let Some(suffix) = promotion_suffix(mv.promoted_piece) {
        out.push_str(&suffix);
    }
    out
}

fn promotion_suffix(piece: Piece) -> Option<String> {
    let letter = match piece {
        Piece::Queen => 'Q',
        Piece::Rook => 'R',
        Piece::Bishop => 'B',
        Piece::Knight => 'N',
        _ => return None,
    };
    Some(format!("({letter})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_quiet_move() {
        let mv = parse_coordinate_move("e2e4").unwrap();
        assert_eq!(mv.src, Coord::parse("e2").unwrap());
        assert_eq!(mv.dst, Coord::parse("e4").unwrap());
        assert_eq!(mv.category, MoveCategory::Default);
    }

    #[test]
    fn parses_capture_with_x_marker() {
        let mv = parse_coordinate_move("e4xd5").unwrap();
        assert_eq!(mv.category, MoveCategory::NormalCapturing);
        assert_eq!(mv.dst, Coord::parse("d5").unwrap());
    }

    #[test]
    fn parses_promotion_suffix() {
        let mv = parse_coordinate_move("b7xa8(Q)").unwrap();
        assert_eq!(mv.promoted_piece, Piece::Queen);
        assert_eq!(mv.category, MoveCategory::NormalCapturing);
    }

    #[test]
    fn parses_en_passant_suffix() {
        let mv = parse_coordinate_move("e5d6ep").unwrap();
        assert_eq!(mv.category, MoveCategory::EnPassant);
        assert_eq!(mv.dst, Coord::parse("d6").unwrap());
    }

    #[test]
    fn format_round_trips_quiet_and_capture() {
        let quiet = Move::new(
            Coord::parse("e2").unwrap(),
            Coord::parse("e4").unwrap(),
            MoveCategory::Default,
        );
        assert_eq!(format_move(quiet), "e2e4");

        let capture = Move::new(
            Coord::parse("e4").unwrap(),
            Coord::parse("d5").unwrap(),
            MoveCategory::NormalCapturing,
        );
        assert_eq!(format_move(capture), "e4xd5");
    }

    #[test]
    fn castling_requires_a_color() {
        let err = parse_castling_move("O-O", Color::None, Coord::parse("e1").unwrap()).unwrap_err();
        assert!(matches!(err, ParseMoveError::MissingCastlingColor));
    }
}
