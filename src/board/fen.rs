//! FEN parsing and serialization (spec §4.2/§4.11), grounded on the teacher's
//! `fen/parser.rs::FENParser` field-by-field split, reworked to build directly into a
//! `Board` via its `pub(crate)` setters instead of an intermediate `ParsedFEN` struct.

use super::{Board, CastlingRights, Color, ColoredPiece, Coord, EnPassantTarget, Piece, Side};
use crate::error::FenParseError;

impl Board {
    /// Parses a standard 6-field FEN string into a fully-initialized board, including
    /// the incrementally-maintained hash/material/position-score fields.
    pub fn create_from_fen(fen: &str) -> Result<Board, FenParseError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(FenParseError::InsufficientParts { found: parts.len() });
        }

        let mut board = Board::empty();
        parse_piece_placement(&mut board, parts[0])?;
        board.set_side_to_move(parse_active_color(parts[1])?);
        board.set_castling_rights(parse_castling(parts[2])?);
        board.set_en_passant_target(parse_en_passant(parts[3], board.side_to_move())?);
        board.set_half_moves_since_progress(
            parts[4]
                .parse()
                .map_err(|_| FenParseError::InvalidHalfmoveClock(parts[4].to_string()))?,
        );
        board.set_full_move_number(
            parts[5]
                .parse()
                .map_err(|_| FenParseError::InvalidFullmoveNumber(parts[5].to_string()))?,
        );
        board.recompute_hash();
        Ok(board)
    }

    /// Serializes the position back to a FEN string. Round-trips `create_from_fen`
    /// exactly for any position that string produced.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for row in 0..8 {
            let mut empty_run = 0;
            for col in 0..8 {
                let square = Coord::from_row_col(row, col).expect("row/col in range");
                let occupant = self.piece_at(square);
                if occupant.is_empty() {
                    empty_run += 1;
                    continue;
                }
                if empty_run > 0 {
                    fen.push_str(&empty_run.to_string());
                    empty_run = 0;
                }
                fen.push(piece_to_char(occupant));
            }
            if empty_run > 0 {
                fen.push_str(&empty_run.to_string());
            }
            if row != 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move() {
            Color::Black => 'b',
            _ => 'w',
        });

        fen.push(' ');
        let rights = self.castling_rights();
        let mut any = false;
        for (color, side, ch) in [
            (Color::White, Side::KingSide, 'K'),
            (Color::White, Side::QueenSide, 'Q'),
            (Color::Black, Side::KingSide, 'k'),
            (Color::Black, Side::QueenSide, 'q'),
        ] {
            if rights.has(color, side) {
                fen.push(ch);
                any = true;
            }
        }
        if !any {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant_target() {
            Some(target) => fen.push_str(&target.square.to_string()),
            None => fen.push('-'),
        }

        fen.push(' ');
        fen.push_str(&self.half_moves_since_progress().to_string());
        fen.push(' ');
        fen.push_str(&self.full_move_number().to_string());

        fen
    }
}

fn parse_piece_placement(board: &mut Board, placement: &str) -> Result<(), FenParseError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenParseError::InvalidRankCount(ranks.len()));
    }

    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0i32;
        for ch in rank_str.chars() {
            if let Some(skip) = ch.to_digit(10) {
                col += skip as i32;
                continue;
            }
            if col >= 8 {
                return Err(FenParseError::InvalidRankLength {
                    rank: row,
                    squares: (col + 1) as usize,
                });
            }
            let colored = char_to_piece(ch).ok_or(FenParseError::InvalidPieceChar(ch))?;
            let square = Coord::from_row_col(row as i32, col).expect("row/col in range");
            board.place(square, colored);
            col += 1;
        }
        if col != 8 {
            return Err(FenParseError::InvalidRankLength {
                rank: row,
                squares: col as usize,
            });
        }
    }
    Ok(())
}

fn parse_active_color(s: &str) -> Result<Color, FenParseError> {
    match s {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenParseError::InvalidActiveColor(s.to_string())),
    }
}

fn parse_castling(s: &str) -> Result<CastlingRights, FenParseError> {
    let mut rights = CastlingRights::empty();
    if s == "-" {
        return Ok(rights);
    }
    for ch in s.chars() {
        match ch {
            'K' => rights.add(Color::White, Side::KingSide),
            'Q' => rights.add(Color::White, Side::QueenSide),
            'k' => rights.add(Color::Black, Side::KingSide),
            'q' => rights.add(Color::Black, Side::QueenSide),
            _ => return Err(FenParseError::InvalidCastlingChar(ch)),
        }
    }
    Ok(rights)
}

fn parse_en_passant(
    s: &str,
    side_to_move: Color,
) -> Result<Option<EnPassantTarget>, FenParseError> {
    if s == "-" {
        return Ok(None);
    }
    let square = Coord::parse(s).map_err(|_| FenParseError::InvalidEnPassantSquare(s.to_string()))?;
    Ok(Some(EnPassantTarget {
        square,
        vulnerable_color: side_to_move,
    }))
}

fn char_to_piece(ch: char) -> Option<ColoredPiece> {
    let color = match ch.is_ascii_uppercase() {
        true => Color::White,
        false => Color::Black,
    };
    let piece = match ch.to_ascii_lowercase() {
        'p' => Piece::Pawn,
        'n' => Piece::Knight,
        'b' => Piece::Bishop,
        'r' => Piece::Rook,
        'q' => Piece::Queen,
        'k' => Piece::King,
        _ => return None,
    };
    Some(ColoredPiece::new(piece, color))
}

fn piece_to_char(colored: ColoredPiece) -> char {
    let ch = match colored.piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
        Piece::None => ' ',
    };
    match colored.color {
        Color::White => ch.to_ascii_uppercase(),
        _ => ch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_round_trips() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let board = Board::create_from_fen(fen).unwrap();
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn en_passant_square_parses_and_reflects_vulnerable_color() {
        let fen = "rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 3";
        let board = Board::create_from_fen(fen).unwrap();
        let target = board.en_passant_target().unwrap();
        assert_eq!(target.square, Coord::parse("e6").unwrap());
        assert_eq!(target.vulnerable_color, Color::White);

        let moves = crate::board::generate_legal_moves(&board);
        assert!(
            moves.iter().any(|m| m.is_en_passant() && m.src == Coord::parse("f5").unwrap() && m.dst == Coord::parse("e6").unwrap()),
            "f5xe6 en passant should be among the legal moves"
        );
    }

    #[test]
    fn missing_fields_are_rejected() {
        let err = Board::create_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w").unwrap_err();
        assert!(matches!(err, FenParseError::InsufficientParts { found: 2 }));
    }

    #[test]
    fn invalid_piece_char_is_rejected() {
        let err = Board::create_from_fen(
            "rnbqkbxr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        )
        .unwrap_err();
        assert!(matches!(err, FenParseError::InvalidPieceChar('x')));
    }

    #[test]
    fn partial_castling_rights_round_trip() {
        let fen = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b Kq - 5 10";
        let board = Board::create_from_fen(fen).unwrap();
        assert_eq!(board.to_fen(), fen);
    }
}
