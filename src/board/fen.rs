//! FEN parsing/serialization and UCI long-algebraic move notation.
//!
//! FEN has six space-separated fields: piece placement, side to move, castling
//! availability, en-passant target, halfmove clock, fullmove number. This module is
//! the only place a `Position` is built from outside data, so it is also where the
//! legality invariants of §3 get enforced via [`Position::validate`].

use std::fmt::Write as _;

use super::error::{FenError, PositionError};
use super::state::Position;
use super::types::{CastlingRights, Color, Piece, Square};

/// Parses a FEN string into a fully validated `Position`.
///
/// # Errors
/// Returns [`FenError`] if the string is malformed, or wraps a [`PositionError`] if it
/// is syntactically valid but describes an illegal position (wrong king count, a pawn
/// on the back rank, or both sides simultaneously in check).
pub fn parse_fen(fen: &str) -> Result<Position, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(FenError::TooFewParts { found: fields.len() });
    }

    let mut pos = Position::empty();
    parse_placement(&mut pos, fields[0])?;

    pos.side_to_move = match fields[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => {
            return Err(FenError::InvalidSideToMove {
                found: other.to_string(),
            })
        }
    };

    pos.castling_rights = parse_castling(fields[2])?;
    pos.en_passant_target = parse_en_passant(fields[3])?;

    pos.halfmove_clock = if let Some(field) = fields.get(4) {
        field.parse().map_err(|_| FenError::InvalidClock {
            field: "halfmove",
            found: (*field).to_string(),
        })?
    } else {
        0
    };
    pos.fullmove_number = if let Some(field) = fields.get(5) {
        field.parse().map_err(|_| FenError::InvalidClock {
            field: "fullmove",
            found: (*field).to_string(),
        })?
    } else {
        1
    };

    if let Err(err) = pos.validate() {
        #[cfg(feature = "logging")]
        log::debug!("rejecting FEN '{fen}': {err}");
        return Err(err.into());
    }
    if let Err(err) = check_sides_in_check(&pos) {
        #[cfg(feature = "logging")]
        log::debug!("rejecting FEN '{fen}': {err}");
        return Err(err.into());
    }
    pos.zobrist_hash = pos.hash_from_scratch();
    Ok(pos)
}

fn parse_placement(pos: &mut Position, field: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidRank { rank: ranks.len() });
    }
    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_from_top;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
                if file > 8 {
                    return Err(FenError::TooManyFiles { rank, files: file });
                }
                continue;
            }
            if file >= 8 {
                return Err(FenError::TooManyFiles { rank, files: file + 1 });
            }
            let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            pos.put_piece(Square::new(rank, file), color, piece);
            file += 1;
        }
        if file != 8 {
            return Err(FenError::TooManyFiles { rank, files: file });
        }
    }
    Ok(())
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        let (color, kingside) = match c {
            'K' => (Color::White, true),
            'Q' => (Color::White, false),
            'k' => (Color::Black, true),
            'q' => (Color::Black, false),
            other => return Err(FenError::InvalidCastling { char: other }),
        };
        rights.set(color, kingside);
    }
    Ok(rights)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    field
        .parse::<Square>()
        .map(Some)
        .map_err(|_| FenError::InvalidEnPassant {
            found: field.to_string(),
        })
}

/// Per spec §7: a position where both kings are in check, or where the side not
/// currently to move is in check, cannot arise from legal play and is rejected.
fn check_sides_in_check(pos: &Position) -> Result<(), PositionError> {
    let stm = pos.side_to_move();
    if pos.in_check(stm.opponent()) {
        return Err(PositionError::OpponentInCheck);
    }
    if pos.in_check(Color::White) && pos.in_check(Color::Black) {
        return Err(PositionError::BothSidesInCheck);
    }
    Ok(())
}

/// Serializes `pos` to a FEN string.
#[must_use]
pub fn to_fen(pos: &Position) -> String {
    let mut out = String::new();
    for rank_from_top in 0..8 {
        let rank = 7 - rank_from_top;
        let mut empty_run = 0u32;
        for file in 0..8 {
            match pos.piece_at(Square::new(rank, file)) {
                Some((color, piece)) => {
                    if empty_run > 0 {
                        let _ = write!(out, "{empty_run}");
                        empty_run = 0;
                    }
                    out.push(piece.to_fen_char(color));
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            let _ = write!(out, "{empty_run}");
        }
        if rank_from_top != 7 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(if pos.side_to_move() == Color::White { 'w' } else { 'b' });

    out.push(' ');
    let rights = pos.castling_rights();
    let mut any = false;
    for (color, kingside, ch) in [
        (Color::White, true, 'K'),
        (Color::White, false, 'Q'),
        (Color::Black, true, 'k'),
        (Color::Black, false, 'q'),
    ] {
        if rights.has(color, kingside) {
            out.push(ch);
            any = true;
        }
    }
    if !any {
        out.push('-');
    }

    out.push(' ');
    match pos.en_passant_target() {
        Some(ep) => {
            let _ = write!(out, "{ep}");
        }
        None => out.push('-'),
    }

    let _ = write!(out, " {} {}", pos.halfmove_clock(), pos.fullmove_number());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn parses_starting_position() {
        let pos = parse_fen(STARTING_FEN).unwrap();
        assert_eq!(pos.zobrist_hash(), Position::starting_position().zobrist_hash());
    }

    #[test]
    fn round_trips_starting_position() {
        let pos = parse_fen(STARTING_FEN).unwrap();
        assert_eq!(to_fen(&pos), STARTING_FEN);
    }

    #[test]
    fn round_trips_kiwipete() {
        let kiwipete =
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let pos = parse_fen(kiwipete).unwrap();
        assert_eq!(to_fen(&pos), kiwipete);
    }

    #[test]
    fn rejects_missing_king() {
        let fen = "rnbq1bnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(matches!(
            parse_fen(fen),
            Err(FenError::IllegalPosition(PositionError::KingCount { .. }))
        ));
    }

    #[test]
    fn rejects_too_few_ranks() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1";
        assert!(parse_fen(fen).is_err());
    }

    #[test]
    fn rejects_invalid_piece_char() {
        let fen = "xnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(matches!(parse_fen(fen), Err(FenError::InvalidPiece { .. })));
    }
}
