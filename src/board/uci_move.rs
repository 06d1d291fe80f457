//! UCI long-algebraic move notation: `<from><to>[promotion]`, e.g. `e2e4`, `e7e8q`.
//!
//! Formatting is just `Move`'s own `Display` impl. Parsing needs a legal-move list to
//! resolve against, since the wire notation alone doesn't distinguish a quiet move from
//! a capture, castle, or en-passant - those flags live in the `Move` encoding, not the
//! move text.

use super::error::MoveParseError;
use super::types::{Move, MoveList, Piece, Square};

/// Parses `text` as `<from><to>[promo]` and finds the matching move in `legal_moves`.
///
/// # Errors
/// `InvalidLength`/`InvalidSquare`/`InvalidPromotion` for malformed notation;
/// `IllegalMove` if the squares parse but no move in `legal_moves` matches.
pub fn parse_uci_move(legal_moves: &MoveList, text: &str) -> Result<Move, MoveParseError> {
    if text.len() != 4 && text.len() != 5 {
        return Err(MoveParseError::InvalidLength { len: text.len() });
    }

    let from: Square = text[0..2]
        .parse()
        .map_err(|_| MoveParseError::InvalidSquare {
            notation: text.to_string(),
        })?;
    let to: Square = text[2..4]
        .parse()
        .map_err(|_| MoveParseError::InvalidSquare {
            notation: text.to_string(),
        })?;

    let promotion = if text.len() == 5 {
        let c = text.as_bytes()[4] as char;
        Some(Piece::from_char(c).filter(|p| !matches!(p, Piece::Pawn | Piece::King)).ok_or(
            MoveParseError::InvalidPromotion { char: c },
        )?)
    } else {
        None
    };

    legal_moves
        .iter()
        .copied()
        .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
        .ok_or(MoveParseError::IllegalMove {
            notation: text.to_string(),
        })
}

/// Formats `mv` as UCI long-algebraic notation.
#[must_use]
pub fn format_uci_move(mv: Move) -> String {
    mv.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    #[test]
    fn parses_e2e4_against_starting_moves() {
        let pos = Position::starting_position();
        let moves = pos.generate_legal_moves();
        let mv = parse_uci_move(&moves, "e2e4").unwrap();
        assert_eq!(mv.from(), Square::new(1, 4));
        assert_eq!(mv.to(), Square::new(3, 4));
        assert!(mv.is_double_pawn_push());
    }

    #[test]
    fn rejects_move_not_in_list() {
        let pos = Position::starting_position();
        let moves = pos.generate_legal_moves();
        assert!(parse_uci_move(&moves, "e2e5").is_err());
    }

    #[test]
    fn rejects_malformed_text() {
        let pos = Position::starting_position();
        let moves = pos.generate_legal_moves();
        assert!(matches!(
            parse_uci_move(&moves, "e2"),
            Err(MoveParseError::InvalidLength { .. })
        ));
    }

    #[test]
    fn format_round_trips_with_promotion() {
        let mv = Move::new_promotion(Square::new(6, 4), Square::new(7, 4), Piece::Queen);
        assert_eq!(format_uci_move(mv), "e7e8q");
    }
}
