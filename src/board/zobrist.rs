//! Zobrist hashing in Polyglot key order.
//!
//! Key layout matches the Polyglot opening-book convention so that, given a published
//! `Random64` table, hashes would be interoperable with that ecosystem:
//! - 768 piece-square keys, indexed `piece_index * 64 + square`, piece order
//!   BP, WP, BN, WN, BB, WB, BR, WR, BQ, WQ, BK, WK.
//! - 4 castling keys, one per right.
//! - 8 en-passant keys, one per file.
//! - 1 side-to-move key, XORed when white is to move.
//!
//! The actual 64-bit key *values* are generated with a fixed-seed PRNG rather than the
//! published Polyglot `Random64` constants (not available in this environment); see
//! DESIGN.md for the rationale. Internal consistency (from-scratch recomputation,
//! incremental updates, apply/revert invariance) is what this module guarantees, not
//! bit-for-bit compatibility with an external book file.

use std::sync::LazyLock;

use rand::{RngCore, SeedableRng};
use rand::rngs::StdRng;

use super::types::{CastlingRights, Color, Piece, Square};

const ZOBRIST_SEED: u64 = 0x506f_6c79_676c_6f74; // "Polyglot" in hex-ish, fixed so keys are stable across runs

pub(crate) struct ZobristKeys {
    /// Indexed by Polyglot piece index (0..12) then square (0..64).
    piece_square: [[u64; 64]; 12],
    /// Indexed White-K, White-Q, Black-K, Black-Q to match `CastlingRights` bit order.
    castling: [u64; 4],
    /// Indexed by file (0..8).
    en_passant: [u64; 8],
    side_to_move: u64,
}

pub(crate) static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(|| {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
    let mut piece_square = [[0u64; 64]; 12];
    for piece_slot in &mut piece_square {
        for key in piece_slot.iter_mut() {
            *key = rng.next_u64();
        }
    }
    let mut castling = [0u64; 4];
    for key in &mut castling {
        *key = rng.next_u64();
    }
    let mut en_passant = [0u64; 8];
    for key in &mut en_passant {
        *key = rng.next_u64();
    }
    ZobristKeys {
        piece_square,
        castling,
        en_passant,
        side_to_move: rng.next_u64(),
    }
});

/// Polyglot piece ordering: BP, WP, BN, WN, BB, WB, BR, WR, BQ, WQ, BK, WK.
#[inline]
pub(crate) fn polyglot_piece_index(color: Color, piece: Piece) -> usize {
    let kind = match piece {
        Piece::Pawn => 0,
        Piece::Knight => 1,
        Piece::Bishop => 2,
        Piece::Rook => 3,
        Piece::Queen => 4,
        Piece::King => 5,
    };
    kind * 2 + if color == Color::White { 1 } else { 0 }
}

#[inline]
pub(crate) fn piece_square_key(color: Color, piece: Piece, square: Square) -> u64 {
    ZOBRIST.piece_square[polyglot_piece_index(color, piece)][square.as_index()]
}

#[inline]
pub(crate) fn castling_key(color: Color, kingside: bool) -> u64 {
    let idx = match (color, kingside) {
        (Color::White, true) => 0,
        (Color::White, false) => 1,
        (Color::Black, true) => 2,
        (Color::Black, false) => 3,
    };
    ZOBRIST.castling[idx]
}

/// XOR of every set right in `rights`.
pub(crate) fn castling_rights_key(rights: CastlingRights) -> u64 {
    let mut key = 0u64;
    for &color in &[Color::White, Color::Black] {
        for &kingside in &[true, false] {
            if rights.has(color, kingside) {
                key ^= castling_key(color, kingside);
            }
        }
    }
    key
}

#[inline]
pub(crate) fn en_passant_key(file: usize) -> u64 {
    ZOBRIST.en_passant[file]
}

#[inline]
pub(crate) fn side_to_move_key() -> u64 {
    ZOBRIST.side_to_move
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_square_keys_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for color in [Color::White, Color::Black] {
            for piece in [
                Piece::Pawn,
                Piece::Knight,
                Piece::Bishop,
                Piece::Rook,
                Piece::Queen,
                Piece::King,
            ] {
                for sq in 0..64 {
                    let key = piece_square_key(color, piece, Square::from_index(sq));
                    assert!(seen.insert(key), "duplicate zobrist key");
                }
            }
        }
    }

    #[test]
    fn polyglot_ordering_matches_spec() {
        // BP, WP, BN, WN, BB, WB, BR, WR, BQ, WQ, BK, WK
        assert_eq!(polyglot_piece_index(Color::Black, Piece::Pawn), 0);
        assert_eq!(polyglot_piece_index(Color::White, Piece::Pawn), 1);
        assert_eq!(polyglot_piece_index(Color::Black, Piece::Knight), 2);
        assert_eq!(polyglot_piece_index(Color::White, Piece::King), 11);
    }

    #[test]
    fn deterministic_across_instantiations() {
        let a = piece_square_key(Color::White, Piece::Queen, Square::from_index(35));
        let b = piece_square_key(Color::White, Piece::Queen, Square::from_index(35));
        assert_eq!(a, b);
    }
}
