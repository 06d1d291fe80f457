//! Attack queries built on top of the attack tables: "is this square attacked", the
//! full set of attackers, and "is this color in check".

use super::attack_tables::{bishop_attacks, rook_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};
use super::state::Position;
use super::types::{Bitboard, Color, Piece, Square};

impl Position {
    /// Is `square` attacked by any piece of `by_color`? Short-circuits pawn, knight,
    /// king, then sliding attacks, in that order, as the cheapest checks first.
    #[must_use]
    pub fn is_attacked(&self, square: Square, by_color: Color) -> bool {
        let target = square.as_index();

        let pawn_sources = Bitboard(PAWN_ATTACKS[by_color.opponent().index()][target]);
        if pawn_sources.and(self.piece_bb(by_color, Piece::Pawn)).0 != 0 {
            return true;
        }

        if KNIGHT_ATTACKS[target] & self.piece_bb(by_color, Piece::Knight).0 != 0 {
            return true;
        }

        if KING_ATTACKS[target] & self.piece_bb(by_color, Piece::King).0 != 0 {
            return true;
        }

        let rook_like = self
            .piece_bb(by_color, Piece::Rook)
            .or(self.piece_bb(by_color, Piece::Queen));
        if rook_attacks(target, self.all_bb().0) & rook_like.0 != 0 {
            return true;
        }

        let bishop_like = self
            .piece_bb(by_color, Piece::Bishop)
            .or(self.piece_bb(by_color, Piece::Queen));
        if bishop_attacks(target, self.all_bb().0) & bishop_like.0 != 0 {
            return true;
        }

        false
    }

    /// Every piece of `by_color` currently attacking `square`, without short-circuiting.
    #[must_use]
    pub fn attackers_to(&self, square: Square, by_color: Color) -> Bitboard {
        let target = square.as_index();
        let mut attackers = Bitboard::EMPTY;

        let pawn_sources = Bitboard(PAWN_ATTACKS[by_color.opponent().index()][target]);
        attackers = attackers.or(pawn_sources.and(self.piece_bb(by_color, Piece::Pawn)));

        attackers = attackers.or(Bitboard(KNIGHT_ATTACKS[target]).and(self.piece_bb(by_color, Piece::Knight)));
        attackers = attackers.or(Bitboard(KING_ATTACKS[target]).and(self.piece_bb(by_color, Piece::King)));

        let rook_like = self
            .piece_bb(by_color, Piece::Rook)
            .or(self.piece_bb(by_color, Piece::Queen));
        attackers = attackers.or(Bitboard(rook_attacks(target, self.all_bb().0)).and(rook_like));

        let bishop_like = self
            .piece_bb(by_color, Piece::Bishop)
            .or(self.piece_bb(by_color, Piece::Queen));
        attackers = attackers.or(Bitboard(bishop_attacks(target, self.all_bb().0)).and(bishop_like));

        attackers
    }

    /// Is `color`'s king currently attacked by the opposing side?
    #[must_use]
    pub fn in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king_sq) => self.is_attacked(king_sq, color.opponent()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_not_in_check() {
        let pos = Position::starting_position();
        assert!(!pos.in_check(Color::White));
        assert!(!pos.in_check(Color::Black));
    }

    #[test]
    fn attackers_to_matches_is_attacked() {
        let pos = Position::starting_position();
        for sq in 0..64u8 {
            let sq = Square::from_index(sq as usize);
            for color in [Color::White, Color::Black] {
                let attacked = pos.is_attacked(sq, color);
                let attackers = pos.attackers_to(sq, color);
                assert_eq!(attacked, !attackers.is_empty());
            }
        }
    }
}
