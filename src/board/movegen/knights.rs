use super::super::attack_tables::KNIGHT_ATTACKS;
use super::super::pin::PinState;
use super::super::state::Position;
use super::super::types::{Bitboard, Color, Move, MoveList, Piece};

pub(crate) fn generate(pos: &Position, color: Color, pin: &PinState, moves: &mut MoveList) {
    let own = pos.color_bb(color);
    let enemy = pos.color_bb(color.opponent());

    for from in pos.piece_bb(color, Piece::Knight).iter() {
        // An absolutely pinned knight has no move that stays on the pin line.
        if pin.pinned.contains(from) {
            continue;
        }
        let targets = Bitboard(KNIGHT_ATTACKS[from.as_index()])
            .and(own.not())
            .and(pin.check_mask);
        for to in targets.iter() {
            if enemy.contains(to) {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::quiet(from, to));
            }
        }
    }
}
