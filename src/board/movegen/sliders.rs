use super::super::attack_tables::{bishop_attacks, queen_attacks, rook_attacks};
use super::super::pin::PinState;
use super::super::state::Position;
use super::super::types::{Bitboard, Color, Move, MoveList, Piece};

pub(crate) fn generate(pos: &Position, color: Color, piece: Piece, pin: &PinState, moves: &mut MoveList) {
    let own = pos.color_bb(color);
    let enemy = pos.color_bb(color.opponent());
    let occ = pos.all_bb().0;

    for from in pos.piece_bb(color, piece).iter() {
        let raw = match piece {
            Piece::Bishop => bishop_attacks(from.as_index(), occ),
            Piece::Rook => rook_attacks(from.as_index(), occ),
            Piece::Queen => queen_attacks(from.as_index(), occ),
            _ => unreachable!("sliders::generate only handles bishop/rook/queen"),
        };
        let pin_mask = if pin.pinned.contains(from) {
            pin.pin_ray[from.as_index()]
        } else {
            Bitboard::ALL
        };
        let targets = Bitboard(raw).and(own.not()).and(pin_mask).and(pin.check_mask);
        for to in targets.iter() {
            if enemy.contains(to) {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::quiet(from, to));
            }
        }
    }
}
