use super::super::attack_tables::{bishop_attacks, rook_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};
use super::super::pin::PinState;
use super::super::state::Position;
use super::super::types::{Bitboard, Color, Move, MoveList, Piece, Square};

pub(crate) fn generate(
    pos: &Position,
    color: Color,
    king_sq: Square,
    pin: &PinState,
    moves: &mut MoveList,
) {
    let own = pos.color_bb(color);
    let enemy_color = color.opponent();
    let enemy = pos.color_bb(enemy_color);
    // The king's own square must not block ray attacks through it: a king stepping
    // straight back from a checking rook is still in check on the square behind it.
    let occ_without_king = pos.all_bb().and(Bitboard::from_square(king_sq).not());

    let targets = Bitboard(KING_ATTACKS[king_sq.as_index()]).and(own.not());
    for to in targets.iter() {
        if is_attacked_with_occupancy(pos, to, enemy_color, occ_without_king) {
            continue;
        }
        if enemy.contains(to) {
            moves.push(Move::capture(king_sq, to));
        } else {
            moves.push(Move::quiet(king_sq, to));
        }
    }

    if !pin.in_check() {
        generate_castling(pos, color, king_sq, moves);
    }
}

fn is_attacked_with_occupancy(
    pos: &Position,
    square: Square,
    by_color: Color,
    occ: Bitboard,
) -> bool {
    let target = square.as_index();

    let pawn_sources = Bitboard(PAWN_ATTACKS[by_color.opponent().index()][target]);
    if pawn_sources.intersects(pos.piece_bb(by_color, Piece::Pawn)) {
        return true;
    }
    if Bitboard(KNIGHT_ATTACKS[target]).intersects(pos.piece_bb(by_color, Piece::Knight)) {
        return true;
    }
    if Bitboard(KING_ATTACKS[target]).intersects(pos.piece_bb(by_color, Piece::King)) {
        return true;
    }
    let rook_like = pos
        .piece_bb(by_color, Piece::Rook)
        .or(pos.piece_bb(by_color, Piece::Queen));
    if Bitboard(rook_attacks(target, occ.0)).intersects(rook_like) {
        return true;
    }
    let bishop_like = pos
        .piece_bb(by_color, Piece::Bishop)
        .or(pos.piece_bb(by_color, Piece::Queen));
    if Bitboard(bishop_attacks(target, occ.0)).intersects(bishop_like) {
        return true;
    }
    false
}

fn generate_castling(pos: &Position, color: Color, king_sq: Square, moves: &mut MoveList) {
    let rank = king_sq.rank();
    let rights = pos.castling_rights();
    let occ = pos.all_bb();
    let enemy = color.opponent();

    for kingside in [true, false] {
        if !rights.has(color, kingside) {
            continue;
        }
        let (end_file, empty_files, king_path): (usize, &[usize], [usize; 3]) = if kingside {
            (6, &[5, 6], [4, 5, 6])
        } else {
            (2, &[1, 2, 3], [4, 3, 2])
        };
        if empty_files.iter().any(|&f| occ.contains(Square::new(rank, f))) {
            continue;
        }
        if king_path.iter().any(|&f| pos.is_attacked(Square::new(rank, f), enemy)) {
            continue;
        }
        let to = Square::new(rank, end_file);
        if kingside {
            moves.push(Move::castle_kingside(king_sq, to));
        } else {
            moves.push(Move::castle_queenside(king_sq, to));
        }
    }
}
