//! `MoveExecutor`: apply/revert a move against a `Position`, keeping every bitboard,
//! right, clock, and the Zobrist hash in lockstep. This is the one place outside
//! `put_piece`/`remove_piece` that mutates a `Position`.

use super::state::{Position, UndoRecord};
use super::types::{CastlingRights, Color, Move, Piece, Square};
use super::zobrist;

fn rook_home(color: Color, kingside: bool) -> Square {
    match (color, kingside) {
        (Color::White, true) => Square::new(0, 7),
        (Color::White, false) => Square::new(0, 0),
        (Color::Black, true) => Square::new(7, 7),
        (Color::Black, false) => Square::new(7, 0),
    }
}

impl Position {
    /// Applies `mv` to the position and returns the record needed to undo it. Also
    /// pushes that record onto the position's own history stack.
    pub fn apply_move(&mut self, mv: Move) -> UndoRecord {
        let mover = self.side_to_move;
        let from = mv.from();
        let to = mv.to();

        let (_, moving_piece) = self
            .piece_at(from)
            .expect("apply_move: origin square is empty");

        let prior_castling_rights = self.castling_rights;
        let prior_en_passant_target = self.en_passant_target;
        let prior_halfmove_clock = self.halfmove_clock;
        let prior_fullmove_number = self.fullmove_number;
        let prior_side_to_move = self.side_to_move;
        let prior_hash = self.zobrist_hash;

        // Un-hash the stale ep key before it changes; the new one (if any) is re-hashed below.
        if let Some(ep) = prior_en_passant_target {
            if self.ep_actually_capturable(ep) {
                self.zobrist_hash ^= zobrist::en_passant_key(ep.file());
            }
        }

        let captured = self.resolve_capture(mv, mover, from);
        if let Some((cap_color, cap_piece)) = captured {
            let cap_sq = self.captured_square(mv, from, to);
            self.remove_piece(cap_sq, cap_color, cap_piece);
        }

        self.remove_piece(from, mover, moving_piece);
        let placed_piece = mv.promotion().unwrap_or(moving_piece);
        self.put_piece(to, mover, placed_piece);

        if mv.is_castling() {
            let kingside = mv.is_castle_kingside();
            let rook_from = rook_home(mover, kingside);
            let rook_to = Square::new(rook_from.rank(), if kingside { 5 } else { 3 });
            self.remove_piece(rook_from, mover, Piece::Rook);
            self.put_piece(rook_to, mover, Piece::Rook);
        }

        self.update_castling_rights(mover, from, to, moving_piece, captured);

        let new_ep = if mv.is_double_pawn_push() {
            Some(Square::new((from.rank() + to.rank()) / 2, from.file()))
        } else {
            None
        };
        self.en_passant_target = new_ep;
        if let Some(ep) = new_ep {
            if self.ep_actually_capturable(ep) {
                self.zobrist_hash ^= zobrist::en_passant_key(ep.file());
            }
        }

        if moving_piece == Piece::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if mover == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = mover.opponent();
        self.zobrist_hash ^= zobrist::side_to_move_key();

        let undo = UndoRecord {
            mv,
            captured,
            prior_castling_rights,
            prior_en_passant_target,
            prior_halfmove_clock,
            prior_fullmove_number,
            prior_side_to_move,
            prior_hash,
            is_null: false,
        };
        self.history.push(undo);
        undo
    }

    /// Reverts the effect of `undo`, which must be the record most recently produced by
    /// `apply_move`. Restores bitboards, rights, clocks, side, and hash exactly.
    pub fn revert_move(&mut self, undo: &UndoRecord) {
        debug_assert_eq!(
            self.history.last().copied(),
            Some(*undo),
            "revert_move called out of order"
        );
        self.history.pop();

        let mover = undo.prior_side_to_move;
        let from = undo.mv.from();
        let to = undo.mv.to();
        let (_, placed_piece) = self
            .piece_at(to)
            .expect("revert_move: destination square should hold the moved piece");
        let moving_piece = if undo.mv.promotion().is_some() {
            Piece::Pawn
        } else {
            placed_piece
        };

        self.remove_piece(to, mover, placed_piece);
        self.put_piece(from, mover, moving_piece);

        if undo.mv.is_castling() {
            let kingside = undo.mv.is_castle_kingside();
            let rook_from = rook_home(mover, kingside);
            let rook_to = Square::new(rook_from.rank(), if kingside { 5 } else { 3 });
            self.remove_piece(rook_to, mover, Piece::Rook);
            self.put_piece(rook_from, mover, Piece::Rook);
        }

        if let Some((cap_color, cap_piece)) = undo.captured {
            let cap_sq = self.captured_square(undo.mv, from, to);
            self.put_piece(cap_sq, cap_color, cap_piece);
        }

        self.castling_rights = undo.prior_castling_rights;
        self.en_passant_target = undo.prior_en_passant_target;
        self.halfmove_clock = undo.prior_halfmove_clock;
        self.fullmove_number = undo.prior_fullmove_number;
        self.side_to_move = undo.prior_side_to_move;
        self.zobrist_hash = undo.prior_hash;
    }

    /// Toggles side to move and clears en passant without touching the board. Used by
    /// the search for null-move pruning.
    pub fn apply_null_move(&mut self) -> UndoRecord {
        let prior_castling_rights = self.castling_rights;
        let prior_en_passant_target = self.en_passant_target;
        let prior_halfmove_clock = self.halfmove_clock;
        let prior_fullmove_number = self.fullmove_number;
        let prior_side_to_move = self.side_to_move;
        let prior_hash = self.zobrist_hash;

        if let Some(ep) = prior_en_passant_target {
            if self.ep_actually_capturable(ep) {
                self.zobrist_hash ^= zobrist::en_passant_key(ep.file());
            }
        }
        self.en_passant_target = None;
        self.halfmove_clock += 1;
        self.side_to_move = prior_side_to_move.opponent();
        self.zobrist_hash ^= zobrist::side_to_move_key();

        let undo = UndoRecord {
            mv: Move::null(),
            captured: None,
            prior_castling_rights,
            prior_en_passant_target,
            prior_halfmove_clock,
            prior_fullmove_number,
            prior_side_to_move,
            prior_hash,
            is_null: true,
        };
        self.history.push(undo);
        undo
    }

    pub fn revert_null_move(&mut self, undo: &UndoRecord) {
        debug_assert!(undo.is_null);
        debug_assert_eq!(self.history.last().copied(), Some(*undo));
        self.history.pop();
        self.castling_rights = undo.prior_castling_rights;
        self.en_passant_target = undo.prior_en_passant_target;
        self.halfmove_clock = undo.prior_halfmove_clock;
        self.fullmove_number = undo.prior_fullmove_number;
        self.side_to_move = undo.prior_side_to_move;
        self.zobrist_hash = undo.prior_hash;
    }

    /// The piece captured by `mv`, if any, resolved by looking at the board before any
    /// mutation this move has made. En passant is the one case where the destination
    /// square itself is empty and the captured pawn sits elsewhere.
    fn resolve_capture(&self, mv: Move, mover: Color, from: Square) -> Option<(Color, Piece)> {
        if mv.is_en_passant() {
            let cap_sq = Square::new(from.rank(), mv.to().file());
            self.piece_at(cap_sq)
        } else if mv.is_capture() {
            self.piece_at(mv.to())
        } else {
            None
        }
        .filter(|(c, _)| *c != mover)
    }

    /// Where the captured piece actually sits: the destination square for ordinary
    /// captures, or the origin's rank / destination's file for en passant.
    fn captured_square(&self, mv: Move, from: Square, to: Square) -> Square {
        if mv.is_en_passant() {
            Square::new(from.rank(), to.file())
        } else {
            to
        }
    }

    /// Drops any castling right whose king or rook square is the source or destination
    /// of this move - including a rook captured on its home square.
    fn update_castling_rights(
        &mut self,
        mover: Color,
        from: Square,
        to: Square,
        moving_piece: Piece,
        captured: Option<(Color, Piece)>,
    ) {
        let mut rights = self.castling_rights;
        let prior_key = zobrist::castling_rights_key(rights);

        if moving_piece == Piece::King {
            for kingside in [true, false] {
                rights.remove(mover, kingside);
            }
        }
        if moving_piece == Piece::Rook {
            if from == rook_home(mover, true) {
                rights.remove(mover, true);
            } else if from == rook_home(mover, false) {
                rights.remove(mover, false);
            }
        }
        if let Some((cap_color, Piece::Rook)) = captured {
            if to == rook_home(cap_color, true) {
                rights.remove(cap_color, true);
            } else if to == rook_home(cap_color, false) {
                rights.remove(cap_color, false);
            }
        }

        self.castling_rights = rights;
        self.zobrist_hash ^= prior_key ^ zobrist::castling_rights_key(rights);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_then_revert_restores_starting_position() {
        let mut pos = Position::starting_position();
        let before = pos.clone();
        let mv = Move::double_pawn_push(Square::new(1, 4), Square::new(3, 4)); // e2e4
        let undo = pos.apply_move(mv);
        assert_ne!(pos.zobrist_hash(), before.zobrist_hash());
        pos.revert_move(&undo);
        assert_eq!(pos.zobrist_hash(), before.zobrist_hash());
        assert_eq!(pos.side_to_move(), before.side_to_move());
        assert_eq!(pos.all_bb(), before.all_bb());
    }

    #[test]
    fn e2e4_sets_en_passant_target_and_keeps_rights() {
        let mut pos = Position::starting_position();
        let mv = Move::double_pawn_push(Square::new(1, 4), Square::new(3, 4));
        pos.apply_move(mv);
        assert_eq!(pos.en_passant_target(), Some(Square::new(2, 4)));
        assert_eq!(pos.castling_rights(), CastlingRights::all());
    }

    #[test]
    fn null_move_round_trips() {
        let mut pos = Position::starting_position();
        let before = pos.clone();
        let undo = pos.apply_null_move();
        assert_eq!(pos.side_to_move(), Color::Black);
        pos.revert_null_move(&undo);
        assert_eq!(pos.zobrist_hash(), before.zobrist_hash());
    }

    #[test]
    fn null_move_bracketing_a_real_move_is_invisible() {
        let mut pos = Position::starting_position();
        let before = pos.clone();

        let null_undo = pos.apply_null_move();
        let mv = pos
            .generate_legal_moves()
            .into_iter()
            .next()
            .expect("black has legal replies from the starting position");
        let move_undo = pos.apply_move(mv);
        pos.revert_move(&move_undo);
        pos.revert_null_move(&null_undo);

        assert_eq!(pos, before);
        assert_eq!(pos.zobrist_hash(), before.zobrist_hash());
    }
}
