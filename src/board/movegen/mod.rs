//! Legal move generation.
//!
//! Pseudo-legal generation per piece type, filtered geometrically against the pin/check
//! state computed once per call - no trial apply/revert, except for the one shape pin
//! detection cannot see: an en-passant capture exposing a horizontal discovered check.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::pin;
use super::state::Position;
use super::types::{MoveList, Square};

impl Position {
    /// Every legal move available to the side to move.
    #[must_use]
    pub fn generate_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let color = self.side_to_move();
        let Some(king_sq) = self.king_square(color) else {
            return moves;
        };
        let pin_state = pin::analyze(self, color, king_sq);

        kings::generate(self, color, king_sq, &pin_state, &mut moves);

        // Double check: only the king can move, regardless of what else is pseudo-legal.
        if pin_state.double_check() {
            return moves;
        }

        pawns::generate(self, color, &pin_state, &mut moves);
        knights::generate(self, color, &pin_state, &mut moves);
        sliders::generate(self, color, super::types::Piece::Bishop, &pin_state, &mut moves);
        sliders::generate(self, color, super::types::Piece::Rook, &pin_state, &mut moves);
        sliders::generate(self, color, super::types::Piece::Queen, &pin_state, &mut moves);

        moves
    }

    /// True if the side to move has no legal moves and is in check.
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.side_to_move()) && self.generate_legal_moves().is_empty()
    }

    /// True if the side to move has no legal moves and is not in check.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.side_to_move()) && self.generate_legal_moves().is_empty()
    }
}
