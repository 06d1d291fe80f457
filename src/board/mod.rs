//! Chess board representation and move generation.
//!
//! Bitboards back the board representation; magic multiplication backs sliding-piece
//! attacks; geometric pin/check analysis backs move legality. Everything needed to take
//! a FEN string to a set of legal moves and back lives here - search, evaluation, and
//! UCI protocol handling are layered on top, outside this module.
//!
//! # Example
//! ```
//! use chess_engine::board::Position;
//!
//! let pos = Position::starting_position();
//! let moves = pos.generate_legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod attack_tables;
mod error;
mod fen;
mod make_unmake;
mod movegen;
mod perft;
mod pin;
mod queries;
mod state;
mod types;
mod uci_move;
mod zobrist;

pub use error::{FenError, MoveParseError, PositionError, SquareError};
pub use fen::{parse_fen, to_fen};
pub use state::{Position, UndoRecord};
pub use types::{Bitboard, CastlingRights, Color, Move, MoveList, MoveListIntoIter, Piece, Square};
pub use uci_move::{format_uci_move, parse_uci_move};

/// Forces every lazily-initialised static table to build now, ahead of first use. Not
/// required for correctness - `LazyLock` already makes each table safe to use from any
/// thread - but useful to front-load the ~2MiB magic-table build cost outside a timed
/// search.
pub fn init() {
    attack_tables::init();
}
