//! Bitboard move-generation core for a UCI-compatible chess engine.
//!
//! This crate owns board representation, legal move generation, make/unmake,
//! FEN parsing, Zobrist hashing, and perft. Search and evaluation are
//! deliberately out of scope - see the `board` module for the public surface.

pub mod board;

pub use board::{
    format_uci_move, parse_fen, parse_uci_move, to_fen, Bitboard, CastlingRights, Color, Move,
    MoveList, Piece, Position, Square, UndoRecord,
};
pub use board::{FenError, MoveParseError, PositionError, SquareError};

/// Forces lazily-initialized attack and Zobrist tables to build eagerly.
///
/// Optional: every table also initializes on first use. Call this once at
/// startup (e.g. before spinning up worker threads) to avoid paying the
/// construction cost inside a time-sensitive code path.
pub fn init() {
    board::init();
}
