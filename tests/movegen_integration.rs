//! End-to-end checks against the public API surface, exercised the way an external
//! UCI/search layer would use it: FEN in, legal moves out, apply/revert round trips,
//! UCI move text resolved against the legal list.

use chess_engine::{format_uci_move, parse_fen, parse_uci_move, Position};

#[test]
fn fools_mate_is_checkmate() {
    let mut pos = Position::starting_position();
    for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        let legal = pos.generate_legal_moves();
        let mv = parse_uci_move(&legal, uci).unwrap_or_else(|e| panic!("{uci}: {e}"));
        pos.apply_move(mv);
    }
    assert!(pos.is_checkmate());
}

#[test]
fn apply_revert_round_trips_a_full_game_opening() {
    let mut pos = Position::starting_position();
    let start_hash = pos.zobrist_hash();
    let mut undos = Vec::new();

    for uci in ["e2e4", "c7c5", "g1f3", "d7d6"] {
        let legal = pos.generate_legal_moves();
        let mv = parse_uci_move(&legal, uci).unwrap();
        undos.push(pos.apply_move(mv));
    }

    while let Some(undo) = undos.pop() {
        pos.revert_move(&undo);
    }
    assert_eq!(pos.zobrist_hash(), start_hash);
    assert_eq!(pos, Position::starting_position());
}

#[test]
fn kiwipete_round_trips_through_fen_and_reports_correct_move_count() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let pos = parse_fen(fen).unwrap();
    assert_eq!(chess_engine::to_fen(&pos), fen);
    assert_eq!(pos.generate_legal_moves().len(), 48);
}

#[test]
fn uci_move_round_trips_through_format_and_parse() {
    let pos = Position::starting_position();
    let legal = pos.generate_legal_moves();
    let mv = parse_uci_move(&legal, "e2e4").unwrap();
    assert_eq!(format_uci_move(mv), "e2e4");
}
