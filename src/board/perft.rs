//! Perft: the node-count oracle used to validate move generation. A perft mismatch
//! against a known-correct count means pseudo-legality, legality filtering, or the
//! apply/revert round trip has a bug - this is the primary correctness check for the
//! whole move-generation pipeline.

use super::state::Position;

impl Position {
    /// Counts leaf positions reachable in exactly `depth` plies from this position.
    #[must_use]
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.generate_legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mv in &moves {
            let undo = self.apply_move(*mv);
            nodes += self.perft(depth - 1);
            self.revert_move(&undo);
        }
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::parse_fen;

    struct Case {
        name: &'static str,
        fen: &'static str,
        depths: &'static [(u32, u64)],
    }

    const CASES: &[Case] = &[
        Case {
            name: "starting position",
            fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            depths: &[(1, 20), (2, 400), (3, 8902), (4, 197_281), (5, 4_865_609)],
        },
        Case {
            name: "kiwipete",
            fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            depths: &[(1, 48), (2, 2039), (3, 97_862), (4, 4_085_603)],
        },
        Case {
            name: "position 3",
            fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            depths: &[(1, 14), (2, 191), (3, 2812), (4, 43_238), (5, 674_624)],
        },
        Case {
            name: "position 4",
            fen: "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            depths: &[(1, 6), (2, 264), (3, 9467), (4, 422_333)],
        },
        Case {
            name: "en passant capture",
            fen: "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            depths: &[(1, 31), (2, 707), (3, 21_637)],
        },
        Case {
            name: "promotion",
            fen: "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
            depths: &[(1, 24), (2, 496), (3, 9483)],
        },
        Case {
            name: "castling",
            fen: "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            depths: &[(1, 26), (2, 568), (3, 13_744)],
        },
        Case {
            name: "position 5",
            fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            depths: &[(4, 2_103_487)],
        },
    ];

    #[test]
    fn perft_matches_known_node_counts() {
        for case in CASES {
            let mut pos = parse_fen(case.fen).unwrap();
            for &(depth, expected) in case.depths {
                let nodes = pos.perft(depth);
                assert_eq!(
                    nodes, expected,
                    "perft mismatch for '{}' at depth {depth}: expected {expected}, got {nodes}",
                    case.name,
                );
            }
        }
    }
}
