//! Standard perft positions with published node counts. Each case walks
//! the full legal move tree, so together these exercise castling gates,
//! en passant, promotions, pins, and the make/unmake bookkeeping.

use chess_rules::{perft, Board};
use rayon::prelude::*;

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

// (label, fen, depth, expected leaf count)
const CASES: &[(&str, &str, u32, u64)] = &[
    ("startpos", STARTPOS, 1, 20),
    ("startpos", STARTPOS, 2, 400),
    ("startpos", STARTPOS, 3, 8_902),
    ("startpos", STARTPOS, 4, 197_281),
    ("kiwipete", KIWIPETE, 1, 48),
    ("kiwipete", KIWIPETE, 2, 2_039),
    ("kiwipete", KIWIPETE, 3, 97_862),
    ("position 3", POSITION_3, 1, 14),
    ("position 3", POSITION_3, 2, 191),
    ("position 3", POSITION_3, 3, 2_812),
    ("position 3", POSITION_3, 4, 43_238),
    ("position 5", POSITION_5, 1, 44),
    ("position 5", POSITION_5, 2, 1_486),
    ("position 5", POSITION_5, 3, 62_379),
];

#[test]
fn perft_matches_published_counts() {
    CASES.par_iter().for_each(|&(label, fen, depth, expected)| {
        let mut board = Board::from_fen(fen).unwrap();
        let nodes = perft(&mut board, depth);
        assert_eq!(
            nodes, expected,
            "{label} depth {depth} expected {expected} leaves, counted {nodes}"
        );
    });
}

#[test]
fn depth_zero_counts_one_leaf() {
    let mut board = Board::new();
    assert_eq!(perft(&mut board, 0), 1);
}

#[test]
fn perft_leaves_the_board_untouched() {
    let mut board = Board::from_fen(KIWIPETE).unwrap();
    let before = board.clone();
    perft(&mut board, 3);
    assert_eq!(board, before);
}
