//! Perft timing harness for profiling.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p chess_rules -- [depth] [fen]
//!
//! With no FEN the standard suite runs; with one the single position runs
//! at the given depth.

use std::env;
use std::process;
use std::time::{Duration, Instant};

use chess_rules::{perft, Board};

const SUITE: &[(&str, &str)] = &[
    (
        "starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
    (
        "position 5",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    ),
];

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    match args.get(2) {
        Some(fen) => run_one(fen, depth),
        None => run_suite(depth),
    }
}

fn load(fen: &str) -> Board {
    match Board::from_fen(fen) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("bad FEN {fen:?}: {err}");
            process::exit(2);
        }
    }
}

fn run_one(fen: &str, depth: u32) {
    let mut board = load(fen);
    println!("position: {fen}");
    println!("depth: {depth}");

    let start = Instant::now();
    let nodes = perft(&mut board, depth);
    let elapsed = start.elapsed();

    println!("nodes: {nodes}");
    println!("time: {elapsed:.3?}");
    println!("nps: {:.0}", rate(nodes, elapsed));
}

fn run_suite(depth: u32) {
    println!("perft suite at depth {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in SUITE {
        let mut board = load(fen);

        let start = Instant::now();
        let nodes = perft(&mut board, depth);
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;

        println!(
            "{name:.<24} {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            rate(nodes, elapsed)
        );
    }

    println!();
    println!(
        "total: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        rate(total_nodes, total_time)
    );
}

fn rate(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}
