//! Move-generation validation by exhaustive tree walk.

use crate::board::Board;
use crate::evaluator::legal_moves_into;
use crate::types::Move;

/// Counts the leaves of the legal move tree to `depth` plies. Depth 0 is 1.
/// One move buffer per ply is allocated up front and reused across siblings,
/// so the walk itself does not allocate.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    let mut buffers: Vec<Vec<Move>> = vec![Vec::new(); depth as usize];
    walk(board, &mut buffers)
}

fn walk(board: &mut Board, buffers: &mut [Vec<Move>]) -> u64 {
    let (moves, rest) = match buffers.split_first_mut() {
        Some(split) => split,
        None => return 1,
    };
    legal_moves_into(board, moves);
    if rest.is_empty() {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for i in 0..moves.len() {
        let mv = moves[i];
        let undo = board.make_move(mv);
        nodes += walk(board, rest);
        board.unmake_move(mv, undo);
    }
    nodes
}
