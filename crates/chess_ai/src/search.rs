//! Minimax search with alpha-beta pruning.
//!
//! The search asks the rules crate for legal moves, walks them with
//! make/unmake, and scores leaves with [`evaluate`]. A transposition table
//! lives in a [`SearchContext`] that is created per invocation and
//! discarded afterwards, so no stale values leak between searches.

use std::cmp::Reverse;
use std::collections::HashMap;

use chess_rules::evaluator::{king_attacked, legal_moves_into};
use chess_rules::{Board, Color, Coord, Move, PieceKind};

use crate::eval::evaluate;

/// Mate sentinel. Larger than any static evaluation, small enough that
/// negation and comparison stay well inside `i32`.
pub const INFINITY: i32 = 1_000_000;

/// Per-invocation search state: the transposition table (position key to
/// searched depth and value) and a node counter.
pub struct SearchContext {
    transpositions: HashMap<u64, (u8, i32)>,
    nodes: u64,
}

impl SearchContext {
    pub fn new() -> SearchContext {
        SearchContext {
            transpositions: HashMap::new(),
            nodes: 0,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        SearchContext::new()
    }
}

/// What a finished root search found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best: Option<Move>,
    pub value: i32,
    pub nodes: u64,
}

/// Searches the position to `depth` plies for the side to move and returns
/// the best move with its value. `best` is `None` only when the side to
/// move has no legal move at all.
pub fn search_root(board: &mut Board, depth: u8) -> SearchOutcome {
    let mut ctx = SearchContext::new();
    let perspective = board.current_player();

    let mut moves = Vec::new();
    legal_moves_into(board, &mut moves);
    if moves.is_empty() {
        let value = if king_attacked(board, perspective) {
            -INFINITY
        } else {
            0
        };
        return SearchOutcome {
            best: None,
            value,
            nodes: ctx.nodes,
        };
    }

    order_moves(board, &mut moves);

    let mut best = moves[0];
    let mut best_value = -INFINITY;
    let mut alpha = -INFINITY;
    for mv in moves {
        let undo = board.make_move(mv);
        let value = minimax(
            &mut ctx,
            board,
            depth.saturating_sub(1),
            alpha,
            INFINITY,
            false,
            perspective,
        );
        board.unmake_move(mv, undo);

        if value > best_value {
            best_value = value;
            best = mv;
        }
        alpha = alpha.max(best_value);
    }

    SearchOutcome {
        best: Some(best),
        value: best_value,
        nodes: ctx.nodes,
    }
}

/// Depth-limited minimax with alpha-beta pruning. `maximizing` says whose
/// turn the node folds for; `perspective` fixes whose eyes leaf scores are
/// seen through. Draw rules are probed before anything else, so dead
/// positions never cost a subtree.
pub fn minimax(
    ctx: &mut SearchContext,
    board: &mut Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    perspective: Color,
) -> i32 {
    ctx.nodes += 1;

    if board.is_fifty_move_draw() || board.is_threefold_repetition() {
        return 0;
    }

    let mut moves = Vec::new();
    legal_moves_into(board, &mut moves);
    if moves.is_empty() {
        // No moves in check is mate against the side to move; otherwise
        // stalemate.
        if king_attacked(board, board.current_player()) {
            return if maximizing { -INFINITY } else { INFINITY };
        }
        return 0;
    }

    let key = board.position_key();
    if let Some(&(stored_depth, value)) = ctx.transpositions.get(&key) {
        // A shallower entry is no substitute for a deeper search.
        if stored_depth >= depth {
            return value;
        }
    }

    if depth == 0 {
        let value = evaluate(board, perspective);
        ctx.transpositions.insert(key, (0, value));
        return value;
    }

    order_moves(board, &mut moves);

    let mut best = if maximizing { -INFINITY } else { INFINITY };
    let mut cutoff = false;
    for mv in moves {
        let undo = board.make_move(mv);
        let value = minimax(ctx, board, depth - 1, alpha, beta, !maximizing, perspective);
        board.unmake_move(mv, undo);

        if maximizing {
            best = best.max(value);
            alpha = alpha.max(best);
        } else {
            best = best.min(value);
            beta = beta.min(best);
        }
        if beta <= alpha {
            cutoff = true;
            break;
        }
    }

    // A pruned node's value is a bound, not the truth; only completed
    // nodes are worth remembering.
    if !cutoff {
        ctx.transpositions.insert(key, (depth, best));
    }
    best
}

/// Sorts moves so the likely-best come first: winning captures, then
/// developing moves, king walks last.
pub fn order_moves(board: &Board, moves: &mut [Move]) {
    moves.sort_by_cached_key(|&mv| Reverse(order_score(board, mv)));
}

fn order_score(board: &Board, mv: Move) -> i32 {
    let piece = board.piece_at(mv.from);
    let target = board.piece_at(mv.to);
    let mut score = 0;

    if !target.is_empty() {
        score += 10 * exchange_value(target.kind) - exchange_value(piece.kind);
    }

    match piece.kind {
        PieceKind::Pawn => {
            if is_central(mv.to) {
                score += 20;
            }
        }
        PieceKind::Knight | PieceKind::Bishop => {
            if mv.from.rank() == piece.color.home_rank() {
                score += 15;
            }
        }
        PieceKind::King => score -= 50,
        _ => {}
    }
    score
}

fn is_central(c: Coord) -> bool {
    (2..=5).contains(&c.rank()) && (2..=5).contains(&c.file())
}

fn exchange_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight | PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King | PieceKind::Empty => 0,
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
