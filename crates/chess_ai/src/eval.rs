//! Static position evaluation.
//!
//! [`evaluate`] scores a position from one side's point of view: material
//! and square-position bonuses per piece, a mobility differential, a king
//! centralization penalty outside the endgame, and a doubled-pawn penalty.
//! The score is antisymmetric in the perspective argument.

use chess_rules::piece::destinations;
use chess_rules::{Board, Color, Coord, PieceKind};

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20_000;

pub fn material_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
        PieceKind::Empty => 0,
    }
}

type SquareTable = [[i32; 8]; 8];

// Square tables are written as seen from White's side: row 0 is the far
// rank, row 7 the home rank. Black reads them mirrored.
const PAWN_TABLE: SquareTable = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const KNIGHT_TABLE: SquareTable = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const BISHOP_TABLE: SquareTable = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-10, 5, 5, 10, 10, 5, 5, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 10, 10, 10, 10, 10, 10, -10],
    [-10, 5, 0, 0, 0, 0, 5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

const ROOK_TABLE: SquareTable = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [5, 10, 10, 10, 10, 10, 10, 5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [0, 0, 0, 5, 5, 0, 0, 0],
];

const QUEEN_TABLE: SquareTable = [
    [-20, -10, -10, -5, -5, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 5, 5, 5, 0, -10],
    [-5, 0, 5, 5, 5, 5, 0, -5],
    [0, 0, 5, 5, 5, 5, 0, -5],
    [-10, 5, 5, 5, 5, 5, 0, -10],
    [-10, 0, 5, 0, 0, 0, 0, -10],
    [-20, -10, -10, -5, -5, -10, -10, -20],
];

const KING_TABLE: SquareTable = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [20, 20, 0, 0, 0, 0, 20, 20],
    [20, 30, 10, 0, 0, 10, 30, 20],
];

/// Square bonus for a piece of `kind` and `color` standing on `c`.
pub fn placement_bonus(kind: PieceKind, color: Color, c: Coord) -> i32 {
    let table: &SquareTable = match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_TABLE,
        PieceKind::Empty => return 0,
    };
    let row = match color {
        Color::White => c.rank(),
        Color::Black => 7 - c.rank(),
    };
    table[row as usize][c.file() as usize]
}

/// The endgame begins when at most four pieces other than pawns and kings
/// remain on the board, both sides combined.
pub fn is_endgame(board: &Board) -> bool {
    let heavy = Coord::all()
        .filter(|&c| {
            !matches!(
                board.piece_at(c).kind,
                PieceKind::Empty | PieceKind::Pawn | PieceKind::King
            )
        })
        .count();
    heavy <= 4
}

/// Scores the position from `perspective`'s point of view; positive is
/// good for that side. The board is not modified.
pub fn evaluate(board: &Board, perspective: Color) -> i32 {
    let endgame = is_endgame(board);
    let mut score = 0;

    for c in Coord::all() {
        let piece = board.piece_at(c);
        if piece.is_empty() {
            continue;
        }
        let sign = if piece.color == perspective { 1 } else { -1 };

        score += sign * (material_value(piece.kind) + placement_bonus(piece.kind, piece.color, c));
        score += sign * 2 * destinations(board, c).len() as i32;

        // An exposed king in the middlegame is a liability; once material
        // thins out centralization stops being one.
        if piece.kind == PieceKind::King && !endgame {
            score -= sign * centralization_penalty(c);
        }
    }

    score + doubled_pawn_term(board, perspective)
}

fn centralization_penalty(c: Coord) -> i32 {
    let rank_spread = (2 * c.rank() as i32 - 7).abs();
    let file_spread = (2 * c.file() as i32 - 7).abs();
    5 * (14 - (rank_spread + file_spread))
}

fn doubled_pawn_term(board: &Board, perspective: Color) -> i32 {
    let mut own = [0i32; 8];
    let mut enemy = [0i32; 8];
    for c in Coord::all() {
        let piece = board.piece_at(c);
        if piece.kind != PieceKind::Pawn {
            continue;
        }
        if piece.color == perspective {
            own[c.file() as usize] += 1;
        } else {
            enemy[c.file() as usize] += 1;
        }
    }

    let mut term = 0;
    for file in 0..8 {
        if own[file] > 1 {
            term -= 20 * (own[file] - 1);
        }
        if enemy[file] > 1 {
            term += 20 * (enemy[file] - 1);
        }
    }
    term
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
