//! Movement patterns per piece kind.
//!
//! Two views of the same rules: [`can_move`] is the pure pattern test used
//! by the legality chain, and [`destinations`] enumerates reachable squares
//! through current occupancy (sliders stop at the first obstruction, pawn
//! pushes need empty squares, pawn diagonals need a target). Neither
//! function mutates the board; check safety and castling gates live in the
//! evaluator.

use crate::board::Board;
use crate::types::{Coord, Piece, PieceKind};

pub(crate) const ORTHO_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const DIAG_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub(crate) const KING_STEPS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// The kinds a pawn may promote to.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Whether `to` fits the piece's movement pattern from `from`, ignoring
/// occupancy. Castling appears here as the king's two-file pattern from its
/// home square; eligibility and path safety are checked elsewhere.
pub fn can_move(piece: Piece, from: Coord, to: Coord) -> bool {
    if from == to {
        return false;
    }
    let dr = to.rank() as i8 - from.rank() as i8;
    let df = to.file() as i8 - from.file() as i8;
    match piece.kind {
        PieceKind::Empty => false,
        PieceKind::Pawn => {
            let fwd = piece.color.forward();
            (df == 0 && dr == fwd)
                || (df == 0 && dr == 2 * fwd && from.rank() == piece.color.pawn_rank())
                || (df.abs() == 1 && dr == fwd)
        }
        PieceKind::Knight => (dr.abs() == 1 && df.abs() == 2) || (dr.abs() == 2 && df.abs() == 1),
        PieceKind::Bishop => dr.abs() == df.abs(),
        PieceKind::Rook => dr == 0 || df == 0,
        PieceKind::Queen => dr.abs() == df.abs() || dr == 0 || df == 0,
        PieceKind::King => {
            let step = dr.abs() <= 1 && df.abs() <= 1;
            let castle = dr == 0
                && df.abs() == 2
                && from.rank() == piece.color.home_rank()
                && from.file() == 4;
            step || castle
        }
    }
}

/// Squares the piece on `from` could move to through current occupancy.
/// For pawns this includes pushes onto empty squares and diagonals with a
/// capturable target (or the en-passant target); for the king it includes
/// the castling destinations while the king is still eligible. Promotion
/// expansion is the caller's concern.
pub fn destinations(board: &Board, from: Coord) -> Vec<Coord> {
    let piece = board.piece_at(from);
    match piece.kind {
        PieceKind::Empty => Vec::new(),
        PieceKind::Pawn => pawn_destinations(board, piece, from),
        PieceKind::Knight => step_destinations(board, piece, from, &KNIGHT_JUMPS),
        PieceKind::Bishop => ray_destinations(board, piece, from, &DIAG_DIRS),
        PieceKind::Rook => ray_destinations(board, piece, from, &ORTHO_DIRS),
        PieceKind::Queen => {
            let mut out = ray_destinations(board, piece, from, &DIAG_DIRS);
            out.extend(ray_destinations(board, piece, from, &ORTHO_DIRS));
            out
        }
        PieceKind::King => {
            let mut out = step_destinations(board, piece, from, &KING_STEPS);
            if piece.castle_eligible
                && from.rank() == piece.color.home_rank()
                && from.file() == 4
            {
                for df in [-2, 2] {
                    if let Some(to) = from.offset(0, df) {
                        out.push(to);
                    }
                }
            }
            out
        }
    }
}

fn pawn_destinations(board: &Board, piece: Piece, from: Coord) -> Vec<Coord> {
    let mut out = Vec::new();
    let fwd = piece.color.forward();

    if let Some(to) = from.offset(fwd, 0) {
        if board.piece_at(to).is_empty() {
            out.push(to);
            if from.rank() == piece.color.pawn_rank() {
                if let Some(to2) = from.offset(2 * fwd, 0) {
                    if board.piece_at(to2).is_empty() {
                        out.push(to2);
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        if let Some(to) = from.offset(fwd, df) {
            let target = board.piece_at(to);
            let capturable = !target.is_empty() && target.color != piece.color;
            if capturable || board.en_passant_target() == Some(to) {
                out.push(to);
            }
        }
    }

    out
}

fn step_destinations(board: &Board, piece: Piece, from: Coord, steps: &[(i8, i8)]) -> Vec<Coord> {
    let mut out = Vec::new();
    for &(dr, df) in steps {
        if let Some(to) = from.offset(dr, df) {
            let target = board.piece_at(to);
            if target.is_empty() || target.color != piece.color {
                out.push(to);
            }
        }
    }
    out
}

fn ray_destinations(board: &Board, piece: Piece, from: Coord, dirs: &[(i8, i8)]) -> Vec<Coord> {
    let mut out = Vec::new();
    for &(dr, df) in dirs {
        let mut cursor = from;
        while let Some(to) = cursor.offset(dr, df) {
            let target = board.piece_at(to);
            if target.is_empty() {
                out.push(to);
            } else {
                if target.color != piece.color {
                    out.push(to);
                }
                break;
            }
            cursor = to;
        }
    }
    out
}

/// The squares strictly between `from` and `to` along a shared rank, file,
/// or diagonal. Empty when the squares are adjacent or share no line.
pub fn line_of_sight(from: Coord, to: Coord) -> Vec<Coord> {
    let dr = to.rank() as i8 - from.rank() as i8;
    let df = to.file() as i8 - from.file() as i8;
    let on_line = (dr == 0) != (df == 0) || (dr.abs() == df.abs() && dr != 0);
    if !on_line {
        return Vec::new();
    }

    let step = (dr.signum(), df.signum());
    let mut out = Vec::new();
    let mut cursor = from;
    loop {
        cursor = match cursor.offset(step.0, step.1) {
            Some(next) => next,
            None => break,
        };
        if cursor == to {
            break;
        }
        out.push(cursor);
    }
    out
}

#[cfg(test)]
#[path = "piece_tests.rs"]
mod piece_tests;
