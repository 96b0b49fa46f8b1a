//! Occupancy-aware legality and game status.
//!
//! [`is_valid`] runs the full legality chain for one move and reports the
//! first rule it breaks as a [`Rejection`]. [`legal_moves`] enumerates every
//! move that passes the chain. Status queries ([`is_checkmate`],
//! [`is_stalemate`], [`game_status`]) answer for the side to move.
//!
//! Functions taking `&mut Board` simulate with make/unmake and always
//! restore the board before returning, on every path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Board;
use crate::piece::{self, DIAG_DIRS, KING_STEPS, KNIGHT_JUMPS, ORTHO_DIRS, PROMOTION_KINDS};
use crate::types::{Color, Coord, Move, Piece, PieceKind};

/// The first rule an invalid move breaks, in the order the chain checks
/// them. Ordinary illegal moves are values, not panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no piece on the start square")]
    EmptySquare,
    #[error("the piece on the start square belongs to the opponent")]
    NotYourPiece,
    #[error("that piece cannot reach the destination")]
    BadGeometry,
    #[error("another piece blocks the path")]
    Blocked,
    #[error("the destination holds one of your own pieces")]
    FriendlyCapture,
    #[error("pawns capture only diagonally, onto an enemy piece or the en-passant square")]
    BadPawnCapture,
    #[error("castling requires an unmoved king and rook")]
    CastleIneligible,
    #[error("castling requires empty squares between king and rook")]
    CastleBlocked,
    #[error("the king may not castle out of, through, or into check")]
    CastleThroughCheck,
    #[error("the move would leave the king in check")]
    SelfCheck,
    #[error("a pawn reaching the last rank must name a promotion piece")]
    MissingPromotion,
    #[error("promotion must be to queen, rook, bishop or knight")]
    BadPromotion,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluatorError {
    #[error("no {0:?} king on the board")]
    MissingKing(Color),
}

/// Game-over summary for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub game_over: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub fifty_move_rule: bool,
    pub threefold_repetition: bool,
}

/// Every square holding a `by`-colored piece that attacks `target` through
/// current occupancy. Pins are ignored; a pinned piece still gives check.
/// Pawn pushes never attack, pawn diagonals always do.
pub fn attackers(board: &Board, target: Coord, by: Color) -> Vec<Coord> {
    let mut found = Vec::new();

    // Pawns strike from one rank behind the target, on both diagonals.
    for df in [-1, 1] {
        if let Some(c) = target.offset(-by.forward(), df) {
            let piece = board.piece_at(c);
            if piece.kind == PieceKind::Pawn && piece.color == by {
                found.push(c);
            }
        }
    }

    for &(dr, df) in &KNIGHT_JUMPS {
        if let Some(c) = target.offset(dr, df) {
            let piece = board.piece_at(c);
            if piece.kind == PieceKind::Knight && piece.color == by {
                found.push(c);
            }
        }
    }

    for &(dr, df) in &KING_STEPS {
        if let Some(c) = target.offset(dr, df) {
            let piece = board.piece_at(c);
            if piece.kind == PieceKind::King && piece.color == by {
                found.push(c);
            }
        }
    }

    scan_rays(board, target, by, &DIAG_DIRS, PieceKind::Bishop, &mut found);
    scan_rays(board, target, by, &ORTHO_DIRS, PieceKind::Rook, &mut found);
    found
}

fn scan_rays(
    board: &Board,
    target: Coord,
    by: Color,
    dirs: &[(i8, i8)],
    slider: PieceKind,
    found: &mut Vec<Coord>,
) {
    for &(dr, df) in dirs {
        let mut cursor = target;
        while let Some(next) = cursor.offset(dr, df) {
            let piece = board.piece_at(next);
            if !piece.is_empty() {
                if piece.color == by && (piece.kind == slider || piece.kind == PieceKind::Queen) {
                    found.push(next);
                }
                break;
            }
            cursor = next;
        }
    }
}

/// The squares attacking `color`'s king. An empty list means not in check.
pub fn king_attackers(board: &Board, color: Color) -> Result<Vec<Coord>, EvaluatorError> {
    let king = board
        .king(color)
        .ok_or(EvaluatorError::MissingKing(color))?;
    Ok(attackers(board, king, color.other()))
}

/// Lenient check probe used inside simulations: a board without the queried
/// king reports not attacked.
pub fn king_attacked(board: &Board, color: Color) -> bool {
    match board.king(color) {
        Some(king) => !attackers(board, king, color.other()).is_empty(),
        None => false,
    }
}

/// Full legality chain for one move of the side to move. Checks run in a
/// fixed order and the first failure is returned, so callers can surface
/// the reason. The board is borrowed mutably for the self-check simulation
/// and is always restored.
pub fn is_valid(board: &mut Board, mv: Move) -> Result<(), Rejection> {
    let piece = board.piece_at(mv.from);
    if piece.is_empty() {
        return Err(Rejection::EmptySquare);
    }
    if piece.color != board.current_player() {
        return Err(Rejection::NotYourPiece);
    }

    if !piece::can_move(piece, mv.from, mv.to) {
        return Err(Rejection::BadGeometry);
    }

    // Sliders need every square between start and destination empty; the
    // pawn double push has one such square too.
    let needs_clear_path = piece.kind.is_sliding()
        || (piece.kind == PieceKind::Pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2);
    if needs_clear_path {
        for between in piece::line_of_sight(mv.from, mv.to) {
            if !board.piece_at(between).is_empty() {
                return Err(Rejection::Blocked);
            }
        }
    }

    let target = board.piece_at(mv.to);
    if !target.is_empty() && target.color == piece.color {
        return Err(Rejection::FriendlyCapture);
    }

    match piece.kind {
        PieceKind::Pawn => validate_pawn(board, piece, mv)?,
        PieceKind::King if mv.from.file().abs_diff(mv.to.file()) == 2 => {
            validate_castle(board, piece, mv)?
        }
        _ => {}
    }

    let mover = piece.color;
    let undo = board.make_move(mv);
    let exposed = king_attacked(board, mover);
    board.unmake_move(mv, undo);
    if exposed {
        return Err(Rejection::SelfCheck);
    }

    let promoting = piece.kind == PieceKind::Pawn && mv.to.rank() == mover.promotion_rank();
    match (promoting, mv.promotion) {
        (true, None) => Err(Rejection::MissingPromotion),
        (true, Some(kind)) if !PROMOTION_KINDS.contains(&kind) => Err(Rejection::BadPromotion),
        (false, Some(_)) => Err(Rejection::BadPromotion),
        _ => Ok(()),
    }
}

fn validate_pawn(board: &Board, piece: Piece, mv: Move) -> Result<(), Rejection> {
    if mv.from.file() == mv.to.file() {
        // Pushes land on empty squares only.
        if !board.piece_at(mv.to).is_empty() {
            return Err(Rejection::Blocked);
        }
    } else {
        let target = board.piece_at(mv.to);
        let capturable = !target.is_empty() && target.color != piece.color;
        if !capturable && board.en_passant_target() != Some(mv.to) {
            return Err(Rejection::BadPawnCapture);
        }
    }
    Ok(())
}

fn validate_castle(board: &Board, king: Piece, mv: Move) -> Result<(), Rejection> {
    let rank = mv.from.rank();
    let rook_file = if mv.to.file() > mv.from.file() { 7 } else { 0 };
    let rook_sq = Coord::at(rank, rook_file);
    let rook = board.piece_at(rook_sq);
    if rook.kind != PieceKind::Rook
        || rook.color != king.color
        || !rook.castle_eligible
        || !king.castle_eligible
    {
        return Err(Rejection::CastleIneligible);
    }

    // The rook's whole path must be clear; queenside this includes the
    // b-file square the king never crosses.
    for between in piece::line_of_sight(mv.from, rook_sq) {
        if !board.piece_at(between).is_empty() {
            return Err(Rejection::CastleBlocked);
        }
    }

    // The king may not start, cross, or finish on an attacked square.
    let enemy = king.color.other();
    let step = if rook_file == 7 { 1 } else { -1 };
    let mut cursor = Some(mv.from);
    while let Some(square) = cursor {
        if !attackers(board, square, enemy).is_empty() {
            return Err(Rejection::CastleThroughCheck);
        }
        if square == mv.to {
            break;
        }
        cursor = square.offset(0, step);
    }
    Ok(())
}

/// Every legal move of the side to move, promotions expanded to all four
/// kinds. Clones the board once; prefer [`legal_moves_into`] in hot paths.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut scratch = board.clone();
    let mut out = Vec::new();
    legal_moves_into(&mut scratch, &mut out);
    out
}

/// Fills `out` with every legal move of the side to move, reusing the
/// caller's buffer. The board is returned to its prior state.
pub fn legal_moves_into(board: &mut Board, out: &mut Vec<Move>) {
    out.clear();
    let mover = board.current_player();
    for from in Coord::all() {
        let piece = board.piece_at(from);
        if piece.is_empty() || piece.color != mover {
            continue;
        }
        for to in piece::destinations(board, from) {
            if piece.kind == PieceKind::Pawn && to.rank() == mover.promotion_rank() {
                for kind in PROMOTION_KINDS {
                    out.push(Move::promoting(from, to, kind));
                }
            } else {
                out.push(Move::new(from, to));
            }
        }
    }
    out.retain(|&mv| is_valid(board, mv).is_ok());
}

/// Whether `color` (the side to move) is checkmated. A single check can be
/// answered by capturing the attacker (en passant included), blocking a
/// slider's line, or moving the king; a double check leaves only the king.
pub fn is_checkmate(board: &mut Board, color: Color) -> Result<bool, EvaluatorError> {
    let checkers = king_attackers(board, color)?;
    match checkers.as_slice() {
        [] => Ok(false),
        [attacker] => Ok(!can_capture_attacker(board, color, *attacker)
            && !can_block_attacker(board, color, *attacker)
            && !king_can_run(board, color)),
        _ => Ok(!king_can_run(board, color)),
    }
}

fn can_capture_attacker(board: &mut Board, color: Color, attacker: Coord) -> bool {
    let sources: Vec<Coord> = Coord::all()
        .filter(|&c| {
            let piece = board.piece_at(c);
            !piece.is_empty() && piece.color == color
        })
        .collect();
    for from in sources {
        if try_move(board, from, attacker) {
            return true;
        }
    }

    // A checking pawn that just double-stepped can fall to en passant; the
    // capture lands behind it, not on it.
    if board.piece_at(attacker).kind == PieceKind::Pawn {
        if let Some(ep) = board.en_passant_target() {
            if ep.file() == attacker.file() {
                for df in [-1, 1] {
                    if let Some(beside) = attacker.offset(0, df) {
                        let piece = board.piece_at(beside);
                        if piece.kind == PieceKind::Pawn
                            && piece.color == color
                            && try_move(board, beside, ep)
                        {
                            return true;
                        }
                    }
                }
            }
        }
    }
    false
}

fn can_block_attacker(board: &mut Board, color: Color, attacker: Coord) -> bool {
    if !board.piece_at(attacker).kind.is_sliding() {
        return false;
    }
    let king = match board.king(color) {
        Some(c) => c,
        None => return false,
    };
    // The king cannot block its own check.
    let sources: Vec<Coord> = Coord::all()
        .filter(|&c| {
            let piece = board.piece_at(c);
            !piece.is_empty() && piece.color == color && piece.kind != PieceKind::King
        })
        .collect();
    for gap in piece::line_of_sight(attacker, king) {
        for &from in &sources {
            if try_move(board, from, gap) {
                return true;
            }
        }
    }
    false
}

fn king_can_run(board: &mut Board, color: Color) -> bool {
    let king = match board.king(color) {
        Some(c) => c,
        None => return false,
    };
    let escapes = piece::destinations(board, king);
    escapes
        .into_iter()
        .any(|to| is_valid(board, Move::new(king, to)).is_ok())
}

fn try_move(board: &mut Board, from: Coord, to: Coord) -> bool {
    let piece = board.piece_at(from);
    let mv = if piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank() {
        Move::promoting(from, to, PieceKind::Queen)
    } else {
        Move::new(from, to)
    };
    is_valid(board, mv).is_ok()
}

/// Whether `color` (the side to move) is stalemated: not in check, yet no
/// legal move exists.
pub fn is_stalemate(board: &mut Board, color: Color) -> Result<bool, EvaluatorError> {
    if !king_attackers(board, color)?.is_empty() {
        return Ok(false);
    }
    let mut moves = Vec::new();
    legal_moves_into(board, &mut moves);
    Ok(moves.is_empty())
}

/// Evaluates the position for the side to move. `game_over` is the OR of
/// the four condition flags.
pub fn game_status(board: &mut Board) -> Result<GameStatus, EvaluatorError> {
    let side = board.current_player();
    let checkmate = is_checkmate(board, side)?;
    let stalemate = !checkmate && is_stalemate(board, side)?;
    let fifty_move_rule = board.is_fifty_move_draw();
    let threefold_repetition = board.is_threefold_repetition();
    Ok(GameStatus {
        game_over: checkmate || stalemate || fifty_move_rule || threefold_repetition,
        checkmate,
        stalemate,
        fifty_move_rule,
        threefold_repetition,
    })
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod evaluator_tests;
