use std::collections::HashMap;

use thiserror::Error;

use crate::types::{Color, Coord, Move, Piece, PieceKind};
use crate::zobrist::ZOBRIST;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 6 whitespace-separated FEN fields, found {0}")]
    FieldCount(usize),
    #[error("FEN board must list 8 ranks, found {0}")]
    RankCount(usize),
    #[error("FEN rank {0} does not span exactly 8 files")]
    RankWidth(usize),
    #[error("unknown piece letter {0:?} in FEN board")]
    BadPieceChar(char),
    #[error("side to move must be 'w' or 'b', found {0:?}")]
    BadSideToMove(String),
    #[error("unknown castling flag {0:?} in FEN")]
    BadCastlingFlag(char),
    #[error("bad en-passant square {0:?} in FEN")]
    BadEnPassant(String),
    #[error("bad halfmove clock {0:?} in FEN")]
    BadHalfmoveClock(String),
    #[error("bad fullmove number {0:?} in FEN")]
    BadFullmoveNumber(String),
}

/// Everything needed to restore a board to the state before one move.
/// Produced by [`Board::make_move`], consumed by [`Board::unmake_move`].
#[derive(Debug, Clone)]
pub struct Undo {
    moved: Piece,
    captured: Piece,
    en_passant_capture: Option<(Coord, Piece)>,
    rook_move: Option<(Coord, Coord, Piece)>,
    en_passant_target: Option<Coord>,
    halfmove_clock: u32,
    fullmove_number: u32,
    counted_key: u64,
    cleared_repetitions: Option<HashMap<u64, u32>>,
}

/// Full game state: piece placement, side to move, the en-passant window,
/// draw counters, move history, and repetition bookkeeping.
///
/// The board applies moves without judging them; callers validate through
/// the evaluator first. `make_move` and `unmake_move` are exact inverses,
/// which the search and the legality probe both rely on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Piece; 64],
    current_player: Color,
    en_passant_target: Option<Coord>,
    halfmove_clock: u32,
    fullmove_number: u32,
    history: Vec<Move>,
    repetition_counts: HashMap<u64, u32>,
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        let mut board = Board {
            squares: [Piece::EMPTY; 64],
            current_player: Color::White,
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
            repetition_counts: HashMap::new(),
        };

        for file in 0..8 {
            board.set(Coord::at(6, file), Piece::new(PieceKind::Pawn, Color::White));
            board.set(Coord::at(1, file), Piece::new(PieceKind::Pawn, Color::Black));
        }
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back.iter().enumerate() {
            let castle_eligible = matches!(kind, PieceKind::Rook | PieceKind::King);
            board.set(
                Coord::at(7, file as u8),
                Piece {
                    kind,
                    color: Color::White,
                    castle_eligible,
                },
            );
            board.set(
                Coord::at(0, file as u8),
                Piece {
                    kind,
                    color: Color::Black,
                    castle_eligible,
                },
            );
        }

        board.count_current_position();
        board
    }

    pub fn piece_at(&self, c: Coord) -> Piece {
        self.squares[c.index()]
    }

    fn set(&mut self, c: Coord, piece: Piece) {
        self.squares[c.index()] = piece;
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn en_passant_target(&self) -> Option<Coord> {
        self.en_passant_target
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Every move applied to this board, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The square of `color`'s king, if one is on the board.
    pub fn king(&self, color: Color) -> Option<Coord> {
        Coord::all().find(|&c| {
            let piece = self.piece_at(c);
            piece.kind == PieceKind::King && piece.color == color
        })
    }

    /// Applies a move assumed pseudo-legal for the side to move and returns
    /// the token that undoes it. Handles every side effect: captures
    /// (including en passant), castling rook relocation, promotion, the
    /// en-passant window, draw counters, and repetition bookkeeping.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from);
        debug_assert!(!moved.is_empty(), "make_move with empty source {from}");
        let captured = self.piece_at(to);

        let mut undo = Undo {
            moved,
            captured,
            en_passant_capture: None,
            rook_move: None,
            en_passant_target: self.en_passant_target,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            counted_key: 0,
            cleared_repetitions: None,
        };

        // En passant: a pawn entering the open window captures the pawn
        // that passed it, which sits beside the start square.
        let mut is_capture = !captured.is_empty();
        if moved.kind == PieceKind::Pawn
            && self.en_passant_target == Some(to)
            && from.file() != to.file()
        {
            let victim_sq = Coord::at(from.rank(), to.file());
            let victim = self.piece_at(victim_sq);
            if !victim.is_empty() {
                self.set(victim_sq, Piece::EMPTY);
                undo.en_passant_capture = Some((victim_sq, victim));
                is_capture = true;
            }
        }

        // Castling: the king crosses two files and the rook jumps over it.
        if moved.kind == PieceKind::King && from.file().abs_diff(to.file()) == 2 {
            let (rook_from_file, rook_to_file) = if to.file() > from.file() {
                (7, 5)
            } else {
                (0, 3)
            };
            let rook_from = Coord::at(from.rank(), rook_from_file);
            let rook_to = Coord::at(from.rank(), rook_to_file);
            let rook = self.piece_at(rook_from);
            if rook.kind == PieceKind::Rook {
                self.set(rook_from, Piece::EMPTY);
                self.set(
                    rook_to,
                    Piece {
                        castle_eligible: false,
                        ..rook
                    },
                );
                undo.rook_move = Some((rook_from, rook_to, rook));
            }
        }

        // Any move permanently clears the mover's eligibility flag.
        let mut arriving = Piece {
            castle_eligible: false,
            ..moved
        };
        if moved.kind == PieceKind::Pawn && to.rank() == moved.color.promotion_rank() {
            arriving.kind = mv.promotion.unwrap_or(PieceKind::Queen);
        }
        self.set(from, Piece::EMPTY);
        self.set(to, arriving);

        // A double push opens the window behind the pawn; anything else
        // closes it.
        self.en_passant_target = None;
        if moved.kind == PieceKind::Pawn && from.rank().abs_diff(to.rank()) == 2 {
            self.en_passant_target =
                Coord::new((from.rank() + to.rank()) / 2, from.file());
        }

        if moved.kind == PieceKind::Pawn || is_capture {
            self.halfmove_clock = 0;
            // Positions before an irreversible move can never recur.
            undo.cleared_repetitions = Some(std::mem::take(&mut self.repetition_counts));
        } else {
            self.halfmove_clock += 1;
        }

        if self.current_player == Color::Black {
            self.fullmove_number += 1;
        }
        self.current_player = self.current_player.other();
        self.history.push(mv);

        undo.counted_key = self.count_current_position();
        undo
    }

    /// Exact inverse of [`Board::make_move`]: after the pair runs, the board
    /// compares equal to its prior self, field for field.
    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.history.pop();

        if let Some(previous) = undo.cleared_repetitions {
            self.repetition_counts = previous;
        } else {
            let stale = match self.repetition_counts.get_mut(&undo.counted_key) {
                Some(count) => {
                    *count -= 1;
                    *count == 0
                }
                None => false,
            };
            if stale {
                self.repetition_counts.remove(&undo.counted_key);
            }
        }

        self.current_player = self.current_player.other();
        self.en_passant_target = undo.en_passant_target;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rook_from, rook_to, rook)) = undo.rook_move {
            self.set(rook_to, Piece::EMPTY);
            self.set(rook_from, rook);
        }
        self.set(mv.from, undo.moved);
        self.set(mv.to, undo.captured);
        if let Some((victim_sq, victim)) = undo.en_passant_capture {
            self.set(victim_sq, victim);
        }
    }

    fn count_current_position(&mut self) -> u64 {
        let key = self.position_key();
        *self.repetition_counts.entry(key).or_insert(0) += 1;
        key
    }

    /// Canonical position key: placement, side to move, castling rights and
    /// en-passant file. Clocks, counters and history are excluded, so two
    /// boards that repeat the same position hash equal.
    pub fn position_key(&self) -> u64 {
        let mut key = 0u64;
        for c in Coord::all() {
            let piece = self.piece_at(c);
            if let Some(kind_index) = piece.kind.index() {
                key ^= ZOBRIST.pieces[piece.color.idx()][kind_index][c.index()];
            }
        }
        if self.current_player == Color::Black {
            key ^= ZOBRIST.side_to_move;
        }
        for (i, granted) in self.castling_rights().iter().enumerate() {
            if *granted {
                key ^= ZOBRIST.castling[i];
            }
        }
        if let Some(ep) = self.en_passant_target {
            key ^= ZOBRIST.en_passant[ep.file() as usize];
        }
        key
    }

    /// Castling rights in FEN order: white kingside, white queenside, black
    /// kingside, black queenside. A right holds while the king and that
    /// rook both still carry their eligibility flag on their home squares.
    pub fn castling_rights(&self) -> [bool; 4] {
        [
            self.castling_right(Color::White, 7),
            self.castling_right(Color::White, 0),
            self.castling_right(Color::Black, 7),
            self.castling_right(Color::Black, 0),
        ]
    }

    fn castling_right(&self, color: Color, rook_file: u8) -> bool {
        let rank = color.home_rank();
        let king = self.piece_at(Coord::at(rank, 4));
        let rook = self.piece_at(Coord::at(rank, rook_file));
        king.kind == PieceKind::King
            && king.color == color
            && king.castle_eligible
            && rook.kind == PieceKind::Rook
            && rook.color == color
            && rook.castle_eligible
    }

    /// Plies since the last pawn move or capture reached the draw threshold.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 50
    }

    /// Some position has occurred three or more times since the last
    /// irreversible move.
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_counts.values().any(|&count| count >= 3)
    }

    /// Neither side retains enough material to deliver mate: bare kings,
    /// a lone minor piece, or bishop versus bishop on the same shade.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors: Vec<(Piece, Coord)> = Vec::new();
        for c in Coord::all() {
            let piece = self.piece_at(c);
            match piece.kind {
                PieceKind::Empty | PieceKind::King => {}
                PieceKind::Knight | PieceKind::Bishop => minors.push((piece, c)),
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }
        match minors.as_slice() {
            [] => true,
            [_] => true,
            [(a, ca), (b, cb)] => {
                a.kind == PieceKind::Bishop
                    && b.kind == PieceKind::Bishop
                    && a.color != b.color
                    && square_shade(*ca) == square_shade(*cb)
            }
            _ => false,
        }
    }

    /// Parse a strict six-field FEN string. Castling rights are granted
    /// only where the king and rook actually stand on their home squares.
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::FieldCount(fields.len()));
        }

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        let mut squares = [Piece::EMPTY; 64];
        for (rank, rank_text) in ranks.iter().enumerate() {
            let mut file: u32 = 0;
            for ch in rank_text.chars() {
                if let Some(run) = ch.to_digit(10) {
                    if run == 0 {
                        return Err(FenError::BadPieceChar(ch));
                    }
                    file += run;
                } else {
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'p' => PieceKind::Pawn,
                        'n' => PieceKind::Knight,
                        'b' => PieceKind::Bishop,
                        'r' => PieceKind::Rook,
                        'q' => PieceKind::Queen,
                        'k' => PieceKind::King,
                        _ => return Err(FenError::BadPieceChar(ch)),
                    };
                    if file >= 8 {
                        return Err(FenError::RankWidth(rank + 1));
                    }
                    squares[rank * 8 + file as usize] = Piece::new(kind, color);
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth(rank + 1));
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth(rank + 1));
            }
        }

        let current_player = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::BadSideToMove(other.to_string())),
        };

        let mut rights = [false; 4];
        if fields[2] != "-" {
            for ch in fields[2].chars() {
                match ch {
                    'K' => rights[0] = true,
                    'Q' => rights[1] = true,
                    'k' => rights[2] = true,
                    'q' => rights[3] = true,
                    _ => return Err(FenError::BadCastlingFlag(ch)),
                }
            }
        }
        for (granted, color, rook_file) in [
            (rights[0], Color::White, 7u8),
            (rights[1], Color::White, 0u8),
            (rights[2], Color::Black, 7u8),
            (rights[3], Color::Black, 0u8),
        ] {
            if !granted {
                continue;
            }
            let rank = color.home_rank();
            let king_sq = Coord::at(rank, 4).index();
            let rook_sq = Coord::at(rank, rook_file).index();
            let king = squares[king_sq];
            let rook = squares[rook_sq];
            if king.kind == PieceKind::King
                && king.color == color
                && rook.kind == PieceKind::Rook
                && rook.color == color
            {
                squares[king_sq].castle_eligible = true;
                squares[rook_sq].castle_eligible = true;
            }
        }

        let en_passant_target = if fields[3] == "-" {
            None
        } else {
            Some(
                Coord::parse(fields[3])
                    .ok_or_else(|| FenError::BadEnPassant(fields[3].to_string()))?,
            )
        };

        let halfmove_clock: u32 = fields[4]
            .parse()
            .map_err(|_| FenError::BadHalfmoveClock(fields[4].to_string()))?;
        let fullmove_number: u32 = fields[5]
            .parse()
            .map_err(|_| FenError::BadFullmoveNumber(fields[5].to_string()))?;

        let mut board = Board {
            squares,
            current_player,
            en_passant_target,
            halfmove_clock,
            fullmove_number,
            history: Vec::new(),
            repetition_counts: HashMap::new(),
        };
        board.count_current_position();
        Ok(board)
    }

    /// Render the position as a six-field FEN string. Inverse of
    /// [`Board::from_fen`] for all positions with consistent rights.
    pub fn to_fen(&self) -> String {
        let mut out = String::new();

        for rank in 0..8 {
            if rank > 0 {
                out.push('/');
            }
            let mut run = 0;
            for file in 0..8 {
                let piece = self.piece_at(Coord::at(rank, file));
                if piece.is_empty() {
                    run += 1;
                    continue;
                }
                if run > 0 {
                    out.push_str(&run.to_string());
                    run = 0;
                }
                out.push(fen_char(piece));
            }
            if run > 0 {
                out.push_str(&run.to_string());
            }
        }

        out.push(' ');
        out.push(match self.current_player {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let rights = self.castling_rights();
        if rights.iter().any(|&granted| granted) {
            for (granted, ch) in rights.iter().zip(['K', 'Q', 'k', 'q']) {
                if *granted {
                    out.push(ch);
                }
            }
        } else {
            out.push('-');
        }

        out.push(' ');
        match self.en_passant_target {
            Some(c) => out.push_str(&c.to_string()),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

fn fen_char(piece: Piece) -> char {
    let ch = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
        PieceKind::Empty => ' ',
    };
    match piece.color {
        Color::White => ch.to_ascii_uppercase(),
        Color::Black => ch,
    }
}

fn square_shade(c: Coord) -> u8 {
    (c.rank() + c.file()) % 2
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
