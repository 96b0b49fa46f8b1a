use std::fmt;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a pawn advance. White pawns move toward rank index 0.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Back rank, where the king and rooks start.
    pub fn home_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank the pawns start on, from which a two-square advance is allowed.
    pub fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Rank a pawn promotes on (the opponent's back rank).
    pub fn promotion_rank(self) -> u8 {
        self.other().home_rank()
    }

    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    /// Sentinel for vacant squares, so every square lookup is total.
    Empty,
}

impl PieceKind {
    /// Bishops, rooks and queens move along rays and can be blocked.
    pub fn is_sliding(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Table index for the six real kinds; `None` for the empty sentinel.
    pub fn index(self) -> Option<usize> {
        match self {
            PieceKind::Pawn => Some(0),
            PieceKind::Knight => Some(1),
            PieceKind::Bishop => Some(2),
            PieceKind::Rook => Some(3),
            PieceKind::Queen => Some(4),
            PieceKind::King => Some(5),
            PieceKind::Empty => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    /// True for a king or rook that has never moved from its home square.
    pub castle_eligible: bool,
}

impl Piece {
    pub const EMPTY: Piece = Piece {
        kind: PieceKind::Empty,
        color: Color::White,
        castle_eligible: false,
    };

    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece {
            kind,
            color,
            castle_eligible: false,
        }
    }

    pub fn is_empty(self) -> bool {
        self.kind == PieceKind::Empty
    }
}

/// A square on the board. Rank 0 is Black's back rank (the top of the board
/// as printed), file 0 is the a-file. Construction is bounds-checked, so a
/// `Coord` always names a real square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    rank: u8,
    file: u8,
}

impl Coord {
    pub fn new(rank: u8, file: u8) -> Option<Coord> {
        if rank < 8 && file < 8 {
            Some(Coord { rank, file })
        } else {
            None
        }
    }

    /// Constructor for values already known to be in range.
    pub(crate) fn at(rank: u8, file: u8) -> Coord {
        debug_assert!(rank < 8 && file < 8);
        Coord { rank, file }
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    pub fn file(self) -> u8 {
        self.file
    }

    /// Index into a 64-element board array.
    pub fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    /// The square `dr` ranks and `df` files away, or `None` off the board.
    pub fn offset(self, dr: i8, df: i8) -> Option<Coord> {
        let rank = self.rank as i8 + dr;
        let file = self.file as i8 + df;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Coord {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    /// Every square, rank 0 file 0 through rank 7 file 7.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..64u8).map(|i| Coord {
            rank: i / 8,
            file: i % 8,
        })
    }

    /// Parse algebraic notation such as `"e4"`.
    pub fn parse(text: &str) -> Option<Coord> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0];
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Some(Coord {
            rank: b'8' - rank,
            file: file - b'a',
        })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file) as char;
        let rank = (b'8' - self.rank) as char;
        write!(f, "{file}{rank}")
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveTextError {
    #[error("move text must look like e2e4 or e7e8=q, got {0:?}")]
    BadShape(String),
    #[error("bad square in move text {0:?}")]
    BadSquare(String),
    #[error("bad promotion letter in move text {0:?}")]
    BadPromotion(String),
}

/// A move described by its endpoints plus an optional promotion kind.
/// Whether the move is a capture, en passant, or castling is decided by the
/// board state when it is applied, not stored here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Coord, to: Coord) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    pub fn promoting(from: Coord, to: Coord, kind: PieceKind) -> Move {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }

    /// Parse coordinate move text: `"e2e4"`, or `"e7e8=q"` for promotions.
    pub fn parse(text: &str) -> Result<Move, MoveTextError> {
        if !text.is_ascii() || (text.len() != 4 && text.len() != 6) {
            return Err(MoveTextError::BadShape(text.to_string()));
        }
        let from = Coord::parse(&text[0..2])
            .ok_or_else(|| MoveTextError::BadSquare(text.to_string()))?;
        let to = Coord::parse(&text[2..4])
            .ok_or_else(|| MoveTextError::BadSquare(text.to_string()))?;
        let promotion = if text.len() == 6 {
            let rest = &text[4..6];
            let kind = match rest.as_bytes() {
                [b'=', b'q'] => PieceKind::Queen,
                [b'=', b'r'] => PieceKind::Rook,
                [b'=', b'b'] => PieceKind::Bishop,
                [b'=', b'n'] => PieceKind::Knight,
                _ => return Err(MoveTextError::BadPromotion(text.to_string())),
            };
            Some(kind)
        } else {
            None
        };
        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        match self.promotion {
            Some(PieceKind::Queen) => write!(f, "=q"),
            Some(PieceKind::Rook) => write!(f, "=r"),
            Some(PieceKind::Bishop) => write!(f, "=b"),
            Some(PieceKind::Knight) => write!(f, "=n"),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
