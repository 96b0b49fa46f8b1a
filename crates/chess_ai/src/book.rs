//! Opening book: canned replies for well-known early positions.
//!
//! The book is a TOML table of FEN positions with coordinate-move replies,
//! keyed internally by position key so transpositions into a booked
//! position still hit. One embedded book ships with the crate; callers can
//! load their own with [`OpeningBook::from_toml_str`].

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::thread_rng;
use serde::Deserialize;
use thiserror::Error;

use chess_rules::evaluator::is_valid;
use chess_rules::{Board, FenError, Move, MoveTextError};

#[derive(Debug, Error)]
pub enum BookError {
    #[error("book is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("bad position in book: {0}")]
    Fen(#[from] FenError),
    #[error("bad reply in book: {0}")]
    MoveText(#[from] MoveTextError),
}

#[derive(Debug, Deserialize)]
struct BookFile {
    position: Vec<BookEntry>,
}

#[derive(Debug, Deserialize)]
struct BookEntry {
    fen: String,
    replies: Vec<String>,
}

/// Replies per position key.
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    replies: HashMap<u64, Vec<Move>>,
}

impl OpeningBook {
    /// The book compiled into the crate. A build that ships a broken
    /// embedded book degrades to an empty one rather than failing at
    /// runtime; the tests parse it strictly.
    pub fn embedded() -> OpeningBook {
        OpeningBook::from_toml_str(include_str!("openings.toml")).unwrap_or_default()
    }

    pub fn from_toml_str(text: &str) -> Result<OpeningBook, BookError> {
        let file: BookFile = toml::from_str(text)?;
        let mut replies = HashMap::new();
        for entry in file.position {
            let board = Board::from_fen(&entry.fen)?;
            let moves = entry
                .replies
                .iter()
                .map(|reply| Move::parse(reply))
                .collect::<Result<Vec<Move>, MoveTextError>>()?;
            replies.insert(board.position_key(), moves);
        }
        Ok(OpeningBook { replies })
    }

    /// Number of booked positions.
    pub fn len(&self) -> usize {
        self.replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }

    /// All booked replies for this position, if any.
    pub fn lookup(&self, board: &Board) -> Option<&[Move]> {
        self.replies.get(&board.position_key()).map(Vec::as_slice)
    }

    /// Picks one legal booked reply at random. Replies that are not legal
    /// on this board (a stale book, say) are skipped rather than played.
    pub fn suggest(&self, board: &mut Board) -> Option<Move> {
        let replies = self.lookup(board)?;
        let legal: Vec<Move> = replies
            .iter()
            .copied()
            .filter(|&mv| is_valid(board, mv).is_ok())
            .collect();
        legal.choose(&mut thread_rng()).copied()
    }
}

#[cfg(test)]
#[path = "book_tests.rs"]
mod book_tests;
