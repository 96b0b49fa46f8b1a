//! Chess AI engine.
//!
//! Plays from a small embedded opening book while the position is booked,
//! then switches to depth-limited minimax search.
//!
//! The engine uses:
//! - Minimax with alpha-beta pruning
//! - A per-search transposition table keyed by position key
//! - Material + piece-square evaluation with mobility and pawn structure
//! - Fifty-move and threefold-repetition awareness inside the search

pub mod book;
pub mod eval;
pub mod search;

use serde::{Deserialize, Serialize};

use chess_rules::{Board, Move};

/// Engine settings, deserializable from an application config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Search depth in plies.
    pub depth: u8,
    /// Consult the embedded opening book before searching.
    pub use_opening_book: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            use_opening_book: true,
        }
    }
}

/// The playing engine: an opening book in front of the search.
#[derive(Debug, Clone)]
pub struct ChessAi {
    config: AiConfig,
    book: OpeningBook,
}

impl ChessAi {
    /// Engine with the embedded opening book.
    pub fn new(config: AiConfig) -> ChessAi {
        ChessAi {
            config,
            book: OpeningBook::embedded(),
        }
    }

    pub fn config(&self) -> AiConfig {
        self.config
    }

    /// The move the engine plays here, or `None` when the side to move
    /// has no legal move at all.
    pub fn best_move(&self, board: &mut Board) -> Option<Move> {
        self.search_with_stats(board).best
    }

    /// Like [`Self::best_move`], keeping the score and node count. A book
    /// hit reports a level score and zero nodes.
    pub fn search_with_stats(&self, board: &mut Board) -> SearchOutcome {
        if self.config.use_opening_book {
            if let Some(reply) = self.book.suggest(board) {
                return SearchOutcome {
                    best: Some(reply),
                    value: 0,
                    nodes: 0,
                };
            }
        }
        search::search_root(board, self.config.depth)
    }
}

impl Default for ChessAi {
    fn default() -> Self {
        ChessAi::new(AiConfig::default())
    }
}

// Re-export for direct use if needed
pub use book::{BookError, OpeningBook};
pub use eval::evaluate;
pub use search::{search_root, SearchContext, SearchOutcome, INFINITY};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
