//! Chess rules engine: board state, move application with exact undo,
//! legality checking, and game-status queries (check, checkmate, stalemate,
//! fifty-move rule, threefold repetition).
//!
//! The crate is split the way the rules themselves split:
//! - [`types`]: colors, piece kinds, coordinates, and coordinate move text.
//! - [`piece`]: per-kind movement patterns and lines of sight.
//! - [`board`]: the mailbox board, make/unmake, FEN, draw counters.
//! - [`evaluator`]: occupancy-aware legality and game status.
//! - [`zobrist`]: canonical position keys for repetition and caching.
//! - [`perft`]: move-generation validation counts.
//!
//! The board applies moves without validating them; all legality questions
//! go through [`evaluator::is_valid`] and friends.

pub mod board;
pub mod evaluator;
pub mod perft;
pub mod piece;
pub mod types;
pub mod zobrist;

pub use board::*;
pub use evaluator::*;
pub use perft::perft;
pub use types::*;
pub use zobrist::ZOBRIST;
