use super::*;

use chess_rules::evaluator::is_valid;

fn board(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

fn mv(text: &str) -> Move {
    Move::parse(text).unwrap()
}

// ==== book-first play ====

#[test]
fn engine_plays_a_booked_first_move() {
    let ai = ChessAi::default();
    let mut board = Board::new();
    let outcome = ai.search_with_stats(&mut board);
    let first_moves = [mv("e2e4"), mv("d2d4"), mv("g1f3"), mv("c2c4")];
    let played = outcome.best.unwrap();
    assert!(first_moves.contains(&played), "{played} is not in the book");
    assert_eq!(outcome.nodes, 0, "a book hit must not search");
}

#[test]
fn disabling_the_book_searches_from_the_start() {
    let ai = ChessAi::new(AiConfig {
        depth: 2,
        use_opening_book: false,
    });
    let mut board = Board::new();
    let outcome = ai.search_with_stats(&mut board);
    assert!(outcome.nodes > 0);
    let played = outcome.best.unwrap();
    assert_eq!(is_valid(&mut board, played), Ok(()));
}

#[test]
fn engine_searches_once_out_of_book() {
    let ai = ChessAi::new(AiConfig {
        depth: 2,
        use_opening_book: true,
    });
    let mut board = Board::new();
    board.make_move(mv("e2e4"));
    board.make_move(mv("e7e5"));
    let outcome = ai.search_with_stats(&mut board);
    assert!(outcome.nodes > 0, "an unbooked position must be searched");
    assert!(outcome.best.is_some());
}

// ==== search-backed play ====

#[test]
fn depth_one_takes_a_hanging_queen() {
    let ai = ChessAi::new(AiConfig {
        depth: 1,
        use_opening_book: false,
    });
    let mut board = board("k7/8/8/3q4/8/8/3R4/K7 w - - 0 1");
    assert_eq!(ai.best_move(&mut board), Some(mv("d2d5")));
}

#[test]
fn mated_position_returns_no_move() {
    let ai = ChessAi::default();
    let mut board = board("rnb1kbnr/pppppppp/8/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1");
    assert_eq!(ai.best_move(&mut board), None);
}

#[test]
fn stalemated_position_returns_no_move() {
    let ai = ChessAi::default();
    let mut board = board("4k3/8/8/8/8/6q1/8/7K w - - 0 1");
    assert_eq!(ai.best_move(&mut board), None);
}

// ==== configuration ====

#[test]
fn config_defaults_to_depth_four_with_the_book_on() {
    let config = AiConfig::default();
    assert_eq!(config.depth, 4);
    assert!(config.use_opening_book);
    assert_eq!(ChessAi::default().config(), config);
}

#[test]
fn config_serializes_with_stable_field_names() {
    let json = serde_json::to_value(AiConfig::default()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "depth": 4,
            "use_opening_book": true,
        })
    );
    let back: AiConfig = serde_json::from_value(json).unwrap();
    assert_eq!(back, AiConfig::default());
}
