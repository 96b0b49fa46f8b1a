use super::*;

fn board(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

// ==== the embedded book ====

#[test]
fn embedded_book_parses_strictly() {
    let book = OpeningBook::from_toml_str(include_str!("openings.toml")).unwrap();
    assert_eq!(book.len(), 3);
    assert!(!book.is_empty());
}

#[test]
fn every_embedded_reply_is_legal_in_its_position() {
    let book = OpeningBook::embedded();
    let positions = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 1",
    ];
    for fen in positions {
        let mut board = board(fen);
        let replies = book.lookup(&board).unwrap_or_else(|| {
            panic!("book must cover {fen}");
        });
        assert_eq!(replies.len(), 4);
        for &reply in replies {
            assert_eq!(
                is_valid(&mut board, reply),
                Ok(()),
                "booked reply {reply} is illegal in {fen}"
            );
        }
    }
}

#[test]
fn lookup_misses_once_out_of_book() {
    let mut board = Board::new();
    board.make_move(Move::parse("e2e4").unwrap());
    board.make_move(Move::parse("e7e5").unwrap());
    assert!(OpeningBook::embedded().lookup(&board).is_none());
}

// ==== suggestions ====

#[test]
fn suggestion_comes_from_the_booked_replies() {
    let book = OpeningBook::embedded();
    let mut board = Board::new();
    let first_moves: Vec<Move> = ["e2e4", "d2d4", "g1f3", "c2c4"]
        .iter()
        .map(|text| Move::parse(text).unwrap())
        .collect();
    for _ in 0..20 {
        let suggested = book.suggest(&mut board).unwrap();
        assert!(
            first_moves.contains(&suggested),
            "{suggested} is not a booked first move"
        );
    }
}

#[test]
fn empty_book_suggests_nothing() {
    let mut board = Board::new();
    assert_eq!(OpeningBook::default().suggest(&mut board), None);
}

// ==== loading errors ====

#[test]
fn garbage_toml_is_rejected() {
    let result = OpeningBook::from_toml_str("position = \"not a table\"");
    assert!(matches!(result, Err(BookError::Toml(_))));
}

#[test]
fn bad_fen_in_a_book_is_rejected() {
    let text = "[[position]]\nfen = \"not a fen\"\nreplies = [\"e2e4\"]\n";
    assert!(matches!(
        OpeningBook::from_toml_str(text),
        Err(BookError::Fen(_))
    ));
}

#[test]
fn bad_move_text_in_a_book_is_rejected() {
    let text = concat!(
        "[[position]]\n",
        "fen = \"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1\"\n",
        "replies = [\"castle long\"]\n",
    );
    assert!(matches!(
        OpeningBook::from_toml_str(text),
        Err(BookError::MoveText(_))
    ));
}
