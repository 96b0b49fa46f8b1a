use super::*;

#[test]
fn test_coord_parse_and_display() {
    let e4 = Coord::parse("e4").expect("e4 is a valid square");
    assert_eq!(e4.rank(), 4);
    assert_eq!(e4.file(), 4);
    assert_eq!(e4.to_string(), "e4");

    let a8 = Coord::parse("a8").expect("a8 is a valid square");
    assert_eq!((a8.rank(), a8.file()), (0, 0));
    assert_eq!(a8.index(), 0);

    let h1 = Coord::parse("h1").expect("h1 is a valid square");
    assert_eq!((h1.rank(), h1.file()), (7, 7));
    assert_eq!(h1.index(), 63);
}

#[test]
fn test_coord_parse_rejects_garbage() {
    for bad in ["", "e", "e9", "i4", "44", "e4 ", "éé"] {
        assert!(Coord::parse(bad).is_none(), "{bad:?} should not parse");
    }
}

#[test]
fn test_coord_new_bounds() {
    assert!(Coord::new(0, 0).is_some());
    assert!(Coord::new(7, 7).is_some());
    assert!(Coord::new(8, 0).is_none());
    assert!(Coord::new(0, 8).is_none());
}

#[test]
fn test_coord_offset_stays_on_board() {
    let a8 = Coord::parse("a8").unwrap();
    assert_eq!(a8.offset(-1, 0), None);
    assert_eq!(a8.offset(0, -1), None);
    assert_eq!(a8.offset(1, 1), Coord::parse("b7"));

    let h1 = Coord::parse("h1").unwrap();
    assert_eq!(h1.offset(1, 0), None);
    assert_eq!(h1.offset(0, 1), None);
    assert_eq!(h1.offset(-2, -1), Coord::parse("g3"));
}

#[test]
fn test_coord_all_covers_every_square() {
    let squares: Vec<Coord> = Coord::all().collect();
    assert_eq!(squares.len(), 64);
    assert_eq!(squares[0], Coord::parse("a8").unwrap());
    assert_eq!(squares[63], Coord::parse("h1").unwrap());
    for (i, c) in squares.iter().enumerate() {
        assert_eq!(c.index(), i);
    }
}

#[test]
fn test_move_parse_plain() {
    let mv = Move::parse("e2e4").expect("e2e4 should parse");
    assert_eq!(mv.from, Coord::parse("e2").unwrap());
    assert_eq!(mv.to, Coord::parse("e4").unwrap());
    assert_eq!(mv.promotion, None);
    assert_eq!(mv.to_string(), "e2e4");
}

#[test]
fn test_move_parse_promotion() {
    let mv = Move::parse("a7a8=q").expect("a7a8=q should parse");
    assert_eq!(mv.promotion, Some(PieceKind::Queen));
    assert_eq!(mv.to_string(), "a7a8=q");

    for (text, kind) in [
        ("h2h1=r", PieceKind::Rook),
        ("h2h1=b", PieceKind::Bishop),
        ("h2h1=n", PieceKind::Knight),
    ] {
        let mv = Move::parse(text).unwrap();
        assert_eq!(mv.promotion, Some(kind), "promotion kind for {text}");
        assert_eq!(mv.to_string(), text);
    }
}

#[test]
fn test_move_parse_rejects_bad_shapes() {
    assert_eq!(
        Move::parse("e2e"),
        Err(MoveTextError::BadShape("e2e".to_string()))
    );
    assert_eq!(
        Move::parse("e2e4q"),
        Err(MoveTextError::BadShape("e2e4q".to_string()))
    );
    assert_eq!(
        Move::parse("e2e9"),
        Err(MoveTextError::BadSquare("e2e9".to_string()))
    );
    assert_eq!(
        Move::parse("e7e8=k"),
        Err(MoveTextError::BadPromotion("e7e8=k".to_string()))
    );
    assert_eq!(
        Move::parse("e7e8qq"),
        Err(MoveTextError::BadPromotion("e7e8qq".to_string()))
    );
}

#[test]
fn test_color_helpers() {
    assert_eq!(Color::White.other(), Color::Black);
    assert_eq!(Color::Black.other(), Color::White);
    assert_eq!(Color::White.forward(), -1);
    assert_eq!(Color::Black.forward(), 1);
    assert_eq!(Color::White.home_rank(), 7);
    assert_eq!(Color::Black.home_rank(), 0);
    assert_eq!(Color::White.pawn_rank(), 6);
    assert_eq!(Color::Black.pawn_rank(), 1);
    assert_eq!(Color::White.promotion_rank(), 0);
    assert_eq!(Color::Black.promotion_rank(), 7);
}

#[test]
fn test_piece_kind_helpers() {
    assert!(PieceKind::Bishop.is_sliding());
    assert!(PieceKind::Rook.is_sliding());
    assert!(PieceKind::Queen.is_sliding());
    assert!(!PieceKind::Pawn.is_sliding());
    assert!(!PieceKind::Knight.is_sliding());
    assert!(!PieceKind::King.is_sliding());
    assert!(!PieceKind::Empty.is_sliding());

    assert_eq!(PieceKind::Pawn.index(), Some(0));
    assert_eq!(PieceKind::King.index(), Some(5));
    assert_eq!(PieceKind::Empty.index(), None);
}

#[test]
fn test_empty_piece_sentinel() {
    assert!(Piece::EMPTY.is_empty());
    assert!(!Piece::EMPTY.castle_eligible);
    assert!(!Piece::new(PieceKind::Rook, Color::White).castle_eligible);
}
