use super::*;

#[test]
fn values_are_stable_across_rebuilds() {
    let again = build(0x9E37_79B9_7F4A_7C15);
    assert_eq!(ZOBRIST.pieces[0][0][0], again.pieces[0][0][0]);
    assert_eq!(ZOBRIST.side_to_move, again.side_to_move);
    assert_eq!(ZOBRIST.castling, again.castling);
    assert_eq!(ZOBRIST.en_passant, again.en_passant);
}

#[test]
fn no_feature_hashes_to_zero() {
    for color in &ZOBRIST.pieces {
        for kind in color {
            for &value in kind {
                assert_ne!(value, 0);
            }
        }
    }
    assert_ne!(ZOBRIST.side_to_move, 0);
    assert!(ZOBRIST.castling.iter().all(|&v| v != 0));
    assert!(ZOBRIST.en_passant.iter().all(|&v| v != 0));
}

#[test]
fn feature_values_are_distinct() {
    let mut seen = std::collections::HashSet::new();
    for color in &ZOBRIST.pieces {
        for kind in color {
            for &value in kind {
                assert!(seen.insert(value), "duplicate piece value {value:#x}");
            }
        }
    }
    assert!(seen.insert(ZOBRIST.side_to_move));
    for &value in &ZOBRIST.castling {
        assert!(seen.insert(value), "duplicate castling value {value:#x}");
    }
    for &value in &ZOBRIST.en_passant {
        assert!(seen.insert(value), "duplicate en-passant value {value:#x}");
    }
}
