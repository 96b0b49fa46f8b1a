//! Zobrist hashing material for position keys.
//!
//! Every hashable feature of a position owns one random 64-bit value;
//! keys are built by XOR-folding the values of the features present.
//! The table is generated at compile time from a fixed seed so keys are
//! stable across runs and builds.

/// Random values for each hashable feature of a position.
pub struct ZobristTable {
    /// Indexed by `[color][piece kind][square]`.
    pub pieces: [[[u64; 64]; 6]; 2],
    /// Folded in when Black is to move.
    pub side_to_move: u64,
    /// FEN order: white kingside, white queenside, black kingside,
    /// black queenside.
    pub castling: [u64; 4],
    /// Indexed by the file of the open en-passant window.
    pub en_passant: [u64; 8],
}

pub static ZOBRIST: ZobristTable = build(0x9E37_79B9_7F4A_7C15);

const fn xorshift64(mut state: u64) -> u64 {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    state
}

const fn build(seed: u64) -> ZobristTable {
    let mut state = seed;
    let mut table = ZobristTable {
        pieces: [[[0; 64]; 6]; 2],
        side_to_move: 0,
        castling: [0; 4],
        en_passant: [0; 8],
    };

    let mut color = 0;
    while color < 2 {
        let mut kind = 0;
        while kind < 6 {
            let mut square = 0;
            while square < 64 {
                state = xorshift64(state);
                table.pieces[color][kind][square] = state;
                square += 1;
            }
            kind += 1;
        }
        color += 1;
    }

    state = xorshift64(state);
    table.side_to_move = state;

    let mut right = 0;
    while right < 4 {
        state = xorshift64(state);
        table.castling[right] = state;
        right += 1;
    }

    let mut file = 0;
    while file < 8 {
        state = xorshift64(state);
        table.en_passant[file] = state;
        file += 1;
    }

    table
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
