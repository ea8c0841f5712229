//! The core's single failure kind, raised only at the data-model boundary
//! (`TileCount`/`HandCount`/`Call` constructors). Once a `HandCount` exists
//! the enumerator and reducer assume its invariants and are total.

use thiserror::Error;

use crate::tile::Tile;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidHand {
    #[error("tile {tile} would have {count} copies, which exceeds the maximum of 4")]
    TileCountExceeded { tile: Tile, count: u8 },

    #[error("hand has {total} tiles; a hand must total 13 or 14 (3/4 per call + concealed)")]
    WrongTileTotal { total: usize },

    #[error("a call must have 3 or 4 tiles, got {len}")]
    InvalidCallSize { len: usize },

    #[error("a triplet/quad call must be identical tiles, got {tiles:?}")]
    NonUniformCall { tiles: Vec<Tile> },

    #[error("a sequence call must be 3 consecutive same-suit tiles, got {tiles:?}")]
    NonConsecutiveCall { tiles: Vec<Tile> },

    #[error("invalid tile notation: {input}")]
    InvalidTileNotation { input: String },
}
