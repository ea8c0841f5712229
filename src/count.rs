//! Fixed-size multisets over tiles: a `TileCount` addressable over a
//! declared block, and the `HandCount`/`Call` types built from it.

use crate::error::InvalidHand;
use crate::tile::{Tile, Tiles};

/// A multiset of tiles restricted to a declared *block* (a contiguous
/// subset of tile identities, e.g. one suit, one honor, or all 34).
///
/// Reads of a tile outside the block return `0`; writes outside the block
/// are a logic error (the block is always known statically at every call
/// site in this crate, so correct callers never hit it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCount {
    block: Vec<Tile>,
    counts: [u8; 34],
}

impl TileCount {
    pub fn new(block: impl Into<Vec<Tile>>) -> Self {
        TileCount {
            block: block.into(),
            counts: [0; 34],
        }
    }

    /// Sum indicator vectors: one count per tile in `tiles`, restricted to `block`.
    pub fn create_from_tiles(
        tiles: impl IntoIterator<Item = Tile>,
        block: impl Into<Vec<Tile>>,
    ) -> Result<Self, InvalidHand> {
        let mut count = TileCount::new(block);
        for tile in tiles {
            let next = count.get(tile) + 1;
            if next > 4 {
                return Err(InvalidHand::TileCountExceeded { tile, count: next });
            }
            count.set(tile, next);
        }
        Ok(count)
    }

    pub fn block(&self) -> &[Tile] {
        &self.block
    }

    pub fn get(&self, tile: Tile) -> u8 {
        if self.block.contains(&tile) {
            self.counts[tile.index()]
        } else {
            0
        }
    }

    pub fn set(&mut self, tile: Tile, value: u8) {
        debug_assert!(
            self.block.contains(&tile),
            "write to {tile} outside this count's declared block"
        );
        debug_assert!(value <= 4, "tile count {value} out of range for {tile}");
        self.counts[tile.index()] = value;
    }

    /// Add `delta` (positive or negative) to `tile`'s count.
    pub fn add(&mut self, tile: Tile, delta: i8) {
        let current = self.get(tile) as i8;
        self.set(tile, (current + delta) as u8);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tile, u8)> + '_ {
        self.block.iter().map(move |&t| (t, self.get(t)))
    }

    pub fn sum(&self) -> u32 {
        self.iter().map(|(_, c)| c as u32).sum()
    }

    /// A fresh `TileCount` over `block`, copying this count's values for the
    /// tiles in that block (used to restrict a hand- or wall-wide count down
    /// to a single suit or honor for the enumerator).
    pub fn restrict(&self, block: impl Into<Vec<Tile>>) -> TileCount {
        let block = block.into();
        let mut out = TileCount::new(block.clone());
        for t in block {
            out.set(t, self.get(t));
        }
        out
    }
}

/// The kind of a declared (public) meld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    OpenTriplet,
    OpenSequence,
    OpenQuad,
    /// Concealed for open/closed status, but a completed meld block for
    /// deficiency purposes.
    ConcealedQuad,
}

impl CallKind {
    pub fn is_concealed(&self) -> bool {
        matches!(self, CallKind::ConcealedQuad)
    }
}

/// A declared meld: its kind and tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub kind: CallKind,
    pub tiles: Vec<Tile>,
}

impl Call {
    pub fn new(kind: CallKind, tiles: Vec<Tile>) -> Result<Self, InvalidHand> {
        let expected_len = match kind {
            CallKind::OpenTriplet | CallKind::OpenSequence => 3,
            CallKind::OpenQuad | CallKind::ConcealedQuad => 4,
        };
        if tiles.len() != expected_len {
            return Err(InvalidHand::InvalidCallSize { len: tiles.len() });
        }

        match kind {
            CallKind::OpenTriplet | CallKind::OpenQuad | CallKind::ConcealedQuad => {
                let first = tiles[0];
                if !tiles.iter().all(|&t| t == first) {
                    return Err(InvalidHand::NonUniformCall { tiles });
                }
            }
            CallKind::OpenSequence => {
                let mut sorted = tiles.clone();
                sorted.sort();
                let consecutive = sorted.windows(2).all(|w| w[0].next() == Some(w[1]));
                if !consecutive {
                    return Err(InvalidHand::NonConsecutiveCall { tiles });
                }
            }
        }

        Ok(Call { kind, tiles })
    }

    /// This call's tiles as a `TileCount` over `Tiles::ALL`.
    pub fn count(&self) -> TileCount {
        TileCount::create_from_tiles(self.tiles.iter().copied(), Tiles::ALL.to_vec())
            .expect("a validated Call never exceeds 4 copies")
    }
}

/// A structured view of a hand: concealed tiles (including the drawn tile,
/// if any) plus one `TileCount` per declared call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandCount {
    pub concealed_count: TileCount,
    pub call_counts: Vec<TileCount>,
}

impl HandCount {
    /// `concealed_tiles` must already include the drawn tile, if any
    /// (spec's OQ-1: the drawn tile is part of the concealed count).
    pub fn from_hand(concealed_tiles: &[Tile], calls: &[Call]) -> Result<Self, InvalidHand> {
        let concealed_count =
            TileCount::create_from_tiles(concealed_tiles.iter().copied(), Tiles::ALL.to_vec())?;
        let call_counts: Vec<TileCount> = calls.iter().map(Call::count).collect();

        let hand = HandCount {
            concealed_count,
            call_counts,
        };

        for &tile in Tiles::ALL.iter() {
            let total = hand.get(tile);
            if total > 4 {
                return Err(InvalidHand::TileCountExceeded { tile, count: total });
            }
        }

        let total_tiles = hand.len();
        if total_tiles != 13 && total_tiles != 14 {
            return Err(InvalidHand::WrongTileTotal { total: total_tiles });
        }

        Ok(hand)
    }

    pub fn get(&self, tile: Tile) -> u8 {
        self.concealed_count.get(tile)
            + self.call_counts.iter().map(|c| c.get(tile)).sum::<u8>()
    }

    /// The hand's structural tile total: every call counts as 3 tiles
    /// regardless of whether it is a quad, matching spec's `3*|calls| +
    /// |concealed_count| = 13 or 14` invariant. A quad's fourth tile is a
    /// replacement draw, already paid for elsewhere, and is not part of
    /// this count.
    pub fn len(&self) -> usize {
        self.concealed_count.sum() as usize + 3 * self.call_counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The 13-tile hand after discarding one copy of `tile` from the
    /// concealed count.
    pub fn discard(&self, tile: Tile) -> HandCount {
        debug_assert!(self.concealed_count.get(tile) > 0);
        let mut out = self.clone();
        out.concealed_count.add(tile, -1);
        out
    }

    /// The 14-tile hand after drawing one copy of `tile` into the concealed
    /// count.
    pub fn draw(&self, tile: Tile) -> HandCount {
        debug_assert!(self.get(tile) < 4);
        let mut out = self.clone();
        out.concealed_count.add(tile, 1);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{Honor, Suit};

    fn t(s: &str) -> Tile {
        Tile::try_from(s).unwrap()
    }

    #[test]
    fn tile_count_reads_outside_block_as_zero() {
        let count = TileCount::new(Tiles::MANS.to_vec());
        assert_eq!(count.get(Tile::honor(Honor::East)), 0);
    }

    #[test]
    fn create_from_tiles_rejects_fifth_copy() {
        let tiles = vec![t("1m"); 5];
        let err = TileCount::create_from_tiles(tiles, Tiles::ALL.to_vec()).unwrap_err();
        assert!(matches!(err, InvalidHand::TileCountExceeded { .. }));
    }

    #[test]
    fn call_validates_triplet_and_sequence() {
        let triplet = Call::new(CallKind::OpenTriplet, vec![t("1m"), t("1m"), t("1m")]).unwrap();
        assert_eq!(triplet.count().get(t("1m")), 3);

        let sequence = Call::new(CallKind::OpenSequence, vec![t("3p"), t("1p"), t("2p")]).unwrap();
        assert_eq!(sequence.count().get(t("1p")), 1);
        assert_eq!(sequence.count().get(t("2p")), 1);
        assert_eq!(sequence.count().get(t("3p")), 1);
    }

    #[test]
    fn call_rejects_non_uniform_triplet() {
        let err = Call::new(CallKind::OpenTriplet, vec![t("1m"), t("2m"), t("1m")]).unwrap_err();
        assert!(matches!(err, InvalidHand::NonUniformCall { .. }));
    }

    #[test]
    fn call_rejects_non_consecutive_sequence() {
        let err = Call::new(CallKind::OpenSequence, vec![t("1m"), t("2m"), t("4m")]).unwrap_err();
        assert!(matches!(err, InvalidHand::NonConsecutiveCall { .. }));
    }

    #[test]
    fn hand_count_totals_13_or_14() {
        let concealed: Vec<Tile> = vec![t("1m"); 13];
        let err = HandCount::from_hand(&concealed[..12], &[]).unwrap_err();
        assert!(matches!(err, InvalidHand::WrongTileTotal { total: 12 }));
    }

    #[test]
    fn hand_count_sums_concealed_and_calls() {
        let calls = [Call::new(CallKind::OpenTriplet, vec![t("5s"), t("5s"), t("5s")]).unwrap()];
        let concealed: Vec<Tile> = (0..11).map(|_| t("1m")).collect();
        // not a realistic hand shape, just checking the arithmetic
        let hand = HandCount {
            concealed_count: TileCount::create_from_tiles(concealed, Tiles::ALL.to_vec()).unwrap(),
            call_counts: calls.iter().map(Call::count).collect(),
        };
        assert_eq!(hand.len(), 14);
        assert_eq!(hand.get(t("5s")), 3);
    }

    #[test]
    fn concealed_quad_counts_as_three_tiles_toward_the_structural_total() {
        let kan = Call::new(CallKind::ConcealedQuad, vec![t("1z"); 4]).unwrap();
        let concealed: Vec<Tile> = vec![
            t("2m"), t("3m"), t("4m"), t("5p"), t("6p"), t("7p"), t("8s"), t("9s"), t("9s"),
            t("3z"), t("3z"),
        ];
        let hand = HandCount::from_hand(&concealed, std::slice::from_ref(&kan)).unwrap();
        // 11 concealed tiles + one kan (weighted 3, not its physical 4) = 14.
        assert_eq!(hand.len(), 14);
        assert_eq!(hand.get(t("1z")), 4);
    }

    #[test]
    fn discard_and_draw_round_trip() {
        let concealed: Vec<Tile> = vec![
            t("1m"), t("2m"), t("3m"), t("4p"), t("5p"), t("6p"), t("7s"), t("8s"), t("9s"),
            t("1z"), t("1z"), t("1z"), t("2z"), t("2z"),
        ];
        let hand = HandCount::from_hand(&concealed, &[]).unwrap();
        let discarded = hand.discard(t("2z"));
        assert_eq!(discarded.len(), 13);
        let drawn = discarded.draw(t("2z"));
        assert_eq!(drawn, hand);
    }
}
