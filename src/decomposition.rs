//! Quasi-decompositions (QDs): partial decompositions of a single block's
//! tiles into melds/proto-melds plus a remainder, the knowledge base that
//! guards which proto-melds are still completable, and the recursive
//! enumerator that produces every maximal QD of a block.

use std::ops::Add;

use crate::count::{HandCount, TileCount};
use crate::tile::{Tile, Tiles};

/// A single committed part of a quasi-decomposition. `Pair` carries the
/// `is_incompletable_pair` flag directly (set when no further copies of the
/// tile remain in the wall); `PartialSequence` carries both held tiles,
/// which may be the low two of a `[t, t.next]` edge wait or the two ends of
/// a `[t, t.next.next]` gap wait — both are PCHOWs, distinguished only by
/// which completion tile(s) the knowledge base says are still reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompositionPart {
    Triplet(Tile),
    Sequence(Tile),
    Pair(Tile, bool),
    PartialSequence(Tile, Tile),
}

/// A partial decomposition of one block's concealed tiles: the parts
/// committed so far, in append order, plus the remainder of tiles not yet
/// assigned to any part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuasiDecomposition {
    pub parts: Vec<DecompositionPart>,
    pub remainder: TileCount,
}

impl QuasiDecomposition {
    pub fn new(block: impl Into<Vec<Tile>>) -> Self {
        QuasiDecomposition {
            parts: Vec::new(),
            remainder: TileCount::new(block),
        }
    }

    /// The (trivial) QD of an existing call's tiles: a call is already a
    /// complete meld, so `create_from_call_count` always yields exactly one
    /// part and an empty remainder. Three identical tiles or four identical
    /// tiles (a quad, open or concealed) both count as one triplet; three
    /// consecutive tiles count as one sequence.
    pub fn from_call_count(call_count: &TileCount) -> QuasiDecomposition {
        let mut qd = QuasiDecomposition::new(Tiles::ALL.to_vec());
        let present: Vec<Tile> = call_count
            .iter()
            .filter(|&(_, c)| c > 0)
            .map(|(t, _)| t)
            .collect();

        match present.as_slice() {
            [tile] => qd.parts.push(DecompositionPart::Triplet(*tile)),
            [low, _, _] => qd.parts.push(DecompositionPart::Sequence(*low)),
            other => unreachable!("a call count has 1 or 3 distinct tiles, got {other:?}"),
        }

        qd
    }
}

/// Per-tile count of copies still reachable by the player: `4 -
/// hand_count[t]` for every tile, fixed once and never mutated during the
/// search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    counts: TileCount,
}

impl KnowledgeBase {
    pub fn from_hand(hand: &HandCount) -> KnowledgeBase {
        let mut counts = TileCount::new(Tiles::ALL.to_vec());
        for &tile in Tiles::ALL.iter() {
            counts.set(tile, 4 - hand.get(tile));
        }
        KnowledgeBase { counts }
    }

    pub fn get(&self, tile: Tile) -> u8 {
        self.counts.get(tile)
    }

    /// This knowledge base restricted to `block` (used to hand the
    /// enumerator only the remaining-copy counts relevant to its block).
    pub fn restrict(&self, block: impl Into<Vec<Tile>>) -> TileCount {
        self.counts.restrict(block)
    }
}

/// The canonical fingerprint of a QD: equality and hashing are over this
/// alone, and it is what the reducer's cost function consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QuasiDecompositionType {
    pub num_triplets: u8,
    pub num_sequences: u8,
    pub num_pairs: u8,
    pub num_partials: u8,
    pub num_incompletable_partials: u8,
    pub remainder_size: u8,
}

impl Add for QuasiDecompositionType {
    type Output = QuasiDecompositionType;

    fn add(self, other: QuasiDecompositionType) -> QuasiDecompositionType {
        QuasiDecompositionType {
            num_triplets: self.num_triplets + other.num_triplets,
            num_sequences: self.num_sequences + other.num_sequences,
            num_pairs: self.num_pairs + other.num_pairs,
            num_partials: self.num_partials + other.num_partials,
            num_incompletable_partials: self.num_incompletable_partials
                + other.num_incompletable_partials,
            remainder_size: self.remainder_size + other.remainder_size,
        }
    }
}

impl QuasiDecompositionType {
    pub fn from_qdcmp(kb: &KnowledgeBase, qd: &QuasiDecomposition) -> QuasiDecompositionType {
        let mut t = QuasiDecompositionType {
            remainder_size: qd.remainder.sum() as u8,
            ..Default::default()
        };

        for part in &qd.parts {
            match *part {
                DecompositionPart::Triplet(_) => t.num_triplets += 1,
                DecompositionPart::Sequence(_) => t.num_sequences += 1,
                DecompositionPart::Pair(_, is_incompletable) => {
                    if is_incompletable {
                        t.num_incompletable_partials += 1;
                    } else {
                        t.num_pairs += 1;
                    }
                }
                DecompositionPart::PartialSequence(a, b) => {
                    let completable = completion_tiles(a, b).into_iter().any(|c| kb.get(c) > 0);
                    if completable {
                        t.num_partials += 1;
                    } else {
                        t.num_incompletable_partials += 1;
                    }
                }
            }
        }

        t
    }

    /// The deficiency contribution of this fingerprint: `9 - 2*melds -
    /// useful_blocks - pair_bonus`, where useful_blocks is the completable
    /// partials plus pairs beyond the first (the spec's "excess pairs
    /// degrade to partials"), capped at the number of meld slots still
    /// open, and pair_bonus rewards having exactly one pair held in
    /// reserve as the hand's head. The leading `9` (rather than the
    /// textbook shanten convention's `8`) keeps this formula's zero point
    /// aligned with `calculate_seven_pairs_deficiency` and
    /// `calculate_thirteen_orphans_deficiency`, both of which return `0`
    /// for a complete winning hand per spec.md's own worked examples.
    pub fn cost(&self) -> i32 {
        let melds = (self.num_triplets as i32 + self.num_sequences as i32).min(4);
        let pairs = self.num_pairs as i32;
        let partials = self.num_partials as i32;

        let has_head_pair = pairs >= 1;
        let pair_slot = i32::from(has_head_pair);
        let excess_pairs = (pairs - pair_slot).max(0);
        let taatsu_pool = partials + excess_pairs;

        let max_taatsu = (4 - melds).max(0);
        let used_taatsu = taatsu_pool.min(max_taatsu);

        9 - 2 * melds - used_taatsu - pair_slot
    }
}

/// Both completion tiles of a PCHOW part, in whatever order: for an edge
/// wait `[a, a.next]` this is `(a.prev, a.next.next)`; for a gap wait `[a,
/// a.next.next]` this is just `(a.next, a.next)`. Filtering to `Some` and
/// checking the knowledge base on each reproduces the enumerator's own
/// completability guards.
fn completion_tiles(a: Tile, b: Tile) -> Vec<Tile> {
    if b == a.next().unwrap_or(a) && b != a {
        // edge wait [a, a.next]: completable by a.prev or a.next.next
        let mut out = Vec::new();
        if let Some(p) = a.prev() {
            out.push(p);
        }
        if let Some(n2) = a.next().and_then(|n| n.next()) {
            out.push(n2);
        }
        out
    } else {
        // gap wait [a, a.next.next]: completable only by a.next
        a.next().into_iter().collect()
    }
}

/// Enumerate every maximal quasi-decomposition of `block`'s concealed
/// `counts`, given the `remaining` copy counts used by the completability
/// guards, invoking `visit` once per yielded QD.
///
/// `counts` and `qd` are mutated in place and restored on every return path
/// so the caller observes immutable semantics; two concurrent invocations
/// must use independent scratch state (there is none shared here beyond
/// the caller's own stack frame).
pub fn iter_qdcmps(counts: &mut TileCount, remaining: &TileCount, mut visit: impl FnMut(&QuasiDecomposition)) {
    let block = counts.block().to_vec();
    let mut qd = QuasiDecomposition::new(block.clone());
    rec(counts, remaining, &mut qd, &block, 0, &mut visit);
}

fn rec(
    counts: &mut TileCount,
    remaining: &TileCount,
    qd: &mut QuasiDecomposition,
    block: &[Tile],
    pos: usize,
    visit: &mut dyn FnMut(&QuasiDecomposition),
) {
    let mut pos = pos;
    while pos < block.len() && counts.get(block[pos]) == 0 {
        pos += 1;
    }
    if pos >= block.len() {
        visit(qd);
        return;
    }
    let tile = block[pos];

    // 1. Drop to remainder.
    counts.add(tile, -1);
    qd.remainder.add(tile, 1);
    rec(counts, remaining, qd, block, pos, visit);
    qd.remainder.add(tile, -1);
    counts.add(tile, 1);

    // 2. Triplet.
    if counts.get(tile) >= 2 {
        counts.add(tile, -2);
        qd.parts.push(DecompositionPart::Triplet(tile));
        rec(counts, remaining, qd, block, pos, visit);
        qd.parts.pop();
        counts.add(tile, 2);
    }

    // 3. Sequence.
    if let (Some(n1), Some(n2)) = (tile.next(), tile.next().and_then(|t| t.next())) {
        if counts.get(n1) >= 1 && counts.get(n2) >= 1 {
            counts.add(n1, -1);
            counts.add(n2, -1);
            qd.parts.push(DecompositionPart::Sequence(tile));
            rec(counts, remaining, qd, block, pos, visit);
            qd.parts.pop();
            counts.add(n1, 1);
            counts.add(n2, 1);
        }
    }

    // 4. Partial pair.
    if counts.get(tile) >= 1 {
        let is_incompletable_pair = remaining.get(tile) == 0;
        counts.add(tile, -1);
        qd.parts.push(DecompositionPart::Pair(tile, is_incompletable_pair));
        rec(counts, remaining, qd, block, pos, visit);
        qd.parts.pop();
        counts.add(tile, 1);
    }

    // 5. Edge partial sequence [tile, tile.next].
    if let Some(n1) = tile.next() {
        let n2 = n1.next();
        let structurally_completable = n2.is_some_and(|n2| counts.get(n2) > 0);
        let drawable_below = tile.prev().is_some_and(|p| remaining.get(p) > 0);
        if counts.get(n1) >= 1 && (structurally_completable || drawable_below) {
            counts.add(n1, -1);
            qd.parts.push(DecompositionPart::PartialSequence(tile, n1));
            rec(counts, remaining, qd, block, pos, visit);
            qd.parts.pop();
            counts.add(n1, 1);
        }
    }

    // 6. Gap partial sequence [tile, tile.next.next].
    if let Some(n1) = tile.next() {
        if let Some(n2) = n1.next() {
            if counts.get(n2) >= 1 && remaining.get(n1) > 0 {
                counts.add(n2, -1);
                qd.parts.push(DecompositionPart::PartialSequence(tile, n2));
                rec(counts, remaining, qd, block, pos, visit);
                qd.parts.pop();
                counts.add(n2, 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Suit;

    fn t(s: &str) -> Tile {
        Tile::try_from(s).unwrap()
    }

    #[test]
    fn enumerator_restores_counts_after_every_branch() {
        let block = Tiles::MANS.to_vec();
        let mut counts = TileCount::create_from_tiles(
            [t("1m"), t("1m"), t("2m"), t("3m"), t("3m")],
            block.clone(),
        )
        .unwrap();
        let before = counts.clone();
        let remaining = TileCount::new(block);
        let mut n = 0;
        iter_qdcmps(&mut counts, &remaining, |_| n += 1);
        assert_eq!(counts, before);
        assert!(n > 0);
    }

    #[test]
    fn complete_triplet_block_yields_one_triplet_type() {
        let block = [Tile::suited(Suit::Man, 5)].to_vec();
        let mut counts =
            TileCount::create_from_tiles([t("5m"), t("5m"), t("5m")], block.clone()).unwrap();
        let remaining = TileCount::new(block);
        let mut types = Vec::new();
        iter_qdcmps(&mut counts, &remaining, |qd| {
            let kb_counts = TileCount::new(Tiles::ALL.to_vec());
            let kb = KnowledgeBase { counts: kb_counts };
            types.push(QuasiDecompositionType::from_qdcmp(&kb, qd));
        });
        assert!(types.iter().any(|ty| ty.num_triplets == 1));
    }

    #[test]
    fn from_call_count_recognizes_triplet_and_sequence() {
        let triplet_count =
            TileCount::create_from_tiles([t("5s"); 3], Tiles::ALL.to_vec()).unwrap();
        let qd = QuasiDecomposition::from_call_count(&triplet_count);
        assert!(matches!(qd.parts.as_slice(), [DecompositionPart::Triplet(_)]));

        let seq_count =
            TileCount::create_from_tiles([t("1p"), t("2p"), t("3p")], Tiles::ALL.to_vec())
                .unwrap();
        let qd = QuasiDecomposition::from_call_count(&seq_count);
        assert!(matches!(qd.parts.as_slice(), [DecompositionPart::Sequence(tile)] if *tile == t("1p")));
    }

    #[test]
    fn cost_is_zero_for_four_melds_and_a_pair() {
        let ty = QuasiDecompositionType {
            num_triplets: 4,
            num_sequences: 0,
            num_pairs: 1,
            num_partials: 0,
            num_incompletable_partials: 0,
            remainder_size: 0,
        };
        assert_eq!(ty.cost(), 0);
    }

    #[test]
    fn cost_is_one_for_tenpai_shapes() {
        let tanki = QuasiDecompositionType {
            num_triplets: 4,
            ..Default::default()
        };
        assert_eq!(tanki.cost(), 1);

        let three_melds_pair_taatsu = QuasiDecompositionType {
            num_triplets: 3,
            num_pairs: 1,
            num_partials: 1,
            ..Default::default()
        };
        assert_eq!(three_melds_pair_taatsu.cost(), 1);
    }
}
