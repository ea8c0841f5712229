//! Deficiency (shanten) calculation: the per-block type sets, the
//! cross-product combine step, and the three deficiency formulas (normal,
//! seven pairs, thirteen orphans) reduced to a single `shanten()` entry
//! point.

use rustc_hash::FxHashSet;

use crate::count::HandCount;
use crate::decomposition::{iter_qdcmps, KnowledgeBase, QuasiDecomposition, QuasiDecompositionType};
use crate::tile::{Tile, Tiles};

/// A sentinel large enough that `min`-ing it against any real deficiency
/// leaves the real value; used when a hand shape is structurally
/// impossible for a given formula (e.g. any call present, for seven pairs
/// and thirteen orphans).
const UNREACHABLE: i32 = 100;

/// All quasi-decomposition types reachable from one block's tile counts,
/// deduplicated by fingerprint.
fn block_types(kb: &KnowledgeBase, block: &[Tile], hand: &HandCount) -> FxHashSet<QuasiDecompositionType> {
    let mut counts = hand.concealed_count.restrict(block.to_vec());
    let remaining = kb.restrict(block.to_vec());

    let mut out = FxHashSet::default();
    iter_qdcmps(&mut counts, &remaining, |qd: &QuasiDecomposition| {
        out.insert(QuasiDecompositionType::from_qdcmp(kb, qd));
    });
    out
}

/// `{t1 + t2 | t1 in a, t2 in b}`, deduplicated by fingerprint.
fn combine(a: &FxHashSet<QuasiDecompositionType>, b: &FxHashSet<QuasiDecompositionType>) -> FxHashSet<QuasiDecompositionType> {
    let mut out = FxHashSet::default();
    for &x in a {
        for &y in b {
            out.insert(x + y);
        }
    }
    out
}

/// The type sets contributed by each block: one set per suit (from the
/// enumerator) plus one singleton set per honor and per existing call
/// (already-complete melds have exactly one type).
fn all_block_type_sets(hand: &HandCount, kb: &KnowledgeBase) -> Vec<FxHashSet<QuasiDecompositionType>> {
    let mut sets = Vec::new();

    for suit_block in [Tiles::MANS.as_slice(), Tiles::PINS.as_slice(), Tiles::SOUS.as_slice()] {
        sets.push(block_types(kb, suit_block, hand));
    }

    for &honor in Tiles::HONORS.iter() {
        let block = [honor];
        sets.push(block_types(kb, &block, hand));
    }

    for call_count in &hand.call_counts {
        let qd = QuasiDecomposition::from_call_count(call_count);
        let mut singleton = FxHashSet::default();
        singleton.insert(QuasiDecompositionType::from_qdcmp(kb, &qd));
        sets.push(singleton);
    }

    sets
}

/// Minimum deficiency of a standard hand (4 melds + 1 pair), searching over
/// every combination of per-block quasi-decomposition types.
pub fn calculate_normal_deficiency(hand: &HandCount) -> i32 {
    let kb = KnowledgeBase::from_hand(hand);
    let sets = all_block_type_sets(hand, &kb);

    let combined = sets
        .into_iter()
        .reduce(|acc, s| combine(&acc, &s))
        .unwrap_or_default();

    combined
        .iter()
        .map(|ty| ty.cost())
        .min()
        .unwrap_or(UNREACHABLE)
}

/// Minimum deficiency toward seven distinct pairs. Undefined (returns
/// `UNREACHABLE`) for any hand holding a call, since seven pairs requires a
/// fully concealed hand.
pub fn calculate_seven_pairs_deficiency(hand: &HandCount) -> i32 {
    if !hand.call_counts.is_empty() {
        return UNREACHABLE;
    }

    let mut excess = 0i32;
    let mut singles = 0i32;
    for &tile in Tiles::ALL.iter() {
        let c = hand.concealed_count.get(tile) as i32;
        if c > 2 {
            excess += c - 2;
        }
        if c == 1 {
            singles += 1;
        }
    }

    excess
        + if singles >= excess {
            (singles - excess + 1) / 2
        } else {
            1
        }
}

/// Minimum deficiency toward thirteen orphans (one of each terminal/honor
/// plus a second copy of any one of them). Also undefined for any hand
/// holding a call.
pub fn calculate_thirteen_orphans_deficiency(hand: &HandCount) -> i32 {
    if !hand.call_counts.is_empty() {
        return UNREACHABLE;
    }

    let mut distinct = 0i32;
    let mut has_pair = false;
    for &tile in Tiles::TERMINALS_AND_HONORS.iter() {
        let c = hand.get(tile);
        if c >= 1 {
            distinct += 1;
        }
        if c >= 2 {
            has_pair = true;
        }
    }

    14 - distinct - i32::from(has_pair)
}

/// The hand's overall deficiency: the minimum across all three winning
/// shapes. A winning hand yields `0`; a tenpai hand yields `1`.
pub fn shanten(hand: &HandCount) -> i32 {
    calculate_normal_deficiency(hand)
        .min(calculate_seven_pairs_deficiency(hand))
        .min(calculate_thirteen_orphans_deficiency(hand))
}
