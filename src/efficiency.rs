//! Discard efficiency: for each legal discard from a 14-tile hand, which
//! draws reduce deficiency, and by how many remaining copies.

use serde::{Deserialize, Serialize};

use crate::count::HandCount;
use crate::deficiency::shanten;
use crate::tile::{Tile, Tiles};

/// One discard candidate and the draws that make progress after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EfficiencyData {
    pub discard_tile: Tile,
    pub ukeire: Vec<Tile>,
    pub ukeire_count: u32,
}

/// Every distinct tile held in the concealed part of `hand`, each tried as
/// a discard; only discards with a nonempty ukeire are kept, sorted by
/// descending count and then by ascending tile order.
pub fn calculate_efficiency(hand: &HandCount) -> Vec<EfficiencyData> {
    let mut out = Vec::new();

    for &tile in Tiles::ALL.iter() {
        if hand.concealed_count.get(tile) == 0 {
            continue;
        }

        let discarded = hand.discard(tile);
        let base = shanten(&discarded);

        let mut ukeire = Vec::new();
        let mut ukeire_count = 0u32;
        for &draw in Tiles::ALL.iter() {
            let remaining = 4 - discarded.get(draw);
            if remaining == 0 {
                continue;
            }
            if shanten(&discarded.draw(draw)) < base {
                ukeire.push(draw);
                ukeire_count += remaining as u32;
            }
        }

        if !ukeire.is_empty() {
            out.push(EfficiencyData {
                discard_tile: tile,
                ukeire,
                ukeire_count,
            });
        }
    }

    out.sort_by(|a, b| {
        b.ukeire_count
            .cmp(&a.ukeire_count)
            .then(a.discard_tile.cmp(&b.discard_tile))
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_of(spec: &str) -> HandCount {
        let tiles = crate::parse::parse_tiles(spec).unwrap();
        HandCount::from_hand(&tiles, &[]).unwrap()
    }

    #[test]
    fn shanpon_wait_after_best_discard() {
        let hand = hand_of("123456789m11223z");
        let results = calculate_efficiency(&hand);

        let best = results
            .iter()
            .find(|r| r.discard_tile == Tile::try_from("3z").unwrap())
            .expect("discarding the lone honor should reach the shanpon wait");

        let mut ukeire = best.ukeire.clone();
        ukeire.sort();
        assert_eq!(
            ukeire,
            vec![Tile::try_from("1z").unwrap(), Tile::try_from("2z").unwrap()]
        );
        assert_eq!(best.ukeire_count, 4);
    }

    #[test]
    fn results_are_sorted_by_descending_ukeire_count() {
        let hand = hand_of("123456789m11223z");
        let results = calculate_efficiency(&hand);
        for pair in results.windows(2) {
            assert!(pair[0].ukeire_count >= pair[1].ukeire_count);
        }
    }

    #[test]
    fn discards_with_no_progress_are_omitted() {
        let hand = hand_of("123456789m11223z");
        let results = calculate_efficiency(&hand);
        assert!(results.iter().all(|r| !r.ukeire.is_empty()));
    }
}
