pub mod count;
pub mod decomposition;
pub mod deficiency;
pub mod efficiency;
pub mod error;
pub mod parse;
pub mod tile;

pub use count::{Call, CallKind, HandCount, TileCount};
pub use deficiency::{
    calculate_normal_deficiency, calculate_seven_pairs_deficiency,
    calculate_thirteen_orphans_deficiency, shanten,
};
pub use efficiency::{calculate_efficiency, EfficiencyData};
pub use error::InvalidHand;
pub use tile::{Honor, Suit, Tile, Tiles};
