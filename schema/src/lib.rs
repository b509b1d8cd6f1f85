// pokemon-duel schema - shared data definitions
// Stats, moves and items are plain values that both the battle engine and
// its RON configuration files speak.

pub use item_types::*;
pub use move_types::*;
pub use stats::*;

pub mod item_types;
pub mod move_types;
pub mod stats;
