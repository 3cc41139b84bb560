//! Box-score replay engine: play translation, batting-order rotation,
//! half-inning simulation, whole-game play-by-play.

pub mod half_inning;
pub mod order;
pub mod play;
pub mod play_by_play;

pub use half_inning::{simulate, BatterIndices, HalfInningOutcome, PlateAppearance};
pub use order::{circular_cmp, sort_circular};
pub use play::{translate, PlayKind, PlayOutcome};
pub use play_by_play::play_by_play_text;
