//! Data model: match records, team metadata, tournament bracket slice.

pub mod match_record;
pub mod team;
pub mod tournament;

pub use match_record::{
    split_at_bats, split_runner_tail, BattingSlot, Decision, GameBattingStats, MatchRecord,
    OrderKey, PitcherOuting, Side, SubKind, TeamBox,
};
pub use team::{
    PlayerBattingTotals, PlayerPitchingTotals, StarterRef, TeamDirectory, TeamProfile, TeamRecord,
};
pub use tournament::{MatchId, Tournament};
