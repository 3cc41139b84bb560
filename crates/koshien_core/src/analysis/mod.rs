//! Whole-match analysis: highlight extraction, game classification, team
//! ranks, journey summaries, lineup diffs and box-score text.

pub mod box_score;
pub mod highlights;
pub mod journey;
pub mod lineup;
pub mod rank;
pub mod summary;

pub use box_score::{box_score_text, player_season_summary};
pub use highlights::{extract_highlights, Highlight, HighlightCategory, HighlightReport};
pub use journey::{journey_summary, next_opponent, NextOpponent, OpponentSlot};
pub use lineup::lineup_changes;
pub use rank::{team_rank, TeamRank};
pub use summary::{classify_game, GameStory, GameSummary};
