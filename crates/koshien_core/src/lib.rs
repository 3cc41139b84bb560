//! # koshien_core - High-School Baseball Box-Score Narrative Engine
//!
//! This library reconstructs finished tournament games from their box scores:
//! it translates Japanese at-bat codes into structured plays, replays each
//! half-inning deterministically, extracts highlights, and assembles a
//! ready-to-render match context with JSON API for easy integration with a
//! web frontend.
//!
//! ## Features
//! - 100% deterministic reconstruction (same box score = same narrative)
//! - Translator for compact Japanese scorebook notation
//! - Highlight extraction with first-score / go-ahead / walk-off detection
//! - JSON API for easy integration

pub mod analysis;
pub mod api;
pub mod context;
pub mod engine;
pub mod error;
pub mod models;

// Re-export main API functions
pub use api::{
    build_context_json, highlights_json, play_by_play_json, ContextRequest, ContextResponse,
    HighlightsResponse, MatchRequest, PlayByPlayResponse, SCHEMA_VERSION,
};
pub use error::{CoreError, Result};

// Re-export the model layer
pub use models::{
    BattingSlot, Decision, GameBattingStats, MatchId, MatchRecord, OrderKey, PitcherOuting, Side,
    SubKind, TeamBox, TeamDirectory, TeamProfile, TeamRecord, Tournament,
};

// Re-export the reconstruction engine
pub use engine::{
    play_by_play_text, simulate, translate, HalfInningOutcome, PlateAppearance, PlayKind,
    PlayOutcome,
};

// Re-export analysis artifacts
pub use analysis::{
    box_score_text, classify_game, extract_highlights, journey_summary, lineup_changes,
    next_opponent, player_season_summary, team_rank, GameStory, GameSummary, Highlight,
    HighlightCategory, HighlightReport, NextOpponent, OpponentSlot, TeamRank,
};

pub use context::{build_match_context, MatchContext};
