//! Match context assembly.
//!
//! Combines the derived artifacts (highlights, play-by-play, box score,
//! journeys, ranks) with static team metadata into one immutable snapshot.
//! The context is the sole input handed to the external narrative
//! collaborator; nothing in it is shared-mutable after construction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::analysis::{
    box_score_text, extract_highlights, journey_summary, lineup_changes, next_opponent, team_rank,
    Highlight, NextOpponent, OpponentSlot, TeamRank,
};
use crate::engine::play_by_play_text;
use crate::error::{CoreError, Result};
use crate::models::{MatchRecord, TeamDirectory, TeamProfile, Tournament};

/// Immutable factual grounding for one match's narrative generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchContext {
    pub match_id: String,
    pub winner: String,
    pub loser: String,
    pub winner_rank: TeamRank,
    pub loser_rank: TeamRank,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_profile: Option<TeamProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loser_profile: Option<TeamProfile>,
    pub record: MatchRecord,
    pub highlights: Vec<Highlight>,
    pub key_players: BTreeSet<String>,
    pub play_by_play: String,
    pub box_score: String,
    pub winner_journey: String,
    pub loser_journey: String,
    pub winner_lineup_changes: String,
    pub loser_lineup_changes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_opponent: Option<NextOpponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_opponent_journey: Option<String>,
}

/// Builds the full context for a finished match.
///
/// Fails only on boundary problems (unknown match id, a winner that played
/// in neither slot); missing team metadata degrades to rank E and
/// placeholder strings per the engine-wide policy.
pub fn build_match_context(
    match_id: &str,
    winner: &str,
    tournament: &Tournament,
    directory: &TeamDirectory,
) -> Result<MatchContext> {
    let record = tournament
        .find_match(match_id)
        .ok_or_else(|| CoreError::NotFound(format!("match {match_id}")))?;
    if winner != record.away_team && winner != record.home_team {
        return Err(CoreError::InvalidParameter(format!(
            "winner {winner} did not play in match {match_id}"
        )));
    }
    let loser = record.team_name(record.side_of(winner).opponent()).to_string();

    let report = extract_highlights(record, winner);
    let rank_of = |team: &str| team_rank(directory.get(team), tournament.team_record(team));

    let next = next_opponent(winner, match_id, tournament, directory);
    let next_journey = next.as_ref().and_then(|n| match &n.opponent {
        OpponentSlot::Decided { name, .. } => Some(journey_summary(name, match_id, tournament)),
        _ => None,
    });

    Ok(MatchContext {
        match_id: match_id.to_string(),
        winner: winner.to_string(),
        loser: loser.clone(),
        winner_rank: rank_of(winner),
        loser_rank: rank_of(&loser),
        winner_profile: directory.get(winner).cloned(),
        loser_profile: directory.get(&loser).cloned(),
        highlights: report.highlights,
        key_players: report.key_players,
        play_by_play: play_by_play_text(record),
        box_score: box_score_text(record, winner),
        winner_journey: journey_summary(winner, match_id, tournament),
        loser_journey: journey_summary(&loser, match_id, tournament),
        winner_lineup_changes: lineup_changes(winner, record, tournament.team_record(winner)),
        loser_lineup_changes: lineup_changes(&loser, record, tournament.team_record(&loser)),
        next_opponent: next,
        next_opponent_journey: next_journey,
        record: record.clone(),
    })
}
