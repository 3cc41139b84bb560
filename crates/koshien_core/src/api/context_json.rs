//! JSON entry points for the narrative pipeline.
//!
//! String-in/string-out wrappers so the browser frontend (and the CLI) can
//! drive the engine without linking against the model types. Requests carry
//! a `schema_version` so the wire format can evolve.

use serde::{Deserialize, Serialize};

use crate::analysis::{extract_highlights, Highlight};
use crate::context::{build_match_context, MatchContext};
use crate::engine::play_by_play_text;
use crate::error::{CoreError, Result};
use crate::models::{MatchRecord, TeamDirectory, TeamProfile, Tournament};

pub const SCHEMA_VERSION: u8 = 1;

fn check_schema(version: u8) -> Result<()> {
    if version == SCHEMA_VERSION {
        Ok(())
    } else {
        Err(CoreError::InvalidParameter(format!(
            "unsupported schema_version {version}, expected {SCHEMA_VERSION}"
        )))
    }
}

/// Request for a full match context.
#[derive(Debug, Deserialize)]
pub struct ContextRequest {
    pub schema_version: u8,
    pub match_id: String,
    pub winner: String,
    pub tournament: Tournament,
    /// Overrides the built-in team directory when present.
    #[serde(default)]
    pub team_profiles: Option<Vec<TeamProfile>>,
}

#[derive(Debug, Serialize)]
pub struct ContextResponse {
    pub schema_version: u8,
    pub context: MatchContext,
}

/// Builds the match context for a finished match and returns it as JSON.
pub fn build_context_json(request_json: &str) -> Result<String> {
    let request: ContextRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    let directory = match request.team_profiles {
        Some(profiles) => TeamDirectory::from_profiles(profiles),
        None => TeamDirectory::builtin().clone(),
    };
    let context = build_match_context(
        &request.match_id,
        &request.winner,
        &request.tournament,
        &directory,
    )?;
    let response = ContextResponse { schema_version: SCHEMA_VERSION, context };
    Ok(serde_json::to_string(&response)?)
}

/// Request operating on a single standalone match record.
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub record: MatchRecord,
    pub winner: String,
}

#[derive(Debug, Serialize)]
pub struct HighlightsResponse {
    pub schema_version: u8,
    pub highlights: Vec<Highlight>,
    pub key_players: Vec<String>,
}

/// Extracts highlights from one match record, as JSON.
pub fn highlights_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;
    let report = extract_highlights(&request.record, &request.winner);
    let response = HighlightsResponse {
        schema_version: SCHEMA_VERSION,
        highlights: report.highlights,
        key_players: report.key_players.into_iter().collect(),
    };
    Ok(serde_json::to_string(&response)?)
}

#[derive(Debug, Serialize)]
pub struct PlayByPlayResponse {
    pub schema_version: u8,
    pub text: String,
}

/// Renders the play-by-play transcript for one match record, as JSON.
pub fn play_by_play_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;
    let response = PlayByPlayResponse {
        schema_version: SCHEMA_VERSION,
        text: play_by_play_text(&request.record),
    };
    Ok(serde_json::to_string(&response)?)
}
