mod context_json;

pub use context_json::{
    build_context_json, highlights_json, play_by_play_json, ContextRequest, ContextResponse,
    HighlightsResponse, MatchRequest, PlayByPlayResponse, SCHEMA_VERSION,
};
