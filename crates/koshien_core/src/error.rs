use thiserror::Error;

/// Errors surfaced at the JSON API / CLI boundary.
///
/// The engine itself never fails on malformed match data - bad at-bat codes,
/// missing lineups and score mismatches are recovered by skip-and-continue
/// inside the extraction pipeline. `CoreError` exists for the outer surface:
/// undecodable requests and references to things that do not exist.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            CoreError::DeserializationError(err.to_string())
        } else {
            CoreError::SerializationError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
