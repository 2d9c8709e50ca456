// errors.rs
use thiserror::Error;

/// Errors surfaced by the remote client and the review session.
///
/// A `SetStatus` that matches nothing is not an error; the reducer reports it
/// as [`crate::store::Outcome::Unchanged`].
#[derive(Debug, Error)]
pub enum SuggestionError {
    /// The call never completed, or the backend answered with a non-2xx status.
    #[error("Network error: {0}")]
    Network(String),

    /// The body could not be parsed into the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Another confirm/reject/undo for the same suggestion is still pending.
    #[error("An action for case {case_id} is already in flight")]
    ActionInFlight { case_id: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SuggestionError>;

impl From<reqwest::Error> for SuggestionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SuggestionError::MalformedResponse(err.to_string())
        } else {
            SuggestionError::Network(err.to_string())
        }
    }
}
