mod client;
pub mod models;

pub use client::VerificationClient;
pub use models::{SuggestionLocations, SuggestionsResponse, VerificationRequest};

use crate::domain::VerificationStatus;
use crate::errors::Result;
use std::fmt;

/// State-changing verification calls the backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Confirm,
    Reject,
    Undo,
}

impl Action {
    /// Status the suggestion takes once the backend acknowledges the action.
    pub fn target(&self) -> VerificationStatus {
        match self {
            Action::Confirm => VerificationStatus::Confirmed,
            Action::Reject => VerificationStatus::Rejected,
            Action::Undo => VerificationStatus::Unverified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Confirm => "confirm",
            Action::Reject => "reject",
            Action::Undo => "undo",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The verification backend, as seen by the review session.
///
/// Implementations only talk to the backend; applying the result to a store
/// is the caller's job.
pub trait VerificationService {
    fn fetch_all(&self) -> Result<SuggestionsResponse>;

    fn submit(&self, action: Action, cares_id: i64, case_id: &str) -> Result<()>;

    fn locations(&self, cares_id: i64, case_id: &str) -> Result<SuggestionLocations>;

    fn confirm(&self, cares_id: i64, case_id: &str) -> Result<()> {
        self.submit(Action::Confirm, cares_id, case_id)
    }

    fn reject(&self, cares_id: i64, case_id: &str) -> Result<()> {
        self.submit(Action::Reject, cares_id, case_id)
    }

    fn undo(&self, cares_id: i64, case_id: &str) -> Result<()> {
        self.submit(Action::Undo, cares_id, case_id)
    }
}
