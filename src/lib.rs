//! Client-side review of eviction-match suggestions for CARES properties.
//!
//! [`store`] holds the pure snapshot reducer, [`remote`] talks to the
//! backend and [`session::ReviewSession`] glues the two together.

pub mod config;
pub mod domain;
pub mod errors;
pub mod focus;
pub mod maps;
pub mod remote;
pub mod session;
pub mod store;

pub use config::Config;
pub use domain::{PropertyGroup, Suggestion, SuggestionKey, SuggestionSummary, VerificationStatus};
pub use errors::{Result, SuggestionError};
pub use focus::FocusTracker;
pub use remote::{Action, VerificationClient, VerificationService};
pub use session::{LoadState, Notification, PendingAction, ReviewSession, Severity};
pub use store::{
    FlatSuggestions, GroupedSuggestions, Outcome, SuggestionCollection, SuggestionStore, Transition,
};

#[cfg(test)]
mod tests;
