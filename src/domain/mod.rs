pub mod suggestion;

pub use suggestion::{PropertyGroup, Suggestion, SuggestionKey, SuggestionSummary, VerificationStatus};
