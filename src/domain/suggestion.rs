// src/domain/suggestion.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Human judgement on a suggestion.
///
/// The backend encodes it as a small integer; the discriminants below are
/// that encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum VerificationStatus {
    Confirmed = 0,
    Rejected = 1,
    Unverified = 2,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Confirmed => "confirmed",
            VerificationStatus::Rejected => "rejected",
            VerificationStatus::Unverified => "unverified",
        }
    }
}

impl TryFrom<u8> for VerificationStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(VerificationStatus::Confirmed),
            1 => Ok(VerificationStatus::Rejected),
            2 => Ok(VerificationStatus::Unverified),
            other => Err(format!("unknown verification status {other}")),
        }
    }
}

impl From<VerificationStatus> for u8 {
    fn from(status: VerificationStatus) -> Self {
        status as u8
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A candidate match between a CARES property and an eviction case,
/// as listed in the flat (archived) view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "id")]
    pub property_id: i64,
    #[serde(rename = "caseID")]
    pub case_id: String,
    pub address: String,
    pub verification: VerificationStatus,
}

/// One row inside a [`PropertyGroup`]. The owning property id lives on the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSummary {
    #[serde(rename = "caseID")]
    pub case_id: String,
    pub address: String,
    pub verification: VerificationStatus,
}

/// Suggestions near one CARES property, in server order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyGroup {
    #[serde(rename = "id")]
    pub property_id: i64,
    #[serde(rename = "propertyName")]
    pub property_name: String,
    pub suggestions: Arc<[Arc<SuggestionSummary>]>,
}

impl PropertyGroup {
    pub fn new(
        property_id: i64,
        property_name: impl Into<String>,
        suggestions: Vec<SuggestionSummary>,
    ) -> Self {
        Self {
            property_id,
            property_name: property_name.into(),
            suggestions: suggestions.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn unverified_count(&self) -> usize {
        self.suggestions
            .iter()
            .filter(|s| s.verification == VerificationStatus::Unverified)
            .count()
    }
}

/// Identifies the target of a status transition.
///
/// `property_id` narrows the match to one property; `None` matches the case id
/// under any property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuggestionKey {
    pub property_id: Option<i64>,
    pub case_id: String,
}

impl SuggestionKey {
    pub fn new(property_id: i64, case_id: impl Into<String>) -> Self {
        Self {
            property_id: Some(property_id),
            case_id: case_id.into(),
        }
    }

    pub fn by_case(case_id: impl Into<String>) -> Self {
        Self {
            property_id: None,
            case_id: case_id.into(),
        }
    }

    pub fn matches(&self, property_id: i64, case_id: &str) -> bool {
        self.case_id == case_id && self.property_id.map_or(true, |id| id == property_id)
    }
}

impl fmt::Display for SuggestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.property_id {
            Some(id) => write!(f, "{id}/{}", self.case_id),
            None => write!(f, "*/{}", self.case_id),
        }
    }
}
