// src/store/collection.rs

use crate::domain::{PropertyGroup, Suggestion, SuggestionKey, SuggestionSummary, VerificationStatus};
use std::sync::Arc;

/// A snapshot shape the reducer can operate on.
///
/// Implementors are cheap to clone (reference counted) and never mutated in
/// place: `with_status` builds a new snapshot that shares every entry it did
/// not touch with `self`.
pub trait SuggestionCollection: Clone + Default {
    /// What the backend hands over on initial fetch.
    type Data;

    fn from_data(data: Self::Data) -> Self;

    /// Returns the updated snapshot, or `None` when no entry matches `key`.
    fn with_status(&self, key: &SuggestionKey, status: VerificationStatus) -> Option<Self>;

    /// Number of suggestions, across groups for grouped snapshots.
    fn suggestion_count(&self) -> usize;

    fn status_of(&self, key: &SuggestionKey) -> Option<VerificationStatus>;
}

/// Rebuilds `entries` with every matching entry replaced by `update(entry)`.
/// Unmatched entries are carried over as the same `Arc`.
fn replace_matching<T>(
    entries: &Arc<[Arc<T>]>,
    mut update: impl FnMut(&T) -> Option<T>,
) -> Option<Arc<[Arc<T>]>> {
    let mut changed = false;
    let next: Vec<Arc<T>> = entries
        .iter()
        .map(|entry| match update(&**entry) {
            Some(replacement) => {
                changed = true;
                Arc::new(replacement)
            }
            None => Arc::clone(entry),
        })
        .collect();

    changed.then(|| next.into())
}

/// Archived view: one flat list, each suggestion carrying its property id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatSuggestions(Arc<[Arc<Suggestion>]>);

impl FlatSuggestions {
    pub fn entries(&self) -> &[Arc<Suggestion>] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Suggestion> {
        self.0.iter().map(|s| s.as_ref())
    }
}

impl Default for FlatSuggestions {
    fn default() -> Self {
        Self(Arc::from(Vec::new()))
    }
}

impl SuggestionCollection for FlatSuggestions {
    type Data = Vec<Suggestion>;

    fn from_data(data: Self::Data) -> Self {
        Self(data.into_iter().map(Arc::new).collect())
    }

    fn with_status(&self, key: &SuggestionKey, status: VerificationStatus) -> Option<Self> {
        replace_matching(&self.0, |s| {
            key.matches(s.property_id, &s.case_id).then(|| Suggestion {
                verification: status,
                ..s.clone()
            })
        })
        .map(Self)
    }

    fn suggestion_count(&self) -> usize {
        self.0.len()
    }

    fn status_of(&self, key: &SuggestionKey) -> Option<VerificationStatus> {
        self.iter()
            .find(|s| key.matches(s.property_id, &s.case_id))
            .map(|s| s.verification)
    }
}

/// New-suggestions view: suggestions grouped under their CARES property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedSuggestions(Arc<[Arc<PropertyGroup>]>);

impl GroupedSuggestions {
    pub fn groups(&self) -> &[Arc<PropertyGroup>] {
        &self.0
    }

    pub fn group(&self, property_id: i64) -> Option<&PropertyGroup> {
        self.0
            .iter()
            .map(|g| g.as_ref())
            .find(|g| g.property_id == property_id)
    }
}

impl Default for GroupedSuggestions {
    fn default() -> Self {
        Self(Arc::from(Vec::new()))
    }
}

impl SuggestionCollection for GroupedSuggestions {
    type Data = Vec<PropertyGroup>;

    fn from_data(data: Self::Data) -> Self {
        Self(data.into_iter().map(Arc::new).collect())
    }

    fn with_status(&self, key: &SuggestionKey, status: VerificationStatus) -> Option<Self> {
        replace_matching(&self.0, |group| {
            let property_id = group.property_id;
            let suggestions = replace_matching(&group.suggestions, |s: &SuggestionSummary| {
                key.matches(property_id, &s.case_id).then(|| SuggestionSummary {
                    verification: status,
                    ..s.clone()
                })
            })?;

            Some(PropertyGroup {
                suggestions,
                ..group.clone()
            })
        })
        .map(Self)
    }

    fn suggestion_count(&self) -> usize {
        self.0.iter().map(|g| g.len()).sum()
    }

    fn status_of(&self, key: &SuggestionKey) -> Option<VerificationStatus> {
        self.0.iter().find_map(|g| {
            g.suggestions
                .iter()
                .find(|s| key.matches(g.property_id, &s.case_id))
                .map(|s| s.verification)
        })
    }
}
