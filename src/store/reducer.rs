// src/store/reducer.rs

use crate::domain::{SuggestionKey, VerificationStatus};
use crate::store::collection::SuggestionCollection;

/// Inputs to [`reduce`].
#[derive(Debug, Clone)]
pub enum Transition<D> {
    /// Replace the whole snapshot with freshly fetched data.
    Init(D),
    SetStatus {
        key: SuggestionKey,
        status: VerificationStatus,
    },
}

impl<D> Transition<D> {
    pub fn set_status(key: SuggestionKey, status: VerificationStatus) -> Self {
        Transition::SetStatus { key, status }
    }
}

/// What a transition did to the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Replaced,
    Updated,
    /// `SetStatus` matched nothing; the input snapshot is returned as is.
    Unchanged,
}

/// Pure transition function: `(snapshot, transition) -> snapshot`.
///
/// `state` is never mutated. On `Unchanged` the returned snapshot shares its
/// storage with `state`.
pub fn reduce<C: SuggestionCollection>(state: &C, transition: Transition<C::Data>) -> (C, Outcome) {
    match transition {
        Transition::Init(data) => (C::from_data(data), Outcome::Replaced),
        Transition::SetStatus { key, status } => match state.with_status(&key, status) {
            Some(next) => (next, Outcome::Updated),
            None => (state.clone(), Outcome::Unchanged),
        },
    }
}
