mod collection;
mod reducer;

pub use collection::{FlatSuggestions, GroupedSuggestions, SuggestionCollection};
pub use reducer::{reduce, Outcome, Transition};

use tracing::{debug, warn};

/// Owner of one view's current snapshot.
///
/// All changes go through [`SuggestionStore::dispatch`], which runs the pure
/// reducer and swaps in the result.
#[derive(Debug, Default)]
pub struct SuggestionStore<C> {
    snapshot: C,
    initialized: bool,
    detached: bool,
}

impl<C: SuggestionCollection> SuggestionStore<C> {
    pub fn new() -> Self {
        Self {
            snapshot: C::default(),
            initialized: false,
            detached: false,
        }
    }

    pub fn snapshot(&self) -> &C {
        &self.snapshot
    }

    /// False until the first `Init`; an empty snapshot before that is not
    /// "no suggestions".
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn dispatch(&mut self, transition: Transition<C::Data>) -> Outcome {
        if self.detached {
            warn!("dropping transition for a detached store");
            return Outcome::Unchanged;
        }

        if let Transition::SetStatus { key, status } = &transition {
            debug!(%key, %status, "set status");
        }

        let (next, outcome) = reduce(&self.snapshot, transition);
        if outcome == Outcome::Replaced {
            self.initialized = true;
        }
        self.snapshot = next;
        outcome
    }

    /// The view went away; later dispatches are ignored.
    pub fn detach(&mut self) {
        self.detached = true;
    }
}
