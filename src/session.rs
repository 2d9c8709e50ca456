// src/session.rs

use crate::domain::SuggestionKey;
use crate::errors::{Result, SuggestionError};
use crate::focus::FocusTracker;
use crate::maps::directions_url;
use crate::remote::{Action, VerificationService};
use crate::store::{FlatSuggestions, GroupedSuggestions, Outcome, SuggestionStore, Transition};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loaded,
    /// The last fetch failed. Stores keep whatever they held before it.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A message meant for the person reviewing suggestions.
#[derive(Debug, Clone)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Handle for an action that was sent to the backend but not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    pub action: Action,
    pub key: SuggestionKey,
    token: u64,
}

impl PendingAction {
    pub fn case_id(&self) -> &str {
        &self.key.case_id
    }
}

/// One reviewer's view of the suggestions: the two stores, the focus tracker
/// and the bookkeeping that ties remote acknowledgements to store updates.
///
/// Statuses only change after the backend acknowledged an action. At most one
/// action per suggestion may be pending, and that stays true across reloads.
/// Responses whose token was superseded, or that arrive after teardown, are
/// dropped.
#[derive(Debug)]
pub struct ReviewSession {
    new_suggestions: SuggestionStore<GroupedSuggestions>,
    archived: SuggestionStore<FlatSuggestions>,
    focus: FocusTracker,
    in_flight: HashMap<SuggestionKey, u64>,
    next_token: u64,
    load_state: LoadState,
    num_suggestions: u64,
    notifications: Vec<Notification>,
    mounted: bool,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewSession {
    pub fn new() -> Self {
        Self {
            new_suggestions: SuggestionStore::new(),
            archived: SuggestionStore::new(),
            focus: FocusTracker::new(),
            in_flight: HashMap::new(),
            next_token: 0,
            load_state: LoadState::NotLoaded,
            num_suggestions: 0,
            notifications: Vec::new(),
            mounted: true,
        }
    }

    pub fn new_suggestions(&self) -> &GroupedSuggestions {
        self.new_suggestions.snapshot()
    }

    pub fn archived_suggestions(&self) -> &FlatSuggestions {
        self.archived.snapshot()
    }

    pub fn focus(&self) -> &FocusTracker {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut FocusTracker {
        &mut self.focus
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Count reported by the backend on the last successful load.
    pub fn num_suggestions(&self) -> u64 {
        self.num_suggestions
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn is_pending(&self, cares_id: i64, case_id: &str) -> bool {
        self.in_flight
            .contains_key(&SuggestionKey::new(cares_id, case_id))
    }

    /// Fetches everything and re-initializes both stores.
    ///
    /// On failure nothing is initialized with placeholder data; the state
    /// becomes `Failed` and the error is also recorded as a notification.
    ///
    /// Actions still in flight stay registered; their acknowledgements apply
    /// to the fresh snapshot. A torn-down session does not load at all.
    pub fn load<S: VerificationService + ?Sized>(&mut self, service: &S) -> Result<()> {
        if !self.mounted {
            debug!("skipping load for a torn-down session");
            return Ok(());
        }

        match service.fetch_all() {
            Ok(resp) => {
                self.new_suggestions.dispatch(Transition::Init(resp.suggestions));
                self.archived.dispatch(Transition::Init(resp.archived_suggestions));
                self.num_suggestions = resp.num_suggestions;
                self.load_state = LoadState::Loaded;

                info!(
                    in_flight = self.in_flight.len(),
                    num_suggestions = self.num_suggestions,
                    "suggestions loaded"
                );
                Ok(())
            }
            Err(e) => {
                self.load_state = LoadState::Failed;
                self.notify(Severity::Error, format!("Could not load suggestions: {e}"));
                Err(e)
            }
        }
    }

    /// Registers an action as in flight. Fails if another action for the
    /// same suggestion has not resolved yet.
    pub fn begin(&mut self, action: Action, cares_id: i64, case_id: &str) -> Result<PendingAction> {
        let key = SuggestionKey::new(cares_id, case_id);
        if self.in_flight.contains_key(&key) {
            return Err(SuggestionError::ActionInFlight {
                case_id: case_id.to_string(),
            });
        }

        self.next_token += 1;
        let token = self.next_token;
        self.in_flight.insert(key.clone(), token);
        debug!(%action, %key, token, "action started");

        Ok(PendingAction { action, key, token })
    }

    /// Resolves a pending action with the backend's answer.
    ///
    /// `Ok` applies the action's target status to both stores, also after a
    /// reload in between. A ticket that is no longer the latest for its key,
    /// or one resolved after teardown, yields `Outcome::Unchanged`.
    /// `Err` leaves the stores alone, records a notification and is passed
    /// back to the caller.
    pub fn complete(&mut self, pending: PendingAction, result: Result<()>) -> Result<Outcome> {
        let latest = self.in_flight.get(&pending.key) == Some(&pending.token);
        if latest {
            self.in_flight.remove(&pending.key);
        }

        if let Err(e) = result {
            self.notify(
                Severity::Error,
                format!(
                    "Could not {} case {}: {e}",
                    pending.action,
                    pending.case_id()
                ),
            );
            return Err(e);
        }

        if !self.mounted || !latest {
            debug!(action = %pending.action, key = %pending.key, "discarding stale response");
            return Ok(Outcome::Unchanged);
        }

        let status = pending.action.target();
        let new_outcome = self
            .new_suggestions
            .dispatch(Transition::set_status(pending.key.clone(), status));
        let archived_outcome = self
            .archived
            .dispatch(Transition::set_status(pending.key.clone(), status));

        if new_outcome == Outcome::Updated || archived_outcome == Outcome::Updated {
            Ok(Outcome::Updated)
        } else {
            // filtered out of both views
            debug!(key = %pending.key, "acknowledged suggestion not present locally");
            Ok(Outcome::Unchanged)
        }
    }

    /// Sends `action` to the backend and applies it locally once acknowledged.
    pub fn verify<S: VerificationService + ?Sized>(
        &mut self,
        service: &S,
        action: Action,
        cares_id: i64,
        case_id: &str,
    ) -> Result<Outcome> {
        let pending = match self.begin(action, cares_id, case_id) {
            Ok(pending) => pending,
            Err(e) => {
                self.notify(Severity::Info, e.to_string());
                return Err(e);
            }
        };

        let result = service.submit(action, cares_id, case_id);
        self.complete(pending, result)
    }

    pub fn confirm<S: VerificationService + ?Sized>(
        &mut self,
        service: &S,
        cares_id: i64,
        case_id: &str,
    ) -> Result<Outcome> {
        self.verify(service, Action::Confirm, cares_id, case_id)
    }

    pub fn reject<S: VerificationService + ?Sized>(
        &mut self,
        service: &S,
        cares_id: i64,
        case_id: &str,
    ) -> Result<Outcome> {
        self.verify(service, Action::Reject, cares_id, case_id)
    }

    pub fn undo<S: VerificationService + ?Sized>(
        &mut self,
        service: &S,
        cares_id: i64,
        case_id: &str,
    ) -> Result<Outcome> {
        self.verify(service, Action::Undo, cares_id, case_id)
    }

    /// Marks the suggestion as focused and resolves its directions link.
    /// Focus is set before the lookup, so it sticks even if the lookup fails.
    pub fn open_external<S: VerificationService + ?Sized>(
        &mut self,
        service: &S,
        cares_id: i64,
        case_id: &str,
    ) -> Result<Url> {
        self.focus.focus(case_id);

        let link = service
            .locations(cares_id, case_id)
            .and_then(|loc| directions_url(loc.cares_location, loc.eviction_location));

        if let Err(e) = &link {
            self.notify(
                Severity::Error,
                format!("Could not open map for case {case_id}: {e}"),
            );
        }
        link
    }

    /// The view is gone. Late responses are discarded from here on.
    pub fn teardown(&mut self) {
        self.mounted = false;
        self.focus.clear();
        self.in_flight.clear();
        self.new_suggestions.detach();
        self.archived.detach();
    }

    /// Nobody is listening after teardown; the message is only logged.
    fn notify(&mut self, severity: Severity, message: String) {
        match severity {
            Severity::Error => warn!("{message}"),
            Severity::Info => info!("{message}"),
        }
        if !self.mounted {
            return;
        }
        self.notifications.push(Notification {
            severity,
            message,
            at: Utc::now(),
        });
    }
}
