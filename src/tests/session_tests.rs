// src/tests/session_tests.rs

use crate::errors::SuggestionError;
use crate::tests::utils::{sample_response, FakeService};
use crate::{
    Action, LoadState, Outcome, ReviewSession, Severity, SuggestionCollection, SuggestionKey,
    VerificationStatus,
};

fn loaded_session(fake: &FakeService) -> ReviewSession {
    let mut session = ReviewSession::new();
    session.load(fake).unwrap();
    session
}

fn new_status(session: &ReviewSession, cares_id: i64, case_id: &str) -> Option<VerificationStatus> {
    session
        .new_suggestions()
        .status_of(&SuggestionKey::new(cares_id, case_id))
}

#[test]
fn load_initializes_both_views() {
    let fake = FakeService::with_fetch(sample_response());
    let session = loaded_session(&fake);

    assert_eq!(session.load_state(), LoadState::Loaded);
    assert_eq!(session.num_suggestions(), 3);
    assert_eq!(session.new_suggestions().groups().len(), 2);
    assert_eq!(session.archived_suggestions().suggestion_count(), 1);
}

#[test]
fn confirm_applies_only_after_acknowledgement() {
    let fake = FakeService::with_fetch(sample_response());
    let mut session = loaded_session(&fake);

    let outcome = session.confirm(&fake, 2, "C1").unwrap();

    assert_eq!(outcome, Outcome::Updated);
    assert_eq!(new_status(&session, 2, "C1"), Some(VerificationStatus::Confirmed));
    assert_eq!(new_status(&session, 1, "C1"), Some(VerificationStatus::Unverified));
    assert_eq!(fake.calls.borrow().as_slice(), &[(Action::Confirm, 2, "C1".to_string())]);
}

#[test]
fn failed_remote_call_leaves_state_untouched() {
    let fake = FakeService::with_fetch(sample_response());
    let mut session = loaded_session(&fake);
    let before_new = session.new_suggestions().clone();
    let before_archived = session.archived_suggestions().clone();

    fake.fail_next_submit(SuggestionError::Network("connection reset".into()));
    let err = session.confirm(&fake, 2, "C1").unwrap_err();

    assert!(matches!(err, SuggestionError::Network(_)));
    assert_eq!(session.new_suggestions(), &before_new);
    assert_eq!(session.archived_suggestions(), &before_archived);
    assert!(!session.is_pending(2, "C1"));

    let notes = session.notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Error);
    assert!(notes[0].message.contains("confirm"));

    // user retries by hand
    session.confirm(&fake, 2, "C1").unwrap();
    assert_eq!(new_status(&session, 2, "C1"), Some(VerificationStatus::Confirmed));
}

#[test]
fn undo_on_archived_entry_updates_flat_view() {
    let fake = FakeService::with_fetch(sample_response());
    let mut session = loaded_session(&fake);

    assert_eq!(session.undo(&fake, 2, "A9").unwrap(), Outcome::Updated);

    let key = SuggestionKey::new(2, "A9");
    assert_eq!(
        session.archived_suggestions().status_of(&key),
        Some(VerificationStatus::Unverified)
    );
}

#[test]
fn acknowledged_but_absent_case_is_a_no_op() {
    let fake = FakeService::with_fetch(sample_response());
    let mut session = loaded_session(&fake);
    let before = session.new_suggestions().clone();

    assert_eq!(session.reject(&fake, 9, "filtered-out").unwrap(), Outcome::Unchanged);
    assert_eq!(session.new_suggestions(), &before);
    assert!(session.notifications().is_empty());
}

#[test]
fn second_action_on_pending_key_is_refused() {
    let fake = FakeService::with_fetch(sample_response());
    let mut session = loaded_session(&fake);

    let pending = session.begin(Action::Confirm, 2, "C2").unwrap();
    assert!(session.is_pending(2, "C2"));

    let err = session.verify(&fake, Action::Undo, 2, "C2").unwrap_err();
    assert!(matches!(err, SuggestionError::ActionInFlight { ref case_id } if case_id == "C2"));
    assert!(fake.calls.borrow().is_empty());

    // other suggestions are not blocked
    session.reject(&fake, 2, "C1").unwrap();

    assert_eq!(session.complete(pending, Ok(())).unwrap(), Outcome::Updated);
    assert!(!session.is_pending(2, "C2"));
    assert_eq!(new_status(&session, 2, "C2"), Some(VerificationStatus::Confirmed));
}

#[test]
fn pending_action_survives_reload() {
    let fake = FakeService::with_fetch(sample_response());
    let mut session = loaded_session(&fake);

    let pending = session.begin(Action::Confirm, 1, "C1").unwrap();

    fake.push_fetch(Ok(sample_response()));
    session.load(&fake).unwrap();

    // the confirm is still on the wire, so a conflicting reject must wait
    assert!(session.is_pending(1, "C1"));
    assert!(matches!(
        session.begin(Action::Reject, 1, "C1"),
        Err(SuggestionError::ActionInFlight { .. })
    ));

    // acknowledgement lands on the reloaded snapshot
    assert_eq!(session.complete(pending, Ok(())).unwrap(), Outcome::Updated);
    assert!(!session.is_pending(1, "C1"));
    assert_eq!(new_status(&session, 1, "C1"), Some(VerificationStatus::Confirmed));
}

#[test]
fn failed_load_does_not_initialize_with_empty_data() {
    let fake = FakeService::default();
    fake.push_fetch(Err(SuggestionError::MalformedResponse("expected `suggestions`".into())));
    let mut session = ReviewSession::new();

    assert!(session.load(&fake).is_err());
    assert_eq!(session.load_state(), LoadState::Failed);
    assert!(session.new_suggestions().groups().is_empty());
    assert_eq!(session.drain_notifications().len(), 1);
    assert!(session.notifications().is_empty());
}

#[test]
fn failed_reload_keeps_last_good_snapshot() {
    let fake = FakeService::with_fetch(sample_response());
    let mut session = loaded_session(&fake);
    let before = session.new_suggestions().clone();

    fake.push_fetch(Err(SuggestionError::Network("timed out".into())));
    assert!(session.load(&fake).is_err());

    assert_eq!(session.load_state(), LoadState::Failed);
    assert_eq!(session.new_suggestions(), &before);
}

#[test]
fn teardown_drops_late_responses_and_focus() {
    let fake = FakeService::with_fetch(sample_response());
    let mut session = loaded_session(&fake);

    session.open_external(&fake, 1, "C1").unwrap();
    assert_eq!(session.focus().focused(), Some("C1"));

    let pending = session.begin(Action::Confirm, 1, "C1").unwrap();
    session.teardown();

    assert_eq!(session.focus().focused(), None);
    assert_eq!(session.complete(pending, Ok(())).unwrap(), Outcome::Unchanged);
    assert_eq!(new_status(&session, 1, "C1"), Some(VerificationStatus::Unverified));
}

#[test]
fn focus_survives_failed_map_lookup() {
    let fake = FakeService::with_fetch(sample_response());
    let mut session = loaded_session(&fake);

    assert!(session.open_external(&fake, 1, "missing").is_err());
    assert!(session.focus().is_focused("missing"));
    assert_eq!(session.notifications().len(), 1);
}

#[test]
fn torn_down_session_does_not_load() {
    let fake = FakeService::with_fetch(sample_response());
    let mut session = ReviewSession::new();
    session.teardown();

    session.load(&fake).unwrap();

    assert_eq!(session.load_state(), LoadState::NotLoaded);
    assert_eq!(session.num_suggestions(), 0);
    assert!(session.new_suggestions().groups().is_empty());
    // the scripted fetch was never consumed
    assert_eq!(fake.fetches.borrow().len(), 1);
}

#[test]
fn failure_after_teardown_is_not_queued_as_notification() {
    let fake = FakeService::with_fetch(sample_response());
    let mut session = loaded_session(&fake);

    let pending = session.begin(Action::Reject, 2, "C2").unwrap();
    session.teardown();

    let err = session
        .complete(pending, Err(SuggestionError::Network("connection reset".into())))
        .unwrap_err();

    assert!(matches!(err, SuggestionError::Network(_)));
    assert!(session.notifications().is_empty());
}
