use std::collections::HashSet;

use chrono::NaiveDate;
use meetlog_core::domain::{Meeting, MeetingId, NewMeeting};
use meetlog_core::{CoreError, MeetingDraft};
use meetlog_store::error::{StoreError, StoreErrorKind};
use meetlog_store::sample::sample_meetings;
use meetlog_store::Store;

fn new_meeting(company: &str) -> NewMeeting {
    NewMeeting {
        company_name: company.to_string(),
        date: NaiveDate::from_ymd_opt(2025, 11, 20).expect("date"),
        contacts: Vec::new(),
        our_attendees: "Mehmet Yıldız".to_string(),
        content: "CNC lathe requirements.".to_string(),
        proposal_given: false,
        proposal_rejection_reason: None,
        follow_up_done: false,
    }
}

fn edit(meeting: &Meeting) -> Meeting {
    meeting.clone()
}

#[test]
fn create_update_delete_flow() {
    let mut store = Store::new();
    let now = 1_700_000_000;

    let created = store.create(now, new_meeting("ABC")).expect("create");
    assert_eq!(store.list()[0].id, created.id);
    assert!(!store.list()[0].proposal_given);
    assert!(store.list()[0].proposal_rejection_reason.is_none());
    assert_eq!(created.created_at, now);

    let mut changed = edit(&created);
    changed.proposal_given = true;
    changed.proposal_rejection_reason = Some("too expensive".to_string());
    store.update(changed).expect("update");

    let fetched = store.require(created.id).expect("get meeting");
    assert_eq!(
        fetched.proposal_rejection_reason.as_deref(),
        Some("too expensive")
    );
    assert_eq!(fetched.created_at, now);

    assert!(store.delete(created.id));
    let err = store.require(created.id).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
    assert!(store.get(created.id).is_none());
    assert!(store.list().iter().all(|m| m.id != created.id));
}

#[test]
fn create_prepends_and_assigns_unique_ids() {
    let mut store = Store::new();
    let mut ids = HashSet::new();
    for (offset, company) in ["First", "Second", "Third"].iter().enumerate() {
        let meeting = store
            .create(1_700_000_000 + offset as i64, new_meeting(company))
            .expect("create");
        assert!(ids.insert(meeting.id));
    }

    let companies: Vec<&str> = store
        .list()
        .iter()
        .map(|m| m.company_name.as_str())
        .collect();
    assert_eq!(companies, vec!["Third", "Second", "First"]);
    assert_eq!(store.len(), 3);
}

#[test]
fn create_rejects_invalid_input_without_mutation() {
    let mut store = Store::new();

    let mut blank = new_meeting("ABC");
    blank.company_name = "   ".to_string();
    let err = store.create(1, blank).unwrap_err();
    assert!(matches!(err, StoreError::Core(CoreError::EmptyCompanyName)));

    let mut stale = new_meeting("ABC");
    stale.proposal_rejection_reason = Some("leftover".to_string());
    let err = store.create(1, stale).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Core(CoreError::RejectionReasonWithoutProposal)
    ));

    assert!(store.is_empty());
}

#[test]
fn update_keeps_position_and_created_at() {
    let mut store = Store::new();
    let first = store.create(100, new_meeting("First")).expect("create");
    let second = store.create(200, new_meeting("Second")).expect("create");
    let third = store.create(300, new_meeting("Third")).expect("create");

    let mut changed = edit(&second);
    changed.company_name = "Second, renamed".to_string();
    changed.created_at = 999;
    let updated = store.update(changed).expect("update");
    assert_eq!(updated.created_at, 200);

    let ids: Vec<MeetingId> = store.list().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
    assert_eq!(store.list()[1].company_name, "Second, renamed");
    assert_eq!(store.list()[1].created_at, 200);
}

#[test]
fn update_clears_reason_when_proposal_is_unticked() {
    let mut store = Store::new();
    let mut input = new_meeting("ABC");
    input.proposal_given = true;
    input.proposal_rejection_reason = Some("too expensive".to_string());
    let created = store.create(10, input).expect("create");

    let mut changed = edit(&created);
    changed.proposal_given = false;
    let updated = store.update(changed).expect("update");
    assert!(updated.proposal_rejection_reason.is_none());
    assert!(store
        .require(created.id)
        .expect("get")
        .proposal_rejection_reason
        .is_none());
}

#[test]
fn update_through_draft_round_trip() {
    let mut store = Store::new();
    let created = store.create(10, new_meeting("ABC")).expect("create");

    let mut draft = MeetingDraft::from_meeting(&created);
    draft.follow_up_done = true;
    draft.proposal_given = true;
    draft.proposal_rejection_reason = "budget".to_string();
    let finalized = draft.finalize().expect("finalize");
    store
        .update(finalized.into_meeting(created.id, created.created_at))
        .expect("update");

    let mut draft = MeetingDraft::from_meeting(store.require(created.id).expect("get"));
    assert_eq!(draft.proposal_rejection_reason, "budget");
    draft.proposal_given = false;
    let finalized = draft.finalize().expect("finalize");
    let updated = store
        .update(finalized.into_meeting(created.id, created.created_at))
        .expect("update");
    assert!(updated.follow_up_done);
    assert!(!updated.proposal_given);
    assert!(updated.proposal_rejection_reason.is_none());
    assert_eq!(updated.created_at, 10);
}

#[test]
fn update_unknown_id_is_not_found() {
    let mut store = Store::new();
    store.create(10, new_meeting("ABC")).expect("create");
    let ghost = new_meeting("Ghost").into_meeting(MeetingId::new(), 10);
    let err = store.update(ghost).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].company_name, "ABC");
}

#[test]
fn update_with_invalid_fields_leaves_record_untouched() {
    let mut store = Store::new();
    let created = store.create(10, new_meeting("ABC")).expect("create");
    let mut changed = edit(&created);
    changed.content = String::new();
    let err = store.update(changed).unwrap_err();
    assert!(matches!(err, StoreError::Core(CoreError::EmptyContent)));
    assert_eq!(store.require(created.id).expect("get"), &created);
}

#[test]
fn delete_missing_id_is_a_no_op() {
    let mut store = Store::new();
    let created = store.create(10, new_meeting("ABC")).expect("create");
    assert!(!store.delete(MeetingId::new()));
    assert!(store.delete(created.id));
    assert!(!store.delete(created.id));
    assert!(store.is_empty());
}

#[test]
fn seeding_validates_and_rejects_duplicates() {
    let store = Store::with_meetings(sample_meetings()).expect("seed");
    assert_eq!(store.len(), 3);
    assert_eq!(store.list()[0].company_name, "Delta Endüstri Ürünleri");

    let mut meetings = sample_meetings();
    let copy = meetings[0].clone();
    meetings.push(copy);
    let err = Store::with_meetings(meetings).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::DuplicateId);

    let mut meetings = sample_meetings();
    meetings[1].our_attendees.clear();
    let err = Store::with_meetings(meetings).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Core);
}

#[test]
fn created_meeting_goes_ahead_of_seeded_ones() {
    let mut store = Store::with_meetings(sample_meetings()).expect("seed");
    let created = store.create(1_800_000_000, new_meeting("ABC")).expect("create");
    assert_eq!(store.list()[0].id, created.id);
    assert_eq!(store.len(), 4);
}
