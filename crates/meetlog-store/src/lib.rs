pub mod error;
pub mod sample;

use std::collections::HashSet;

use meetlog_core::domain::{Meeting, MeetingId, NewMeeting};
use tracing::{debug, error, warn};

use crate::error::{Result, StoreError};

/// The single owner of the meeting collection, kept most-recent-first.
///
/// Readers borrow the collection through [`Store::list`] and [`Store::get`];
/// every write goes through `create`, `update` or `delete`, each of which is
/// one insert, replace or remove on the underlying vector.
#[derive(Debug, Default)]
pub struct Store {
    meetings: Vec<Meeting>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from records that already carry ids, keeping their
    /// order. Every record is validated and ids must be unique.
    pub fn with_meetings(meetings: Vec<Meeting>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(meetings.len());
        for meeting in &meetings {
            meeting.validate()?;
            if !seen.insert(meeting.id) {
                return Err(StoreError::DuplicateId(meeting.id.to_string()));
            }
        }
        debug!(count = meetings.len(), "store seeded");
        Ok(Self { meetings })
    }

    pub fn create(&mut self, now_utc: i64, input: NewMeeting) -> Result<Meeting> {
        input.validate()?;
        let mut id = MeetingId::new();
        while self.position(id).is_some() {
            id = MeetingId::new();
        }
        let meeting = input.into_meeting(id, now_utc);
        self.meetings.insert(0, meeting.clone());
        debug!(id = %meeting.id, company = %meeting.company_name, "meeting created");
        Ok(meeting)
    }

    /// Replaces the stored record with the same id, in place.
    ///
    /// `created_at` always comes from the stored record. A rejection reason
    /// on a record whose proposal flag is off is dropped rather than refused:
    /// it is what an edit that unticks the flag leaves behind.
    pub fn update(&mut self, meeting: Meeting) -> Result<Meeting> {
        let Some(index) = self.position(meeting.id) else {
            error!(id = %meeting.id, "update of unknown meeting");
            return Err(StoreError::NotFound(meeting.id.to_string()));
        };

        let mut meeting = meeting;
        if meeting.clear_stale_rejection_reason() {
            warn!(id = %meeting.id, "dropped rejection reason without proposal");
        }
        meeting.validate()?;

        let stored = &mut self.meetings[index];
        meeting.created_at = stored.created_at;
        *stored = meeting.clone();
        debug!(id = %meeting.id, "meeting updated");
        Ok(meeting)
    }

    /// Returns whether a record was removed. Unknown ids are not an error.
    pub fn delete(&mut self, id: MeetingId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.meetings.remove(index);
                debug!(id = %id, "meeting deleted");
                true
            }
            None => {
                debug!(id = %id, "delete of unknown meeting ignored");
                false
            }
        }
    }

    pub fn list(&self) -> &[Meeting] {
        &self.meetings
    }

    pub fn get(&self, id: MeetingId) -> Option<&Meeting> {
        self.meetings.iter().find(|meeting| meeting.id == id)
    }

    pub fn require(&self, id: MeetingId) -> Result<&Meeting> {
        self.get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.meetings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meetings.is_empty()
    }

    fn position(&self, id: MeetingId) -> Option<usize> {
        self.meetings.iter().position(|meeting| meeting.id == id)
    }
}
