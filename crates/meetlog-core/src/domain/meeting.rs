use crate::domain::contact::Contact;
use crate::domain::ids::MeetingId;
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: MeetingId,
    pub company_name: String,
    pub date: NaiveDate,
    pub contacts: Vec<Contact>,
    pub our_attendees: String,
    pub content: String,
    pub proposal_given: bool,
    pub proposal_rejection_reason: Option<String>,
    pub follow_up_done: bool,
    pub created_at: i64,
}

/// A meeting record without the store-generated `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMeeting {
    pub company_name: String,
    pub date: NaiveDate,
    pub contacts: Vec<Contact>,
    pub our_attendees: String,
    pub content: String,
    pub proposal_given: bool,
    pub proposal_rejection_reason: Option<String>,
    pub follow_up_done: bool,
}

impl NewMeeting {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_fields(
            &self.company_name,
            &self.our_attendees,
            &self.content,
            self.proposal_given,
            self.proposal_rejection_reason.as_deref(),
        )
    }

    pub fn into_meeting(self, id: MeetingId, created_at: i64) -> Meeting {
        Meeting {
            id,
            company_name: self.company_name,
            date: self.date,
            contacts: self.contacts,
            our_attendees: self.our_attendees,
            content: self.content,
            proposal_given: self.proposal_given,
            proposal_rejection_reason: self.proposal_rejection_reason,
            follow_up_done: self.follow_up_done,
            created_at,
        }
    }
}

impl Meeting {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_fields(
            &self.company_name,
            &self.our_attendees,
            &self.content,
            self.proposal_given,
            self.proposal_rejection_reason.as_deref(),
        )
    }

    /// Drops a rejection reason left over from before the proposal flag was
    /// cleared. Returns true if anything was removed.
    pub fn clear_stale_rejection_reason(&mut self) -> bool {
        if !self.proposal_given && self.proposal_rejection_reason.is_some() {
            self.proposal_rejection_reason = None;
            return true;
        }
        false
    }

    pub fn contact_names(&self) -> Vec<&str> {
        self.contacts.iter().map(|c| c.name.as_str()).collect()
    }
}

fn validate_fields(
    company_name: &str,
    our_attendees: &str,
    content: &str,
    proposal_given: bool,
    rejection_reason: Option<&str>,
) -> Result<(), CoreError> {
    if company_name.trim().is_empty() {
        return Err(CoreError::EmptyCompanyName);
    }
    if our_attendees.trim().is_empty() {
        return Err(CoreError::EmptyOurAttendees);
    }
    if content.trim().is_empty() {
        return Err(CoreError::EmptyContent);
    }
    if !proposal_given && rejection_reason.is_some() {
        return Err(CoreError::RejectionReasonWithoutProposal);
    }
    Ok(())
}
