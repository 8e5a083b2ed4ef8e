use chrono::NaiveDate;

use crate::domain::{Contact, ContactId, Meeting, NewMeeting};
use crate::error::CoreError;
use crate::time::{format_date_input, parse_meeting_date, TimeParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Title,
    Phone,
    Email,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [
        ContactField::Name,
        ContactField::Title,
        ContactField::Phone,
        ContactField::Email,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Title => "Title",
            ContactField::Phone => "Phone",
            ContactField::Email => "Email",
        }
    }
}

/// An in-progress meeting under edit.
///
/// Text fields are kept exactly as typed; nothing is checked until
/// [`MeetingDraft::finalize`]. The contact list always holds at least one row
/// so the form has something to edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingDraft {
    pub company_name: String,
    pub date: String,
    pub our_attendees: String,
    pub content: String,
    pub proposal_given: bool,
    pub proposal_rejection_reason: String,
    pub follow_up_done: bool,
    contacts: Vec<Contact>,
}

impl Default for MeetingDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl MeetingDraft {
    pub fn new() -> Self {
        Self {
            company_name: String::new(),
            date: String::new(),
            our_attendees: String::new(),
            content: String::new(),
            proposal_given: false,
            proposal_rejection_reason: String::new(),
            follow_up_done: false,
            contacts: vec![Contact::blank()],
        }
    }

    pub fn with_attendees(mut self, attendees: impl Into<String>) -> Self {
        self.our_attendees = attendees.into();
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = format_date_input(date);
        self
    }

    pub fn from_meeting(meeting: &Meeting) -> Self {
        let mut contacts = meeting.contacts.clone();
        if contacts.is_empty() {
            contacts.push(Contact::blank());
        }
        Self {
            company_name: meeting.company_name.clone(),
            date: format_date_input(meeting.date),
            our_attendees: meeting.our_attendees.clone(),
            content: meeting.content.clone(),
            proposal_given: meeting.proposal_given,
            proposal_rejection_reason: meeting
                .proposal_rejection_reason
                .clone()
                .unwrap_or_default(),
            follow_up_done: meeting.follow_up_done,
            contacts,
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn add_contact(&mut self) -> ContactId {
        let contact = Contact::blank();
        let id = contact.id;
        self.contacts.push(contact);
        id
    }

    /// Refuses to remove the last remaining row.
    pub fn remove_contact(&mut self, id: ContactId) -> bool {
        if self.contacts.len() <= 1 {
            return false;
        }
        let before = self.contacts.len();
        self.contacts.retain(|contact| contact.id != id);
        self.contacts.len() != before
    }

    pub fn update_contact_field(&mut self, id: ContactId, field: ContactField, value: &str) -> bool {
        match self.contact_field_mut(id, field) {
            Some(target) => {
                *target = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn contact_field_mut(&mut self, id: ContactId, field: ContactField) -> Option<&mut String> {
        let contact = self.contacts.iter_mut().find(|contact| contact.id == id)?;
        Some(match field {
            ContactField::Name => &mut contact.name,
            ContactField::Title => &mut contact.title,
            ContactField::Phone => &mut contact.phone,
            ContactField::Email => &mut contact.email,
        })
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.checked_date().map(|_| ())
    }

    pub fn finalize(&self) -> Result<NewMeeting, CoreError> {
        let date = self.checked_date()?;
        let contacts = self
            .contacts
            .iter()
            .filter(|contact| contact.has_name())
            .cloned()
            .collect();
        let proposal_rejection_reason = if self.proposal_given
            && !self.proposal_rejection_reason.trim().is_empty()
        {
            Some(self.proposal_rejection_reason.clone())
        } else {
            None
        };

        let meeting = NewMeeting {
            company_name: self.company_name.trim().to_string(),
            date,
            contacts,
            our_attendees: self.our_attendees.trim().to_string(),
            content: self.content.trim().to_string(),
            proposal_given: self.proposal_given,
            proposal_rejection_reason,
            follow_up_done: self.follow_up_done,
        };
        meeting.validate()?;
        Ok(meeting)
    }

    fn checked_date(&self) -> Result<NaiveDate, CoreError> {
        if self.company_name.trim().is_empty() {
            return Err(CoreError::EmptyCompanyName);
        }
        let date = parse_meeting_date(&self.date).map_err(|err| match err {
            TimeParseError::Empty => CoreError::MissingDate,
            TimeParseError::InvalidDateFormat => CoreError::InvalidDate(self.date.trim().to_string()),
        })?;
        if self.our_attendees.trim().is_empty() {
            return Err(CoreError::EmptyOurAttendees);
        }
        if self.content.trim().is_empty() {
            return Err(CoreError::EmptyContent);
        }
        Ok(date)
    }
}
