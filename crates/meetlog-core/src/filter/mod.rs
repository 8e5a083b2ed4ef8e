mod expand;

pub use expand::ExpandSet;

use crate::domain::{Meeting, MeetingId};

/// Case-insensitive substring search over company, contact names and our
/// attendees. An empty query matches every meeting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingFilter {
    query: String,
    needle: String,
}

impl MeetingFilter {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let needle = query.to_lowercase();
        Self { query, needle }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    pub fn matches(&self, meeting: &Meeting) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        contains(&meeting.company_name, &self.needle)
            || meeting
                .contacts
                .iter()
                .any(|contact| contains(&contact.name, &self.needle))
            || contains(&meeting.our_attendees, &self.needle)
    }

    pub fn apply<'a>(&self, meetings: &'a [Meeting]) -> Vec<&'a Meeting> {
        meetings.iter().filter(|meeting| self.matches(meeting)).collect()
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Per-screen state of the meeting list. Lives outside the store and is
/// dropped whenever the list screen is left.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    filter: MeetingFilter,
    expanded: ExpandSet,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &MeetingFilter {
        &self.filter
    }

    pub fn query(&self) -> &str {
        self.filter.query()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter = MeetingFilter::new(query);
    }

    pub fn toggle_expand(&mut self, id: MeetingId) -> bool {
        self.expanded.toggle(id)
    }

    pub fn is_expanded(&self, id: MeetingId) -> bool {
        self.expanded.contains(id)
    }

    pub fn visible<'a>(&self, meetings: &'a [Meeting]) -> Vec<&'a Meeting> {
        self.filter.apply(meetings)
    }
}
