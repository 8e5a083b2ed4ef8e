use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("company name is required")]
    EmptyCompanyName,
    #[error("meeting date is required")]
    MissingDate,
    #[error("invalid meeting date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("our attendees are required")]
    EmptyOurAttendees,
    #[error("meeting notes are required")]
    EmptyContent,
    #[error("rejection reason requires a given proposal")]
    RejectionReasonWithoutProposal,
}
