pub mod contact;
pub mod ids;
pub mod meeting;

pub use contact::Contact;
pub use ids::{ContactId, MeetingId};
pub use meeting::{Meeting, NewMeeting};
