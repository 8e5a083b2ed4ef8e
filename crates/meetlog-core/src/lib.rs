pub mod domain;
pub mod draft;
pub mod error;
pub mod filter;
pub mod time;

pub use domain::*;
pub use draft::{ContactField, MeetingDraft};
pub use error::CoreError;
pub use filter::{ExpandSet, ListState, MeetingFilter};
