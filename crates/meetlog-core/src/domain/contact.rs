use crate::domain::ids::ContactId;
use serde::{Deserialize, Serialize};

/// A person met during a meeting. Every text field may be empty while the
/// contact is being edited; rows without a name are dropped on finalize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub title: String,
    pub phone: String,
    pub email: String,
}

impl Contact {
    pub fn blank() -> Self {
        Self {
            id: ContactId::new(),
            name: String::new(),
            title: String::new(),
            phone: String::new(),
            email: String::new(),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
