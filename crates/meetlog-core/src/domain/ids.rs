use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

id_type!(
    /// Identity of a logged meeting; assigned by the store, never by the user.
    MeetingId
);
id_type!(
    /// Identity of one person met during a meeting. Only used for keying rows.
    ContactId
);

#[cfg(test)]
mod tests {
    use super::{ContactId, MeetingId};
    use std::str::FromStr;

    #[test]
    fn fresh_ids_differ() {
        assert_ne!(MeetingId::new(), MeetingId::new());
        assert_ne!(ContactId::new(), ContactId::new());
    }

    #[test]
    fn display_parses_back() {
        let id = MeetingId::new();
        let parsed = MeetingId::from_str(&format!(" {id} ")).expect("parse id");
        assert_eq!(parsed, id);
    }
}
