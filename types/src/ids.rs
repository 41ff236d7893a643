use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Declares a string-backed identifier newtype.
///
/// Seed data addresses every record by an opaque string ("1", "r5", "s1"), so
/// ids are kept as strings and distinguished only by type.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifies a course.
    CourseId
);
string_id!(
    /// Identifies a module within a course. Only unique inside its course.
    ModuleId
);
string_id!(
    /// Identifies a resource (assignment, quiz, reading...).
    ///
    /// Assumed unique across every course and module.
    ResourceId
);
string_id!(StudentId);
string_id!(
    /// Identifies a gradebook column.
    AssignmentId
);
string_id!(
    /// Identifies a notification within one role's feed.
    NotificationId
);
string_id!(AnnouncementId);
string_id!(ChatId);
string_id!(
    /// Identifies a message within one chat thread.
    ChatMessageId
);
