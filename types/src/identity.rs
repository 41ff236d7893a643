//! Who is driving the session.

use serde::{Deserialize, Serialize};

use crate::StudentId;

/// The two roles sharing the record set. Each role reads its own notification feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Professor,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Professor => "professor",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Professor => "Professor",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "student" | "s" => Some(Role::Student),
            "professor" | "prof" | "p" => Some(Role::Professor),
            _ => None,
        }
    }
}

/// Identity handed over by the login stub.
///
/// `student` is set when the signed-in user is a student with a gradebook row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Identity {
    role: Role,
    student: Option<StudentId>,
}

impl Identity {
    #[must_use]
    pub fn student(id: impl Into<StudentId>) -> Self {
        Self {
            role: Role::Student,
            student: Some(id.into()),
        }
    }

    #[must_use]
    pub fn professor() -> Self {
        Self {
            role: Role::Professor,
            student: None,
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn student_id(&self) -> Option<&StudentId> {
        self.student.as_ref()
    }
}
