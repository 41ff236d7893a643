//! Resolved configuration types shared across crates.
//!
//! These types represent fully-validated, resolved configuration state.
//! Raw TOML deserialization structs (with `Option` fields) stay private in
//! `aula-config`. The config loader resolves them into these types at the
//! parse boundary.
//!
//! Existence of a value is the proof of its validity.

use serde::Deserialize;

use crate::{NonEmptyStaticStr, NonEmptyString, StudentId, ViewName};

const DEFAULT_PRIMARY_STUDENT: NonEmptyStaticStr = NonEmptyStaticStr::new("s1");
const DEFAULT_AUTHOR: NonEmptyStaticStr = NonEmptyStaticStr::new("Dr. Juan Pérez");
const DEFAULT_COURSE_NAME: NonEmptyStaticStr = NonEmptyStaticStr::new("Differential Calculus");

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncSettingsError {
    #[error("primary_student must not be empty")]
    EmptyPrimaryStudent,
    #[error("author must not be empty")]
    EmptyAuthor,
    #[error("course_name must not be empty")]
    EmptyCourseName,
}

#[derive(Deserialize)]
struct RawSyncSettings {
    primary_student: Option<String>,
    author: Option<String>,
    course_name: Option<String>,
}

/// Parameters of the cross-role synchronization rules.
///
/// `primary_student` is the gradebook row whose grade changes notify the
/// student feed. `author` and `course_name` stamp announcements published
/// from the professor role.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSyncSettings")]
pub struct SyncSettings {
    primary_student: StudentId,
    author: NonEmptyString,
    course_name: NonEmptyString,
}

impl SyncSettings {
    pub fn new(
        primary_student: impl Into<String>,
        author: impl Into<String>,
        course_name: impl Into<String>,
    ) -> Result<Self, SyncSettingsError> {
        let primary_student = primary_student.into();
        if primary_student.trim().is_empty() {
            return Err(SyncSettingsError::EmptyPrimaryStudent);
        }
        let author = NonEmptyString::new(author).map_err(|_| SyncSettingsError::EmptyAuthor)?;
        let course_name =
            NonEmptyString::new(course_name).map_err(|_| SyncSettingsError::EmptyCourseName)?;
        Ok(Self {
            primary_student: StudentId::new(primary_student),
            author,
            course_name,
        })
    }

    #[must_use]
    pub fn primary_student(&self) -> &StudentId {
        &self.primary_student
    }

    #[must_use]
    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    #[must_use]
    pub fn course_name(&self) -> &str {
        self.course_name.as_str()
    }

    pub fn with_primary_student(mut self, id: impl Into<StudentId>) -> Self {
        self.primary_student = id.into();
        self
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            primary_student: StudentId::new(DEFAULT_PRIMARY_STUDENT.as_str()),
            author: DEFAULT_AUTHOR.into(),
            course_name: DEFAULT_COURSE_NAME.into(),
        }
    }
}

impl TryFrom<RawSyncSettings> for SyncSettings {
    type Error = SyncSettingsError;

    fn try_from(raw: RawSyncSettings) -> Result<Self, Self::Error> {
        let defaults = Self::default();
        Self::new(
            raw.primary_student
                .unwrap_or_else(|| defaults.primary_student.as_str().to_owned()),
            raw.author.unwrap_or_else(|| defaults.author.into_inner()),
            raw.course_name
                .unwrap_or_else(|| defaults.course_name.into_inner()),
        )
    }
}

/// Whether the presentation layer renders the breadcrumb trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreadcrumbMode {
    #[default]
    Shown,
    Hidden,
}

/// Navigation preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NavigationSettings {
    /// View that opens a session and that logout returns to.
    #[serde(default = "default_home")]
    pub home: ViewName,
    #[serde(default)]
    pub breadcrumbs: BreadcrumbMode,
}

const fn default_home() -> ViewName {
    ViewName::Dashboard
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            home: default_home(),
            breadcrumbs: BreadcrumbMode::default(),
        }
    }
}
