//! Role-visible notifications.
//!
//! A notification optionally carries an abstract target (`target_view` plus an
//! opaque `target_id`) that the engine resolves into a concrete navigation when
//! the user opens it. The meaning of `target_id` depends on the view: a course
//! id for `course-detail`, a resource id for `task-detail`, a chat id for
//! `messages`.

use serde::{Deserialize, Serialize};

use crate::{CourseId, NotificationId, ViewName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Warning,
    Success,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub read: bool,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_view: Option<ViewName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<CourseId>,
}

impl Notification {
    /// Create an unread notification with no target.
    #[must_use]
    pub fn new(
        id: impl Into<NotificationId>,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            message: message.into(),
            time: String::new(),
            read: false,
            kind,
            target_view: None,
            target_id: None,
            course_id: None,
        }
    }

    pub fn at(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    pub fn targeting(mut self, view: ViewName) -> Self {
        self.target_view = Some(view);
        self
    }

    pub fn with_target_id(mut self, target_id: impl Into<String>) -> Self {
        self.target_id = Some(target_id.into());
        self
    }

    pub fn in_course(mut self, course_id: impl Into<CourseId>) -> Self {
        self.course_id = Some(course_id.into());
        self
    }
}
