//! Course catalogue, gradebook and announcement records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AnnouncementId, AssignmentId, CourseId, ModuleId, ResourceId, StudentId};

/// Sparse gradebook: student -> assignment -> grade as entered.
///
/// A missing entry means "ungraded", never zero.
pub type GradeMatrix = BTreeMap<StudentId, BTreeMap<AssignmentId, String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseStatus {
    #[default]
    InProgress,
    Future,
    Past,
}

impl CourseStatus {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::InProgress => "In progress",
            Self::Future => "Upcoming",
            Self::Past => "Past",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Pdf,
    Video,
    Assignment,
    Quiz,
    Forum,
    Link,
    Text,
}

impl ResourceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Video => "video",
            Self::Assignment => "assignment",
            Self::Quiz => "quiz",
            Self::Forum => "forum",
            Self::Link => "link",
            Self::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<u32>,
}

impl Resource {
    #[must_use]
    pub fn new(id: impl Into<ResourceId>, kind: ResourceKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            description: None,
            url: None,
            due_date: None,
            score: None,
            max_score: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseModule {
    pub id: ModuleId,
    pub title: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    #[serde(default)]
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub professor: String,
    #[serde(default)]
    pub status: CourseStatus,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub modules: Vec<CourseModule>,
}

impl Course {
    /// Iterate every resource of the course in module order, then resource order.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.modules.iter().flat_map(|module| module.resources.iter())
    }

    #[must_use]
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources().find(|resource| resource.id.as_str() == id)
    }
}

/// A course announcement. Lists of these are kept newest-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: String,
    pub content: String,
    pub course_name: String,
    pub date: String,
    pub author: String,
}
