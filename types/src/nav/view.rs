use std::fmt;

use serde::{Deserialize, Serialize};

/// Every addressable screen of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewName {
    Login,
    Dashboard,
    Courses,
    CourseDetail,
    TaskDetail,
    Calendar,
    Grades,
    GradingView,
    Files,
    Profile,
    Messages,
    Notifications,
    Settings,
    Glossary,
}

impl ViewName {
    pub const ALL: [ViewName; 14] = [
        ViewName::Login,
        ViewName::Dashboard,
        ViewName::Courses,
        ViewName::CourseDetail,
        ViewName::TaskDetail,
        ViewName::Calendar,
        ViewName::Grades,
        ViewName::GradingView,
        ViewName::Files,
        ViewName::Profile,
        ViewName::Messages,
        ViewName::Notifications,
        ViewName::Settings,
        ViewName::Glossary,
    ];

    /// Wire name, as used in notification targets and seed files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ViewName::Login => "login",
            ViewName::Dashboard => "dashboard",
            ViewName::Courses => "courses",
            ViewName::CourseDetail => "course-detail",
            ViewName::TaskDetail => "task-detail",
            ViewName::Calendar => "calendar",
            ViewName::Grades => "grades",
            ViewName::GradingView => "grading-view",
            ViewName::Files => "files",
            ViewName::Profile => "profile",
            ViewName::Messages => "messages",
            ViewName::Notifications => "notifications",
            ViewName::Settings => "settings",
            ViewName::Glossary => "glossary",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|view| view.as_str() == s)
    }

    /// Breadcrumb label used when a navigation does not supply one.
    #[must_use]
    pub fn default_label(self) -> String {
        let fixed = match self {
            ViewName::Dashboard => "Home",
            ViewName::Courses => "My Courses",
            ViewName::Calendar => "Calendar",
            ViewName::Grades => "Grades",
            ViewName::Files => "Files",
            ViewName::Profile => "Profile",
            ViewName::Messages => "Messages",
            ViewName::Settings => "Settings",
            ViewName::Notifications => "Notifications",
            ViewName::GradingView => "Gradebook",
            ViewName::Login
            | ViewName::CourseDetail
            | ViewName::TaskDetail
            | ViewName::Glossary => {
                return capitalize(self.as_str());
            }
        };
        fixed.to_owned()
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
