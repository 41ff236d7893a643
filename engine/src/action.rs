//! Everything a client can ask a [`Session`](crate::Session) to do.

use aula_types::{
    AssignmentId, ChatId, ChatMessageId, CourseId, NavParams, Notification, NotificationId,
    ResourceId, Role, StudentId, ViewName,
};

use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open `view`. `reset` replaces the whole history.
    Navigate {
        view: ViewName,
        params: Option<NavParams>,
        label: Option<String>,
        reset: bool,
    },
    /// A top-level sidebar entry; always starts a fresh history.
    SidebarSelect(ViewName),
    Back,
    Forward,
    /// Breadcrumb click.
    JumpTo(usize),
    SelectCourse(CourseId),
    SelectResource {
        course: CourseId,
        resource: ResourceId,
    },
    /// Open the calendar at `YYYY-MM-DD`.
    SelectDate(String),
    ArchiveCourse(CourseId),
    UpdateGrade {
        student: StudentId,
        assignment: AssignmentId,
        value: String,
    },
    CreateAnnouncement {
        title: String,
        content: String,
    },
    AddNotification {
        role: Role,
        notification: Notification,
    },
    MarkRead(NotificationId),
    MarkUnread(NotificationId),
    DeleteNotification(NotificationId),
    MarkAllRead,
    OpenNotification(NotificationId),
    /// Open (or start) the thread with a course's professor.
    ContactInstructor(String),
    /// Always start a new thread.
    StartChat(String),
    SelectChat(ChatId),
    SendChatMessage(String),
    DeleteChatMessage(ChatMessageId),
    Logout,
}

impl Action {
    /// Plain push of `view` with its default label.
    #[must_use]
    pub fn navigate(view: ViewName) -> Self {
        Action::Navigate {
            view,
            params: None,
            label: None,
            reset: false,
        }
    }
}

/// What became of a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// State changed.
    Applied,
    /// Valid but nothing to do, e.g. `Back` on the first entry.
    Unchanged,
    /// Refused; nothing changed.
    Rejected(StoreError),
}

impl DispatchOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, DispatchOutcome::Applied)
    }

    pub(crate) fn rejected(err: StoreError) -> Self {
        tracing::warn!("Action rejected: {err}");
        DispatchOutcome::Rejected(err)
    }

    pub(crate) fn from_changed(changed: bool) -> Self {
        if changed {
            DispatchOutcome::Applied
        } else {
            DispatchOutcome::Unchanged
        }
    }
}

impl<T> From<Result<T, StoreError>> for DispatchOutcome {
    fn from(result: Result<T, StoreError>) -> Self {
        match result {
            Ok(_) => DispatchOutcome::Applied,
            Err(err) => DispatchOutcome::rejected(err),
        }
    }
}
