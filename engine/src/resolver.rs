//! Turning a notification into a navigation.

use aula_types::{
    ChatId, CourseId, NavParams, NavigationStack, NavigationState, Notification, Role, ViewName,
};

use crate::store::RecordStore;

const COURSE_LABEL: &str = "Course";
const TASK_LABEL: &str = "Task";

/// Where a notification leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Push `state`. For message targets, `active_chat` is the thread to open.
    Navigate {
        state: NavigationState,
        active_chat: Option<ChatId>,
    },
    /// The target resource does not exist in any course.
    NotFound,
    /// The notification carries no target view.
    NoTarget,
}

impl Resolution {
    #[must_use]
    pub fn state(&self) -> Option<&NavigationState> {
        match self {
            Resolution::Navigate { state, .. } => Some(state),
            Resolution::NotFound | Resolution::NoTarget => None,
        }
    }
}

pub struct NotificationResolver;

impl NotificationResolver {
    /// Work out the destination without touching any state.
    #[must_use]
    pub fn resolve(store: &RecordStore, notification: &Notification) -> Resolution {
        let Some(view) = notification.target_view else {
            return Resolution::NoTarget;
        };
        let target = notification.target_id.as_deref();

        let state = match (view, target) {
            (ViewName::CourseDetail, Some(course_id)) => NavigationState::new(view)
                .with_params(NavParams::course(&CourseId::new(course_id)))
                .with_label(COURSE_LABEL),
            (ViewName::TaskDetail, Some(resource_id)) => {
                let Some(found) = store.find_resource(resource_id) else {
                    tracing::warn!(
                        notification = %notification.id,
                        resource = resource_id,
                        "Notification targets a resource that is in no course"
                    );
                    return Resolution::NotFound;
                };
                NavigationState::new(view)
                    .with_params(NavParams::task(&found.resource.id, &found.course.id))
                    .with_label(TASK_LABEL)
            }
            (ViewName::Messages, chat) => {
                return Resolution::Navigate {
                    state: NavigationState::new(view),
                    active_chat: chat.map(ChatId::from),
                };
            }
            (view, _) => NavigationState::new(view),
        };

        Resolution::Navigate {
            state,
            active_chat: None,
        }
    }

    /// Mark the notification read in `role`'s feed, then push its destination.
    ///
    /// A notification that is no longer in the feed still navigates. Returns
    /// the resolution that was applied.
    pub fn resolve_and_navigate(
        store: &mut RecordStore,
        nav: &mut NavigationStack,
        active_chat: &mut Option<ChatId>,
        role: Role,
        notification: &Notification,
    ) -> Resolution {
        if let Err(err) = store.mark_read(role, &notification.id) {
            tracing::debug!("Opening notification outside the feed: {err}");
        }

        let resolution = Self::resolve(store, notification);
        if let Resolution::Navigate { state, active_chat: chat } = &resolution {
            if let Some(chat) = chat {
                *active_chat = Some(chat.clone());
            }
            tracing::debug!(
                notification = %notification.id,
                view = %state.view(),
                "Following notification"
            );
            nav.push(state.clone());
        }
        resolution
    }
}

#[cfg(test)]
mod tests {
    use aula_types::{
        ChatId, NavigationStack, NavigationState, Notification, NotificationKind, Role, ViewName,
    };

    use super::{NotificationResolver, Resolution};
    use crate::Seed;
    use crate::store::RecordStore;

    fn targeting(view: ViewName, target: Option<&str>) -> Notification {
        let n = Notification::new("x", NotificationKind::Info, "t", "m").targeting(view);
        match target {
            Some(id) => n.with_target_id(id),
            None => n,
        }
    }

    fn store() -> RecordStore {
        Seed::demo().into_store()
    }

    #[test]
    fn course_detail_carries_course_id() {
        let resolution =
            NotificationResolver::resolve(&store(), &targeting(ViewName::CourseDetail, Some("3")));
        let state = resolution.state().unwrap();
        assert_eq!(state.view(), ViewName::CourseDetail);
        assert_eq!(state.params().unwrap().course_id(), Some("3"));
        assert_eq!(state.breadcrumb_label(), "Course");
    }

    #[test]
    fn unknown_course_still_navigates() {
        let resolution =
            NotificationResolver::resolve(&store(), &targeting(ViewName::CourseDetail, Some("77")));
        let state = resolution.state().unwrap();
        assert_eq!(state.params().unwrap().course_id(), Some("77"));
        assert_eq!(state.breadcrumb_label(), "Course");
    }

    #[test]
    fn task_detail_resolves_owning_course() {
        let resolution =
            NotificationResolver::resolve(&store(), &targeting(ViewName::TaskDetail, Some("r9")));
        let state = resolution.state().unwrap();
        assert_eq!(state.view(), ViewName::TaskDetail);
        let params = state.params().unwrap();
        assert_eq!(params.resource_id(), Some("r9"));
        assert_eq!(params.course_id(), Some("2"));
        assert_eq!(state.breadcrumb_label(), "Task");
    }

    #[test]
    fn task_detail_for_missing_resource_is_not_found() {
        let resolution =
            NotificationResolver::resolve(&store(), &targeting(ViewName::TaskDetail, Some("r404")));
        assert_eq!(resolution, Resolution::NotFound);
    }

    #[test]
    fn targets_without_id_push_the_bare_view() {
        for view in [ViewName::CourseDetail, ViewName::TaskDetail, ViewName::Grades] {
            let resolution = NotificationResolver::resolve(&store(), &targeting(view, None));
            let state = resolution.state().unwrap();
            assert_eq!(state.view(), view);
            assert!(state.params().is_none());
        }
    }

    #[test]
    fn messages_target_selects_chat() {
        let resolution =
            NotificationResolver::resolve(&store(), &targeting(ViewName::Messages, Some("2")));
        assert_eq!(
            resolution,
            Resolution::Navigate {
                state: NavigationState::new(ViewName::Messages),
                active_chat: Some(ChatId::new("2")),
            }
        );
    }

    #[test]
    fn missing_target_view_does_nothing() {
        let n = Notification::new("x", NotificationKind::Info, "t", "m").with_target_id("1");
        assert_eq!(NotificationResolver::resolve(&store(), &n), Resolution::NoTarget);
    }

    #[test]
    fn resolve_and_navigate_marks_read_and_pushes() {
        let mut store = store();
        let mut nav = NavigationStack::new(NavigationState::new(ViewName::Dashboard));
        let mut active_chat = None;
        let notification = store.notification(Role::Student, "1").unwrap().clone();

        NotificationResolver::resolve_and_navigate(
            &mut store,
            &mut nav,
            &mut active_chat,
            Role::Student,
            &notification,
        );

        assert!(store.notification(Role::Student, "1").unwrap().read);
        assert_eq!(nav.len(), 2);
        assert_eq!(nav.current().view(), ViewName::TaskDetail);
        assert_eq!(nav.current().param("courseId"), Some("1"));
        assert!(active_chat.is_none());
    }

    #[test]
    fn resolve_and_navigate_tolerates_foreign_notification() {
        let mut store = store();
        let mut nav = NavigationStack::new(NavigationState::new(ViewName::Dashboard));
        let mut active_chat = None;
        let revision = store.revision();

        let resolution = NotificationResolver::resolve_and_navigate(
            &mut store,
            &mut nav,
            &mut active_chat,
            Role::Professor,
            &targeting(ViewName::Messages, Some("3")),
        );

        assert!(resolution.state().is_some());
        assert_eq!(store.revision(), revision);
        assert_eq!(nav.current().view(), ViewName::Messages);
        assert_eq!(active_chat, Some(ChatId::new("3")));
    }

    #[test]
    fn not_found_leaves_history_alone() {
        let mut store = store();
        let mut nav = NavigationStack::new(NavigationState::new(ViewName::Dashboard));
        let mut active_chat = None;

        NotificationResolver::resolve_and_navigate(
            &mut store,
            &mut nav,
            &mut active_chat,
            Role::Student,
            &targeting(ViewName::TaskDetail, Some("r404")),
        );

        assert_eq!(nav.len(), 1);
    }
}
