//! The per-user session: one store, one history, one identity.

use aula_types::{
    AnnouncementId, AssignmentId, BreadcrumbMode, Breadcrumbs, ChatId, ChatThread, CourseId,
    Identity, NavParams, NavigationSettings, NavigationStack, NavigationState, Notification,
    NotificationId, ResourceId, Role, StudentId, SyncSettings, ViewName,
};

use crate::action::{Action, DispatchOutcome};
use crate::resolver::{NotificationResolver, Resolution};
use crate::seed::Seed;
use crate::store::{RecordStore, ResourceLocation, StoreError};
use crate::sync::SyncBus;

/// Sole owner and writer of the session state.
///
/// Every change goes through `&mut self`, either via [`Session::dispatch`]
/// or the named operations it delegates to.
#[derive(Debug)]
pub struct Session {
    store: RecordStore,
    nav: NavigationStack,
    sync: SyncBus,
    identity: Identity,
    active_chat: Option<ChatId>,
    nav_settings: NavigationSettings,
}

impl Session {
    #[must_use]
    pub fn new(
        seed: Seed,
        identity: Identity,
        sync: SyncSettings,
        nav_settings: NavigationSettings,
    ) -> Self {
        tracing::info!(
            role = identity.role().as_str(),
            courses = seed.courses.len(),
            "Starting session"
        );
        Self {
            store: seed.into_store(),
            nav: NavigationStack::new(NavigationState::new(nav_settings.home)),
            sync: SyncBus::new(sync),
            identity,
            active_chat: None,
            nav_settings,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    #[must_use]
    pub fn history(&self) -> &NavigationStack {
        &self.nav
    }

    #[must_use]
    pub fn current(&self) -> &NavigationState {
        self.nav.current()
    }

    /// The trail up to the current entry, or `None` when breadcrumbs are
    /// turned off.
    #[must_use]
    pub fn breadcrumbs(&self) -> Option<Breadcrumbs<'_>> {
        match self.nav_settings.breadcrumbs {
            BreadcrumbMode::Shown => Some(self.nav.breadcrumbs()),
            BreadcrumbMode::Hidden => None,
        }
    }

    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.identity.role()
    }

    #[must_use]
    pub fn sync_settings(&self) -> &SyncSettings {
        self.sync.settings()
    }

    #[must_use]
    pub fn navigation_settings(&self) -> NavigationSettings {
        self.nav_settings
    }

    /// The signed-in role's notification feed.
    #[must_use]
    pub fn feed(&self) -> &[Notification] {
        self.store.feed(self.role())
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.store.unread_count(self.role())
    }

    #[must_use]
    pub fn active_chat_id(&self) -> Option<&ChatId> {
        self.active_chat.as_ref()
    }

    /// The open thread. `None` also when the selected id no longer exists.
    #[must_use]
    pub fn active_chat(&self) -> Option<&ChatThread> {
        self.active_chat
            .as_ref()
            .and_then(|id| self.store.chat(id.as_str()))
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Switch the signed-in user. History is kept.
    pub fn set_identity(&mut self, identity: Identity) {
        tracing::info!(role = identity.role().as_str(), "Identity changed");
        self.identity = identity;
    }

    pub fn navigate(
        &mut self,
        view: ViewName,
        params: Option<NavParams>,
        label: Option<String>,
        reset: bool,
    ) {
        let mut state = NavigationState::new(view);
        if let Some(params) = params {
            state = state.with_params(params);
        }
        if let Some(label) = label {
            state = state.with_label(label);
        }
        if reset {
            tracing::debug!(view = %view, "Navigation reset");
            self.nav.reset(state);
        } else {
            self.push(state);
        }
    }

    fn push(&mut self, state: NavigationState) {
        tracing::debug!(
            view = %state.view(),
            label = state.breadcrumb_label(),
            depth = self.nav.cursor() + 2,
            "Navigate"
        );
        self.nav.push(state);
    }

    /// Record a grade through the cross-role rules.
    pub fn set_grade(
        &mut self,
        student: &StudentId,
        assignment: &AssignmentId,
        value: &str,
    ) -> Result<Option<NotificationId>, StoreError> {
        self.sync
            .update_grade(&mut self.store, student, assignment, value)
    }

    /// Publish an announcement through the cross-role rules.
    pub fn add_announcement(
        &mut self,
        title: &str,
        content: &str,
    ) -> Result<AnnouncementId, StoreError> {
        self.sync.create_announcement(&mut self.store, title, content)
    }

    /// Follow `notification` on behalf of the signed-in role.
    pub fn resolve_and_navigate(&mut self, notification: &Notification) -> Resolution {
        NotificationResolver::resolve_and_navigate(
            &mut self.store,
            &mut self.nav,
            &mut self.active_chat,
            self.identity.role(),
            notification,
        )
    }

    /// Follow a notification from the signed-in role's feed by id.
    pub fn open_notification(&mut self, id: &NotificationId) -> Result<Resolution, StoreError> {
        let role = self.role();
        let notification = self
            .store
            .notification(role, id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotificationNotFound {
                role,
                id: id.clone(),
            })?;
        Ok(self.resolve_and_navigate(&notification))
    }

    /// Apply one client action.
    pub fn dispatch(&mut self, action: Action) -> DispatchOutcome {
        let role = self.role();
        match action {
            Action::Navigate {
                view,
                params,
                label,
                reset,
            } => {
                self.navigate(view, params, label, reset);
                DispatchOutcome::Applied
            }
            Action::SidebarSelect(view) => {
                self.navigate(view, None, None, true);
                DispatchOutcome::Applied
            }
            Action::Back => DispatchOutcome::from_changed(self.nav.back().moved()),
            Action::Forward => DispatchOutcome::from_changed(self.nav.forward().moved()),
            Action::JumpTo(index) => DispatchOutcome::from_changed(self.nav.jump_to(index).moved()),
            Action::SelectCourse(id) => self.select_course(id),
            Action::SelectResource { course, resource } => self.select_resource(course, resource),
            Action::SelectDate(date) => {
                let params = NavParams::calendar(&date);
                self.navigate(ViewName::Calendar, Some(params), None, false);
                DispatchOutcome::Applied
            }
            Action::ArchiveCourse(id) => self.store.archive_course(&id).into(),
            Action::UpdateGrade {
                student,
                assignment,
                value,
            } => self.set_grade(&student, &assignment, &value).into(),
            Action::CreateAnnouncement { title, content } => {
                self.add_announcement(&title, &content).into()
            }
            Action::AddNotification { role, notification } => {
                self.store.add_notification(role, notification).into()
            }
            Action::MarkRead(id) => flag_outcome(self.store.mark_read(role, &id)),
            Action::MarkUnread(id) => flag_outcome(self.store.mark_unread(role, &id)),
            Action::DeleteNotification(id) => self.store.delete_notification(role, &id).into(),
            Action::MarkAllRead => {
                DispatchOutcome::from_changed(self.store.mark_all_read(role) > 0)
            }
            // Applied even without a destination: the notification is read now.
            Action::OpenNotification(id) => self.open_notification(&id).into(),
            Action::ContactInstructor(name) => match self.store.upsert_chat(&name) {
                Ok(chat) => {
                    self.active_chat = Some(chat);
                    self.navigate(ViewName::Messages, None, None, false);
                    DispatchOutcome::Applied
                }
                Err(err) => DispatchOutcome::rejected(err),
            },
            Action::StartChat(name) => match self.store.create_chat(&name) {
                Ok(chat) => {
                    self.active_chat = Some(chat);
                    DispatchOutcome::Applied
                }
                Err(err) => DispatchOutcome::rejected(err),
            },
            Action::SelectChat(id) => {
                if let Err(err) = self.store.mark_chat_read(&id) {
                    return DispatchOutcome::rejected(err);
                }
                self.active_chat = Some(id);
                DispatchOutcome::Applied
            }
            Action::SendChatMessage(text) => {
                let Some(chat) = self.active_chat.clone() else {
                    return DispatchOutcome::Unchanged;
                };
                if text.trim().is_empty() {
                    return DispatchOutcome::Unchanged;
                }
                self.store.append_chat_message(&chat, &text).into()
            }
            Action::DeleteChatMessage(message) => {
                let Some(chat) = self.active_chat.clone() else {
                    return DispatchOutcome::Unchanged;
                };
                self.store.delete_chat_message(&chat, &message).into()
            }
            Action::Logout => {
                tracing::info!(role = role.as_str(), "Logout");
                self.active_chat = None;
                self.nav.reset(NavigationState::new(self.nav_settings.home));
                DispatchOutcome::Applied
            }
        }
    }

    fn select_course(&mut self, id: CourseId) -> DispatchOutcome {
        let Some(course) = self.store.course(id.as_str()) else {
            return DispatchOutcome::rejected(StoreError::CourseNotFound(id));
        };
        let state = NavigationState::new(ViewName::CourseDetail)
            .with_params(NavParams::course(&course.id))
            .with_label(course.name.as_str());
        self.push(state);
        DispatchOutcome::Applied
    }

    fn select_resource(
        &mut self,
        course_id: CourseId,
        resource_id: ResourceId,
    ) -> DispatchOutcome {
        let found = self
            .store
            .resource_in(course_id.as_str(), resource_id.as_str());
        let Some(ResourceLocation { resource, .. }) = found else {
            return DispatchOutcome::rejected(StoreError::ResourceNotFound {
                course: course_id,
                resource: resource_id,
            });
        };
        let state = NavigationState::new(ViewName::TaskDetail)
            .with_params(NavParams::task(&resource.id, &course_id))
            .with_label(resource.title.as_str());
        self.push(state);
        DispatchOutcome::Applied
    }
}

fn flag_outcome(result: Result<bool, StoreError>) -> DispatchOutcome {
    match result {
        Ok(changed) => DispatchOutcome::from_changed(changed),
        Err(err) => DispatchOutcome::rejected(err),
    }
}
