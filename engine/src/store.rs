//! Canonical record store.
//!
//! Every collection sits behind an `Arc`. Mutations never touch a published
//! collection in place: they stage a copy in a [`Batch`], and `commit` swaps
//! the new values in all at once. A reader holding a [`StoreSnapshot`] keeps
//! seeing the old data, and `Arc::ptr_eq` against a later snapshot tells which
//! collections changed.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use aula_types::{
    Announcement, AnnouncementId, AssignmentId, ChatId, ChatMessage, ChatMessageId, ChatSender,
    ChatThread, Course, CourseId, GradeMatrix, Notification, NotificationId, Resource, ResourceId,
    Role, StudentId,
};

/// Time label stamped on records created during the session.
pub const NOW_LABEL: &str = "now";

const NEW_CHAT_PREVIEW: &str = "New chat started";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("course {0} not found")]
    CourseNotFound(CourseId),
    #[error("resource {resource} not found in course {course}")]
    ResourceNotFound { course: CourseId, resource: ResourceId },
    #[error("notification {id} not found in the {} feed", role.as_str())]
    NotificationNotFound { role: Role, id: NotificationId },
    #[error("notification {id} already exists in the {} feed", role.as_str())]
    DuplicateNotification { role: Role, id: NotificationId },
    #[error("chat {0} not found")]
    ChatNotFound(ChatId),
    #[error("message {message} not found in chat {chat}")]
    ChatMessageNotFound { chat: ChatId, message: ChatMessageId },
    #[error("{0} must not be empty")]
    Blank(&'static str),
}

/// An immutable view of every collection at one revision.
///
/// Cloning is cheap (reference counts only).
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub courses: Arc<[Course]>,
    pub grades: Arc<GradeMatrix>,
    pub student_feed: Arc<[Notification]>,
    pub professor_feed: Arc<[Notification]>,
    pub announcements: Arc<[Announcement]>,
    pub chats: Arc<[ChatThread]>,
    pub revision: u64,
}

impl StoreSnapshot {
    #[must_use]
    pub fn feed(&self, role: Role) -> &Arc<[Notification]> {
        match role {
            Role::Student => &self.student_feed,
            Role::Professor => &self.professor_feed,
        }
    }
}

/// Where a resource lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLocation<'a> {
    pub course: &'a Course,
    pub resource: &'a Resource,
}

/// Single-writer store of all mutable domain records.
#[derive(Debug, Default)]
pub struct RecordStore {
    data: StoreSnapshot,
    next_id: u64,
}

impl RecordStore {
    /// Build a store at revision 0.
    ///
    /// Notification ids are unique within a feed: a repeated id keeps its
    /// first entry and later ones are dropped with a warning.
    #[must_use]
    pub fn new(
        courses: Vec<Course>,
        grades: GradeMatrix,
        student_feed: Vec<Notification>,
        professor_feed: Vec<Notification>,
        announcements: Vec<Announcement>,
        chats: Vec<ChatThread>,
    ) -> Self {
        Self {
            data: StoreSnapshot {
                courses: courses.into(),
                grades: Arc::new(grades),
                student_feed: unique_feed(Role::Student, student_feed).into(),
                professor_feed: unique_feed(Role::Professor, professor_feed).into(),
                announcements: announcements.into(),
                chats: chats.into(),
                revision: 0,
            },
            next_id: 0,
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        self.data.clone()
    }

    /// Incremented once per committed mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.data.revision
    }

    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.data.courses
    }

    #[must_use]
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.data.courses.iter().find(|course| course.id.as_str() == id)
    }

    /// Find a resource by id across all courses.
    ///
    /// Courses, modules and resources are scanned in store order and the
    /// first match wins.
    #[must_use]
    pub fn find_resource(&self, id: &str) -> Option<ResourceLocation<'_>> {
        self.data.courses.iter().find_map(|course| {
            course
                .resource(id)
                .map(|resource| ResourceLocation { course, resource })
        })
    }

    /// Find a resource inside one course only.
    #[must_use]
    pub fn resource_in(&self, course_id: &str, resource_id: &str) -> Option<ResourceLocation<'_>> {
        let course = self.course(course_id)?;
        course
            .resource(resource_id)
            .map(|resource| ResourceLocation { course, resource })
    }

    /// Resource ids that appear more than once across the catalogue.
    #[must_use]
    pub fn duplicate_resource_ids(&self) -> Vec<ResourceId> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for resource in self.data.courses.iter().flat_map(Course::resources) {
            if !seen.insert(resource.id.as_str()) && !duplicates.contains(&resource.id) {
                duplicates.push(resource.id.clone());
            }
        }
        duplicates
    }

    #[must_use]
    pub fn grades(&self) -> &GradeMatrix {
        &self.data.grades
    }

    /// The recorded grade, or `None` when ungraded.
    #[must_use]
    pub fn grade(&self, student: &str, assignment: &str) -> Option<&str> {
        self.data
            .grades
            .get(student)
            .and_then(|row| row.get(assignment))
            .map(String::as_str)
    }

    /// A role's notification feed, newest first.
    #[must_use]
    pub fn feed(&self, role: Role) -> &[Notification] {
        self.data.feed(role)
    }

    #[must_use]
    pub fn notification(&self, role: Role, id: &str) -> Option<&Notification> {
        self.feed(role).iter().find(|n| n.id.as_str() == id)
    }

    #[must_use]
    pub fn unread_count(&self, role: Role) -> usize {
        self.feed(role).iter().filter(|n| !n.read).count()
    }

    #[must_use]
    pub fn announcements(&self) -> &[Announcement] {
        &self.data.announcements
    }

    #[must_use]
    pub fn chats(&self) -> &[ChatThread] {
        &self.data.chats
    }

    #[must_use]
    pub fn chat(&self, id: &str) -> Option<&ChatThread> {
        self.data.chats.iter().find(|chat| chat.id.as_str() == id)
    }

    #[must_use]
    pub fn unread_chat_count(&self) -> usize {
        self.data.chats.iter().filter(|chat| chat.unread).count()
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    pub(crate) fn batch(&mut self) -> Batch<'_> {
        let next_id = self.next_id;
        Batch {
            store: self,
            courses: None,
            grades: None,
            student_feed: None,
            professor_feed: None,
            announcements: None,
            chats: None,
            next_id,
        }
    }

    pub fn archive_course(&mut self, id: &CourseId) -> Result<(), StoreError> {
        let mut batch = self.batch();
        batch.archive_course(id)?;
        batch.commit();
        Ok(())
    }

    /// Record a grade and return the previous value, if any.
    ///
    /// Writes only the gradebook; cross-role notifications are the job of
    /// `SyncBus::update_grade`.
    pub fn set_grade(
        &mut self,
        student: &StudentId,
        assignment: &AssignmentId,
        value: &str,
    ) -> Option<String> {
        let mut batch = self.batch();
        let previous = batch.set_grade(student, assignment, value);
        batch.commit();
        previous
    }

    /// Prepend an announcement as-is.
    pub fn add_announcement(&mut self, announcement: Announcement) {
        let mut batch = self.batch();
        batch.prepend_announcement(announcement);
        batch.commit();
    }

    /// Prepend a notification to a role's feed.
    pub fn add_notification(
        &mut self,
        role: Role,
        notification: Notification,
    ) -> Result<(), StoreError> {
        let mut batch = self.batch();
        batch.add_notification(role, notification)?;
        batch.commit();
        Ok(())
    }

    /// Returns whether the flag actually changed.
    pub fn mark_read(&mut self, role: Role, id: &NotificationId) -> Result<bool, StoreError> {
        self.set_read(role, id, true)
    }

    pub fn mark_unread(&mut self, role: Role, id: &NotificationId) -> Result<bool, StoreError> {
        self.set_read(role, id, false)
    }

    fn set_read(
        &mut self,
        role: Role,
        id: &NotificationId,
        read: bool,
    ) -> Result<bool, StoreError> {
        let mut batch = self.batch();
        let changed = batch.set_read(role, id, read)?;
        batch.commit();
        Ok(changed)
    }

    pub fn delete_notification(
        &mut self,
        role: Role,
        id: &NotificationId,
    ) -> Result<Notification, StoreError> {
        let mut batch = self.batch();
        let removed = batch.delete_notification(role, id)?;
        batch.commit();
        Ok(removed)
    }

    /// Returns how many notifications flipped to read.
    pub fn mark_all_read(&mut self, role: Role) -> usize {
        let mut batch = self.batch();
        let flipped = batch.mark_all_read(role);
        batch.commit();
        flipped
    }

    /// Return the thread with `sender`, creating it when none exists.
    pub fn upsert_chat(&mut self, sender: &str) -> Result<ChatId, StoreError> {
        let mut batch = self.batch();
        let (id, _created) = batch.upsert_chat(sender)?;
        batch.commit();
        Ok(id)
    }

    /// Always open a fresh thread, even if one with `sender` exists.
    pub fn create_chat(&mut self, sender: &str) -> Result<ChatId, StoreError> {
        let mut batch = self.batch();
        let id = batch.create_chat(sender, "New chat")?;
        batch.commit();
        Ok(id)
    }

    /// Append one of our own messages, stamped with the local wall-clock time.
    pub fn append_chat_message(
        &mut self,
        chat: &ChatId,
        text: &str,
    ) -> Result<ChatMessageId, StoreError> {
        let timestamp = chrono::Local::now().format("%H:%M").to_string();
        self.append_chat_message_at(chat, text, &timestamp)
    }

    pub fn append_chat_message_at(
        &mut self,
        chat: &ChatId,
        text: &str,
        timestamp: &str,
    ) -> Result<ChatMessageId, StoreError> {
        let mut batch = self.batch();
        let id = batch.append_chat_message(chat, text, timestamp)?;
        batch.commit();
        Ok(id)
    }

    pub fn delete_chat_message(
        &mut self,
        chat: &ChatId,
        message: &ChatMessageId,
    ) -> Result<ChatMessage, StoreError> {
        let mut batch = self.batch();
        let removed = batch.delete_chat_message(chat, message)?;
        batch.commit();
        Ok(removed)
    }

    /// Clear a thread's unread flag. Returns whether it was set.
    pub fn mark_chat_read(&mut self, chat: &ChatId) -> Result<bool, StoreError> {
        let mut batch = self.batch();
        let changed = batch.mark_chat_read(chat)?;
        batch.commit();
        Ok(changed)
    }
}

/// Staged changes against a [`RecordStore`].
///
/// Each collection is copied on first write. Nothing becomes visible until
/// [`Batch::commit`]; dropping the batch discards every staged change, which
/// is how a failing step leaves the store untouched.
pub(crate) struct Batch<'a> {
    store: &'a mut RecordStore,
    courses: Option<Vec<Course>>,
    grades: Option<GradeMatrix>,
    student_feed: Option<Vec<Notification>>,
    professor_feed: Option<Vec<Notification>>,
    announcements: Option<Vec<Announcement>>,
    chats: Option<Vec<ChatThread>>,
    next_id: u64,
}

fn staged<'b, T: Clone>(pending: &'b mut Option<Vec<T>>, committed: &[T]) -> &'b mut Vec<T> {
    pending.get_or_insert_with(|| committed.to_vec())
}

impl Batch<'_> {
    /// Publish every staged collection and bump the revision.
    ///
    /// Returns whether anything was staged.
    pub(crate) fn commit(self) -> bool {
        let Batch {
            store,
            courses,
            grades,
            student_feed,
            professor_feed,
            announcements,
            chats,
            next_id,
        } = self;

        let mut changed = false;
        if let Some(courses) = courses {
            store.data.courses = courses.into();
            changed = true;
        }
        if let Some(grades) = grades {
            store.data.grades = Arc::new(grades);
            changed = true;
        }
        if let Some(feed) = student_feed {
            store.data.student_feed = feed.into();
            changed = true;
        }
        if let Some(feed) = professor_feed {
            store.data.professor_feed = feed.into();
            changed = true;
        }
        if let Some(announcements) = announcements {
            store.data.announcements = announcements.into();
            changed = true;
        }
        if let Some(chats) = chats {
            store.data.chats = chats.into();
            changed = true;
        }
        store.next_id = next_id;
        if changed {
            store.data.revision += 1;
            tracing::trace!(revision = store.data.revision, "store committed");
        }
        changed
    }

    fn courses(&self) -> &[Course] {
        self.courses.as_deref().unwrap_or(&self.store.data.courses)
    }

    fn feed(&self, role: Role) -> &[Notification] {
        let pending = match role {
            Role::Student => &self.student_feed,
            Role::Professor => &self.professor_feed,
        };
        pending.as_deref().unwrap_or(self.store.data.feed(role))
    }

    fn feed_mut(&mut self, role: Role) -> &mut Vec<Notification> {
        match role {
            Role::Student => staged(&mut self.student_feed, &self.store.data.student_feed),
            Role::Professor => staged(&mut self.professor_feed, &self.store.data.professor_feed),
        }
    }

    fn chats(&self) -> &[ChatThread] {
        self.chats.as_deref().unwrap_or(&self.store.data.chats)
    }

    fn chats_mut(&mut self) -> &mut Vec<ChatThread> {
        staged(&mut self.chats, &self.store.data.chats)
    }

    fn fresh_id(&mut self, prefix: &str, taken: &HashSet<String>) -> String {
        loop {
            self.next_id += 1;
            let candidate = format!("{prefix}{}", self.next_id);
            if !taken.contains(&candidate) {
                return candidate;
            }
        }
    }

    pub(crate) fn next_notification_id(&mut self, role: Role) -> NotificationId {
        let taken = self.feed(role).iter().map(|n| n.id.to_string()).collect();
        NotificationId::new(self.fresh_id("n", &taken))
    }

    pub(crate) fn next_announcement_id(&mut self) -> AnnouncementId {
        let announcements = self.announcements.as_deref();
        let taken = announcements
            .unwrap_or(&self.store.data.announcements)
            .iter()
            .map(|a| a.id.to_string())
            .collect();
        AnnouncementId::new(self.fresh_id("a", &taken))
    }

    fn chat_index(&self, chat: &ChatId) -> Result<usize, StoreError> {
        self.chats()
            .iter()
            .position(|thread| &thread.id == chat)
            .ok_or_else(|| StoreError::ChatNotFound(chat.clone()))
    }

    fn notification_index(&self, role: Role, id: &NotificationId) -> Result<usize, StoreError> {
        self.feed(role)
            .iter()
            .position(|n| &n.id == id)
            .ok_or_else(|| StoreError::NotificationNotFound {
                role,
                id: id.clone(),
            })
    }

    pub(crate) fn archive_course(&mut self, id: &CourseId) -> Result<(), StoreError> {
        let index = self
            .courses()
            .iter()
            .position(|course| &course.id == id)
            .ok_or_else(|| StoreError::CourseNotFound(id.clone()))?;
        if self.courses()[index].archived {
            return Ok(());
        }
        staged(&mut self.courses, &self.store.data.courses)[index].archived = true;
        Ok(())
    }

    pub(crate) fn set_grade(
        &mut self,
        student: &StudentId,
        assignment: &AssignmentId,
        value: &str,
    ) -> Option<String> {
        let committed = &self.store.data.grades;
        let grades = self
            .grades
            .get_or_insert_with(|| GradeMatrix::clone(committed));
        grades
            .entry(student.clone())
            .or_default()
            .insert(assignment.clone(), value.to_owned())
    }

    pub(crate) fn prepend_announcement(&mut self, announcement: Announcement) {
        staged(&mut self.announcements, &self.store.data.announcements).insert(0, announcement);
    }

    pub(crate) fn add_notification(
        &mut self,
        role: Role,
        notification: Notification,
    ) -> Result<(), StoreError> {
        if self.feed(role).iter().any(|n| n.id == notification.id) {
            return Err(StoreError::DuplicateNotification {
                role,
                id: notification.id,
            });
        }
        self.feed_mut(role).insert(0, notification);
        Ok(())
    }

    pub(crate) fn set_read(
        &mut self,
        role: Role,
        id: &NotificationId,
        read: bool,
    ) -> Result<bool, StoreError> {
        let index = self.notification_index(role, id)?;
        if self.feed(role)[index].read == read {
            return Ok(false);
        }
        self.feed_mut(role)[index].read = read;
        Ok(true)
    }

    pub(crate) fn delete_notification(
        &mut self,
        role: Role,
        id: &NotificationId,
    ) -> Result<Notification, StoreError> {
        let index = self.notification_index(role, id)?;
        Ok(self.feed_mut(role).remove(index))
    }

    pub(crate) fn mark_all_read(&mut self, role: Role) -> usize {
        let unread = self.feed(role).iter().filter(|n| !n.read).count();
        if unread > 0 {
            for notification in self.feed_mut(role).iter_mut() {
                notification.read = true;
            }
        }
        unread
    }

    pub(crate) fn upsert_chat(&mut self, sender: &str) -> Result<(ChatId, bool), StoreError> {
        if let Some(existing) = self.chats().iter().find(|thread| thread.sender == sender) {
            return Ok((existing.id.clone(), false));
        }
        let id = self.create_chat(sender, NEW_CHAT_PREVIEW)?;
        Ok((id, true))
    }

    pub(crate) fn create_chat(
        &mut self,
        sender: &str,
        preview: &str,
    ) -> Result<ChatId, StoreError> {
        if sender.trim().is_empty() {
            return Err(StoreError::Blank("sender"));
        }
        let taken = self.chats().iter().map(|c| c.id.to_string()).collect();
        let id = ChatId::new(self.fresh_id("c", &taken));
        let mut thread = ChatThread::new(id.clone(), sender);
        thread.preview = preview.to_owned();
        thread.time = NOW_LABEL.to_owned();
        self.chats_mut().insert(0, thread);
        Ok(id)
    }

    pub(crate) fn append_chat_message(
        &mut self,
        chat: &ChatId,
        text: &str,
        timestamp: &str,
    ) -> Result<ChatMessageId, StoreError> {
        if text.trim().is_empty() {
            return Err(StoreError::Blank("message"));
        }
        let index = self.chat_index(chat)?;
        let taken = self.chats()[index]
            .history
            .iter()
            .map(|m| m.id.to_string())
            .collect();
        let id = ChatMessageId::new(self.fresh_id("m", &taken));
        let thread = &mut self.chats_mut()[index];
        thread.history.push(ChatMessage {
            id: id.clone(),
            text: text.to_owned(),
            sender: ChatSender::Me,
            timestamp: timestamp.to_owned(),
        });
        thread.preview = format!("You: {text}");
        thread.time = NOW_LABEL.to_owned();
        Ok(id)
    }

    pub(crate) fn delete_chat_message(
        &mut self,
        chat: &ChatId,
        message: &ChatMessageId,
    ) -> Result<ChatMessage, StoreError> {
        let index = self.chat_index(chat)?;
        let position = self.chats()[index]
            .history
            .iter()
            .position(|m| &m.id == message)
            .ok_or_else(|| StoreError::ChatMessageNotFound {
                chat: chat.clone(),
                message: message.clone(),
            })?;
        Ok(self.chats_mut()[index].history.remove(position))
    }

    pub(crate) fn mark_chat_read(&mut self, chat: &ChatId) -> Result<bool, StoreError> {
        let index = self.chat_index(chat)?;
        if !self.chats()[index].unread {
            return Ok(false);
        }
        self.chats_mut()[index].unread = false;
        Ok(true)
    }
}

fn unique_feed(role: Role, mut feed: Vec<Notification>) -> Vec<Notification> {
    let mut seen = HashSet::new();
    feed.retain(|notification| {
        let first = seen.insert(notification.id.clone());
        if !first {
            tracing::warn!(
                role = role.as_str(),
                notification = %notification.id,
                "Dropping notification with a repeated id"
            );
        }
        first
    });
    feed
}
