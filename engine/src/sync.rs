//! Cross-role synchronization rules.
//!
//! A professor action that concerns students derives a student-feed
//! notification in the same commit as the write itself, so an observer never
//! sees one without the other.

use aula_types::{
    Announcement, AnnouncementId, AssignmentId, Notification, NotificationId, NotificationKind,
    Role, StudentId, SyncSettings, ViewName,
};

use crate::store::{NOW_LABEL, RecordStore, StoreError};

#[derive(Debug, Clone, Default)]
pub struct SyncBus {
    settings: SyncSettings,
}

impl SyncBus {
    #[must_use]
    pub fn new(settings: SyncSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Publish an announcement and tell the students about it.
    pub fn create_announcement(
        &self,
        store: &mut RecordStore,
        title: &str,
        content: &str,
    ) -> Result<AnnouncementId, StoreError> {
        if title.trim().is_empty() {
            return Err(StoreError::Blank("title"));
        }

        let mut batch = store.batch();
        let announcement_id = batch.next_announcement_id();
        batch.prepend_announcement(Announcement {
            id: announcement_id.clone(),
            title: title.to_owned(),
            content: content.to_owned(),
            course_name: self.settings.course_name().to_owned(),
            date: NOW_LABEL.to_owned(),
            author: self.settings.author().to_owned(),
        });

        let notification_id = batch.next_notification_id(Role::Student);
        let notification = Notification::new(
            notification_id.clone(),
            NotificationKind::Info,
            "New announcement",
            format!("{} published: \"{title}\"", self.settings.author()),
        )
        .at(NOW_LABEL)
        .targeting(ViewName::Dashboard);
        batch.add_notification(Role::Student, notification)?;
        batch.commit();

        tracing::info!(
            announcement = %announcement_id,
            notification = %notification_id,
            "Announcement published to students"
        );
        Ok(announcement_id)
    }

    /// Record a grade. Only the primary student is notified.
    ///
    /// Returns the id of the derived notification, if one was created.
    pub fn update_grade(
        &self,
        store: &mut RecordStore,
        student: &StudentId,
        assignment: &AssignmentId,
        value: &str,
    ) -> Result<Option<NotificationId>, StoreError> {
        let mut batch = store.batch();
        let previous = batch.set_grade(student, assignment, value);

        if student != self.settings.primary_student() {
            batch.commit();
            tracing::debug!(%student, %assignment, ?previous, "Grade recorded");
            return Ok(None);
        }

        let notification_id = batch.next_notification_id(Role::Student);
        let notification = Notification::new(
            notification_id.clone(),
            NotificationKind::Success,
            "Grade updated",
            format!("Your grade for the assignment has been updated to {value}"),
        )
        .at(NOW_LABEL)
        .targeting(ViewName::Grades);
        batch.add_notification(Role::Student, notification)?;
        batch.commit();

        tracing::info!(
            %student,
            %assignment,
            notification = %notification_id,
            "Grade recorded; student notified"
        );
        Ok(Some(notification_id))
    }
}
