//! Professor actions that surface in the student's session

use aula_engine::{
    Action, DispatchOutcome, Identity, NavigationSettings, Notification, Resolution, Role, Seed,
    Session, SyncSettings, ViewName,
};
use aula_types::{AssignmentId, NotificationKind, StudentId};

use crate::common::{demo_session, professor};

fn grade(student: &str, assignment: &str, value: &str) -> Action {
    Action::UpdateGrade {
        student: StudentId::new(student),
        assignment: AssignmentId::new(assignment),
        value: value.to_owned(),
    }
}

#[test]
fn professor_grade_reaches_student_and_opens_grades() {
    let mut session = professor();
    assert!(session.dispatch(grade("s1", "t1", "99")).is_applied());

    session.set_identity(Identity::student("s1"));
    assert_eq!(session.unread_count(), 3);
    let newest = session.feed()[0].clone();
    assert_eq!(newest.kind, NotificationKind::Success);
    assert_eq!(newest.title, "Grade updated");
    assert_eq!(
        newest.message,
        "Your grade for the assignment has been updated to 99"
    );

    assert!(session.dispatch(Action::OpenNotification(newest.id.clone())).is_applied());
    assert_eq!(session.current().view(), ViewName::Grades);
    assert_eq!(session.unread_count(), 2);
    assert_eq!(session.store().grade("s1", "t1"), Some("99"));
}

#[test]
fn grades_for_other_students_stay_quiet() {
    let mut session = professor();
    let revision = session.store().revision();
    session.dispatch(grade("s4", "e1", "70"));

    assert_eq!(session.store().grade("s4", "e1"), Some("70"));
    assert_eq!(session.store().feed(Role::Student).len(), 3);
    assert!(session.store().revision() > revision);
}

#[test]
fn configured_primary_student_receives_grade_notices() {
    let settings = SyncSettings::default().with_primary_student("s2");
    let mut session = demo_session(Identity::professor());
    let mut custom = Session::new(
        Seed::demo(),
        Identity::professor(),
        settings,
        NavigationSettings::default(),
    );

    session.dispatch(grade("s2", "t1", "88"));
    custom.dispatch(grade("s2", "t1", "88"));

    assert_eq!(session.store().feed(Role::Student).len(), 3);
    assert_eq!(custom.store().feed(Role::Student).len(), 4);
}

#[test]
fn announcement_lands_on_both_dashboards() {
    let mut session = professor();
    let outcome = session.dispatch(Action::CreateAnnouncement {
        title: "Midterm moved".to_owned(),
        content: "It is now on Thursday".to_owned(),
    });
    assert_eq!(outcome, DispatchOutcome::Applied);

    let latest = &session.store().announcements()[0];
    assert_eq!(latest.title, "Midterm moved");
    assert_eq!(latest.author, "Dr. Juan Pérez");
    assert_eq!(latest.course_name, "Differential Calculus");

    session.set_identity(Identity::student("s1"));
    let notice = &session.feed()[0];
    assert_eq!(notice.title, "New announcement");
    assert_eq!(notice.message, "Dr. Juan Pérez published: \"Midterm moved\"");
    assert_eq!(notice.time, "now");

    let notice = notice.clone();
    let resolution = session.resolve_and_navigate(&notice);
    assert_eq!(resolution.state().map(|s| s.view()), Some(ViewName::Dashboard));
}

#[test]
fn blank_announcement_is_rejected_without_side_effects() {
    let mut session = professor();
    let revision = session.store().revision();
    let outcome = session.dispatch(Action::CreateAnnouncement {
        title: "   ".to_owned(),
        content: "body".to_owned(),
    });

    assert!(matches!(outcome, DispatchOutcome::Rejected(_)));
    assert_eq!(session.store().revision(), revision);
    assert_eq!(session.store().announcements().len(), 1);
}

#[test]
fn student_notification_for_missing_course_still_navigates() {
    let mut session = demo_session(Identity::student("s1"));
    let notice = Notification::new(
        "x1",
        NotificationKind::Warning,
        "Course moved",
        "See the new course page",
    )
    .targeting(ViewName::CourseDetail)
    .with_target_id("404");

    let resolution = session.resolve_and_navigate(&notice);
    let Resolution::Navigate { state, .. } = resolution else {
        panic!("course-detail always navigates");
    };
    assert_eq!(state.breadcrumb_label(), "Course");
    assert_eq!(state.param("courseId"), Some("404"));
}
