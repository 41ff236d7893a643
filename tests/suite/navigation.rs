//! History and breadcrumb behaviour as seen through a session

use aula_engine::{Action, DispatchOutcome, NavParams, ViewName};
use aula_types::{CourseId, ResourceId};

use crate::common::{student, trail};

#[test]
fn crumb_click_then_forward_returns_to_deeper_entry() {
    let mut session = student();
    session.dispatch(Action::SidebarSelect(ViewName::Courses));
    session.dispatch(Action::SelectCourse(CourseId::new("2")));
    session.dispatch(Action::SelectResource {
        course: CourseId::new("2"),
        resource: ResourceId::new("r9"),
    });
    assert_eq!(
        trail(&session),
        [
            "My Courses",
            "Object-Oriented Programming",
            "Practice 1: My first class"
        ]
    );

    let crumb = session
        .breadcrumbs()
        .unwrap()
        .find(|crumb| crumb.label == "My Courses")
        .unwrap();
    assert!(!crumb.is_active);
    assert_eq!(session.dispatch(Action::JumpTo(crumb.jump_index)), DispatchOutcome::Applied);
    assert_eq!(trail(&session), ["My Courses"]);

    session.dispatch(Action::Forward);
    session.dispatch(Action::Forward);
    assert_eq!(session.current().view(), ViewName::TaskDetail);
    assert_eq!(session.current().param("resourceId"), Some("r9"));
}

#[test]
fn push_after_back_discards_forward_branch() {
    let mut session = student();
    session.dispatch(Action::navigate(ViewName::Courses));
    session.dispatch(Action::navigate(ViewName::Grades));
    session.dispatch(Action::navigate(ViewName::Calendar));
    session.dispatch(Action::Back);
    session.dispatch(Action::Back);
    session.dispatch(Action::navigate(ViewName::Profile));

    assert_eq!(session.history().len(), 3);
    assert!(!session.history().can_go_forward());
    assert_eq!(trail(&session), ["Home", "My Courses", "Profile"]);
}

#[test]
fn only_the_last_crumb_is_active() {
    let mut session = student();
    session.dispatch(Action::navigate(ViewName::Courses));
    session.dispatch(Action::navigate(ViewName::Notifications));

    let active: Vec<bool> = session
        .breadcrumbs()
        .unwrap()
        .map(|crumb| crumb.is_active)
        .collect();
    assert_eq!(active, [false, false, true]);
}

#[test]
fn reset_navigation_carries_params() {
    let mut session = student();
    session.dispatch(Action::navigate(ViewName::Courses));
    session.dispatch(Action::Navigate {
        view: ViewName::CourseDetail,
        params: Some(NavParams::course(&CourseId::new("4"))),
        label: Some("Databases".to_owned()),
        reset: true,
    });

    assert_eq!(session.history().len(), 1);
    assert_eq!(session.current().params().unwrap().course_id(), Some("4"));
    assert_eq!(trail(&session), ["Databases"]);
}

#[test]
fn boundaries_leave_history_alone() {
    let mut session = student();
    let before = session.history().clone();

    assert_eq!(session.dispatch(Action::Back), DispatchOutcome::Unchanged);
    assert_eq!(session.dispatch(Action::Forward), DispatchOutcome::Unchanged);
    assert_eq!(session.dispatch(Action::JumpTo(3)), DispatchOutcome::Unchanged);
    assert_eq!(session.history(), &before);
}
