//! Sessions built from config files on disk

use aula_engine::{Action, Role, ViewName};

use crate::common::{SMALL_SEED, session_from_config, trail, write_file};

#[test]
fn config_sets_identity_home_and_author() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(
        dir.path(),
        "config.toml",
        r#"
[sync]
author = "Dr. Ana Gómez"
course_name = "Object-Oriented Programming"

[navigation]
home = "courses"

[session]
role = "professor"
"#,
    );

    let mut session = session_from_config(&config);
    assert_eq!(session.role(), Role::Professor);
    assert_eq!(session.current().view(), ViewName::Courses);
    assert_eq!(trail(&session), ["My Courses"]);

    session.dispatch(Action::CreateAnnouncement {
        title: "Lab closed".to_owned(),
        content: "Use room 4".to_owned(),
    });
    let latest = &session.store().announcements()[0];
    assert_eq!(latest.author, "Dr. Ana Gómez");
    assert_eq!(latest.course_name, "Object-Oriented Programming");
    assert_eq!(
        session.store().feed(Role::Student)[0].message,
        "Dr. Ana Gómez published: \"Lab closed\""
    );
}

#[test]
fn logout_returns_to_configured_home() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(dir.path(), "config.toml", "[navigation]\nhome = \"calendar\"\n");

    let mut session = session_from_config(&config);
    session.dispatch(Action::navigate(ViewName::Grades));
    session.dispatch(Action::Logout);

    assert_eq!(session.history().len(), 1);
    assert_eq!(session.current().view(), ViewName::Calendar);
}

#[test]
fn hidden_breadcrumbs_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(
        dir.path(),
        "config.toml",
        "[navigation]\nbreadcrumbs = \"hidden\"\n",
    );

    let session = session_from_config(&config);
    assert!(session.breadcrumbs().is_none());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn seed_path_in_config_replaces_demo_data() {
    let dir = tempfile::tempdir().unwrap();
    let seed = write_file(dir.path(), "seed.json", SMALL_SEED);
    let config = write_file(
        dir.path(),
        "config.toml",
        &format!(
            "[sync]\nprimary_student = \"s7\"\n\n[session]\nseed = {:?}\n",
            seed.display().to_string()
        ),
    );

    let mut session = session_from_config(&config);
    assert_eq!(session.identity().student_id().unwrap().as_str(), "s7");
    assert_eq!(session.store().courses().len(), 1);
    assert_eq!(session.store().grade("s7", "lab1"), Some("8"));
    assert_eq!(session.unread_count(), 1);

    let id = session.feed()[0].id.clone();
    assert!(session.dispatch(Action::OpenNotification(id)).is_applied());
    assert_eq!(trail(&session), ["Home", "Task"]);
    assert_eq!(session.current().param("courseId"), Some("10"));
}
