//! Typed commands driving a session end to end

use aula_engine::{Command, DispatchOutcome, Role, Session, ViewName};

use crate::common::{professor, student};

/// Parse and dispatch each line, the way the line driver does.
fn run(session: &mut Session, script: &[&str]) -> Vec<DispatchOutcome> {
    script
        .iter()
        .filter_map(|line| Command::parse(line).action())
        .map(|action| session.dispatch(action))
        .collect()
}

#[test]
fn contact_then_send_in_professor_thread() {
    let mut session = student();
    let outcomes = run(
        &mut session,
        &["chat Dr. Juan Pérez", "send See you in office hours"],
    );
    assert!(outcomes.iter().all(DispatchOutcome::is_applied));

    let chat = session.active_chat().unwrap();
    assert_eq!(chat.sender, "Dr. Juan Pérez");
    assert_eq!(chat.preview, "You: See you in office hours");
    assert_eq!(session.current().view(), ViewName::Messages);
}

#[test]
fn announce_and_grade_from_professor_commands() {
    let mut session = professor();
    let outcomes = run(
        &mut session,
        &["announce Quiz 2 | Bring a calculator", "grade s1 e1 100"],
    );
    assert_eq!(outcomes, [DispatchOutcome::Applied, DispatchOutcome::Applied]);

    let feed = session.store().feed(Role::Student);
    assert_eq!(feed[0].title, "Grade updated");
    assert_eq!(feed[1].title, "New announcement");
    assert_eq!(session.store().announcements()[0].content, "Bring a calculator");
}

#[test]
fn feed_commands_report_unchanged_and_rejected() {
    let mut session = student();
    let outcomes = run(&mut session, &["read 3", "unread 3", "delete 42", "readall"]);

    assert_eq!(outcomes[0], DispatchOutcome::Unchanged);
    assert_eq!(outcomes[1], DispatchOutcome::Applied);
    assert!(matches!(outcomes[2], DispatchOutcome::Rejected(_)));
    assert_eq!(outcomes[3], DispatchOutcome::Applied);
    assert_eq!(session.unread_count(), 0);
}

#[test]
fn open_command_follows_target() {
    let mut session = student();
    let outcomes = run(&mut session, &["go notifications", "open 2"]);
    assert!(outcomes.iter().all(DispatchOutcome::is_applied));

    assert_eq!(session.current().view(), ViewName::CourseDetail);
    assert_eq!(session.current().breadcrumb_label(), "Course");
    assert_eq!(session.current().param("courseId"), Some("3"));
}

#[test]
fn unparsed_lines_produce_no_actions() {
    let mut session = student();
    let outcomes = run(&mut session, &["", "role professor", "fly", "jump", "help"]);
    assert!(outcomes.is_empty());
    assert_eq!(session.history().len(), 1);
}
