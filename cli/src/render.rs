//! Plain-text rendering of a session for the line driver.

use std::fmt::Write as _;

use aula_engine::{ChatSender, Role, Session, ViewName};

/// Role, current view and badges on one line.
pub(crate) fn status(session: &Session) -> String {
    let current = session.current();
    let mut line = format!(
        "[{}] {} ({})",
        session.role().as_str(),
        current.breadcrumb_label(),
        current.view()
    );
    let unread = session.unread_count();
    if unread > 0 {
        let _ = write!(line, " | {unread} unread");
    }
    let chats = session.store().unread_chat_count();
    if chats > 0 {
        let plural = if chats == 1 { "" } else { "s" };
        let _ = write!(line, " | {chats} unread chat{plural}");
    }
    line
}

/// `Home > My Courses > [Files]`, with the active crumb bracketed.
pub(crate) fn breadcrumbs(session: &Session) -> Option<String> {
    let crumbs: Vec<String> = session
        .breadcrumbs()?
        .map(|crumb| {
            if crumb.is_active {
                format!("[{}]", crumb.label)
            } else {
                crumb.label.to_owned()
            }
        })
        .collect();
    Some(crumbs.join(" > "))
}

/// The content of the current view. Views with nothing to list render empty.
pub(crate) fn body(session: &Session) -> String {
    let mut out = String::new();
    let current = session.current();
    let store = session.store();

    match current.view() {
        ViewName::Dashboard => {
            for announcement in store.announcements().iter().take(3) {
                let _ = writeln!(
                    out,
                    "  {} ({}, {})",
                    announcement.title, announcement.course_name, announcement.date
                );
            }
        }
        ViewName::Courses => {
            for course in store.courses() {
                let archived = if course.archived { ", archived" } else { "" };
                let _ = writeln!(
                    out,
                    "  {:>2} {:<8} {} ({}{archived})",
                    course.id,
                    course.code,
                    course.name,
                    course.status.display_name()
                );
            }
        }
        ViewName::CourseDetail => {
            let course = current
                .params()
                .and_then(|p| p.course_id())
                .and_then(|id| store.course(id));
            match course {
                Some(course) => {
                    let _ = writeln!(out, "  {} - {}", course.code, course.professor);
                    for module in &course.modules {
                        let _ = writeln!(out, "  {}", module.title);
                        for resource in &module.resources {
                            let _ = writeln!(
                                out,
                                "    {:<6} {:<10} {}",
                                resource.id,
                                resource.kind.as_str(),
                                resource.title
                            );
                        }
                    }
                }
                None => out.push_str("  Course not found\n"),
            }
        }
        ViewName::TaskDetail => {
            let found = current.params().and_then(|params| {
                let resource_id = params.resource_id()?;
                match params.course_id() {
                    Some(course_id) => store.resource_in(course_id, resource_id),
                    None => store.find_resource(resource_id),
                }
            });
            match found {
                Some(found) => {
                    let resource = found.resource;
                    let _ = writeln!(out, "  {} in {}", resource.kind.as_str(), found.course.name);
                    if let Some(due) = &resource.due_date {
                        let _ = writeln!(out, "  due {due}");
                    }
                    if let (Some(score), Some(max)) = (resource.score, resource.max_score) {
                        let _ = writeln!(out, "  score {score}/{max}");
                    }
                }
                None => out.push_str("  Resource not found\n"),
            }
        }
        ViewName::Notifications => {
            for notification in session.feed() {
                let marker = if notification.read { ' ' } else { '*' };
                let _ = writeln!(
                    out,
                    "  {marker} {:<4} {}: {}",
                    notification.id, notification.title, notification.message
                );
            }
        }
        ViewName::Grades | ViewName::GradingView => {
            for (student, row) in store.grades() {
                let own = session.identity().student_id() == Some(student);
                if session.role() == Role::Student && !own {
                    continue;
                }
                let cells: Vec<String> = row
                    .iter()
                    .map(|(assignment, value)| format!("{assignment}={value}"))
                    .collect();
                let _ = writeln!(out, "  {student}: {}", cells.join(" "));
            }
        }
        ViewName::Messages => {
            let active = session.active_chat_id();
            for chat in store.chats() {
                let marker = if Some(&chat.id) == active { '>' } else { ' ' };
                let unread = if chat.unread { " *" } else { "" };
                let _ = writeln!(
                    out,
                    "  {marker} {:<3} {}{unread}: {}",
                    chat.id, chat.sender, chat.preview
                );
            }
            if let Some(chat) = session.active_chat() {
                for message in &chat.history {
                    let who = match message.sender {
                        ChatSender::Me => "you",
                        ChatSender::Them => chat.sender.as_str(),
                    };
                    let _ = writeln!(out, "    {who}: {}", message.text);
                }
            }
        }
        ViewName::Calendar => {
            if let Some(date) = current.params().and_then(|p| p.initial_date()) {
                let _ = writeln!(out, "  from {date}");
            }
        }
        ViewName::Login
        | ViewName::Files
        | ViewName::Profile
        | ViewName::Settings
        | ViewName::Glossary => {}
    }

    out.truncate(out.trim_end().len());
    out
}

/// Everything printed after a command.
pub(crate) fn screen(session: &Session) -> String {
    let mut out = status(session);
    if let Some(trail) = breadcrumbs(session) {
        out.push('\n');
        out.push_str(&trail);
    }
    let body = body(session);
    if !body.is_empty() {
        out.push('\n');
        out.push_str(&body);
    }
    out
}

#[cfg(test)]
mod tests {
    use aula_engine::{
        Action, Identity, NavigationSettings, Seed, Session, SyncSettings, ViewName,
    };
    use aula_types::{Resource, ResourceKind};
    use insta::assert_snapshot;

    use super::{breadcrumbs, screen, status};

    fn session(identity: Identity) -> Session {
        session_with(Seed::demo(), identity)
    }

    fn session_with(seed: Seed, identity: Identity) -> Session {
        Session::new(
            seed,
            identity,
            SyncSettings::default(),
            NavigationSettings::default(),
        )
    }

    #[test]
    fn fresh_student_screen() {
        let session = session(Identity::student("s1"));
        assert_snapshot!(screen(&session), @r"
        [student] Home (dashboard) | 2 unread | 1 unread chat
        [Home]
          Welcome to the course (Differential Calculus, Aug 20)
        ");
    }

    #[test]
    fn breadcrumbs_bracket_the_active_entry() {
        let mut session = session(Identity::student("s1"));
        session.dispatch(Action::navigate(ViewName::Courses));
        session.dispatch(Action::navigate(ViewName::Grades));
        session.dispatch(Action::Back);
        assert_snapshot!(breadcrumbs(&session).unwrap(), @"Home > [My Courses]");
    }

    #[test]
    fn professor_status_has_no_chat_badge_once_read() {
        let mut session = session(Identity::professor());
        session.dispatch(Action::SelectChat("1".into()));
        assert_snapshot!(status(&session), @"[professor] Home (dashboard) | 2 unread");
    }

    #[test]
    fn student_sees_only_own_grades() {
        let mut session = session(Identity::student("s1"));
        session.dispatch(Action::SidebarSelect(ViewName::Grades));
        assert_snapshot!(screen(&session), @r"
        [student] Grades (grades) | 2 unread | 1 unread chat
        [Grades]
          s1: e1=90 t1=95 t2=80
        ");
    }

    #[test]
    fn course_detail_lists_modules() {
        let mut session = session(Identity::student("s1"));
        session.dispatch(Action::SelectCourse("3".into()));
        assert_snapshot!(screen(&session), @r"
        [student] General Physics (course-detail) | 2 unread | 1 unread chat
        Home > [General Physics]
          FG-102 - Dr. Carlos Ruiz
          Kinematics
            r10    pdf        Reading: Uniform linear motion
            r10-2  quiz       Quiz: Basic concepts
        ");
    }

    #[test]
    fn task_detail_uses_the_course_in_the_params() {
        let mut seed = Seed::demo();
        seed.courses[0].modules[0]
            .resources
            .push(Resource::new("r9", ResourceKind::Pdf, "Copy of practice 1"));
        let mut session = session_with(seed, Identity::student("s1"));
        session.dispatch(Action::SelectResource {
            course: "2".into(),
            resource: "r9".into(),
        });
        assert_snapshot!(screen(&session), @r"
        [student] Practice 1: My first class (task-detail) | 2 unread | 1 unread chat
        Home > [Practice 1: My first class]
          assignment in Object-Oriented Programming
          due Monday, October 28, 14:00
        ");
    }
}
