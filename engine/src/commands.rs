//! Line commands for driving a session from a terminal.

use aula_types::{AssignmentId, ChatId, NotificationId, Role, StudentId, ViewName};

use crate::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

const COMMAND_SPECS: &[CommandSpec] = &[
    CommandSpec {
        name: "back",
        usage: "b, back",
        description: "Go to the previous entry",
    },
    CommandSpec {
        name: "forward",
        usage: "f, forward",
        description: "Go to the next entry",
    },
    CommandSpec {
        name: "jump",
        usage: "jump <index>",
        description: "Jump to a breadcrumb (0 is the first)",
    },
    CommandSpec {
        name: "go",
        usage: "go <view>",
        description: "Open a view",
    },
    CommandSpec {
        name: "course",
        usage: "course <id>",
        description: "Open a course",
    },
    CommandSpec {
        name: "open",
        usage: "open <notification>",
        description: "Follow a notification",
    },
    CommandSpec {
        name: "grade",
        usage: "grade <student> <assignment> <value>",
        description: "Record a grade",
    },
    CommandSpec {
        name: "announce",
        usage: "announce <title> | <content>",
        description: "Publish an announcement",
    },
    CommandSpec {
        name: "role",
        usage: "role student|professor",
        description: "Switch the signed-in role",
    },
    CommandSpec {
        name: "read",
        usage: "read <notification>",
        description: "Mark a notification read",
    },
    CommandSpec {
        name: "unread",
        usage: "unread <notification>",
        description: "Mark a notification unread",
    },
    CommandSpec {
        name: "delete",
        usage: "delete <notification>",
        description: "Delete a notification",
    },
    CommandSpec {
        name: "readall",
        usage: "readall",
        description: "Mark every notification read",
    },
    CommandSpec {
        name: "chat",
        usage: "chat <name>",
        description: "Open the conversation with someone",
    },
    CommandSpec {
        name: "select",
        usage: "select <chat>",
        description: "Switch to an existing conversation",
    },
    CommandSpec {
        name: "send",
        usage: "send <text>",
        description: "Send a message in the open conversation",
    },
    CommandSpec {
        name: "logout",
        usage: "logout",
        description: "Sign out and clear the history",
    },
    CommandSpec {
        name: "help",
        usage: "help",
        description: "Show available commands",
    },
    CommandSpec {
        name: "quit",
        usage: "q, quit",
        description: "Exit",
    },
];

#[must_use]
pub fn command_specs() -> &'static [CommandSpec] {
    COMMAND_SPECS
}

/// One line per command, usage padded into a column.
#[must_use]
pub fn command_help() -> String {
    let width = COMMAND_SPECS
        .iter()
        .map(|spec| spec.usage.len())
        .max()
        .unwrap_or(0);
    COMMAND_SPECS
        .iter()
        .map(|spec| format!("  {:width$}  {}", spec.usage, spec.description))
        .collect::<Vec<_>>()
        .join("\n")
}

fn spec(name: &str) -> Option<&'static CommandSpec> {
    COMMAND_SPECS.iter().find(|spec| spec.name == name)
}

/// Parsed command with typed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Quit,
    Help,
    Back,
    Forward,
    Jump(usize),
    Go(ViewName),
    Course(&'a str),
    Open(&'a str),
    Grade {
        student: &'a str,
        assignment: &'a str,
        value: &'a str,
    },
    Announce {
        title: &'a str,
        content: &'a str,
    },
    Role(Role),
    Read(&'a str),
    Unread(&'a str),
    Delete(&'a str),
    ReadAll,
    Chat(&'a str),
    Select(&'a str),
    Send(&'a str),
    Logout,
    /// Known command, malformed arguments.
    Usage(&'static CommandSpec),
    Unknown(&'a str),
    Empty,
}

impl<'a> Command<'a> {
    /// Parse a raw input line into a typed Command.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        let raw = raw.trim();
        let (head, rest) = raw
            .split_once(char::is_whitespace)
            .map_or((raw, ""), |(head, rest)| (head, rest.trim()));
        let parts: Vec<&str> = rest.split_whitespace().collect();
        let single = || match parts.as_slice() {
            [one] => Some(*one),
            _ => None,
        };

        let parsed = match head {
            "" => Some(Command::Empty),
            "q" | "quit" | "exit" => Some(Command::Quit),
            "help" | "?" => Some(Command::Help),
            "b" | "back" => Some(Command::Back),
            "f" | "forward" => Some(Command::Forward),
            "jump" => single().and_then(|i| i.parse().ok()).map(Command::Jump),
            "go" => single().and_then(ViewName::parse).map(Command::Go),
            "course" => single().map(Command::Course),
            "open" => single().map(Command::Open),
            "grade" => match *parts.as_slice() {
                [student, assignment, value] => Some(Command::Grade {
                    student,
                    assignment,
                    value,
                }),
                _ => None,
            },
            "announce" => rest.split_once('|').and_then(|(title, content)| {
                let title = title.trim();
                (!title.is_empty()).then(|| Command::Announce {
                    title,
                    content: content.trim(),
                })
            }),
            "role" => single().and_then(Role::parse).map(Command::Role),
            "read" => single().map(Command::Read),
            "unread" => single().map(Command::Unread),
            "delete" => single().map(Command::Delete),
            "readall" => Some(Command::ReadAll),
            "chat" => (!rest.is_empty()).then_some(Command::Chat(rest)),
            "select" => single().map(Command::Select),
            "send" => (!rest.is_empty()).then_some(Command::Send(rest)),
            "logout" => Some(Command::Logout),
            other => return Command::Unknown(other),
        };

        parsed.unwrap_or_else(|| spec(head).map_or(Command::Unknown(head), Command::Usage))
    }

    /// The session action this command stands for, if it is one.
    ///
    /// `role`, `help`, `quit` and malformed input are handled by the caller.
    #[must_use]
    pub fn action(&self) -> Option<Action> {
        let action = match *self {
            Command::Back => Action::Back,
            Command::Forward => Action::Forward,
            Command::Jump(index) => Action::JumpTo(index),
            Command::Go(view) => Action::navigate(view),
            Command::Course(id) => Action::SelectCourse(id.into()),
            Command::Open(id) => Action::OpenNotification(NotificationId::new(id)),
            Command::Grade {
                student,
                assignment,
                value,
            } => Action::UpdateGrade {
                student: StudentId::new(student),
                assignment: AssignmentId::new(assignment),
                value: value.to_owned(),
            },
            Command::Announce { title, content } => Action::CreateAnnouncement {
                title: title.to_owned(),
                content: content.to_owned(),
            },
            Command::Read(id) => Action::MarkRead(NotificationId::new(id)),
            Command::Unread(id) => Action::MarkUnread(NotificationId::new(id)),
            Command::Delete(id) => Action::DeleteNotification(NotificationId::new(id)),
            Command::ReadAll => Action::MarkAllRead,
            Command::Chat(name) => Action::ContactInstructor(name.to_owned()),
            Command::Select(id) => Action::SelectChat(ChatId::new(id)),
            Command::Send(text) => Action::SendChatMessage(text.to_owned()),
            Command::Logout => Action::Logout,
            Command::Quit
            | Command::Help
            | Command::Role(_)
            | Command::Usage(_)
            | Command::Unknown(_)
            | Command::Empty => return None,
        };
        Some(action)
    }
}
