//! Initial data supplied once at session start.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use aula_types::{
    Announcement, AnnouncementId, AssignmentId, ChatId, ChatMessage, ChatMessageId, ChatSender,
    ChatThread, Course, CourseId, CourseModule, CourseStatus, GradeMatrix, ModuleId,
    Notification, NotificationId, NotificationKind, Resource, ResourceKind, Role, StudentId,
    ViewName,
};

use crate::RecordStore;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse seed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("notification id {id} appears twice in the {} feed", role.as_str())]
    DuplicateNotification { role: Role, id: NotificationId },
}

/// Courses, grades, feeds, announcements and chats for a new session.
///
/// Every field is optional in JSON; absent collections start empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Seed {
    pub courses: Vec<Course>,
    pub grades: GradeMatrix,
    pub student_notifications: Vec<Notification>,
    pub professor_notifications: Vec<Notification>,
    pub announcements: Vec<Announcement>,
    pub chats: Vec<ChatThread>,
}

impl Seed {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        let seed: Self = serde_json::from_str(json)?;
        seed.validate()?;
        Ok(seed)
    }

    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let content = fs::read_to_string(path).map_err(|source| SeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).inspect_err(|err| {
            tracing::warn!(path = %path.display(), "Rejected seed: {err}");
        })
    }

    /// Notification ids must be unique within each feed.
    pub fn validate(&self) -> Result<(), SeedError> {
        for (role, feed) in [
            (Role::Student, &self.student_notifications),
            (Role::Professor, &self.professor_notifications),
        ] {
            let mut seen = HashSet::new();
            if let Some(dup) = feed.iter().find(|n| !seen.insert(n.id.as_str())) {
                return Err(SeedError::DuplicateNotification {
                    role,
                    id: dup.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Build the store. Duplicate resource ids are allowed but reported.
    #[must_use]
    pub fn into_store(self) -> RecordStore {
        let store = RecordStore::new(
            self.courses,
            self.grades,
            self.student_notifications,
            self.professor_notifications,
            self.announcements,
            self.chats,
        );
        for id in store.duplicate_resource_ids() {
            tracing::warn!(
                resource = %id,
                "Resource id is not unique; lookups resolve to the first course"
            );
        }
        store
    }

    /// The built-in demo data set.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            courses: demo_courses(),
            grades: demo_grades(),
            student_notifications: vec![
                Notification::new(
                    "1",
                    NotificationKind::Success,
                    "Assignment graded",
                    "Your assignment \"Chain Rule\" has been graded: 95/100",
                )
                .at("10 min ago")
                .targeting(ViewName::TaskDetail)
                .with_target_id("r5")
                .in_course("1"),
                Notification::new(
                    "2",
                    NotificationKind::Warning,
                    "Exam reminder",
                    "Physics midterm tomorrow at 10:00 AM",
                )
                .at("2 hours ago")
                .targeting(ViewName::CourseDetail)
                .with_target_id("3")
                .in_course("3"),
                Notification {
                    read: true,
                    ..Notification::new(
                        "3",
                        NotificationKind::Info,
                        "New message",
                        "Dr. Ana Gómez sent you a message.",
                    )
                    .at("Yesterday")
                    .targeting(ViewName::Messages)
                    .with_target_id("1")
                },
            ],
            professor_notifications: vec![
                Notification::new(
                    "p1",
                    NotificationKind::Info,
                    "New submission",
                    "Alejandro submitted Assignment 3",
                )
                .at("5 min ago")
                .targeting(ViewName::TaskDetail)
                .with_target_id("r5")
                .in_course("1"),
                Notification::new(
                    "p2",
                    NotificationKind::Warning,
                    "Forum question",
                    "Sofía posted in the Q&A forum",
                )
                .at("1 hour ago")
                .targeting(ViewName::CourseDetail)
                .with_target_id("1")
                .in_course("1"),
            ],
            announcements: vec![Announcement {
                id: AnnouncementId::new("1"),
                title: "Welcome to the course".to_owned(),
                content: "Welcome to the new term. Please review the syllabus.".to_owned(),
                course_name: "Differential Calculus".to_owned(),
                date: "Aug 20".to_owned(),
                author: "Dr. Juan Pérez".to_owned(),
            }],
            chats: demo_chats(),
        }
    }
}

fn resource(id: &str, kind: ResourceKind, title: &str) -> Resource {
    Resource::new(id, kind, title)
}

fn module(id: &str, title: &str, resources: Vec<Resource>) -> CourseModule {
    CourseModule {
        id: ModuleId::new(id),
        title: title.to_owned(),
        resources,
    }
}

fn course(
    id: &str,
    code: &str,
    name: &str,
    professor: &str,
    status: CourseStatus,
    modules: Vec<CourseModule>,
) -> Course {
    Course {
        id: CourseId::new(id),
        code: code.to_owned(),
        name: name.to_owned(),
        professor: professor.to_owned(),
        status,
        archived: false,
        modules,
    }
}

fn demo_courses() -> Vec<Course> {
    let due_next_week = (chrono::Local::now().date_naive() + chrono::Days::new(7))
        .format("%Y-%m-%d")
        .to_string();

    vec![
        course(
            "1",
            "CD-101",
            "Differential Calculus",
            "Dr. Juan Pérez",
            CourseStatus::InProgress,
            vec![
                module(
                    "m1",
                    "Unit 1: Limits and Continuity",
                    vec![
                        Resource {
                            url: Some("https://www.youtube.com/embed/riWxJR27keM".to_owned()),
                            description: Some("Watch this before class.".to_owned()),
                            ..resource("r1", ResourceKind::Video, "Video: Properties of limits")
                        },
                        Resource {
                            max_score: Some(10),
                            ..resource("r3", ResourceKind::Quiz, "Quick quiz: Limits")
                        },
                    ],
                ),
                module(
                    "m2",
                    "Unit 2: The Derivative",
                    vec![
                        Resource {
                            description: Some(
                                "Solve exercises 1 to 20 on page 45 of the textbook. Upload a PDF."
                                    .to_owned(),
                            ),
                            due_date: Some("Friday, October 25, 23:59".to_owned()),
                            score: Some(95),
                            max_score: Some(100),
                            ..resource("r5", ResourceKind::Assignment, "Assignment 3: Chain Rule")
                        },
                        Resource {
                            url: Some("https://www.geogebra.org/calculator".to_owned()),
                            ..resource("r5-2", ResourceKind::Link, "Resource: Graphing calculator")
                        },
                    ],
                ),
            ],
        ),
        course(
            "2",
            "POO-202",
            "Object-Oriented Programming",
            "Dr. Ana Gómez",
            CourseStatus::InProgress,
            vec![
                module(
                    "m1",
                    "Week 1: Introduction",
                    vec![
                        resource("r7", ResourceKind::Forum, "Forum: Introductions"),
                        Resource {
                            max_score: Some(5),
                            ..resource(
                                "r7-2",
                                ResourceKind::Text,
                                "Reflection: Programming paradigms",
                            )
                        },
                    ],
                ),
                module(
                    "m2",
                    "Week 2: Classes and Objects",
                    vec![Resource {
                        due_date: Some("Monday, October 28, 14:00".to_owned()),
                        ..resource("r9", ResourceKind::Assignment, "Practice 1: My first class")
                    }],
                ),
            ],
        ),
        course(
            "3",
            "FG-102",
            "General Physics",
            "Dr. Carlos Ruiz",
            CourseStatus::InProgress,
            vec![module(
                "m1",
                "Kinematics",
                vec![
                    resource("r10", ResourceKind::Pdf, "Reading: Uniform linear motion"),
                    Resource {
                        max_score: Some(10),
                        ..resource("r10-2", ResourceKind::Quiz, "Quiz: Basic concepts")
                    },
                ],
            )],
        ),
        course(
            "4",
            "BD-301",
            "Databases",
            "Sofia Lopez, MSc",
            CourseStatus::InProgress,
            vec![module(
                "m1",
                "Data Modeling",
                vec![Resource {
                    due_date: Some(due_next_week),
                    ..resource("r12", ResourceKind::Assignment, "Schema design")
                }],
            )],
        ),
        course(
            "5",
            "IA-405",
            "Artificial Intelligence",
            "Dr. Roberto Campos",
            CourseStatus::InProgress,
            Vec::new(),
        ),
        course(
            "6",
            "RC-201",
            "Computer Networks",
            "Ing. Marco Díaz",
            CourseStatus::Future,
            Vec::new(),
        ),
        course(
            "7",
            "IT-101",
            "Technical English",
            "Sarah Conner",
            CourseStatus::Past,
            vec![module(
                "m1",
                "Final Project",
                vec![Resource {
                    score: Some(100),
                    max_score: Some(100),
                    ..resource("r99", ResourceKind::Assignment, "Technical Report")
                }],
            )],
        ),
    ]
}

fn demo_grades() -> GradeMatrix {
    let rows: [(&str, [&str; 3]); 5] = [
        ("s1", ["95", "80", "90"]),
        ("s2", ["100", "85", "92"]),
        ("s3", ["0", "70", "60"]),
        ("s4", ["88", "90", "85"]),
        ("s5", ["75", "0", "70"]),
    ];
    rows.into_iter()
        .map(|(student, values)| {
            let row: BTreeMap<AssignmentId, String> = ["t1", "t2", "e1"]
                .into_iter()
                .zip(values)
                .map(|(assignment, value)| (AssignmentId::new(assignment), value.to_owned()))
                .collect();
            (StudentId::new(student), row)
        })
        .collect()
}

fn message(id: &str, text: &str, sender: ChatSender, timestamp: &str) -> ChatMessage {
    ChatMessage {
        id: ChatMessageId::new(id),
        text: text.to_owned(),
        sender,
        timestamp: timestamp.to_owned(),
    }
}

fn thread(
    id: &str,
    sender: &str,
    time: &str,
    unread: bool,
    history: Vec<ChatMessage>,
) -> ChatThread {
    ChatThread {
        preview: history.last().map(|m| m.text.clone()).unwrap_or_default(),
        time: time.to_owned(),
        unread,
        history,
        ..ChatThread::new(ChatId::new(id), sender)
    }
}

fn demo_chats() -> Vec<ChatThread> {
    use ChatSender::{Me, Them};

    vec![
        thread(
            "1",
            "Dr. Ana Gómez",
            "10:30 AM",
            true,
            vec![
                message(
                    "m1",
                    "Hi Dr. Gómez, I have a question about inheritance in Java.",
                    Me,
                    "10:00 AM",
                ),
                message("m2", "Hi Alejandro, of course, how can I help?", Them, "10:15 AM"),
                message(
                    "m3",
                    "I reviewed your code and have a few suggestions for the abstract class.",
                    Them,
                    "10:30 AM",
                ),
            ],
        ),
        thread(
            "2",
            "Luis Torres",
            "Yesterday",
            false,
            vec![message(
                "m1",
                "Are you going to the library to study today?",
                Them,
                "Yesterday 4:00 PM",
            )],
        ),
        thread(
            "3",
            "Dr. Juan Pérez",
            "Mon",
            false,
            vec![
                message("m1", "Professor, may we use a graphing calculator?", Me, "Mon 9:00 AM"),
                message(
                    "m2",
                    "Yes, it is allowed. Don't forget to bring your calculator to the exam.",
                    Them,
                    "Mon 9:30 AM",
                ),
            ],
        ),
    ]
}
