//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use aula_config::AulaConfig;
use aula_engine::{Identity, NavigationSettings, Seed, Session, SyncSettings};

/// A session over the demo seed with default settings.
pub fn demo_session(identity: Identity) -> Session {
    Session::new(
        Seed::demo(),
        identity,
        SyncSettings::default(),
        NavigationSettings::default(),
    )
}

pub fn student() -> Session {
    demo_session(Identity::student("s1"))
}

pub fn professor() -> Session {
    demo_session(Identity::professor())
}

/// Build a session the way the binary does: config first, then its seed.
pub fn session_from_config(path: &Path) -> Session {
    let config = AulaConfig::load_from(path).expect("config loads");
    let seed = match config.seed_path() {
        Some(seed) => Seed::load(&seed).expect("seed loads"),
        None => Seed::demo(),
    };
    Session::new(
        seed,
        config.identity(),
        config.sync_settings(),
        config.navigation_settings(),
    )
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

/// Breadcrumb labels from the oldest entry up to the cursor.
pub fn trail(session: &Session) -> Vec<String> {
    session
        .breadcrumbs()
        .expect("breadcrumbs shown")
        .map(|crumb| crumb.label.to_owned())
        .collect()
}

/// A small seed: one course with one assignment, a targeted notification
/// for it and one chat.
pub const SMALL_SEED: &str = r#"{
    "courses": [{
        "id": "10",
        "code": "NET-300",
        "name": "Computer Networks",
        "professor": "Dr. Laura Méndez",
        "modules": [{
            "id": "m1",
            "title": "Routing",
            "resources": [
                {"id": "lab1", "type": "assignment", "title": "Lab 1: Static routes", "maxScore": 10}
            ]
        }]
    }],
    "grades": {"s7": {"lab1": "8"}},
    "studentNotifications": [{
        "id": "1",
        "title": "Lab graded",
        "message": "Lab 1 has a grade",
        "type": "success",
        "targetView": "task-detail",
        "targetId": "lab1"
    }],
    "chats": [{"id": "1", "sender": "Dr. Laura Méndez", "unread": true}]
}"#;
