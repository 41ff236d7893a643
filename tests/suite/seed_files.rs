//! Loading seeds from JSON files

use aula_engine::{Seed, SeedError};
use aula_types::Role;

use crate::common::{SMALL_SEED, write_file};

#[test]
fn small_seed_loads_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "seed.json", SMALL_SEED);

    let seed = Seed::load(&path).unwrap();
    assert_eq!(seed.courses[0].name, "Computer Networks");
    assert!(seed.professor_notifications.is_empty());
    assert!(seed.announcements.is_empty());
    assert!(seed.chats[0].history.is_empty());

    let store = seed.into_store();
    assert_eq!(store.unread_chat_count(), 1);
    assert_eq!(store.unread_count(Role::Student), 1);
    assert_eq!(store.revision(), 0);
}

#[test]
fn duplicate_feed_ids_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let json = serde_json::json!({
        "professorNotifications": [
            {"id": "p1", "title": "a", "message": "a"},
            {"id": "p1", "title": "b", "message": "b"}
        ]
    });
    let path = write_file(dir.path(), "seed.json", &json.to_string());

    let err = Seed::load(&path).unwrap_err();
    assert!(matches!(
        err,
        SeedError::DuplicateNotification {
            role: Role::Professor,
            ..
        }
    ));
}

#[test]
fn same_id_in_both_feeds_is_fine() {
    let json = serde_json::json!({
        "studentNotifications": [{"id": "1", "title": "a", "message": "a"}],
        "professorNotifications": [{"id": "1", "title": "b", "message": "b"}]
    });
    assert!(Seed::from_json(&json.to_string()).is_ok());
}

#[test]
fn malformed_and_missing_files_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let broken = write_file(dir.path(), "broken.json", "{\"courses\": [");

    assert!(matches!(Seed::load(&broken), Err(SeedError::Parse(_))));
    assert!(matches!(
        Seed::load(&dir.path().join("absent.json")),
        Err(SeedError::Read { .. })
    ));
}

#[test]
fn demo_seed_survives_a_json_round_trip() {
    let demo = Seed::demo();
    let json = serde_json::to_string(&demo).unwrap();
    assert_eq!(Seed::from_json(&json).unwrap(), demo);
}
