//! Session persistence through the file-backed store.

mod common;

use common::*;
use mentorlink::adapters::FileStore;
use mentorlink::auth::SessionStore;
use mentorlink::models::{Role, User};
use mentorlink::traits::KeyValueStore;
use tempfile::TempDir;

fn user(value: serde_json::Value) -> User {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_login_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    let mut session = SessionStore::new(FileStore::at(&path));
    session
        .login(user(mentor_user()), TEST_TOKEN.to_string())
        .await
        .unwrap();

    let restored = SessionStore::restore(FileStore::at(&path)).await;
    assert!(restored.is_authenticated());
    assert_eq!(restored.role(), Some(Role::Mentor));
    assert_eq!(restored.token(), Some(TEST_TOKEN));
    assert_eq!(
        restored.current_user().unwrap().skills,
        Some(vec!["rust".to_string(), "sql".to_string()])
    );
}

#[tokio::test]
async fn test_logout_removes_both_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");

    let mut session = SessionStore::new(FileStore::at(&path));
    session.login(user(admin_user()), "t".to_string()).await.unwrap();
    session.logout().await.unwrap();

    let store = FileStore::at(&path);
    assert_eq!(store.get("user").await.unwrap(), None);
    assert_eq!(store.get("token").await.unwrap(), None);
    assert!(!SessionStore::restore(store).await.is_authenticated());
}

#[tokio::test]
async fn test_malformed_records_restore_unauthenticated() {
    let bad_records = [
        r#"{"id":"1","username":"x","email":"x@x.io","roleId":"r"}"#,
        r#"{"id":"1","username":"x","email":"x@x.io","role":"owner","roleId":"r"}"#,
        r#"["not", "an", "object"]"#,
        "{truncated",
    ];

    for raw in bad_records {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        let store = FileStore::at(&path);
        store.set("user", raw).await.unwrap();
        store.set("token", "t").await.unwrap();

        let session = SessionStore::restore(FileStore::at(&path)).await;
        assert!(!session.is_authenticated(), "accepted {}", raw);
        assert_eq!(FileStore::at(&path).get("user").await.unwrap(), None);
    }
}

#[tokio::test]
async fn test_corrupt_file_is_empty_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json at all").unwrap();

    let session = SessionStore::restore(FileStore::at(&path)).await;
    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
}
