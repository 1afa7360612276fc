use std::fs;
use std::sync::Arc;

use client::session::Session;
use client::storage::{FileStorage, SessionStorage};
use client::store::{SessionStore, SESSION_KEY};

#[test]
fn load_of_missing_key_is_none() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::new(dir.path());

    assert_eq!(storage.load(SESSION_KEY)?, None);
    storage.remove(SESSION_KEY)?;
    Ok(())
}

#[test]
fn save_overwrites_and_creates_the_directory() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::new(dir.path().join("nested"));

    storage.save(SESSION_KEY, "first")?;
    storage.save(SESSION_KEY, "second")?;

    assert_eq!(storage.load(SESSION_KEY)?.as_deref(), Some("second"));
    assert_eq!(fs::read_to_string(storage.path_for(SESSION_KEY))?, "second");
    Ok(())
}

#[cfg(unix)]
#[test]
fn session_file_is_private() -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir()?;
    let storage = FileStorage::new(dir.path());
    storage.save(SESSION_KEY, "{}")?;

    let mode = fs::metadata(storage.path_for(SESSION_KEY))?.permissions().mode();
    assert_eq!(mode & 0o077, 0);
    Ok(())
}

#[test]
fn store_round_trips_through_files() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = Arc::new(FileStorage::new(dir.path()));
    let session = Session::authenticated(3, "abc", None, Some("joe@example.com".to_owned()));

    let store = SessionStore::open(storage.clone());
    assert!(store.replace(session.clone()).is_ok());
    drop(store);

    let store = SessionStore::open(storage.clone());
    assert_eq!(store.read(), session);

    assert!(store.logout().is_ok());
    assert!(!storage.path_for(SESSION_KEY).exists());
    assert_eq!(SessionStore::open(storage).read(), Session::logged_out());
    Ok(())
}

#[test]
fn persisted_record_omits_absent_fields() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = Arc::new(FileStorage::new(dir.path()));
    let store = SessionStore::open(storage.clone());
    let _ = store.replace(Session::authenticated(3, "abc", None, None));

    let raw = fs::read_to_string(storage.path_for(SESSION_KEY))?;
    let json: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(
        json,
        serde_json::json!({ "logged_in": true, "user_id": 3, "token": "abc" })
    );
    Ok(())
}

#[test]
fn corrupt_file_starts_logged_out() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = Arc::new(FileStorage::new(dir.path()));
    fs::write(storage.path_for(SESSION_KEY), "{not json")?;

    let store = SessionStore::open(storage);
    assert_eq!(store.read(), Session::logged_out());
    Ok(())
}
