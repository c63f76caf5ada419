//! Tests for the `SQLite` local storage and token store.

type FixtureResult<T> = Result<T, Box<dyn std::error::Error>>;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::{LocalStorage, SqliteTokenStore};
use crate::api::{AuthToken, ClientError};
use crate::persistence::{PersistenceError, migrate_database};
use crate::session::{TOKEN_STORAGE_KEY, TokenStore};
use crate::telemetry::NoopTelemetrySink;

#[fixture]
fn temp_db() -> FixtureResult<(TempDir, String)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("yukchi.sqlite");
    Ok((temp_dir, db_path.to_string_lossy().to_string()))
}

#[fixture]
fn migrated_storage(
    temp_db: FixtureResult<(TempDir, String)>,
) -> FixtureResult<(TempDir, LocalStorage)> {
    let (temp_dir, database_url) = temp_db?;
    migrate_database(&database_url, &NoopTelemetrySink)?;
    let storage = LocalStorage::new(database_url)?;
    Ok((temp_dir, storage))
}

#[rstest]
fn storage_overwrites_and_removes_values(
    migrated_storage: FixtureResult<(TempDir, LocalStorage)>,
) {
    let (_temp_dir, storage) = migrated_storage.expect("fixture should succeed");

    assert_eq!(storage.get("theme").expect("get should succeed"), None);
    storage.set("theme", "dark").expect("set should succeed");
    storage.set("theme", "light").expect("overwrite should succeed");
    assert_eq!(
        storage.get("theme").expect("get should succeed").as_deref(),
        Some("light")
    );

    storage.remove("theme").expect("remove should succeed");
    storage.remove("theme").expect("second remove should succeed");
    assert_eq!(storage.get("theme").expect("get should succeed"), None);
}

#[rstest]
fn token_store_persists_across_instances(
    migrated_storage: FixtureResult<(TempDir, LocalStorage)>,
) {
    let (_temp_dir, storage) = migrated_storage.expect("fixture should succeed");
    let token = AuthToken::new("persisted-token").expect("token should be valid");

    SqliteTokenStore::new(storage.clone())
        .save(&token)
        .expect("save should succeed");

    let reopened = SqliteTokenStore::new(storage.clone());
    assert_eq!(reopened.load().expect("load should succeed"), Some(token));
    assert_eq!(
        storage
            .get(TOKEN_STORAGE_KEY)
            .expect("raw get should succeed")
            .as_deref(),
        Some("persisted-token")
    );

    reopened.clear().expect("clear should succeed");
    assert_eq!(reopened.load().expect("load should succeed"), None);
}

#[rstest]
fn blank_stored_token_reads_as_signed_out(
    migrated_storage: FixtureResult<(TempDir, LocalStorage)>,
) {
    let (_temp_dir, storage) = migrated_storage.expect("fixture should succeed");
    storage
        .set(TOKEN_STORAGE_KEY, "  ")
        .expect("set should succeed");

    let store = SqliteTokenStore::new(storage);
    assert_eq!(store.load().expect("load should succeed"), None);
}

#[rstest]
fn unmigrated_database_reports_missing_schema(temp_db: FixtureResult<(TempDir, String)>) {
    let (_temp_dir, database_url) = temp_db.expect("fixture should succeed");
    let storage = LocalStorage::new(database_url).expect("storage should be created");

    assert_eq!(
        storage.get(TOKEN_STORAGE_KEY),
        Err(PersistenceError::SchemaNotInitialised)
    );

    let result = SqliteTokenStore::new(storage).load();
    assert!(
        matches!(result, Err(ClientError::Configuration { .. })),
        "expected Configuration, got {result:?}"
    );
}

#[rstest]
fn blank_database_url_is_rejected() {
    let result = LocalStorage::new("   ");
    assert!(matches!(result, Err(PersistenceError::BlankDatabaseUrl)));
}
