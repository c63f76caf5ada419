//! Behavioural tests for local storage migrations and schema telemetry.

mod support;

use std::sync::Arc;

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use tempfile::TempDir;
use yukchi::persistence::{INITIAL_SCHEMA_VERSION, PersistenceError, migrate_database};
use yukchi::telemetry::TelemetryEvent;
use yukchi::telemetry::test_support::RecordingSink;

use support::{create_temp_dir, database_path};

#[derive(ScenarioState, Default)]
struct MigrationState {
    database_url: Slot<String>,
    temp_dir: Slot<TempDir>,
    schema_version: Slot<String>,
    error: Slot<PersistenceError>,
    telemetry: Slot<Arc<RecordingSink>>,
}

#[fixture]
fn migration_state() -> MigrationState {
    MigrationState::default()
}

// --- Given steps ---

#[given("a blank database URL")]
fn blank_database_url(migration_state: &MigrationState) {
    migration_state.database_url.set("   ".to_owned());
}

#[given("a temporary database file")]
fn temporary_database_file(migration_state: &MigrationState) {
    let temp_dir = create_temp_dir();
    migration_state.database_url.set(database_path(&temp_dir));
    migration_state.temp_dir.set(temp_dir);
}

#[given("a telemetry sink")]
fn telemetry_sink(migration_state: &MigrationState) {
    migration_state
        .telemetry
        .set(Arc::new(RecordingSink::default()));
}

// --- When steps ---

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
#[when("database migrations are run")]
fn run_migrations(migration_state: &MigrationState) {
    let telemetry = migration_state
        .telemetry
        .with_ref(Arc::clone)
        .expect("telemetry sink not initialised");

    let database_url = migration_state
        .database_url
        .with_ref(Clone::clone)
        .expect("database URL not initialised");

    match migrate_database(&database_url, telemetry.as_ref()) {
        Ok(version) => {
            migration_state
                .schema_version
                .set(version.as_str().to_owned());
        }
        Err(error) => {
            migration_state.error.set(error);
        }
    }
}

#[when("database migrations are run again")]
fn run_migrations_again(migration_state: &MigrationState) {
    run_migrations(migration_state);
}

// --- Then steps ---

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
fn recorded_events(migration_state: &MigrationState) -> Vec<TelemetryEvent> {
    migration_state
        .telemetry
        .with_ref(|sink| sink.take())
        .expect("telemetry sink not initialised")
}

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
#[then("the schema version is {expected}")]
fn schema_version_is(migration_state: &MigrationState, expected: String) {
    let expected_clean = expected.trim_matches('"');

    let actual = migration_state
        .schema_version
        .with_ref(Clone::clone)
        .expect("schema version missing");

    assert_eq!(actual, expected_clean, "schema version mismatch");
}

#[then("telemetry records the schema version")]
fn telemetry_records_schema_version(migration_state: &MigrationState) {
    let events = recorded_events(migration_state);

    assert_eq!(
        events,
        vec![TelemetryEvent::SchemaVersionRecorded {
            schema_version: INITIAL_SCHEMA_VERSION.to_owned(),
        }]
    );
}

#[then("telemetry records the schema version twice")]
fn telemetry_records_schema_version_twice(migration_state: &MigrationState) {
    let events = recorded_events(migration_state);

    let schema_versions: Vec<&str> = events
        .iter()
        .filter_map(|event| match event {
            TelemetryEvent::SchemaVersionRecorded { schema_version } => {
                Some(schema_version.as_str())
            }
            TelemetryEvent::SessionCleared { .. } => None,
        })
        .collect();

    assert_eq!(
        schema_versions,
        vec![INITIAL_SCHEMA_VERSION, INITIAL_SCHEMA_VERSION],
        "expected idempotent migration to record the same schema_version twice"
    );
}

#[expect(clippy::expect_used, reason = "test code; panics are acceptable")]
#[then("a persistence error {expected} is reported")]
fn persistence_error_is(migration_state: &MigrationState, expected: String) {
    let expected_clean = expected.trim_matches('"');

    let error = migration_state
        .error
        .with_ref(ToString::to_string)
        .expect("expected persistence error");

    assert_eq!(error, expected_clean);
}

#[then("no telemetry is recorded")]
fn no_telemetry_is_recorded(migration_state: &MigrationState) {
    let events = recorded_events(migration_state);

    assert!(
        events.is_empty(),
        "expected no telemetry events, got {events:?}"
    );
}

#[scenario(path = "tests/features/database_migration.feature", index = 0)]
fn migrations_record_schema_version(migration_state: MigrationState) {
    let _ = migration_state;
}

#[scenario(path = "tests/features/database_migration.feature", index = 1)]
fn migrations_fail_on_blank_database_url(migration_state: MigrationState) {
    let _ = migration_state;
}

#[scenario(path = "tests/features/database_migration.feature", index = 2)]
fn migrations_are_idempotent(migration_state: MigrationState) {
    let _ = migration_state;
}
