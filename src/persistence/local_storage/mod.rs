//! Key-value local storage backed by `SQLite`.
//!
//! This is the terminal client's counterpart to browser local storage: a
//! single table of string values keyed by name. The session token is the
//! only value the client persists today.

use diesel::Connection;
use diesel::OptionalExtension;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::SqliteConnection;
use tracing::debug;

use super::PersistenceError;
use crate::api::{AuthToken, ClientError};
use crate::session::{TOKEN_STORAGE_KEY, TokenStore};

const LOCAL_STORAGE_TABLE: &str = "local_storage";

/// SQLite-backed key-value store.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    database_url: String,
}

impl LocalStorage {
    /// Create a store targeting the configured `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] when the URL is blank.
    pub fn new(database_url: impl Into<String>) -> Result<Self, PersistenceError> {
        let database_url_string = database_url.into();
        if database_url_string.trim().is_empty() {
            return Err(PersistenceError::BlankDatabaseUrl);
        }
        Ok(Self {
            database_url: database_url_string,
        })
    }

    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the database cannot be opened, the
    /// schema is missing, or the query fails.
    pub fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = Text)]
            storage_value: String,
        }

        let mut connection = self.establish_connection()?;
        let result: Option<Row> = sql_query(
            "SELECT storage_value FROM local_storage WHERE storage_key = ? LIMIT 1;",
        )
        .bind::<Text, _>(key)
        .get_result(&mut connection)
        .optional()
        .map_err(|error| Self::map_query_error(&mut connection, &error))?;

        Ok(result.map(|row| row.storage_value))
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the schema is missing or the write
    /// fails.
    pub fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut connection = self.establish_connection()?;
        sql_query(
            "INSERT INTO local_storage (storage_key, storage_value) VALUES (?, ?) \
             ON CONFLICT(storage_key) DO UPDATE SET \
               storage_value = excluded.storage_value, \
               updated_at = CURRENT_TIMESTAMP;",
        )
        .bind::<Text, _>(key)
        .bind::<Text, _>(value)
        .execute(&mut connection)
        .map(drop)
        .map_err(|error| Self::map_write_error(&mut connection, &error))
    }

    /// Removes the value stored under `key`. Removing a missing key is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the schema is missing or the write
    /// fails.
    pub fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let mut connection = self.establish_connection()?;
        let affected = sql_query("DELETE FROM local_storage WHERE storage_key = ?;")
            .bind::<Text, _>(key)
            .execute(&mut connection)
            .map_err(|error| Self::map_write_error(&mut connection, &error))?;
        debug!(key, affected, "removed local storage entry");
        Ok(())
    }

    fn establish_connection(&self) -> Result<SqliteConnection, PersistenceError> {
        SqliteConnection::establish(&self.database_url).map_err(|error| {
            PersistenceError::ConnectionFailed {
                message: error.to_string(),
            }
        })
    }

    fn table_exists(connection: &mut SqliteConnection) -> Result<bool, diesel::result::Error> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = BigInt)]
            count: i64,
        }

        let row: Row = sql_query(
            "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = ?;",
        )
        .bind::<Text, _>(LOCAL_STORAGE_TABLE)
        .get_result(connection)?;

        Ok(row.count > 0)
    }

    fn map_error_with_schema_check<F>(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
        create_error: F,
    ) -> PersistenceError
    where
        F: Fn(String) -> PersistenceError,
    {
        match Self::table_exists(connection) {
            Ok(false) => PersistenceError::SchemaNotInitialised,
            Ok(true) => create_error(error.to_string()),
            Err(check_error) => create_error(format!(
                "schema presence check failed: {check_error}; original error: {error}"
            )),
        }
    }

    fn map_query_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::QueryFailed { message }
        })
    }

    fn map_write_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::WriteFailed { message }
        })
    }
}

/// Session token store persisted in [`LocalStorage`] under the `token` key.
#[derive(Debug, Clone)]
pub struct SqliteTokenStore {
    storage: LocalStorage,
}

impl SqliteTokenStore {
    /// Wraps `storage` as a token store.
    #[must_use]
    pub const fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }
}

impl TokenStore for SqliteTokenStore {
    fn load(&self) -> Result<Option<AuthToken>, ClientError> {
        let stored = self
            .storage
            .get(TOKEN_STORAGE_KEY)
            .map_err(|error| map_persistence_error("load session token", &error))?;
        // A blank value is what an interrupted write would leave; treat it as
        // signed out.
        Ok(stored.and_then(|value| AuthToken::new(value).ok()))
    }

    fn save(&self, token: &AuthToken) -> Result<(), ClientError> {
        self.storage
            .set(TOKEN_STORAGE_KEY, token.value())
            .map_err(|error| map_persistence_error("save session token", &error))
    }

    fn clear(&self) -> Result<(), ClientError> {
        self.storage
            .remove(TOKEN_STORAGE_KEY)
            .map_err(|error| map_persistence_error("clear session token", &error))
    }
}

/// Maps a persistence failure into the client error taxonomy.
pub(crate) fn map_persistence_error(operation: &str, error: &PersistenceError) -> ClientError {
    match error {
        PersistenceError::MissingDatabaseUrl
        | PersistenceError::BlankDatabaseUrl
        | PersistenceError::SchemaNotInitialised => ClientError::Configuration {
            message: format!("{operation}: {error}"),
        },
        _ => ClientError::Storage {
            message: format!("{operation}: {error}"),
        },
    }
}

#[cfg(test)]
mod tests;
