//! Error types for local persistence operations.

use thiserror::Error;

/// Errors returned while initialising, migrating or using the local `SQLite`
/// database.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistenceError {
    /// No database URL/path was provided.
    #[error("database URL is required (use --database-url or YUKCHI_DATABASE_URL)")]
    MissingDatabaseUrl,

    /// The database URL/path was present but blank.
    #[error("database URL must not be blank")]
    BlankDatabaseUrl,

    /// Establishing a `SQLite` connection failed.
    #[error("failed to connect to SQLite database: {message}")]
    ConnectionFailed {
        /// Error detail from Diesel.
        message: String,
    },

    /// Running pending migrations failed.
    #[error("failed to run database migrations: {message}")]
    MigrationFailed {
        /// Error detail from Diesel migrations.
        message: String,
    },

    /// Reading the schema version from the migration table failed.
    #[error("failed to read schema version after migrations: {message}")]
    SchemaVersionQueryFailed {
        /// Error detail from Diesel query execution.
        message: String,
    },

    /// The migrations completed but no schema version could be found.
    #[error("no schema version recorded after migrations ran")]
    MissingSchemaVersion,

    /// The local storage table is missing.
    #[error("local storage is not initialised (run `yukchi --migrate-db`)")]
    SchemaNotInitialised,

    /// Reading from local storage failed.
    #[error("failed to read local storage: {message}")]
    QueryFailed {
        /// Error detail from Diesel query execution.
        message: String,
    },

    /// Writing to local storage failed.
    #[error("failed to write local storage: {message}")]
    WriteFailed {
        /// Error detail from Diesel query execution.
        message: String,
    },
}
