//! Local persistence and database migrations.
//!
//! Yukchi keeps its client-side state (today, only the session token) in a
//! local sqlite database. The schema is managed with Diesel migrations so the
//! database can be created and upgraded consistently across machines.

mod error;
mod local_storage;
mod migrator;

pub use error::PersistenceError;
pub(crate) use local_storage::map_persistence_error;
pub use local_storage::{LocalStorage, SqliteTokenStore};
pub use migrator::{INITIAL_SCHEMA_VERSION, MIGRATIONS, SchemaVersion, migrate_database};
