//! Database migration operations.

use yukchi::persistence::{PersistenceError, migrate_database};
use yukchi::telemetry::TelemetrySink;
use yukchi::{ClientError, YukchiConfig};

/// Runs database migrations.
///
/// # Errors
///
/// Returns [`ClientError::Configuration`] if the database URL is missing or
/// blank.
/// Returns [`ClientError::Storage`] for connection or migration failures.
pub fn run(config: &YukchiConfig, telemetry: &dyn TelemetrySink) -> Result<(), ClientError> {
    let database_url =
        config
            .database_url
            .as_deref()
            .ok_or_else(|| ClientError::Configuration {
                message: PersistenceError::MissingDatabaseUrl.to_string(),
            })?;

    migrate_database(database_url, telemetry)
        .map(drop)
        .map_err(|error| map_persistence_error(&error))
}

/// Maps a persistence error to a client error.
///
/// Configuration-related errors (blank URL) become
/// [`ClientError::Configuration`], while runtime errors (connection,
/// migration, query failures) become [`ClientError::Storage`].
fn map_persistence_error(error: &PersistenceError) -> ClientError {
    if is_configuration_error(error) {
        ClientError::Configuration {
            message: error.to_string(),
        }
    } else {
        ClientError::Storage {
            message: error.to_string(),
        }
    }
}

/// Returns true if the persistence error is a configuration problem.
const fn is_configuration_error(error: &PersistenceError) -> bool {
    matches!(error, PersistenceError::BlankDatabaseUrl)
}
