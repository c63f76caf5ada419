//! Shared test utilities.

use tempfile::TempDir;

pub mod marketplace;

/// Creates a temporary directory for database tests.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// Returns a path inside `temp_dir` for a sqlite database file.
pub fn database_path(temp_dir: &TempDir) -> String {
    temp_dir
        .path()
        .join("yukchi.sqlite")
        .to_string_lossy()
        .to_string()
}
