//! CLI operation mode handlers.
//!
//! This module contains the implementations for the operation modes:
//! - [`account`]: Log in, register and log out
//! - [`cargo`]: Add, update, comment on and show cargos
//! - [`listing`]: List cargos matching the filter options
//! - [`migrations`]: Database schema migrations
//! - [`profile`]: Show and update the signed-in user's profile
//! - [`browser`]: Interactive terminal browser
//!
//! Output formatting utilities are in [`output`].

use std::io::Write;

use yukchi::services::ToastKind;
use yukchi::{AppServices, ClientError};

use self::output::io_error;

pub mod account;
pub mod browser;
pub mod cargo;
pub mod listing;
pub mod migrations;
pub mod output;
pub mod profile;

/// Writes every pending toast to `writer`.
///
/// Returns `true` when at least one of them reported an error.
///
/// # Errors
///
/// Returns [`ClientError::Io`] when writing fails.
pub fn flush_notifications<W: Write>(
    writer: &mut W,
    services: &AppServices,
) -> Result<bool, ClientError> {
    let mut failed = false;
    for toast in services.notifications().drain() {
        failed |= toast.kind == ToastKind::Error;
        writeln!(writer, "{toast}").map_err(|error| io_error(&error))?;
    }
    Ok(failed)
}
