//! Account operations: log in, register and log out.

use std::io::Write;

use yukchi::{AppServices, ClientError, UserProfile, YukchiConfig};

use super::output::write_line;

/// Logs in with the phone number and password from `config`.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] for invalid input, the API failure
/// when the credentials are rejected, or [`ClientError::Io`] when writing
/// fails.
pub async fn login<W: Write>(
    config: &YukchiConfig,
    services: &AppServices,
    writer: &mut W,
) -> Result<(), ClientError> {
    let profile = services.auth().login(&config.login_form()).await?;
    write_signed_in(writer, "Logged in", profile.as_ref())
}

/// Registers a new account from `config` and signs in with it.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] for invalid input, the API failure
/// when registration is rejected, or [`ClientError::Io`] when writing fails.
pub async fn register<W: Write>(
    config: &YukchiConfig,
    services: &AppServices,
    writer: &mut W,
) -> Result<(), ClientError> {
    let profile = services.auth().register(&config.register_form()).await?;
    write_signed_in(writer, "Registered", profile.as_ref())
}

/// Removes the stored session token.
///
/// # Errors
///
/// Returns [`ClientError::Storage`] when the token cannot be removed, or
/// [`ClientError::Io`] when writing fails.
pub fn logout<W: Write>(services: &AppServices, writer: &mut W) -> Result<(), ClientError> {
    services.auth().logout()?;
    write_line(writer, "Logged out")
}

fn write_signed_in<W: Write>(
    writer: &mut W,
    action: &str,
    profile: Option<&UserProfile>,
) -> Result<(), ClientError> {
    match profile {
        Some(signed_in) => write_line(writer, &format!("{action} as {}", signed_in.name)),
        None => write_line(writer, action),
    }
}
