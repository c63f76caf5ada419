//! Cargo operations: add, update, comment and show.

use std::io::Write;

use yukchi::{AppServices, ClientError, YukchiConfig};

use super::output::{write_line, write_listing_detail};

/// Validates the cargo options and posts a new cargo.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] for invalid input (no request is
/// sent), the API failure, or [`ClientError::Io`] when writing fails.
pub async fn add<W: Write>(
    config: &YukchiConfig,
    services: &AppServices,
    writer: &mut W,
) -> Result<(), ClientError> {
    let created = services.cargo().create(&config.cargo_form()).await?;
    write_line(writer, &format!("Added cargo #{} {}", created.id, created.name))
}

/// Applies the given cargo options to cargo `--cargo-id`.
///
/// # Errors
///
/// Returns [`ClientError::Configuration`] without a cargo id,
/// [`ClientError::Validation`] for invalid input, the API failure, or
/// [`ClientError::Io`] when writing fails.
pub async fn update<W: Write>(
    config: &YukchiConfig,
    services: &AppServices,
    writer: &mut W,
) -> Result<(), ClientError> {
    let id = config.require_cargo_id()?;
    let updated = services
        .cargo()
        .update(id, &config.cargo_update_form())
        .await?;
    write_line(writer, &format!("Updated cargo #{}", updated.id))
}

/// Adds `--comment` to cargo `--cargo-id`.
///
/// # Errors
///
/// Returns [`ClientError::Configuration`] without a cargo id,
/// [`ClientError::Validation`] for a too-short comment, the API failure, or
/// [`ClientError::Io`] when writing fails.
pub async fn comment<W: Write>(
    config: &YukchiConfig,
    services: &AppServices,
    writer: &mut W,
) -> Result<(), ClientError> {
    let id = config.require_cargo_id()?;
    let commented = services.cargo().comment(id, &config.comment_form()).await?;
    write_line(
        writer,
        &format!("Commented on cargo #{id} ({} reviews)", commented.reviews.len()),
    )
}

/// Shows cargo `--cargo-id`. A failed load is reported through the
/// notifications and writes nothing.
///
/// # Errors
///
/// Returns [`ClientError::Configuration`] without a cargo id, or
/// [`ClientError::Io`] when writing fails.
pub async fn show<W: Write>(
    config: &YukchiConfig,
    services: &AppServices,
    writer: &mut W,
) -> Result<(), ClientError> {
    let id = config.require_cargo_id()?;
    match services.cargo().detail(id).await {
        Some(listing) => write_listing_detail(writer, &listing),
        None => Ok(()),
    }
}
