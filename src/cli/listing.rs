//! Listing operation: fetch cargos and print those matching the filter.

use std::io::Write;

use yukchi::{AppServices, ClientError, YukchiConfig};

use super::output::write_listings;

/// Lists cargos matching the filter options.
///
/// The criteria are sent as query parameters and applied again locally, so
/// the output honours them even when the server ignores one.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] when a numeric bound is not a number,
/// or [`ClientError::Io`] when writing fails. A failed load is reported
/// through the notifications and prints an empty list.
pub async fn run<W: Write>(
    config: &YukchiConfig,
    services: &AppServices,
    writer: &mut W,
) -> Result<(), ClientError> {
    let filter = config.filter_form().validate()?;
    let listings = services.cargo().list(&filter).await;
    let matching = filter.apply(&listings);
    write_listings(writer, &matching, &filter)
}
