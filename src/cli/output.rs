//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use yukchi::{ClientError, Listing, ListingFilter, UserProfile};

/// Writes one line per listing, followed by a count.
///
/// # Errors
///
/// Returns [`ClientError::Io`] when writing fails.
pub fn write_listings<W: Write>(
    writer: &mut W,
    listings: &[&Listing],
    filter: &ListingFilter,
) -> Result<(), ClientError> {
    writeln!(writer, "Cargos ({}):", filter.describe()).map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;

    for listing in listings {
        writeln!(
            writer,
            "  #{} {} -> {} | {} t | {} | {}",
            listing.id,
            listing.origin,
            listing.destination,
            listing.weight,
            listing.vehicle_type,
            listing.price_label()
        )
        .map_err(|e| io_error(&e))?;
    }

    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "{} cargos shown", listings.len()).map_err(|e| io_error(&e))
}

/// Writes the full description of one listing, reviews included.
///
/// # Errors
///
/// Returns [`ClientError::Io`] when writing fails.
pub fn write_listing_detail<W: Write>(
    writer: &mut W,
    listing: &Listing,
) -> Result<(), ClientError> {
    let posted = listing.created_at.format("%Y-%m-%d %H:%M");
    let message = format!(
        "Cargo #{} {}\nRoute: {} -> {}\nWeight: {} t\nTruck: {}\nPrice: {}\nStatus: {}\nPosted: {posted}",
        listing.id,
        listing.name,
        listing.origin,
        listing.destination,
        listing.weight,
        listing.vehicle_type,
        listing.price_label(),
        listing.status,
    );
    writeln!(writer, "{message}").map_err(|e| io_error(&e))?;

    if let Some(customer) = &listing.customer {
        writeln!(writer, "Customer: {} ({})", customer.name, customer.phone_number)
            .map_err(|e| io_error(&e))?;
    }
    if let Some(carrier) = &listing.carrier {
        writeln!(writer, "Carrier: {} ({})", carrier.name, carrier.phone_number)
            .map_err(|e| io_error(&e))?;
    }
    if let Some(description) = listing.description.as_deref() {
        writeln!(writer, "\n{description}").map_err(|e| io_error(&e))?;
    }

    writeln!(writer).map_err(|e| io_error(&e))?;
    if listing.reviews.is_empty() {
        return writeln!(writer, "No reviews yet.").map_err(|e| io_error(&e));
    }
    writeln!(writer, "Reviews ({}):", listing.reviews.len()).map_err(|e| io_error(&e))?;
    for review in &listing.reviews {
        writeln!(writer, "  [{}/5] {}", review.rating, review.comment)
            .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes a user profile, including carrier details when present.
///
/// # Errors
///
/// Returns [`ClientError::Io`] when writing fails.
pub fn write_profile<W: Write>(writer: &mut W, profile: &UserProfile) -> Result<(), ClientError> {
    writeln!(
        writer,
        "{} (#{})\nPhone: {}\nEmail: {}",
        profile.name, profile.id, profile.phone_number, profile.email
    )
    .map_err(|e| io_error(&e))?;

    if let Some(vehicle_type) = profile.vehicle_type.as_deref() {
        writeln!(writer, "Truck: {vehicle_type}").map_err(|e| io_error(&e))?;
    }
    if let Some(capacity) = profile.vehicle_capacity {
        writeln!(writer, "Capacity: {capacity} t").map_err(|e| io_error(&e))?;
    }
    if let Some(license_type) = profile.license_type.as_deref() {
        writeln!(writer, "Licence: {license_type}").map_err(|e| io_error(&e))?;
    }
    if let Some(experience) = profile.experience {
        writeln!(writer, "Experience: {experience} years").map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes a single confirmation line.
///
/// # Errors
///
/// Returns [`ClientError::Io`] when writing fails.
pub fn write_line<W: Write>(writer: &mut W, message: &str) -> Result<(), ClientError> {
    writeln!(writer, "{message}").map_err(|e| io_error(&e))
}

/// Converts an I/O error to a [`ClientError::Io`].
pub(crate) fn io_error(error: &io::Error) -> ClientError {
    ClientError::Io {
        message: error.to_string(),
    }
}
