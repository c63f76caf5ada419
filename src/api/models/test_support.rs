//! Test helpers for constructing listing and profile fixtures.
//!
//! # Examples
//!
//! ```
//! use yukchi::api::models::test_support::{listing, priced_listing};
//!
//! let open = listing(1, "Toshkent", "Samarqand");
//! assert!(open.price.is_none());
//!
//! let priced = priced_listing(2, 1_500_000.0);
//! assert_eq!(priced.price, Some(1_500_000.0));
//! ```

use chrono::{TimeZone, Utc};

use super::{Listing, ListingStatus, UserProfile, VehicleType};
use crate::api::ListingId;

/// Constructs an active Tentli listing with no price between `origin` and
/// `destination`.
///
/// # Panics
///
/// Panics when `id` is zero.
#[must_use]
#[expect(clippy::expect_used, reason = "fixture ids are chosen by the test")]
pub fn listing(id: u64, origin: &str, destination: &str) -> Listing {
    Listing {
        id: ListingId::new(id).expect("fixture id should be positive"),
        name: format!("Cargo {id}"),
        weight: 10.0,
        origin: origin.to_owned(),
        destination: destination.to_owned(),
        vehicle_type: VehicleType::Tentli,
        price: None,
        description: None,
        status: ListingStatus::Active,
        created_at: Utc.timestamp_opt(1_767_225_600, 0).single().unwrap_or_default(),
        customer: None,
        carrier: None,
        reviews: Vec::new(),
    }
}

/// Constructs a listing with the given price and default route.
///
/// # Panics
///
/// Panics when `id` is zero.
#[must_use]
pub fn priced_listing(id: u64, price: f64) -> Listing {
    Listing {
        price: Some(price),
        ..listing(id, "Toshkent", "Samarqand")
    }
}

/// Constructs a listing with the given weight, vehicle type and route.
///
/// # Panics
///
/// Panics when `id` is zero.
#[must_use]
pub fn listing_with(
    id: u64,
    weight: f64,
    vehicle_type: VehicleType,
    origin: &str,
    destination: &str,
) -> Listing {
    Listing {
        weight,
        vehicle_type,
        ..listing(id, origin, destination)
    }
}

/// Constructs a customer profile with no carrier fields.
#[must_use]
pub fn profile(name: &str) -> UserProfile {
    UserProfile {
        id: 1,
        name: name.to_owned(),
        phone_number: "+998901234567".to_owned(),
        email: "user@example.com".to_owned(),
        vehicle_type: None,
        license_type: None,
        vehicle_capacity: None,
        experience: None,
    }
}
