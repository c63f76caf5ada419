//! Data models exchanged with the marketplace API.
//!
//! Read models (`Listing`, `UserProfile`) deserialise straight from API
//! responses. Payload types (`NewCargo`, `CargoUpdate`, `Credentials`, ...)
//! are produced by the validated forms in [`crate::forms`] and serialise with
//! unset optional fields omitted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::endpoint::ListingId;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Truck body types offered by the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VehicleType {
    /// Curtain-sided (tent) trailer.
    Tentli,
    /// Flatbed with drop sides.
    Bortli,
    /// Refrigerated trailer.
    Refrijerator,
    /// Container chassis.
    Konteyner,
    /// Dump truck.
    Samosval,
    /// Open platform.
    Ploshadka,
    /// Long low-bed trailer.
    Shalanda,
    /// A value the client does not know about yet.
    Other(String),
}

impl VehicleType {
    /// Every type the client can offer in forms, in display order.
    pub const KNOWN: [Self; 7] = [
        Self::Tentli,
        Self::Bortli,
        Self::Refrijerator,
        Self::Konteyner,
        Self::Samosval,
        Self::Ploshadka,
        Self::Shalanda,
    ];

    /// Returns the wire name of the type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Tentli => "Tentli",
            Self::Bortli => "Bortli",
            Self::Refrijerator => "Refrijerator",
            Self::Konteyner => "Konteyner",
            Self::Samosval => "Samosval",
            Self::Ploshadka => "Ploshadka",
            Self::Shalanda => "Shalanda",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Matches user input against the known types, ignoring case.
    #[must_use]
    pub fn parse_known(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        Self::KNOWN
            .into_iter()
            .find(|known| known.as_str().eq_ignore_ascii_case(trimmed))
    }

    /// Comma separated list of known type names, for help and error text.
    #[must_use]
    pub fn known_names() -> String {
        Self::KNOWN
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<String> for VehicleType {
    fn from(value: String) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|known| known.as_str() == value)
            .unwrap_or(Self::Other(value))
    }
}

impl From<VehicleType> for String {
    fn from(value: VehicleType) -> Self {
        match value {
            VehicleType::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a listing as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ListingStatus {
    /// Waiting for a carrier.
    #[default]
    Pending,
    /// Published and open.
    Active,
    /// Picked up by a carrier.
    InTransit,
    /// Delivered to the destination.
    Delivered,
    /// Withdrawn by the customer.
    Cancelled,
    /// A status the client does not know about yet.
    Other(String),
}

impl ListingStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Other(value) => value.as_str(),
        }
    }
}

impl From<String> for ListingStatus {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "active" => Self::Active,
            "in_transit" => Self::InTransit,
            "delivered" => Self::Delivered,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<ListingStatus> for String {
    fn from(value: ListingStatus) -> Self {
        match value {
            ListingStatus::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Customer or carrier attached to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Account identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Contact email.
    pub email: String,
}

/// A review left on a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Review identifier.
    pub id: u64,
    /// Star rating.
    #[serde(default)]
    pub rating: u8,
    /// Review text.
    pub comment: String,
    /// When the review was written.
    pub created_at: DateTime<Utc>,
}

/// A freight listing (cargo) as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Listing identifier.
    pub id: ListingId,
    /// Display name of the cargo.
    pub name: String,
    /// Weight in tonnes.
    pub weight: f64,
    /// Pick-up location.
    pub origin: String,
    /// Delivery location.
    pub destination: String,
    /// Required truck type.
    pub vehicle_type: VehicleType,
    /// Offered price; `None` means negotiable.
    pub price: Option<f64>,
    /// Free-text description.
    pub description: Option<String>,
    /// Lifecycle state.
    #[serde(default)]
    pub status: ListingStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Customer who posted the listing.
    #[serde(default)]
    pub customer: Option<Party>,
    /// Carrier assigned to the listing.
    #[serde(default, rename = "driver")]
    pub carrier: Option<Party>,
    /// Reviews in the order the API returned them.
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Listing {
    /// Human-readable price, falling back to "negotiable".
    #[must_use]
    pub fn price_label(&self) -> String {
        self.price
            .map_or_else(|| "negotiable".to_owned(), |price| format!("{price} so'm"))
    }
}

/// The signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Phone number used to log in.
    pub phone_number: String,
    /// Contact email.
    pub email: String,
    /// Truck type, for carrier accounts.
    #[serde(default)]
    pub vehicle_type: Option<String>,
    /// Driving licence category, for carrier accounts.
    #[serde(default)]
    pub license_type: Option<String>,
    /// Truck capacity in tonnes, for carrier accounts.
    #[serde(default)]
    pub vehicle_capacity: Option<f64>,
    /// Years of driving experience, for carrier accounts.
    #[serde(default)]
    pub experience: Option<u32>,
}

impl UserProfile {
    /// Applies the fields returned by a profile update on top of the cached
    /// profile, keeping cached values the response left out.
    pub fn merge(&mut self, update: Self) {
        self.name = update.name;
        self.phone_number = update.phone_number;
        self.email = update.email;
        if update.vehicle_type.is_some() {
            self.vehicle_type = update.vehicle_type;
        }
        if update.license_type.is_some() {
            self.license_type = update.license_type;
        }
        if update.vehicle_capacity.is_some() {
            self.vehicle_capacity = update.vehicle_capacity;
        }
        if update.experience.is_some() {
            self.experience = update.experience;
        }
    }
}

/// Payload for `POST cargos/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCargo {
    /// Display name.
    pub name: String,
    /// Weight in tonnes.
    pub weight: f64,
    /// Pick-up location.
    pub origin: String,
    /// Delivery location.
    pub destination: String,
    /// Required truck type.
    pub vehicle_type: VehicleType,
    /// Offered price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for `PUT cargos/{id}/`; only the set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CargoUpdate {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Weight in tonnes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Pick-up location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Delivery location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Required truck type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<VehicleType>,
    /// Offered price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CargoUpdate {
    /// Returns true when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.weight.is_none()
            && self.origin.is_none()
            && self.destination.is_none()
            && self.vehicle_type.is_none()
            && self.price.is_none()
            && self.description.is_none()
    }
}

/// Payload for adding a review comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentPayload {
    /// Comment text.
    pub comment: String,
}

/// Payload for `POST login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Phone number, always starting with `+`.
    pub phone_number: String,
    /// Account password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("phone_number", &self.phone_number)
            .field("password", &"***")
            .finish()
    }
}

/// Payload for `POST register/`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Phone number, always starting with `+`.
    pub phone_number: String,
    /// Contact email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("phone_number", &self.phone_number)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Payload for `PUT profile/`; only the set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    /// Truck type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    /// Driving licence category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_type: Option<String>,
    /// Truck capacity in tonnes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_capacity: Option<f64>,
    /// Years of driving experience.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
}

/// Response body of login and registration.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) token: String,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case::known("Refrijerator", VehicleType::Refrijerator)]
    #[case::unknown("Tral", VehicleType::Other("Tral".to_owned()))]
    fn vehicle_type_reads_wire_names(#[case] raw: &str, #[case] expected: VehicleType) {
        let parsed: VehicleType =
            serde_json::from_value(json!(raw)).expect("vehicle type should deserialise");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.as_str(), raw);
    }

    #[test]
    fn parse_known_ignores_case_and_rejects_unknown() {
        assert_eq!(
            VehicleType::parse_known(" samosval "),
            Some(VehicleType::Samosval)
        );
        assert_eq!(VehicleType::parse_known("spaceship"), None);
    }

    #[test]
    fn listing_deserialises_with_driver_as_carrier() {
        let listing: Listing = serde_json::from_value(json!({
            "id": 7,
            "name": "Cement",
            "weight": 12.5,
            "origin": "Toshkent",
            "destination": "Samarqand",
            "vehicle_type": "Samosval",
            "price": null,
            "description": null,
            "status": "in_transit",
            "created_at": "2026-01-02T03:04:05Z",
            "driver": {
                "id": 3,
                "name": "Aziz",
                "phone_number": "+998901112233",
                "email": "aziz@example.com"
            },
            "reviews": []
        }))
        .expect("listing should deserialise");

        assert_eq!(listing.id.get(), 7);
        assert_eq!(listing.status, ListingStatus::InTransit);
        assert_eq!(listing.price, None);
        assert_eq!(listing.price_label(), "negotiable");
        assert_eq!(
            listing.carrier.map(|carrier| carrier.name),
            Some("Aziz".to_owned())
        );
        assert!(listing.customer.is_none());
    }

    #[test]
    fn new_cargo_omits_unset_optionals() {
        let payload = NewCargo {
            name: "Paxta".to_owned(),
            weight: 20.0,
            origin: "Buxoro".to_owned(),
            destination: "Navoiy".to_owned(),
            vehicle_type: VehicleType::Tentli,
            price: None,
            description: None,
        };

        let value = serde_json::to_value(&payload).expect("payload should serialise");
        assert_eq!(
            value,
            json!({
                "name": "Paxta",
                "weight": 20.0,
                "origin": "Buxoro",
                "destination": "Navoiy",
                "vehicle_type": "Tentli"
            })
        );
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = Credentials {
            phone_number: "+998901234567".to_owned(),
            password: "secret-password".to_owned(),
        };
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("secret-password"));
    }

    #[test]
    fn profile_merge_keeps_values_missing_from_update() {
        let mut cached = UserProfile {
            id: 1,
            name: "Aziz".to_owned(),
            phone_number: "+998901112233".to_owned(),
            email: "aziz@example.com".to_owned(),
            vehicle_type: Some("Tentli".to_owned()),
            license_type: Some("C".to_owned()),
            vehicle_capacity: Some(20.0),
            experience: Some(5),
        };
        let update = UserProfile {
            license_type: None,
            experience: Some(6),
            ..cached.clone()
        };

        cached.merge(update);

        assert_eq!(cached.license_type.as_deref(), Some("C"));
        assert_eq!(cached.experience, Some(6));
    }
}
