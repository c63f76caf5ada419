//! Forms that create, edit and comment on cargo listings.

use super::FormErrors;
use super::rules::{number_at_least, optional_number_at_least, optional_text, text_min_chars};
use crate::api::{CargoUpdate, CommentPayload, NewCargo, VehicleType};

const MIN_NAME_CHARS: usize = 2;
const MIN_PLACE_CHARS: usize = 2;
const MIN_COMMENT_CHARS: usize = 3;
const MIN_WEIGHT_TONNES: f64 = 0.1;

/// Raw input of the add-cargo form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CargoForm {
    /// Cargo name.
    pub name: String,
    /// Weight in tonnes.
    pub weight: String,
    /// Pick-up location.
    pub origin: String,
    /// Delivery location.
    pub destination: String,
    /// Vehicle type name.
    pub vehicle_type: String,
    /// Optional price.
    pub price: Option<String>,
    /// Optional description.
    pub description: Option<String>,
}

impl CargoForm {
    /// Validates the form into a creation payload.
    ///
    /// # Errors
    ///
    /// Returns every failing field when the input is invalid.
    pub fn validate(&self) -> Result<NewCargo, FormErrors> {
        let mut errors = FormErrors::new();
        let name = text_min_chars(&mut errors, "name", &self.name, MIN_NAME_CHARS);
        let weight = number_at_least(&mut errors, "weight", &self.weight, MIN_WEIGHT_TONNES);
        let origin = text_min_chars(&mut errors, "origin", &self.origin, MIN_PLACE_CHARS);
        let destination =
            text_min_chars(&mut errors, "destination", &self.destination, MIN_PLACE_CHARS);
        let vehicle_type = known_vehicle_type(&mut errors, &self.vehicle_type);
        let price = optional_number_at_least(&mut errors, "price", self.price.as_deref(), 0.0);
        let description = optional_text(self.description.as_deref());

        match (weight, vehicle_type) {
            (Some(weight_tonnes), Some(vehicle)) if errors.is_empty() => Ok(NewCargo {
                name,
                weight: weight_tonnes,
                origin,
                destination,
                vehicle_type: vehicle,
                price,
                description,
            }),
            _ => Err(errors),
        }
    }
}

/// Raw input of the edit-cargo form; blank fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CargoUpdateForm {
    /// New cargo name.
    pub name: Option<String>,
    /// New weight in tonnes.
    pub weight: Option<String>,
    /// New pick-up location.
    pub origin: Option<String>,
    /// New delivery location.
    pub destination: Option<String>,
    /// New vehicle type name.
    pub vehicle_type: Option<String>,
    /// New price.
    pub price: Option<String>,
    /// New description.
    pub description: Option<String>,
}

impl CargoUpdateForm {
    /// Validates the supplied fields into a partial update.
    ///
    /// # Errors
    ///
    /// Returns every failing field, or a form-level error when no field was
    /// supplied.
    pub fn validate(&self) -> Result<CargoUpdate, FormErrors> {
        let mut errors = FormErrors::new();
        let update = CargoUpdate {
            name: optional_text(self.name.as_deref())
                .map(|name| text_min_chars(&mut errors, "name", &name, MIN_NAME_CHARS)),
            weight: optional_text(self.weight.as_deref()).and_then(|weight| {
                number_at_least(&mut errors, "weight", &weight, MIN_WEIGHT_TONNES)
            }),
            origin: optional_text(self.origin.as_deref())
                .map(|origin| text_min_chars(&mut errors, "origin", &origin, MIN_PLACE_CHARS)),
            destination: optional_text(self.destination.as_deref()).map(|destination| {
                text_min_chars(&mut errors, "destination", &destination, MIN_PLACE_CHARS)
            }),
            vehicle_type: optional_text(self.vehicle_type.as_deref())
                .and_then(|vehicle| known_vehicle_type(&mut errors, &vehicle)),
            price: optional_number_at_least(&mut errors, "price", self.price.as_deref(), 0.0),
            description: optional_text(self.description.as_deref()),
        };

        if errors.is_empty() && update.is_empty() {
            errors.push("form", "change at least one field");
        }
        errors.into_result(update)
    }
}

/// Raw input of the review comment form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentForm {
    /// Comment text.
    pub comment: String,
}

impl CommentForm {
    /// Validates and trims the comment.
    ///
    /// # Errors
    ///
    /// Returns a `comment` failure when fewer than three characters remain
    /// after trimming.
    pub fn validate(&self) -> Result<CommentPayload, FormErrors> {
        let mut errors = FormErrors::new();
        let comment = text_min_chars(&mut errors, "comment", &self.comment, MIN_COMMENT_CHARS);
        errors.into_result(CommentPayload { comment })
    }
}

fn known_vehicle_type(errors: &mut FormErrors, value: &str) -> Option<VehicleType> {
    if value.trim().is_empty() {
        errors.push("vehicle_type", "choose a vehicle type");
        return None;
    }
    let parsed = VehicleType::parse_known(value);
    if parsed.is_none() {
        errors.push(
            "vehicle_type",
            format!("must be one of {}", VehicleType::known_names()),
        );
    }
    parsed
}
