//! Client-side listing filter.
//!
//! [`ListingFilter`] holds the criteria a user picked; [`ListingFilter::apply`]
//! derives the matching subsequence of an already fetched collection without
//! touching it, so criteria can change without another request. The same
//! criteria render to API query parameters with
//! [`ListingFilter::to_query_pairs`].

use std::fmt;

use crate::api::{Listing, VehicleType};

/// Form value that stands for "any vehicle type".
pub const ANY_VEHICLE_TYPE: &str = "all";

/// Vehicle type criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VehicleTypeFilter {
    /// Every vehicle type matches.
    #[default]
    Any,
    /// Only listings with exactly this type match.
    Exactly(VehicleType),
}

impl VehicleTypeFilter {
    /// Interprets a form value; `"all"` and blank input mean [`Self::Any`].
    #[must_use]
    pub fn from_form_value(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ANY_VEHICLE_TYPE) {
            Self::Any
        } else {
            Self::Exactly(VehicleType::from(trimmed.to_owned()))
        }
    }

    /// Returns true when `vehicle_type` satisfies the criterion.
    #[must_use]
    pub fn matches(&self, vehicle_type: &VehicleType) -> bool {
        match self {
            Self::Any => true,
            Self::Exactly(wanted) => wanted.as_str() == vehicle_type.as_str(),
        }
    }

    /// Advances through `Any` and then every known type, wrapping around.
    #[must_use]
    pub fn cycle_next(&self) -> Self {
        let known = VehicleType::KNOWN;
        let next_index = match self {
            Self::Any => Some(0),
            Self::Exactly(current) => known
                .iter()
                .position(|candidate| candidate == current)
                .and_then(|index| index.checked_add(1)),
        };
        next_index
            .and_then(|index| known.get(index).cloned())
            .map_or(Self::Any, Self::Exactly)
    }
}

impl fmt::Display for VehicleTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(ANY_VEHICLE_TYPE),
            Self::Exactly(vehicle_type) => f.write_str(vehicle_type.as_str()),
        }
    }
}

/// Filter criteria for listings. Unset criteria impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    /// Case-insensitive substring of the origin.
    pub origin: Option<String>,
    /// Case-insensitive substring of the destination.
    pub destination: Option<String>,
    /// Vehicle type criterion.
    pub vehicle_type: VehicleTypeFilter,
    /// Inclusive lower weight bound in tonnes.
    pub min_weight: Option<f64>,
    /// Inclusive upper weight bound in tonnes.
    pub max_weight: Option<f64>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

impl ListingFilter {
    /// Returns true when no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        text_criterion(self.origin.as_deref()).is_none()
            && text_criterion(self.destination.as_deref()).is_none()
            && self.vehicle_type == VehicleTypeFilter::Any
            && self.min_weight.is_none()
            && self.max_weight.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// Returns true when `listing` satisfies every set criterion.
    ///
    /// Listings without a price pass the price bounds.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        contains_ignoring_case(&listing.origin, self.origin.as_deref())
            && contains_ignoring_case(&listing.destination, self.destination.as_deref())
            && self.vehicle_type.matches(&listing.vehicle_type)
            && within(listing.weight, self.min_weight, self.max_weight)
            && listing
                .price
                .is_none_or(|price| within(price, self.min_price, self.max_price))
    }

    /// Derives the listings that match, preserving input order.
    #[must_use]
    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings
            .iter()
            .filter(|listing| self.matches(listing))
            .collect()
    }

    /// Renders the set criteria as API query parameters.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(origin) = text_criterion(self.origin.as_deref()) {
            pairs.push(("origin", origin.to_owned()));
        }
        if let Some(destination) = text_criterion(self.destination.as_deref()) {
            pairs.push(("destination", destination.to_owned()));
        }
        if let VehicleTypeFilter::Exactly(vehicle_type) = &self.vehicle_type {
            pairs.push(("vehicle_type", vehicle_type.as_str().to_owned()));
        }
        let bounds = [
            ("min_weight", self.min_weight),
            ("max_weight", self.max_weight),
            ("min_price", self.min_price),
            ("max_price", self.max_price),
        ];
        pairs.extend(
            bounds
                .into_iter()
                .filter_map(|(key, bound)| bound.map(|value| (key, value.to_string()))),
        );
        pairs
    }

    /// One-line summary of the active criteria for status bars.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.is_empty() {
            return "no filters".to_owned();
        }
        self.to_query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn text_criterion(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn contains_ignoring_case(haystack: &str, needle: Option<&str>) -> bool {
    text_criterion(needle)
        .is_none_or(|wanted| haystack.to_lowercase().contains(&wanted.to_lowercase()))
}

fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.is_none_or(|bound| value >= bound) && max.is_none_or(|bound| value <= bound)
}
