//! The listing filter form.

use super::FormErrors;
use super::rules::{optional_number_at_least, optional_text};
use crate::filter::{ListingFilter, VehicleTypeFilter};

/// Raw input of the listing filter form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    /// Origin substring.
    pub origin: Option<String>,
    /// Destination substring.
    pub destination: Option<String>,
    /// Vehicle type name, or `all`.
    pub vehicle_type: Option<String>,
    /// Minimum weight in tonnes.
    pub min_weight: Option<String>,
    /// Maximum weight in tonnes.
    pub max_weight: Option<String>,
    /// Minimum price.
    pub min_price: Option<String>,
    /// Maximum price.
    pub max_price: Option<String>,
}

impl FilterForm {
    /// Validates the form into filter criteria.
    ///
    /// # Errors
    ///
    /// Returns a failure for every bound that is negative or not a number.
    pub fn validate(&self) -> Result<ListingFilter, FormErrors> {
        let mut errors = FormErrors::new();
        let filter = ListingFilter {
            origin: optional_text(self.origin.as_deref()),
            destination: optional_text(self.destination.as_deref()),
            vehicle_type: self
                .vehicle_type
                .as_deref()
                .map_or(VehicleTypeFilter::Any, VehicleTypeFilter::from_form_value),
            min_weight: optional_number_at_least(
                &mut errors,
                "min_weight",
                self.min_weight.as_deref(),
                0.0,
            ),
            max_weight: optional_number_at_least(
                &mut errors,
                "max_weight",
                self.max_weight.as_deref(),
                0.0,
            ),
            min_price: optional_number_at_least(
                &mut errors,
                "min_price",
                self.min_price.as_deref(),
                0.0,
            ),
            max_price: optional_number_at_least(
                &mut errors,
                "max_price",
                self.max_price.as_deref(),
                0.0,
            ),
        };
        errors.into_result(filter)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::api::VehicleType;

    #[rstest]
    fn builds_filter_from_form() {
        let form = FilterForm {
            origin: Some(" Tosh ".to_owned()),
            vehicle_type: Some("Bortli".to_owned()),
            max_weight: Some("25".to_owned()),
            ..FilterForm::default()
        };
        let filter = form.validate().expect("filter should be valid");
        assert_eq!(filter.origin.as_deref(), Some("Tosh"));
        assert_eq!(
            filter.vehicle_type,
            VehicleTypeFilter::Exactly(VehicleType::Bortli)
        );
        assert_eq!(filter.max_weight, Some(25.0));
    }

    #[rstest]
    #[case::negative("-5")]
    #[case::text("many")]
    fn rejects_bad_bounds(#[case] bound: &str) {
        let form = FilterForm {
            min_price: Some(bound.to_owned()),
            ..FilterForm::default()
        };
        let errors = form.validate().expect_err("bound should be rejected");
        assert!(errors.message_for("min_price").is_some());
    }

    #[rstest]
    fn all_sentinel_means_any_vehicle() {
        let form = FilterForm {
            vehicle_type: Some("all".to_owned()),
            ..FilterForm::default()
        };
        let filter = form.validate().expect("filter should be valid");
        assert!(filter.is_empty());
    }
}
