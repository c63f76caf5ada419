//! Field-level checks shared by the forms.

use super::FormErrors;

/// Trims the input and treats blank text as absent.
pub(super) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

/// Requires at least `min_chars` characters after trimming.
pub(super) fn text_min_chars(
    errors: &mut FormErrors,
    field: &'static str,
    value: &str,
    min_chars: usize,
) -> String {
    let trimmed = value.trim();
    if trimmed.chars().count() < min_chars {
        errors.push(field, format!("must be at least {min_chars} characters"));
    }
    trimmed.to_owned()
}

/// Parses a finite number that is at least `min`.
pub(super) fn number_at_least(
    errors: &mut FormErrors,
    field: &'static str,
    value: &str,
    min: f64,
) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() && number >= min => Some(number),
        Ok(number) if number.is_finite() => {
            errors.push(field, format!("must be at least {min}"));
            None
        }
        _ => {
            errors.push(field, "must be a number");
            None
        }
    }
}

/// Parses an optional number; blank input is absent.
pub(super) fn optional_number_at_least(
    errors: &mut FormErrors,
    field: &'static str,
    value: Option<&str>,
    min: f64,
) -> Option<f64> {
    optional_text(value).and_then(|text| number_at_least(errors, field, &text, min))
}

/// Parses an optional whole number of at least zero; blank input is absent.
pub(super) fn optional_whole_number(
    errors: &mut FormErrors,
    field: &'static str,
    value: Option<&str>,
) -> Option<u32> {
    let text = optional_text(value)?;
    match text.parse::<u32>() {
        Ok(number) => Some(number),
        Err(_) => {
            errors.push(field, "must be a whole number of at least 0");
            None
        }
    }
}
