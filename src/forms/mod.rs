//! Client-side validation for every form the marketplace client submits.
//!
//! Each form holds the raw text a user typed. `validate` either produces the
//! typed API payload or a [`FormErrors`] listing every failing field, so a
//! rejected form never reaches the network.

mod account;
mod cargo;
mod rules;
mod search;

use std::fmt;

pub use account::{LoginForm, ProfileForm, RegisterForm, normalise_phone_number};
pub use cargo::{CargoForm, CargoUpdateForm, CommentForm};
pub use search::FilterForm;

/// A validation failure on one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Payload name of the failing field.
    pub field: &'static str,
    /// Message suitable for showing next to the field.
    pub message: String,
}

/// Every validation failure found in one form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    /// Creates an empty error set.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Records a failure on `field`.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Returns true when no failure was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message recorded for `field`, if it failed.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    /// Iterates over the recorded failures.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Returns `value` when nothing failed, otherwise the collected errors.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one failure was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl<'a> IntoIterator for &'a FormErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return f.write_str("form is valid");
        }
        let rendered: Vec<String> = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect();
        write!(f, "invalid input: {}", rendered.join("; "))
    }
}

impl std::error::Error for FormErrors {}
