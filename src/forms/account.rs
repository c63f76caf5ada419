//! Login, registration and profile forms.

use std::fmt;

use super::FormErrors;
use super::rules::{optional_number_at_least, optional_text, optional_whole_number, text_min_chars};
use crate::api::{Credentials, ProfileUpdate, Registration};

const MIN_PHONE_CHARS: usize = 9;
const MIN_PASSWORD_CHARS: usize = 6;
const MIN_NAME_CHARS: usize = 2;

/// Prepends `+` to a phone number that lacks one.
#[must_use]
pub fn normalise_phone_number(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with('+') {
        trimmed.to_owned()
    } else {
        format!("+{trimmed}")
    }
}

/// Raw input of the login form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Phone number, with or without the leading `+`.
    pub phone_number: String,
    /// Account password.
    pub password: String,
}

impl LoginForm {
    /// Validates the form into login credentials.
    ///
    /// # Errors
    ///
    /// Returns every failing field when the input is invalid.
    pub fn validate(&self) -> Result<Credentials, FormErrors> {
        let mut errors = FormErrors::new();
        let phone_number = phone_number(&mut errors, &self.phone_number);
        password(&mut errors, &self.password);
        errors.into_result(Credentials {
            phone_number,
            password: self.password.clone(),
        })
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("phone_number", &self.phone_number)
            .finish_non_exhaustive()
    }
}

/// Raw input of the registration form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    /// Display name.
    pub name: String,
    /// Phone number, with or without the leading `+`.
    pub phone_number: String,
    /// Contact email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl RegisterForm {
    /// Validates the form into a registration payload.
    ///
    /// # Errors
    ///
    /// Returns every failing field when the input is invalid.
    pub fn validate(&self) -> Result<Registration, FormErrors> {
        let mut errors = FormErrors::new();
        let name = text_min_chars(&mut errors, "name", &self.name, MIN_NAME_CHARS);
        let phone_number = phone_number(&mut errors, &self.phone_number);
        let email = self.email.trim().to_owned();
        if !looks_like_email(&email) {
            errors.push("email", "must look like name@example.com");
        }
        password(&mut errors, &self.password);
        errors.into_result(Registration {
            name,
            phone_number,
            email,
            password: self.password.clone(),
        })
    }
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("name", &self.name)
            .field("phone_number", &self.phone_number)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Raw input of the profile form; blank fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    /// Truck type.
    pub vehicle_type: Option<String>,
    /// Driving licence category.
    pub license_type: Option<String>,
    /// Truck capacity in tonnes.
    pub vehicle_capacity: Option<String>,
    /// Years of driving experience.
    pub experience: Option<String>,
}

impl ProfileForm {
    /// Validates the form into a profile update.
    ///
    /// # Errors
    ///
    /// Returns a failure for a negative or non-numeric capacity or
    /// experience.
    pub fn validate(&self) -> Result<ProfileUpdate, FormErrors> {
        let mut errors = FormErrors::new();
        let update = ProfileUpdate {
            vehicle_type: optional_text(self.vehicle_type.as_deref()),
            license_type: optional_text(self.license_type.as_deref()),
            vehicle_capacity: optional_number_at_least(
                &mut errors,
                "vehicle_capacity",
                self.vehicle_capacity.as_deref(),
                0.0,
            ),
            experience: optional_whole_number(
                &mut errors,
                "experience",
                self.experience.as_deref(),
            ),
        };
        errors.into_result(update)
    }
}

fn phone_number(errors: &mut FormErrors, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.chars().count() < MIN_PHONE_CHARS {
        errors.push(
            "phone_number",
            format!("must be at least {MIN_PHONE_CHARS} characters"),
        );
    }
    normalise_phone_number(trimmed)
}

fn password(errors: &mut FormErrors, value: &str) {
    if value.chars().count() < MIN_PASSWORD_CHARS {
        errors.push(
            "password",
            format!("must be at least {MIN_PASSWORD_CHARS} characters"),
        );
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !local.is_empty() && !host.is_empty() && !tld.is_empty() && !domain.contains('@')
}
