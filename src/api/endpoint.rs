//! API base URL handling and identity wrappers for marketplace requests.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use super::error::ClientError;

/// Default base URL of the marketplace REST API.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/v1";

/// Listing identifier assigned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(u64);

impl ListingId {
    /// Wraps a raw identifier, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when `value` is zero.
    pub fn new(value: u64) -> Result<Self, ClientError> {
        if value == 0 {
            return Err(invalid_listing_id());
        }
        Ok(Self(value))
    }

    /// Parses a listing identifier typed by the user.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when the input is not a
    /// positive integer.
    pub fn parse(input: &str) -> Result<Self, ClientError> {
        input
            .trim()
            .parse::<u64>()
            .map_err(|_| invalid_listing_id())
            .and_then(Self::new)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn invalid_listing_id() -> ClientError {
    ClientError::Configuration {
        message: "listing id must be a positive integer".to_owned(),
    }
}

/// Session token returned by login or registration.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] when the string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ClientError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ClientError::NotAuthenticated);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }

    /// Renders the `Authorization` header value the API expects.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Token {}", self.0)
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Normalised API base URL that relative endpoint paths are joined onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(Url);

impl ApiBase {
    /// Parses a base URL, ensuring it ends with a slash so joins keep the
    /// full path prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] when the input is not an absolute
    /// `http` or `https` URL.
    pub fn parse(input: &str) -> Result<Self, ClientError> {
        let trimmed = input.trim();
        let with_slash = if trimmed.ends_with('/') {
            trimmed.to_owned()
        } else {
            format!("{trimmed}/")
        };
        let url =
            Url::parse(&with_slash).map_err(|error| ClientError::InvalidUrl(error.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "unsupported scheme `{}`",
                url.scheme()
            )));
        }
        Ok(Self(url))
    }

    /// Borrow the base URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }

    /// Joins a relative endpoint path onto the base.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] when the join fails.
    pub fn join(&self, path: &str) -> Result<Url, ClientError> {
        self.0
            .join(path)
            .map_err(|error| ClientError::InvalidUrl(error.to_string()))
    }
}
