//! Error types exposed by the marketplace client.

use thiserror::Error;

use crate::forms::FormErrors;

/// Errors surfaced while validating input or talking to the marketplace API.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// Client-side validation rejected a form before any request was sent.
    #[error("{0}")]
    Validation(FormErrors),

    /// The API rejected the stored token (HTTP 401).
    #[error("session expired or invalid: {message}")]
    Unauthorized {
        /// Message returned alongside the 401 response.
        message: String,
    },

    /// An operation needs a session but no token is stored.
    #[error("you need to log in first")]
    NotAuthenticated,

    /// The API answered with a non-success status other than 401.
    #[error("server rejected the request with status {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// Networking failed while calling the API.
    #[error("network error talking to the marketplace API: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A success response could not be decoded.
    #[error("unexpected response from the marketplace API: {message}")]
    Decode {
        /// Decoder error detail.
        message: String,
    },

    /// The configured API base URL could not be parsed.
    #[error("API URL is invalid: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The local token store failed.
    #[error("local storage error: {message}")]
    Storage {
        /// Error detail from the persistence layer.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl ClientError {
    /// Returns true when the error means the session is no longer valid.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<FormErrors> for ClientError {
    fn from(errors: FormErrors) -> Self {
        Self::Validation(errors)
    }
}
