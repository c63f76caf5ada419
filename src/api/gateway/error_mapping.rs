//! Error mapping helpers for the HTTP marketplace gateway.

use http::StatusCode;

use crate::api::error::ClientError;

/// Checks whether the status means the session token was rejected.
pub(super) fn is_auth_failure(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED
}

/// Maps a reqwest failure that happened before a status was available.
pub(super) fn map_transport_error(operation: &str, error: &reqwest::Error) -> ClientError {
    if error.is_decode() {
        return ClientError::Decode {
            message: format!("{operation} failed: {error}"),
        };
    }
    ClientError::Network {
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps a non-success HTTP status to the client error taxonomy.
pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> ClientError {
    let message = maybe_message.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_owned()
    });
    if is_auth_failure(status) {
        ClientError::Unauthorized {
            message: format!("{operation} failed: {message}"),
        }
    } else {
        ClientError::Server {
            status: status.as_u16(),
            message,
        }
    }
}

/// Maps a body that arrived with a success status but did not decode.
pub(super) fn map_decode_error(operation: &str, error: &serde_json::Error) -> ClientError {
    ClientError::Decode {
        message: format!("{operation} returned an unexpected body: {error}"),
    }
}
