//! Shared HTTP utilities for the marketplace gateway.

use crate::api::endpoint::ListingId;

pub(super) const CARGOS_PATH: &str = "cargos/";
pub(super) const PROFILE_PATH: &str = "profile";
pub(super) const PROFILE_UPDATE_PATH: &str = "profile/";
pub(super) const PROFILE_CARGOS_PATH: &str = "profile/cargos";
pub(super) const LOGIN_PATH: &str = "login";
pub(super) const REGISTER_PATH: &str = "register/";

/// Path of a single listing, used for reads and comments.
pub(super) fn cargo_path(id: ListingId) -> String {
    format!("cargos/{id}")
}

/// Path of a single listing for partial updates.
pub(super) fn cargo_update_path(id: ListingId) -> String {
    format!("cargos/{id}/")
}

/// Extracts the human-readable error from an API error body.
///
/// The API reports errors as `{"message": ...}` or `{"detail": ...}`; field
/// errors arrive as `{"field": ["problem", ...]}` and are flattened.
pub(super) fn extract_api_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    for key in ["message", "detail"] {
        if let Some(text) = value.get(key).and_then(serde_json::Value::as_str) {
            return Some(text.to_owned());
        }
    }

    let fields = value.as_object()?;
    let parts: Vec<String> = fields
        .iter()
        .filter_map(|(field, problems)| {
            let first = problems
                .as_array()
                .and_then(|items| items.first())
                .and_then(serde_json::Value::as_str)
                .or_else(|| problems.as_str())?;
            Some(format!("{field}: {first}"))
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}
