//! Cargo reads and mutations with loading, toasts and the query cache.

use std::sync::Arc;

use tracing::{info, warn};

use super::expiry::SessionExpiry;
use super::loading::LoadingState;
use super::notifications::Notifications;
use super::query_cache::{Invalidation, QueryCache};
use crate::api::{ClientError, Listing, ListingId, MarketplaceGateway};
use crate::filter::ListingFilter;
use crate::forms::{CargoForm, CargoUpdateForm, CommentForm};

/// Cargo operations as the views use them.
///
/// Read failures are logged, reported as an error toast and replaced with the
/// cached result, or an empty one. Mutations return their error after doing
/// the same.
#[derive(Clone)]
pub struct CargoService {
    gateway: Arc<dyn MarketplaceGateway>,
    loading: LoadingState,
    notifications: Arc<Notifications>,
    cache: Arc<QueryCache>,
    expiry: SessionExpiry,
}

impl CargoService {
    /// Wires the service.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn MarketplaceGateway>,
        loading: LoadingState,
        notifications: Arc<Notifications>,
        cache: Arc<QueryCache>,
        expiry: SessionExpiry,
    ) -> Self {
        Self {
            gateway,
            loading,
            notifications,
            cache,
            expiry,
        }
    }

    /// Loads the cargo list for `filter`.
    ///
    /// A failed load falls back to the last list cached for the same filter,
    /// or an empty list when there is none.
    pub async fn list(&self, filter: &ListingFilter) -> Vec<Listing> {
        let _guard = self.loading.begin();
        match self.gateway.list_cargos(filter).await {
            Ok(listings) => {
                self.cache.put_list(filter, listings.clone());
                listings
            }
            Err(error) => {
                self.report("load cargos", "Could not load the cargo list", &error);
                self.cache.list(filter).unwrap_or_default()
            }
        }
    }

    /// Loads one cargo, falling back to the cached copy when the load fails.
    pub async fn detail(&self, id: ListingId) -> Option<Listing> {
        let _guard = self.loading.begin();
        match self.gateway.cargo(id).await {
            Ok(listing) => {
                self.cache.put_cargo(listing.clone());
                Some(listing)
            }
            Err(error) => {
                self.report("load cargo", "Could not load the cargo", &error);
                self.cache.cargo(id)
            }
        }
    }

    /// Loads the signed-in user's cargos.
    ///
    /// A failed load falls back to the cached list unless the session was
    /// rejected, in which case the cached list is dropped.
    pub async fn user_cargos(&self) -> Vec<Listing> {
        let _guard = self.loading.begin();
        match self.gateway.user_cargos().await {
            Ok(listings) => {
                self.cache.put_user_cargos(listings.clone());
                listings
            }
            Err(error) => {
                self.report("load user cargos", "Could not load your cargos", &error);
                if error.is_unauthorized() {
                    self.cache.invalidate(&[Invalidation::UserCargos]);
                    return Vec::new();
                }
                self.cache.user_cargos().unwrap_or_default()
            }
        }
    }

    /// Validates and creates a cargo.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without calling the API when the
    /// form is invalid, or the API failure otherwise.
    pub async fn create(&self, form: &CargoForm) -> Result<Listing, ClientError> {
        let payload = form.validate()?;
        let _guard = self.loading.begin();
        match self.gateway.create_cargo(&payload).await {
            Ok(listing) => {
                self.cache
                    .invalidate(&[Invalidation::CargoLists, Invalidation::UserCargos]);
                info!(id = %listing.id, "cargo created");
                self.notifications.success("Cargo added");
                Ok(listing)
            }
            Err(error) => {
                self.report("create cargo", "Could not add the cargo", &error);
                Err(error)
            }
        }
    }

    /// Validates and applies a partial update to cargo `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without calling the API when the
    /// form is invalid, or the API failure otherwise.
    pub async fn update(
        &self,
        id: ListingId,
        form: &CargoUpdateForm,
    ) -> Result<Listing, ClientError> {
        let payload = form.validate()?;
        let _guard = self.loading.begin();
        match self.gateway.update_cargo(id, &payload).await {
            Ok(listing) => {
                self.cache.invalidate(&[
                    Invalidation::CargoLists,
                    Invalidation::Cargo(id),
                    Invalidation::UserCargos,
                ]);
                info!(%id, "cargo updated");
                self.notifications.success("Cargo updated");
                Ok(listing)
            }
            Err(error) => {
                self.report("update cargo", "Could not update the cargo", &error);
                Err(error)
            }
        }
    }

    /// Validates and adds a comment to cargo `id`, returning the cargo with
    /// its updated reviews.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without calling the API when the
    /// comment is too short, or the API failure otherwise.
    pub async fn comment(&self, id: ListingId, form: &CommentForm) -> Result<Listing, ClientError> {
        let payload = form.validate()?;
        let _guard = self.loading.begin();
        match self.gateway.add_comment(id, &payload).await {
            Ok(listing) => {
                self.cache.invalidate(&[Invalidation::Cargo(id)]);
                self.notifications.success("Comment added");
                Ok(listing)
            }
            Err(error) => {
                self.report("add comment", "Could not add the comment", &error);
                Err(error)
            }
        }
    }

    fn report(&self, operation: &str, fallback: &str, error: &ClientError) {
        warn!(operation, %error, "marketplace call failed");
        if self.expiry.observe(error) {
            return;
        }
        self.notifications.error(toast_message(fallback, error));
    }
}

impl std::fmt::Debug for CargoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CargoService")
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

/// Prefers the server's own message, falling back to a generic one.
pub(super) fn toast_message(fallback: &str, error: &ClientError) -> String {
    match error {
        ClientError::Server { message, .. } if !message.trim().is_empty() => message.clone(),
        _ => fallback.to_owned(),
    }
}

#[cfg(test)]
mod tests;
