//! Cached query results and mutation-driven invalidation.
//!
//! Reads always go to the API; the cache keeps the latest result per query
//! and stands in for it when a later read of the same query fails.
//! Mutations invalidate the keys whose results they may have changed.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::api::{Listing, ListingId};
use crate::filter::ListingFilter;

/// Identifies one cached query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// Cargo list for a rendered filter query.
    CargoList(String),
    /// One cargo.
    Cargo(ListingId),
    /// The signed-in user's cargos.
    UserCargos,
}

impl QueryKey {
    /// Key of the cargo list for `filter`.
    #[must_use]
    pub fn cargo_list(filter: &ListingFilter) -> Self {
        let rendered = filter
            .to_query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        Self::CargoList(rendered)
    }
}

/// Invalidation target of a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalidation {
    /// Every cached cargo list.
    CargoLists,
    /// One cached cargo.
    Cargo(ListingId),
    /// The cached user cargos.
    UserCargos,
}

#[derive(Debug, Clone, PartialEq)]
enum Cached {
    Listings(Vec<Listing>),
    Listing(Box<Listing>),
}

/// Per-key cache of query results.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Cached>>,
}

impl QueryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the cargo list fetched for `filter`.
    pub fn put_list(&self, filter: &ListingFilter, listings: Vec<Listing>) {
        self.lock()
            .insert(QueryKey::cargo_list(filter), Cached::Listings(listings));
    }

    /// Cached cargo list for `filter`.
    #[must_use]
    pub fn list(&self, filter: &ListingFilter) -> Option<Vec<Listing>> {
        self.listings(&QueryKey::cargo_list(filter))
    }

    /// Stores one fetched cargo.
    pub fn put_cargo(&self, listing: Listing) {
        self.lock()
            .insert(QueryKey::Cargo(listing.id), Cached::Listing(Box::new(listing)));
    }

    /// Cached cargo `id`.
    #[must_use]
    pub fn cargo(&self, id: ListingId) -> Option<Listing> {
        match self.lock().get(&QueryKey::Cargo(id)) {
            Some(Cached::Listing(listing)) => Some(listing.as_ref().clone()),
            Some(Cached::Listings(_)) | None => None,
        }
    }

    /// Stores the signed-in user's cargos.
    pub fn put_user_cargos(&self, listings: Vec<Listing>) {
        self.lock()
            .insert(QueryKey::UserCargos, Cached::Listings(listings));
    }

    /// Cached user cargos.
    #[must_use]
    pub fn user_cargos(&self) -> Option<Vec<Listing>> {
        self.listings(&QueryKey::UserCargos)
    }

    /// Returns true when `key` holds a result.
    #[must_use]
    pub fn contains(&self, key: &QueryKey) -> bool {
        self.lock().contains_key(key)
    }

    /// Drops the entries matched by `targets`.
    pub fn invalidate(&self, targets: &[Invalidation]) {
        let mut entries = self.lock();
        entries.retain(|key, _| !targets.iter().any(|target| matches_target(key, *target)));
        debug!(?targets, remaining = entries.len(), "invalidated cached queries");
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn listings(&self, key: &QueryKey) -> Option<Vec<Listing>> {
        match self.lock().get(key) {
            Some(Cached::Listings(listings)) => Some(listings.clone()),
            Some(Cached::Listing(_)) | None => None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, Cached>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn matches_target(key: &QueryKey, target: Invalidation) -> bool {
    match (key, target) {
        (QueryKey::CargoList(_), Invalidation::CargoLists)
        | (QueryKey::UserCargos, Invalidation::UserCargos) => true,
        (QueryKey::Cargo(cached), Invalidation::Cargo(wanted)) => *cached == wanted,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{Invalidation, QueryCache, QueryKey};
    use crate::api::ListingId;
    use crate::api::models::test_support::listing;
    use crate::filter::ListingFilter;

    fn id(value: u64) -> ListingId {
        ListingId::new(value).expect("id should be valid")
    }

    fn origin_filter(origin: &str) -> ListingFilter {
        ListingFilter {
            origin: Some(origin.to_owned()),
            ..ListingFilter::default()
        }
    }

    #[fixture]
    fn populated() -> QueryCache {
        let cache = QueryCache::new();
        cache.put_list(&ListingFilter::default(), vec![listing(1, "A1", "B1")]);
        cache.put_list(&origin_filter("Tosh"), vec![listing(2, "Toshkent", "B2")]);
        cache.put_cargo(listing(1, "A1", "B1"));
        cache.put_cargo(listing(2, "Toshkent", "B2"));
        cache.put_user_cargos(vec![listing(2, "Toshkent", "B2")]);
        cache
    }

    #[rstest]
    fn lists_are_keyed_by_filter(populated: QueryCache) {
        let tosh = populated
            .list(&origin_filter("Tosh"))
            .expect("filtered list should be cached");
        assert_eq!(tosh.len(), 1);
        assert!(populated.list(&origin_filter("Xiva")).is_none());
    }

    #[rstest]
    fn create_invalidates_lists_and_user_cargos(populated: QueryCache) {
        populated.invalidate(&[Invalidation::CargoLists, Invalidation::UserCargos]);

        assert!(populated.list(&ListingFilter::default()).is_none());
        assert!(populated.list(&origin_filter("Tosh")).is_none());
        assert!(populated.user_cargos().is_none());
        assert!(populated.contains(&QueryKey::Cargo(id(1))));
        assert!(populated.contains(&QueryKey::Cargo(id(2))));
    }

    #[rstest]
    fn comment_invalidates_only_that_cargo(populated: QueryCache) {
        populated.invalidate(&[Invalidation::Cargo(id(2))]);

        assert!(populated.cargo(id(2)).is_none());
        assert!(populated.cargo(id(1)).is_some());
        assert!(populated.user_cargos().is_some());
        assert!(populated.list(&ListingFilter::default()).is_some());
    }
}
