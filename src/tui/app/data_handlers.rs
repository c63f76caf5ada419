//! Refresh and detail loading handlers.
//!
//! Loads run through [`crate::services::CargoService`], which reports
//! failures as toasts and hands back an empty result; the handlers pick the
//! newest toast up for the status bar.

use std::any::Any;

use bubbletea_rs::Cmd;

use super::home_handlers::{carousel_timer_cmd, combine};
use super::{FEATURED_SLIDES, MarketApp, ViewMode};
use crate::api::{Listing, ListingId};
use crate::filter::ListingFilter;
use crate::tui::messages::AppMsg;

impl MarketApp {
    /// Dispatches data loading messages to their handlers.
    pub(super) fn handle_data_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::RefreshRequested => self.handle_refresh_requested(),
            AppMsg::ListingsLoaded(listings) => self.handle_listings_loaded(listings),
            AppMsg::DetailLoaded(listing) => {
                self.handle_detail_loaded(listing.as_ref());
                None
            }
            _ => None,
        }
    }

    /// Reloads the listing collection unless a reload is already running.
    fn handle_refresh_requested(&mut self) -> Option<Cmd> {
        if self.loading {
            return None;
        }
        let services = self.services.clone()?;
        self.loading = true;
        Some(Box::pin(async move {
            let listings = services.cargo().list(&ListingFilter::default()).await;
            Some(Box::new(AppMsg::ListingsLoaded(listings)) as Box<dyn Any + Send>)
        }))
    }

    /// Replaces the collection, keeping the cursor in range and restarting
    /// the home screen animations for the new data.
    fn handle_listings_loaded(&mut self, listings: &[Listing]) -> Option<Cmd> {
        self.loading = false;
        self.listings = listings.to_vec();
        self.rebuild_filter_cache();
        let visible_height = self.listing_list.visible_height();
        self.list_state.ensure_cursor_visible(visible_height);
        self.absorb_notifications();

        let carousel = self
            .carousel
            .set_count(self.listings.len().min(FEATURED_SLIDES))
            .map(carousel_timer_cmd);
        self.rebuild_counters();
        let counters = if self.view_mode == ViewMode::Home {
            self.start_counters()
        } else {
            None
        };
        combine(carousel, counters)
    }

    fn handle_detail_loaded(&mut self, listing: Option<&Listing>) {
        self.absorb_notifications();
        let Some(fresh) = listing else {
            return;
        };
        if self.detail.as_ref().is_some_and(|shown| shown.id == fresh.id) {
            self.detail = Some(fresh.clone());
        }
    }

    /// Fetches the full listing, reviews included.
    pub(super) fn load_detail(&self, id: ListingId) -> Option<Cmd> {
        let services = self.services.clone()?;
        Some(Box::pin(async move {
            let listing = services.cargo().detail(id).await;
            Some(Box::new(AppMsg::DetailLoaded(listing)) as Box<dyn Any + Send>)
        }))
    }

    /// Moves the newest toast into the status bar and drops the rest.
    pub(super) fn absorb_notifications(&mut self) {
        let Some(services) = &self.services else {
            return;
        };
        if let Some(latest) = services.notifications().drain().pop() {
            self.status = Some(latest);
        }
    }
}
