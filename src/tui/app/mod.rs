//! Main TUI application model implementing the MVU pattern.
//!
//! This module provides the core application state and update logic for the
//! listing browser. It coordinates the components, the home screen
//! animations and the async calls into the application services.
//!
//! # Module Structure
//!
//! - `home_handlers`: Carousel and statistic counter timers
//! - `listing_handlers`: Cursor movement and filter changes
//! - `data_handlers`: Refresh and detail loading
//! - `rendering`: View rendering methods for terminal output
//! - `model_impl`: The bubbletea-rs `Model` implementation

use bubbletea_rs::Cmd;

use crate::api::Listing;
use crate::filter::ListingFilter;
use crate::presentation::{Carousel, CountUp, DEFAULT_SLIDE_INTERVAL};
use crate::services::{AppServices, Route, Toast};

use super::components::{HomePanelComponent, ListingDetailComponent, ListingListComponent};
use super::messages::AppMsg;
use super::state::{FilterDraft, ListState};

mod data_handlers;
mod home_handlers;
mod listing_handlers;
mod model_impl;
mod rendering;
mod view_mode;

pub use view_mode::ViewMode;

/// Number of listings featured in the home carousel.
pub const FEATURED_SLIDES: usize = 5;

/// Main application model for the listing browser.
#[derive(Debug)]
pub struct MarketApp {
    /// Services backing data loads; absent in offline use.
    services: Option<AppServices>,
    /// All loaded listings (unfiltered).
    pub(crate) listings: Vec<Listing>,
    /// Cached indices of listings matching the current filter.
    filtered_indices: Vec<usize>,
    /// Filter and cursor state.
    pub(crate) list_state: ListState,
    /// Text criteria being typed, if the user is editing them.
    pub(crate) draft: Option<FilterDraft>,
    /// Screen on display.
    pub(crate) view_mode: ViewMode,
    /// Screen to return to from the detail screen.
    return_view: ViewMode,
    /// Listing shown on the detail screen.
    pub(crate) detail: Option<Listing>,
    /// Featured-cargo carousel.
    pub(crate) carousel: Carousel,
    /// Whether the user is holding the carousel still.
    pub(crate) held: bool,
    /// Headline counters with their captions.
    pub(crate) counters: Vec<(&'static str, CountUp)>,
    /// Bumped whenever the counters are rebuilt.
    pub(crate) counter_generation: u64,
    /// Whether a refresh is in flight.
    pub(crate) loading: bool,
    /// Latest toast taken from the services.
    pub(crate) status: Option<Toast>,
    /// Terminal dimensions.
    width: u16,
    height: u16,
    /// Whether help overlay is visible.
    pub(crate) show_help: bool,
    listing_list: ListingListComponent,
    listing_detail: ListingDetailComponent,
    home_panel: HomePanelComponent,
}

impl MarketApp {
    /// Creates an application over already loaded listings.
    #[must_use]
    pub fn new(listings: Vec<Listing>, filter: ListingFilter) -> Self {
        let slide_count = listings.len().min(FEATURED_SLIDES);
        let mut app = Self {
            services: None,
            listings,
            filtered_indices: Vec::new(),
            list_state: ListState::new(filter),
            draft: None,
            view_mode: ViewMode::Home,
            return_view: ViewMode::Home,
            detail: None,
            carousel: Carousel::new(slide_count, DEFAULT_SLIDE_INTERVAL),
            held: false,
            counters: Vec::new(),
            counter_generation: 0,
            loading: false,
            status: None,
            width: 80,
            height: 24,
            show_help: false,
            listing_list: ListingListComponent::new(),
            listing_detail: ListingDetailComponent::new(),
            home_panel: HomePanelComponent::new(),
        };
        app.rebuild_filter_cache();
        app.rebuild_counters();
        app
    }

    /// Creates an empty application (for initial loading state).
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), ListingFilter::default())
    }

    /// Attaches the services used for refreshes and detail loads.
    #[must_use]
    pub fn with_services(mut self, services: AppServices) -> Self {
        self.services = Some(services);
        self
    }

    /// Returns the listings matching the current filter.
    #[must_use]
    pub fn filtered_listings(&self) -> Vec<&Listing> {
        self.filtered_indices
            .iter()
            .filter_map(|&index| self.listings.get(index))
            .collect()
    }

    /// Returns the count of filtered listings.
    #[must_use]
    pub const fn filtered_count(&self) -> usize {
        self.filtered_indices.len()
    }

    /// Returns the current cursor position.
    #[must_use]
    pub const fn cursor_position(&self) -> usize {
        self.list_state.cursor_position
    }

    /// Returns the active filter.
    #[must_use]
    pub const fn active_filter(&self) -> &ListingFilter {
        &self.list_state.filter
    }

    /// Returns the screen on display.
    #[must_use]
    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Returns the listing under the cursor, if any.
    #[must_use]
    pub fn selected_listing(&self) -> Option<&Listing> {
        self.filtered_indices
            .get(self.list_state.cursor_position)
            .and_then(|&index| self.listings.get(index))
    }

    /// Returns the listing on the current carousel slide, if any.
    #[must_use]
    pub fn featured_listing(&self) -> Option<&Listing> {
        self.listings.get(self.carousel.index())
    }

    /// Rebuilds the filtered indices cache from the current filter.
    pub(crate) fn rebuild_filter_cache(&mut self) {
        self.filtered_indices = self
            .listings
            .iter()
            .enumerate()
            .filter(|(_, listing)| self.list_state.filter.matches(listing))
            .map(|(index, _)| index)
            .collect();
        self.list_state.clamp_cursor(self.filtered_count());
    }

    /// Handles a message and updates state accordingly.
    ///
    /// Delegates to a handler per message category.
    pub fn handle_message(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if msg.is_navigation() {
            return self.handle_navigation_msg(msg);
        }
        if msg.is_filter() {
            return self.handle_filter_msg(msg);
        }
        if msg.is_home() {
            return self.handle_home_msg(msg);
        }
        if msg.is_data() {
            return self.handle_data_msg(msg);
        }
        self.handle_view_msg(msg)
    }

    fn handle_view_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::ShowHome => self.switch_view(ViewMode::Home),
            AppMsg::ShowListings => self.switch_view(ViewMode::Listings),
            AppMsg::OpenSelected => self.handle_open_selected(),
            AppMsg::Back => self.handle_back(),
            AppMsg::Initialized => self.handle_initialized(),
            AppMsg::Quit => {
                self.shutdown();
                Some(bubbletea_rs::quit())
            }
            AppMsg::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            AppMsg::WindowResized { width, height } => {
                self.handle_resize(*width, *height);
                None
            }
            _ => None,
        }
    }

    fn handle_back(&mut self) -> Option<Cmd> {
        if self.draft.take().is_some() {
            return None;
        }
        if self.view_mode == ViewMode::Detail {
            return self.switch_view(self.return_view);
        }
        None
    }

    pub(crate) fn switch_view(&mut self, target: ViewMode) -> Option<Cmd> {
        self.set_view(target);
        if target == ViewMode::Home {
            return self.start_counters();
        }
        None
    }

    pub(super) fn set_view(&mut self, target: ViewMode) {
        self.draft = None;
        self.view_mode = target;
        let route = match target {
            ViewMode::Home => Route::Home,
            ViewMode::Listings => Route::Cargos,
            ViewMode::Detail => self
                .detail
                .as_ref()
                .map_or(Route::Cargos, |listing| Route::CargoDetail(listing.id)),
        };
        self.record_route(route);
    }

    fn record_route(&self, route: Route) {
        if let Some(services) = &self.services {
            let authenticated = services.session().is_authenticated();
            services.navigator().navigate(route, authenticated);
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.listing_list
            .set_visible_height(self.calculate_list_height());
    }

    /// Cancels timers and releases in-memory service state.
    fn shutdown(&mut self) {
        self.carousel.teardown();
        for (_, counter) in &mut self.counters {
            counter.teardown();
        }
        if let Some(services) = &self.services {
            services.shutdown();
        }
    }
}
