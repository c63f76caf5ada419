//! Startup context storage for the listing browser.
//!
//! bubbletea-rs builds the model through the static `Model::init()`, so the
//! services and first page of listings are handed over through `OnceLock`
//! slots set by the CLI wiring right before the program starts.

use std::sync::OnceLock;

use crossterm::terminal;

use crate::api::Listing;
use crate::filter::ListingFilter;
use crate::services::AppServices;

/// Startup data for [`super::MarketApp`].
#[derive(Debug, Clone)]
pub struct TuiBootstrap {
    /// Services the browser calls into.
    pub services: AppServices,
    /// Listings loaded before the program started.
    pub listings: Vec<Listing>,
    /// Filter configured on the command line.
    pub filter: ListingFilter,
}

/// Global storage for startup data.
///
/// This is set before the TUI program starts and read by `MarketApp::init()`.
static BOOTSTRAP: OnceLock<TuiBootstrap> = OnceLock::new();

/// Global storage for initial terminal dimensions.
///
/// This is set before the TUI program starts and read by `MarketApp::init()`
/// so the first frame uses the actual terminal size.
static INITIAL_TERMINAL_SIZE: OnceLock<(u16, u16)> = OnceLock::new();

/// Stores the startup data for the TUI application.
///
/// # Returns
///
/// `true` if the data was set, `false` if it was already set.
pub fn set_bootstrap(bootstrap: TuiBootstrap) -> bool {
    BOOTSTRAP.set(bootstrap).is_ok()
}

/// Sets the initial terminal dimensions for the TUI application.
///
/// # Returns
///
/// `true` if the dimensions were set, `false` if they were already set.
pub fn set_initial_terminal_size(width: u16, height: u16) -> bool {
    INITIAL_TERMINAL_SIZE.set((width, height)).is_ok()
}

/// Clones the startup data, if any was stored.
pub(crate) fn bootstrap() -> Option<TuiBootstrap> {
    BOOTSTRAP.get().cloned()
}

/// Gets the initial terminal dimensions from storage.
///
/// Returns the stored dimensions, the live terminal size, or 80x24 in that
/// order of preference.
pub(crate) fn initial_terminal_size() -> (u16, u16) {
    const DEFAULT_WIDTH: u16 = 80;
    const DEFAULT_HEIGHT: u16 = 24;

    INITIAL_TERMINAL_SIZE
        .get()
        .copied()
        .filter(|(width, height)| *width > 0 && *height > 0)
        .or_else(|| {
            terminal::size()
                .ok()
                .filter(|(width, height)| *width > 0 && *height > 0)
        })
        .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT))
}
