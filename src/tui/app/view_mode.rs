//! Screens of the listing browser.

/// Screen on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Featured-cargo carousel and headline statistics.
    #[default]
    Home,
    /// Filterable listing table.
    Listings,
    /// One listing with its reviews.
    Detail,
}
