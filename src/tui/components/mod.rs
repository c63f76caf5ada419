//! UI components for the listing browser.
//!
//! Each component renders from a borrowed view context and keeps no data of
//! its own beyond layout settings.

mod home_panel;
mod listing_detail;
mod listing_list;
pub(crate) mod text_truncate;

pub use home_panel::{HomePanelComponent, HomePanelViewContext, Statistic};
pub use listing_detail::{ListingDetailComponent, ListingDetailViewContext};
pub use listing_list::{ListingListComponent, ListingListViewContext};
