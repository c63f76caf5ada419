//! Listing list component for displaying filtered cargos.
//!
//! This component renders a scrollable list of listings with cursor
//! highlighting and the route, weight, truck type and price of each.

use crate::api::Listing;

use super::text_truncate::{fit_to_width, truncate_to_display_width_with_ellipsis};

/// Default visible height for the listing list component.
const DEFAULT_VISIBLE_HEIGHT: usize = 20;

/// Column width of the route in each row.
const ROUTE_WIDTH: usize = 32;

/// Context for rendering the listing list view.
#[derive(Debug, Clone)]
pub struct ListingListViewContext<'a> {
    /// Listings matching the current filter, in display order.
    pub listings: &'a [&'a Listing],
    /// Current cursor position (0-indexed).
    pub cursor_position: usize,
    /// Number of rows scrolled from top.
    pub scroll_offset: usize,
    /// Maximum visible height in rows.
    pub visible_height: usize,
    /// Maximum width in columns.
    pub max_width: usize,
}

/// Component for displaying a list of listings.
#[derive(Debug, Clone)]
pub struct ListingListComponent {
    visible_height: usize,
}

impl Default for ListingListComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingListComponent {
    /// Creates a new listing list component.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            visible_height: DEFAULT_VISIBLE_HEIGHT,
        }
    }

    /// Updates the visible height for scrolling calculations.
    pub const fn set_visible_height(&mut self, height: usize) {
        self.visible_height = height;
    }

    /// Returns the visible height.
    #[must_use]
    pub const fn visible_height(&self) -> usize {
        self.visible_height
    }

    /// Renders the rows within the visible window.
    #[must_use]
    pub fn view(&self, ctx: &ListingListViewContext<'_>) -> String {
        if ctx.listings.is_empty() {
            return "  No cargos match the current filter.\n".to_owned();
        }

        let visible_height = if ctx.visible_height > 0 {
            ctx.visible_height
        } else {
            self.visible_height
        };

        let mut output = String::new();
        for (display_index, listing) in ctx
            .listings
            .iter()
            .enumerate()
            .skip(ctx.scroll_offset)
            .take(visible_height)
        {
            let prefix = if display_index == ctx.cursor_position {
                ">"
            } else {
                " "
            };
            let line = format_listing_line(listing, prefix);
            output.push_str(&truncate_to_display_width_with_ellipsis(&line, ctx.max_width));
            output.push('\n');
        }
        output
    }
}

fn format_listing_line(listing: &Listing, prefix: &str) -> String {
    let route = fit_to_width(
        &format!("{} -> {}", listing.origin, listing.destination),
        ROUTE_WIDTH,
    );
    format!(
        "{prefix} #{id:<5} {route} {weight:>6} t  {vehicle:<12} {price}",
        id = listing.id.get(),
        weight = listing.weight,
        vehicle = listing.vehicle_type.as_str(),
        price = listing.price_label(),
    )
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{ListingListComponent, ListingListViewContext};
    use crate::api::Listing;
    use crate::api::models::test_support::{listing, priced_listing};

    #[fixture]
    fn listings() -> Vec<Listing> {
        vec![
            listing(1, "Toshkent", "Samarqand"),
            priced_listing(2, 1_500_000.0),
            listing(3, "Buxoro", "Xiva"),
        ]
    }

    fn context<'a>(
        rows: &'a [&'a Listing],
        cursor: usize,
        offset: usize,
    ) -> ListingListViewContext<'a> {
        ListingListViewContext {
            listings: rows,
            cursor_position: cursor,
            scroll_offset: offset,
            visible_height: 2,
            max_width: 120,
        }
    }

    #[rstest]
    fn empty_list_shows_placeholder() {
        let view = ListingListComponent::new().view(&context(&[], 0, 0));

        assert!(view.contains("No cargos match"));
    }

    #[rstest]
    fn cursor_row_is_marked(listings: Vec<Listing>) {
        let rows: Vec<&Listing> = listings.iter().collect();

        let view = ListingListComponent::new().view(&context(&rows, 1, 0));
        let lines: Vec<&str> = view.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines.first().is_some_and(|line| line.starts_with("  #1")));
        assert!(lines.get(1).is_some_and(|line| line.starts_with("> #2")));
        assert!(view.contains("1500000 so'm"));
        assert!(view.contains("negotiable"));
    }

    #[rstest]
    fn scroll_offset_skips_rows(listings: Vec<Listing>) {
        let rows: Vec<&Listing> = listings.iter().collect();

        let view = ListingListComponent::new().view(&context(&rows, 2, 1));

        assert!(!view.contains("#1 "));
        assert!(view.contains("Buxoro -> Xiva"));
    }
}
