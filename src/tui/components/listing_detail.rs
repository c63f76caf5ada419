//! Listing detail component for rendering one cargo with its reviews.

use crate::api::{Listing, Party, Review};

use super::text_truncate::{truncate_to_display_width_with_ellipsis, truncate_to_height};

/// Placeholder message when no listing is selected.
const NO_SELECTION_PLACEHOLDER: &str = "(No cargo selected)";

/// Context for rendering the listing detail view.
#[derive(Debug, Clone)]
pub struct ListingDetailViewContext<'a> {
    /// The listing to display, if any.
    pub listing: Option<&'a Listing>,
    /// Maximum width in columns.
    pub max_width: usize,
    /// Maximum height in lines (0 = unlimited).
    pub max_height: usize,
}

/// Component for displaying a single listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingDetailComponent;

impl ListingDetailComponent {
    /// Creates a new listing detail component.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the listing fields followed by its reviews.
    #[must_use]
    pub fn view(self, ctx: &ListingDetailViewContext<'_>) -> String {
        let Some(listing) = ctx.listing else {
            return format!("{NO_SELECTION_PLACEHOLDER}\n");
        };

        let mut lines = vec![
            "-".repeat(ctx.max_width.min(80)),
            format!("#{} {}", listing.id, listing.name),
            format!("Route:    {} -> {}", listing.origin, listing.destination),
            format!("Weight:   {} t", listing.weight),
            format!("Truck:    {}", listing.vehicle_type),
            format!("Price:    {}", listing.price_label()),
            format!("Status:   {}", listing.status),
            format!("Posted:   {}", listing.created_at.format("%Y-%m-%d %H:%M")),
        ];
        if let Some(customer) = &listing.customer {
            lines.push(party_line("Customer", customer));
        }
        if let Some(carrier) = &listing.carrier {
            lines.push(party_line("Carrier", carrier));
        }
        if let Some(description) = listing
            .description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
        {
            lines.push(String::new());
            lines.extend(description.lines().map(str::to_owned));
        }
        lines.push(String::new());
        lines.extend(review_lines(&listing.reviews));

        let mut output = lines.iter().fold(String::new(), |mut rendered, line| {
            rendered.push_str(&truncate_to_display_width_with_ellipsis(line, ctx.max_width));
            rendered.push('\n');
            rendered
        });
        truncate_to_height(&mut output, ctx.max_height);
        output
    }
}

fn party_line(label: &str, party: &Party) -> String {
    format!("{label}: {} ({})", party.name, party.phone_number)
}

fn review_lines(reviews: &[Review]) -> Vec<String> {
    if reviews.is_empty() {
        return vec!["No reviews yet.".to_owned()];
    }
    let mut lines = vec![format!("Reviews ({}):", reviews.len())];
    lines.extend(reviews.iter().map(|review| {
        let stars = "*".repeat(usize::from(review.rating.min(5)));
        format!("  [{stars:<5}] {}", review.comment.trim())
    }));
    lines
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::{ListingDetailComponent, ListingDetailViewContext};
    use crate::api::models::test_support::priced_listing;
    use crate::api::{Listing, Party, Review};

    fn render(listing: Option<&Listing>, max_height: usize) -> String {
        ListingDetailComponent::new().view(&ListingDetailViewContext {
            listing,
            max_width: 80,
            max_height,
        })
    }

    #[rstest]
    fn placeholder_without_listing() {
        assert_eq!(render(None, 0), "(No cargo selected)\n");
    }

    #[rstest]
    fn renders_fields_parties_and_reviews() {
        let listing = Listing {
            carrier: Some(Party {
                id: 4,
                name: "Bekzod".to_owned(),
                phone_number: "+998907654321".to_owned(),
                email: "bekzod@example.com".to_owned(),
            }),
            reviews: vec![Review {
                id: 1,
                rating: 4,
                comment: "On time".to_owned(),
                created_at: Utc::now(),
            }],
            ..priced_listing(2, 900_000.0)
        };

        let view = render(Some(&listing), 0);

        assert!(view.contains("Route:    Toshkent -> Samarqand"));
        assert!(view.contains("Price:    900000 so'm"));
        assert!(view.contains("Carrier: Bekzod (+998907654321)"));
        assert!(view.contains("Reviews (1):"));
        assert!(view.contains("[**** ] On time"));
    }

    #[rstest]
    fn listing_without_reviews_says_so() {
        let listing = priced_listing(2, 900_000.0);

        assert!(render(Some(&listing), 0).contains("No reviews yet."));
    }

    #[rstest]
    fn output_respects_max_height() {
        let listing = priced_listing(2, 900_000.0);

        let view = render(Some(&listing), 4);

        assert_eq!(view.lines().count(), 4);
        assert!(view.ends_with("...\n"));
    }
}
