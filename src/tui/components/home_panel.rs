//! Home screen component: the featured-cargo carousel and headline
//! statistics.

use crate::api::Listing;

use super::text_truncate::truncate_to_display_width_with_ellipsis;

/// One headline number on the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistic {
    /// Caption shown under the number.
    pub label: &'static str,
    /// Number as currently animated.
    pub value: String,
}

/// Context for rendering the home screen.
#[derive(Debug, Clone)]
pub struct HomePanelViewContext<'a> {
    /// Listing on the current slide.
    pub slide: Option<&'a Listing>,
    /// Index of the current slide.
    pub slide_index: usize,
    /// Number of slides.
    pub slide_count: usize,
    /// Whether auto-advance is held by the user.
    pub held: bool,
    /// Headline statistics.
    pub statistics: &'a [Statistic],
    /// Maximum width in columns.
    pub max_width: usize,
}

/// Component for the home screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomePanelComponent;

impl HomePanelComponent {
    /// Creates a new home panel component.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the carousel slide, its position dots and the statistics.
    #[must_use]
    pub fn view(self, ctx: &HomePanelViewContext<'_>) -> String {
        let mut lines = vec!["Featured cargo".to_owned()];
        match ctx.slide {
            Some(listing) => {
                lines.push(format!("  {}", listing.name));
                lines.push(format!("  {} -> {}", listing.origin, listing.destination));
                lines.push(format!(
                    "  {} t, {}, {}",
                    listing.weight,
                    listing.vehicle_type,
                    listing.price_label()
                ));
            }
            None => lines.push("  No cargos posted yet.".to_owned()),
        }
        if ctx.slide_count > 1 {
            let hold = if ctx.held { "  (held)" } else { "" };
            lines.push(format!("  {}{hold}", slide_dots(ctx.slide_index, ctx.slide_count)));
        }
        lines.push(String::new());
        lines.extend(
            ctx.statistics
                .iter()
                .map(|statistic| format!("  {:>14}  {}", statistic.value, statistic.label)),
        );

        lines.iter().fold(String::new(), |mut rendered, line| {
            rendered.push_str(&truncate_to_display_width_with_ellipsis(line, ctx.max_width));
            rendered.push('\n');
            rendered
        })
    }
}

fn slide_dots(index: usize, count: usize) -> String {
    (0..count)
        .map(|position| if position == index { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{HomePanelComponent, HomePanelViewContext, Statistic};
    use crate::api::models::test_support::listing;

    #[rstest]
    fn renders_slide_dots_and_statistics() {
        let featured = listing(3, "Buxoro", "Xiva");
        let statistics = [Statistic {
            label: "cargos posted",
            value: "1,204".to_owned(),
        }];

        let view = HomePanelComponent::new().view(&HomePanelViewContext {
            slide: Some(&featured),
            slide_index: 1,
            slide_count: 3,
            held: true,
            statistics: &statistics,
            max_width: 80,
        });

        assert!(view.contains("Buxoro -> Xiva"));
        assert!(view.contains("○ ● ○  (held)"));
        assert!(view.contains("1,204  cargos posted"));
    }

    #[rstest]
    fn empty_carousel_shows_placeholder_without_dots() {
        let view = HomePanelComponent::new().view(&HomePanelViewContext {
            slide: None,
            slide_index: 0,
            slide_count: 0,
            held: false,
            statistics: &[],
            max_width: 80,
        });

        assert!(view.contains("No cargos posted yet."));
        assert!(!view.contains('●'));
    }
}
