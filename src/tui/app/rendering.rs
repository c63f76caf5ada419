//! Rendering logic for the listing browser.
//!
//! These are pure query methods that read state without modification.

use super::{MarketApp, ViewMode};
use crate::tui::components::text_truncate::fit_to_width;
use crate::tui::components::{
    HomePanelViewContext, ListingDetailViewContext, ListingListViewContext, Statistic,
};
use crate::tui::state::DraftField;

/// Rows used by the header, the filter bar and the status bar.
const CHROME_HEIGHT: usize = 3;

impl MarketApp {
    /// Renders the screen on display.
    pub(super) fn render_body(&self) -> String {
        let max_width = usize::from(self.width).max(1);
        match self.view_mode {
            ViewMode::Home => {
                let statistics: Vec<Statistic> = self
                    .counters
                    .iter()
                    .map(|(label, counter)| Statistic {
                        label: *label,
                        value: counter.render(),
                    })
                    .collect();
                self.home_panel.view(&HomePanelViewContext {
                    slide: self.featured_listing(),
                    slide_index: self.carousel.index(),
                    slide_count: self.carousel.count(),
                    held: self.held,
                    statistics: &statistics,
                    max_width,
                })
            }
            ViewMode::Listings => {
                let rows = self.filtered_listings();
                self.listing_list.view(&ListingListViewContext {
                    listings: &rows,
                    cursor_position: self.list_state.cursor_position,
                    scroll_offset: self.list_state.scroll_offset,
                    visible_height: self.calculate_list_height(),
                    max_width,
                })
            }
            ViewMode::Detail => self.listing_detail.view(&ListingDetailViewContext {
                listing: self.detail.as_ref(),
                max_width,
                max_height: self.calculate_list_height(),
            }),
        }
    }

    /// Renders the header bar.
    pub(super) fn render_header(&self) -> String {
        let title = match self.view_mode {
            ViewMode::Home => "Yukchi - Home",
            ViewMode::Listings => "Yukchi - Cargos",
            ViewMode::Detail => "Yukchi - Cargo detail",
        };
        let busy = self.loading
            || self
                .services
                .as_ref()
                .is_some_and(|services| services.loading().is_loading());
        let loading_indicator = if busy { " [Loading...]" } else { "" };
        format!("{title}{loading_indicator}\n")
    }

    /// Renders the filter bar, or the draft while the user is typing.
    pub(super) fn render_filter_bar(&self) -> String {
        if let Some(draft) = &self.draft {
            let marker = |field: DraftField| if draft.field() == field { "*" } else { " " };
            return format!(
                "{}From: {}_  {}To: {}_\n",
                marker(DraftField::Origin),
                draft.text(DraftField::Origin),
                marker(DraftField::Destination),
                draft.text(DraftField::Destination),
            );
        }
        if self.view_mode != ViewMode::Listings {
            return "\n".to_owned();
        }
        format!(
            "Filter: {} ({}/{})\n",
            self.list_state.filter.describe(),
            self.filtered_count(),
            self.listings.len()
        )
    }

    /// Renders the status bar: the latest toast or key hints.
    pub(super) fn render_status_bar(&self) -> String {
        if let Some(toast) = &self.status {
            return format!("{toast}\n");
        }
        let hints = if self.draft.is_some() {
            "type to filter  Tab:switch field  Enter:apply  Esc:cancel"
        } else {
            match self.view_mode {
                ViewMode::Home => "h/l:slides  space:hold  Enter:open  Tab:cargos  ?:help  q:quit",
                ViewMode::Listings => {
                    "j/k:move  Enter:open  v:truck  /:route  x:clear  r:refresh  ?:help  q:quit"
                }
                ViewMode::Detail => "Esc:back  r:refresh  ?:help  q:quit",
            }
        };
        format!("{hints}\n")
    }

    /// Renders the help overlay if visible.
    pub(super) fn render_help_overlay(&self) -> String {
        if !self.show_help {
            return String::new();
        }

        let help_text = r"
=== Keyboard Shortcuts ===

Screens:
  1          Home
  2, Tab     Cargos
  Enter      Open the selected cargo
  Esc        Back

Home:
  h, Left    Previous featured cargo
  l, Right   Next featured cargo
  Space      Hold or release the carousel

Cargos:
  j, Down    Move cursor down
  k, Up      Move cursor up
  Home, g    Go to first item
  End, G     Go to last item
  v          Cycle truck type
  /          Filter by origin and destination
  x          Clear filters

Other:
  r          Refresh from the marketplace
  ?          Toggle this help
  q          Quit

Press any key to close this help.
";
        let mut output = String::new();
        for line in help_text.lines() {
            output.push_str(line);
            output.push('\n');
        }
        output
    }

    /// Rows available to the body.
    pub(super) fn calculate_list_height(&self) -> usize {
        usize::from(self.height).saturating_sub(CHROME_HEIGHT).max(1)
    }

    /// Pads or clips every row to the terminal so stale cells from earlier
    /// frames are overwritten.
    pub(super) fn normalise_viewport(&self, output: &str) -> String {
        let safe_width = usize::from(self.width).saturating_sub(1).max(1);
        let height = usize::from(self.height).max(1);

        let mut lines: Vec<String> = output
            .lines()
            .take(height)
            .map(|line| fit_to_width(line, safe_width))
            .collect();
        while lines.len() < height {
            lines.push(" ".repeat(safe_width));
        }
        lines.join("\n")
    }
}
