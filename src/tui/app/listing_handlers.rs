//! Cursor movement and filter handlers for the listing screen.
//!
//! The filter only ever narrows the loaded collection; changing it never
//! issues a request.

use bubbletea_rs::Cmd;

use super::{MarketApp, ViewMode};
use crate::filter::ListingFilter;
use crate::tui::messages::AppMsg;
use crate::tui::state::FilterDraft;

impl MarketApp {
    /// Dispatches navigation messages to their handlers.
    pub(super) fn handle_navigation_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        let max_index = self.filtered_count().saturating_sub(1);
        match msg {
            AppMsg::CursorUp => self.list_state.cursor_up(),
            AppMsg::CursorDown => self.list_state.cursor_down(max_index),
            AppMsg::Home => self.list_state.home(),
            AppMsg::End => self.list_state.end(max_index),
            _ => return None,
        }
        let visible_height = self.listing_list.visible_height();
        self.list_state.ensure_cursor_visible(visible_height);
        None
    }

    /// Dispatches filter messages to their handlers.
    pub(super) fn handle_filter_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::CycleVehicleType => {
                let filter = ListingFilter {
                    vehicle_type: self.list_state.filter.vehicle_type.cycle_next(),
                    ..self.list_state.filter.clone()
                };
                self.apply_filter(filter);
            }
            AppMsg::BeginFilterEdit => {
                self.draft = Some(FilterDraft::from_filter(&self.list_state.filter));
            }
            AppMsg::FilterInput(ch) => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.push(*ch);
                }
            }
            AppMsg::FilterBackspace => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.backspace();
                }
            }
            AppMsg::FilterSwitchField => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.switch_field();
                }
            }
            AppMsg::FilterCommit => {
                if let Some(draft) = self.draft.take() {
                    let filter = draft.apply_to(&self.list_state.filter);
                    self.apply_filter(filter);
                }
            }
            AppMsg::ClearFilter => self.apply_filter(ListingFilter::default()),
            _ => {}
        }
        None
    }

    /// Opens the detail screen for the listing under the cursor, or on the
    /// current slide when on the home screen.
    pub(super) fn handle_open_selected(&mut self) -> Option<Cmd> {
        let chosen = match self.view_mode {
            ViewMode::Home => self.featured_listing(),
            ViewMode::Listings => self.selected_listing(),
            ViewMode::Detail => None,
        }
        .cloned()?;
        let id = chosen.id;
        self.return_view = self.view_mode;
        self.detail = Some(chosen);
        self.set_view(ViewMode::Detail);
        self.load_detail(id)
    }

    fn apply_filter(&mut self, filter: ListingFilter) {
        self.list_state.filter = filter;
        self.rebuild_filter_cache();
        let visible_height = self.listing_list.visible_height();
        self.list_state.ensure_cursor_visible(visible_height);
    }
}
