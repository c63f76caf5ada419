//! `Model` trait implementation for the listing browser.
//!
//! This module contains the `bubbletea_rs::Model` trait implementation for
//! `MarketApp`, handling initialisation, update dispatch, and view rendering.

use std::any::Any;

use bubbletea_rs::{Cmd, Model};

use super::{MarketApp, ViewMode};
use crate::tui::input::{InputContext, map_key_to_message_with_context};
use crate::tui::messages::AppMsg;
use crate::tui::storage::{bootstrap, initial_terminal_size};

impl Model for MarketApp {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = match bootstrap() {
            Some(startup) => {
                Self::new(startup.listings, startup.filter).with_services(startup.services)
            }
            None => Self::empty(),
        };
        let (width, height) = initial_terminal_size();
        model.handle_resize(width, height);

        // The carousel and counters are armed when `AppMsg::Initialized`
        // is handled.
        (model, Some(Self::immediate_init_cmd()))
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        if let Some(app_msg) = msg.downcast_ref::<AppMsg>() {
            return self.handle_message(app_msg);
        }

        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            if self.show_help {
                return self.handle_message(&AppMsg::ToggleHelp);
            }
            let context = self.input_context();
            let app_msg = map_key_to_message_with_context(key_msg, context);
            if let Some(mapped) = app_msg {
                return self.handle_message(&mapped);
            }
        }

        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            let resize_msg = AppMsg::WindowResized {
                width: size_msg.width,
                height: size_msg.height,
            };
            return self.handle_message(&resize_msg);
        }

        None
    }

    fn view(&self) -> String {
        if self.show_help {
            return self.normalise_viewport(&self.render_help_overlay());
        }

        let mut output = String::new();
        output.push_str(&self.render_header());
        output.push_str(&self.render_filter_bar());
        output.push_str(&self.render_body());
        if !output.ends_with('\n') {
            output.push('\n');
        }

        // Keep the status bar on the last row.
        let used = output.lines().count();
        let status_row = usize::from(self.height).saturating_sub(1);
        output.push_str(&"\n".repeat(status_row.saturating_sub(used)));
        output.push_str(&self.render_status_bar());

        self.normalise_viewport(&output)
    }
}

impl MarketApp {
    /// Returns the current input context for context-aware key mapping.
    pub(super) const fn input_context(&self) -> InputContext {
        if self.draft.is_some() {
            return InputContext::FilterEditing;
        }
        match self.view_mode {
            ViewMode::Home => InputContext::Home,
            ViewMode::Listings => InputContext::Listings,
            ViewMode::Detail => InputContext::Detail,
        }
    }

    /// Creates a command that reports `AppMsg::Initialized` straight away.
    fn immediate_init_cmd() -> Cmd {
        Box::pin(async { Some(Box::new(AppMsg::Initialized) as Box<dyn Any + Send>) })
    }
}
