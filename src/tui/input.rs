//! Input handling for the TUI application.
//!
//! This module provides key-to-message mapping for translating terminal key
//! events into application messages. The mapping depends on which screen is
//! active.

use crossterm::event::KeyCode;

use super::messages::AppMsg;

/// Screen the key arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// Home screen with the carousel and statistics.
    Home,
    /// Listing screen.
    Listings,
    /// Listing screen while typing text criteria.
    FilterEditing,
    /// Listing detail screen.
    Detail,
}

/// Maps a key event to an application message for `context`.
///
/// Returns `None` for unrecognised key events, allowing them to be ignored.
#[must_use]
#[expect(
    clippy::missing_const_for_fn,
    reason = "KeyCode match patterns prevent const evaluation"
)]
pub fn map_key_to_message_with_context(
    key: &bubbletea_rs::event::KeyMsg,
    context: InputContext,
) -> Option<AppMsg> {
    use InputContext::{Detail, FilterEditing, Home, Listings};

    match (context, key.key) {
        (FilterEditing, KeyCode::Enter) => Some(AppMsg::FilterCommit),
        (FilterEditing, KeyCode::Esc) => Some(AppMsg::Back),
        (FilterEditing, KeyCode::Tab) => Some(AppMsg::FilterSwitchField),
        (FilterEditing, KeyCode::Backspace) => Some(AppMsg::FilterBackspace),
        (FilterEditing, KeyCode::Char(ch)) => Some(AppMsg::FilterInput(ch)),
        (FilterEditing, _) => None,

        (Home, KeyCode::Char('l') | KeyCode::Right) => Some(AppMsg::NextSlide),
        (Home, KeyCode::Char('h') | KeyCode::Left) => Some(AppMsg::PreviousSlide),
        (Home, KeyCode::Char(' ')) => Some(AppMsg::ToggleHold),
        (Home, KeyCode::Enter) => Some(AppMsg::OpenSelected),
        (Home, KeyCode::Tab) => Some(AppMsg::ShowListings),

        (Listings, KeyCode::Char('j') | KeyCode::Down) => Some(AppMsg::CursorDown),
        (Listings, KeyCode::Char('k') | KeyCode::Up) => Some(AppMsg::CursorUp),
        (Listings, KeyCode::Home | KeyCode::Char('g')) => Some(AppMsg::Home),
        (Listings, KeyCode::End | KeyCode::Char('G')) => Some(AppMsg::End),
        (Listings, KeyCode::Char('v')) => Some(AppMsg::CycleVehicleType),
        (Listings, KeyCode::Char('/')) => Some(AppMsg::BeginFilterEdit),
        (Listings, KeyCode::Char('x')) => Some(AppMsg::ClearFilter),
        (Listings, KeyCode::Enter) => Some(AppMsg::OpenSelected),
        (Listings, KeyCode::Tab | KeyCode::Esc) => Some(AppMsg::ShowHome),

        (Detail, KeyCode::Esc | KeyCode::Backspace) => Some(AppMsg::Back),

        (_, KeyCode::Char('q')) => Some(AppMsg::Quit),
        (_, KeyCode::Char('?')) => Some(AppMsg::ToggleHelp),
        (_, KeyCode::Char('r')) => Some(AppMsg::RefreshRequested),
        (_, KeyCode::Char('1')) => Some(AppMsg::ShowHome),
        (_, KeyCode::Char('2')) => Some(AppMsg::ShowListings),
        _ => None,
    }
}
