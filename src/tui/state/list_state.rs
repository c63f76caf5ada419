//! Filter and cursor state for the listing view.
//!
//! The cursor position is retained when the filter changes and only clamped
//! when the filtered list becomes shorter.

use crate::filter::ListingFilter;

/// Active filter plus the cursor within the filtered listings.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Criteria applied to the loaded listings.
    pub filter: ListingFilter,
    /// Current cursor position (0-indexed) within the filtered list.
    pub cursor_position: usize,
    /// Scroll offset for virtual scrolling (lines scrolled from top).
    pub scroll_offset: usize,
}

impl ListState {
    /// Creates state with the given starting filter.
    #[must_use]
    pub fn new(filter: ListingFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Replaces the filter and clamps the cursor to the new list length.
    pub fn set_filter(&mut self, filter: ListingFilter, new_count: usize) {
        self.filter = filter;
        self.clamp_cursor(new_count);
    }

    /// Clamps the cursor position to be within the valid range.
    ///
    /// If the list is empty, cursor is set to 0. If cursor exceeds the list
    /// length, it is set to the last valid index.
    pub const fn clamp_cursor(&mut self, count: usize) {
        if count == 0 {
            self.cursor_position = 0;
            self.scroll_offset = 0;
        } else if self.cursor_position >= count {
            self.cursor_position = count.saturating_sub(1);
        }
    }

    /// Moves the cursor up by one position if possible.
    pub const fn cursor_up(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    /// Moves the cursor down by one position if within bounds.
    pub const fn cursor_down(&mut self, max_index: usize) {
        if self.cursor_position < max_index {
            self.cursor_position = self.cursor_position.saturating_add(1);
        }
    }

    /// Moves the cursor to the first item.
    pub const fn home(&mut self) {
        self.cursor_position = 0;
        self.scroll_offset = 0;
    }

    /// Moves the cursor to the last item.
    pub const fn end(&mut self, max_index: usize) {
        self.cursor_position = max_index;
    }

    /// Adjusts the scroll offset so the cursor stays within `visible_height`
    /// rows.
    pub const fn ensure_cursor_visible(&mut self, visible_height: usize) {
        if self.cursor_position < self.scroll_offset {
            self.scroll_offset = self.cursor_position;
            return;
        }
        let viewport_end = self.scroll_offset.saturating_add(visible_height);
        if self.cursor_position >= viewport_end {
            self.scroll_offset = self
                .cursor_position
                .saturating_sub(visible_height.saturating_sub(1));
        }
    }
}
