//! Draft of the text criteria while the user is typing them.

use crate::filter::ListingFilter;

/// Text criterion currently receiving input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    /// Origin substring.
    Origin,
    /// Destination substring.
    Destination,
}

/// Origin and destination text being edited. Nothing is applied until the
/// draft is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDraft {
    field: DraftField,
    origin: String,
    destination: String,
}

impl FilterDraft {
    /// Starts a draft from the criteria currently applied.
    #[must_use]
    pub fn from_filter(filter: &ListingFilter) -> Self {
        Self {
            field: DraftField::Origin,
            origin: filter.origin.clone().unwrap_or_default(),
            destination: filter.destination.clone().unwrap_or_default(),
        }
    }

    /// Field receiving input.
    #[must_use]
    pub const fn field(&self) -> DraftField {
        self.field
    }

    /// Text typed for `field`.
    #[must_use]
    pub fn text(&self, field: DraftField) -> &str {
        match field {
            DraftField::Origin => &self.origin,
            DraftField::Destination => &self.destination,
        }
    }

    /// Appends a character to the active field.
    pub fn push(&mut self, ch: char) {
        self.active_mut().push(ch);
    }

    /// Removes the last character of the active field.
    pub fn backspace(&mut self) {
        self.active_mut().pop();
    }

    /// Moves input to the other field.
    pub const fn switch_field(&mut self) {
        self.field = match self.field {
            DraftField::Origin => DraftField::Destination,
            DraftField::Destination => DraftField::Origin,
        };
    }

    /// Returns `filter` with the drafted text criteria. Blank text clears
    /// the criterion.
    #[must_use]
    pub fn apply_to(&self, filter: &ListingFilter) -> ListingFilter {
        ListingFilter {
            origin: non_blank(&self.origin),
            destination: non_blank(&self.destination),
            ..filter.clone()
        }
    }

    fn active_mut(&mut self) -> &mut String {
        match self.field {
            DraftField::Origin => &mut self.origin,
            DraftField::Destination => &mut self.destination,
        }
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
