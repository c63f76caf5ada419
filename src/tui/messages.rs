//! Message types for the TUI update loop.
//!
//! This module defines all message types that can be sent to the application's
//! update function. Messages represent user actions, async command results,
//! timer fires and system events.

use crate::api::Listing;
use crate::presentation::{FrameRequest, TimerRequest};

/// Messages for the listing browser.
#[derive(Debug, Clone)]
pub enum AppMsg {
    // Navigation
    /// Move cursor up one item.
    CursorUp,
    /// Move cursor down one item.
    CursorDown,
    /// Move cursor to first item.
    Home,
    /// Move cursor to last item.
    End,

    // Views
    /// Switch to the home screen.
    ShowHome,
    /// Switch to the listing screen.
    ShowListings,
    /// Open the listing under the cursor or on the current slide.
    OpenSelected,
    /// Leave the detail screen or cancel filter editing.
    Back,

    // Home screen
    /// Show the next slide.
    NextSlide,
    /// Show the previous slide.
    PreviousSlide,
    /// Toggle holding the carousel still.
    ToggleHold,
    /// A carousel timer fired.
    CarouselTimer(TimerRequest),
    /// An animation frame for the statistic counters fired.
    CounterFrame {
        /// Counter set the frames belong to; older sets are ignored.
        generation: u64,
        /// Frame request per counter index.
        requests: Vec<(usize, FrameRequest)>,
    },

    // Filter changes
    /// Cycle the vehicle type criterion.
    CycleVehicleType,
    /// Start typing origin and destination criteria.
    BeginFilterEdit,
    /// Character typed into the filter draft.
    FilterInput(char),
    /// Delete the last character of the filter draft.
    FilterBackspace,
    /// Switch between origin and destination in the filter draft.
    FilterSwitchField,
    /// Apply the filter draft.
    FilterCommit,
    /// Clear every filter criterion.
    ClearFilter,

    // Data loading
    /// Request the listing collection again.
    RefreshRequested,
    /// The listing collection arrived; failures arrive as an empty list.
    ListingsLoaded(Vec<Listing>),
    /// A listing detail arrived.
    DetailLoaded(Option<Listing>),

    // Application lifecycle
    /// Synthetic startup event.
    Initialized,
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,

    // Window events
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

impl AppMsg {
    /// Returns true for cursor movement messages.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(self, Self::CursorUp | Self::CursorDown | Self::Home | Self::End)
    }

    /// Returns true for filter messages.
    #[must_use]
    pub const fn is_filter(&self) -> bool {
        matches!(
            self,
            Self::CycleVehicleType
                | Self::BeginFilterEdit
                | Self::FilterInput(_)
                | Self::FilterBackspace
                | Self::FilterSwitchField
                | Self::FilterCommit
                | Self::ClearFilter
        )
    }

    /// Returns true for home screen animation messages.
    #[must_use]
    pub const fn is_home(&self) -> bool {
        matches!(
            self,
            Self::NextSlide
                | Self::PreviousSlide
                | Self::ToggleHold
                | Self::CarouselTimer(_)
                | Self::CounterFrame { .. }
        )
    }

    /// Returns true for data loading messages.
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(
            self,
            Self::RefreshRequested | Self::ListingsLoaded(_) | Self::DetailLoaded(_)
        )
    }
}
