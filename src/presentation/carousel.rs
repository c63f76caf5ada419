//! Auto-advancing carousel over a fixed number of items.

use std::time::Duration;

use tracing::trace;

/// Interval between automatic advances.
pub const DEFAULT_SLIDE_INTERVAL: Duration = Duration::from_secs(5);

/// What the carousel is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselMode {
    /// Showing an item with no timer armed; the initial state.
    Idle,
    /// Advancing one item every interval.
    AutoAdvancing,
    /// Holding the current item until hover ends or manual input settles.
    Paused,
}

/// Why a timer was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Advance to the next item.
    Advance,
    /// Resume auto-advancing after manual navigation.
    Resume,
}

/// A timer the host should arm and report back through
/// [`Carousel::on_timer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    /// Epoch the request belongs to; stale epochs are ignored.
    pub epoch: u64,
    /// Delay before the timer fires.
    pub delay: Duration,
    /// What the timer does when it fires.
    pub kind: TimerKind,
}

/// Carousel state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    count: usize,
    index: usize,
    mode: CarouselMode,
    interval: Duration,
    epoch: u64,
    hovered: bool,
    torn_down: bool,
}

impl Carousel {
    /// Creates an idle carousel at the first item.
    #[must_use]
    pub const fn new(count: usize, interval: Duration) -> Self {
        Self {
            count,
            index: 0,
            mode: CarouselMode::Idle,
            interval,
            epoch: 0,
            hovered: false,
            torn_down: false,
        }
    }

    /// Index of the item on display.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of items.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> CarouselMode {
        self.mode
    }

    /// Returns false when there is nothing to render.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.count > 0
    }

    /// Starts auto-advancing. A carousel with fewer than two items stays
    /// idle and never asks for a timer.
    pub fn start(&mut self) -> Option<TimerRequest> {
        if self.torn_down || self.count < 2 {
            return None;
        }
        if self.hovered {
            self.mode = CarouselMode::Paused;
            return None;
        }
        self.mode = CarouselMode::AutoAdvancing;
        Some(self.arm(TimerKind::Advance))
    }

    /// Shows the next item and pauses auto-advance for one interval.
    pub fn next(&mut self) -> Option<TimerRequest> {
        let target = self.following(self.index)?;
        self.navigate(target)
    }

    /// Shows the previous item and pauses auto-advance for one interval.
    pub fn previous(&mut self) -> Option<TimerRequest> {
        let target = match self.index.checked_sub(1) {
            Some(earlier) => earlier,
            None => self.count.checked_sub(1)?,
        };
        self.navigate(target)
    }

    /// Jumps to `target` and pauses auto-advance for one interval.
    /// Out-of-range targets are ignored.
    pub fn jump_to(&mut self, target: usize) -> Option<TimerRequest> {
        if target >= self.count {
            return None;
        }
        self.navigate(target)
    }

    /// Pauses while the pointer is over the carousel.
    pub fn hover_enter(&mut self) {
        if self.torn_down {
            return;
        }
        self.hovered = true;
        if self.count >= 2 {
            self.mode = CarouselMode::Paused;
            self.cancel();
        }
    }

    /// Resumes auto-advancing as soon as the pointer leaves.
    pub fn hover_exit(&mut self) -> Option<TimerRequest> {
        self.hovered = false;
        self.start()
    }

    /// Handles a fired timer. Fires from an older epoch, or after teardown,
    /// are ignored.
    pub fn on_timer(&mut self, request: TimerRequest) -> Option<TimerRequest> {
        if self.torn_down || request.epoch != self.epoch {
            trace!(epoch = request.epoch, "ignoring stale carousel timer");
            return None;
        }
        match request.kind {
            TimerKind::Advance if self.mode == CarouselMode::AutoAdvancing => {
                self.index = self.following(self.index)?;
                Some(self.arm(TimerKind::Advance))
            }
            TimerKind::Resume if self.mode == CarouselMode::Paused && !self.hovered => {
                self.start()
            }
            TimerKind::Advance | TimerKind::Resume => None,
        }
    }

    /// Changes the number of items, keeping the index in range.
    ///
    /// A running carousel re-arms its advance timer. A paused one stays
    /// paused and keeps its pending resume timer.
    pub fn set_count(&mut self, count: usize) -> Option<TimerRequest> {
        self.count = count;
        if self.index >= count {
            self.index = 0;
        }
        if count < 2 {
            self.mode = CarouselMode::Idle;
            self.cancel();
            return None;
        }
        match self.mode {
            CarouselMode::Idle | CarouselMode::Paused => None,
            CarouselMode::AutoAdvancing => self.start(),
        }
    }

    /// Cancels every outstanding timer for good.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.mode = CarouselMode::Idle;
        self.cancel();
    }

    fn navigate(&mut self, target: usize) -> Option<TimerRequest> {
        if self.torn_down || self.count == 0 {
            return None;
        }
        self.index = target;
        if self.count < 2 {
            return None;
        }
        self.mode = CarouselMode::Paused;
        Some(self.arm(TimerKind::Resume))
    }

    fn following(&self, index: usize) -> Option<usize> {
        index.checked_add(1)?.checked_rem(self.count)
    }

    fn arm(&mut self, kind: TimerKind) -> TimerRequest {
        self.cancel();
        TimerRequest {
            epoch: self.epoch,
            delay: self.interval,
            kind,
        }
    }

    const fn cancel(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(0, DEFAULT_SLIDE_INTERVAL)
    }
}
