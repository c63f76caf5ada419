//! Count-up number animation with ease-out quartic timing.
//!
//! A [`CountUp`] waits until its element is first visible, then after the
//! configured delay samples `end * (1 - (1 - t)^4)` once per frame until the
//! duration has elapsed.

use std::time::{Duration, Instant};

/// Delay between animation frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Formatting and timing options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountUpOptions {
    /// Total animation time.
    pub duration: Duration,
    /// Wait between becoming visible and the first frame.
    pub delay: Duration,
    /// Digits after the decimal point.
    pub decimals: usize,
    /// Inserted between every three integer digits.
    pub separator: String,
    /// Text before the number.
    pub prefix: String,
    /// Text after the number.
    pub suffix: String,
}

impl Default for CountUpOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(2),
            delay: Duration::ZERO,
            decimals: 0,
            separator: ",".to_owned(),
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

/// Lifecycle of a count-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountUpPhase {
    /// Not visible yet; shows the start value.
    Waiting,
    /// Visible and waiting for the first frame.
    Scheduled,
    /// Sampling frames.
    Running,
    /// Showing the end value.
    Finished,
    /// Torn down; frames are ignored.
    Cancelled,
}

/// A frame the host should schedule and report back through
/// [`CountUp::on_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    /// Epoch the request belongs to; stale epochs are ignored.
    pub epoch: u64,
    /// Delay before the frame.
    pub delay: Duration,
}

/// Count-up animation state.
#[derive(Debug, Clone, PartialEq)]
pub struct CountUp {
    end: f64,
    options: CountUpOptions,
    phase: CountUpPhase,
    started_at: Option<Instant>,
    current: f64,
    epoch: u64,
}

impl CountUp {
    /// Creates a count-up towards `end`.
    #[must_use]
    pub const fn new(end: f64, options: CountUpOptions) -> Self {
        Self {
            end,
            options,
            phase: CountUpPhase::Waiting,
            started_at: None,
            current: 0.0,
            epoch: 0,
        }
    }

    /// Value the animation is heading to.
    #[must_use]
    pub const fn end(&self) -> f64 {
        self.end
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> CountUpPhase {
        self.phase
    }

    /// Value currently displayed.
    #[must_use]
    pub const fn current(&self) -> f64 {
        self.current
    }

    /// Marks the element visible. Only the first call schedules the
    /// animation.
    pub const fn become_visible(&mut self) -> Option<FrameRequest> {
        if !matches!(self.phase, CountUpPhase::Waiting) {
            return None;
        }
        self.phase = CountUpPhase::Scheduled;
        Some(FrameRequest {
            epoch: self.epoch,
            delay: self.options.delay,
        })
    }

    /// Samples one frame at `now` and asks for the next one until the
    /// duration has elapsed.
    pub fn on_frame(&mut self, request: FrameRequest, now: Instant) -> Option<FrameRequest> {
        if request.epoch != self.epoch
            || !matches!(self.phase, CountUpPhase::Scheduled | CountUpPhase::Running)
        {
            return None;
        }
        let started_at = *self.started_at.get_or_insert(now);
        self.phase = CountUpPhase::Running;
        let elapsed = now.saturating_duration_since(started_at);
        self.current = self.value_at(elapsed);
        if elapsed >= self.options.duration {
            self.phase = CountUpPhase::Finished;
            return None;
        }
        Some(FrameRequest {
            epoch: self.epoch,
            delay: FRAME_INTERVAL,
        })
    }

    /// Value shown `elapsed` after the first frame.
    #[must_use]
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        let progress = if self.options.duration.is_zero() {
            1.0
        } else {
            elapsed
                .div_duration_f64(self.options.duration)
                .clamp(0.0, 1.0)
        };
        eased(self.end, progress)
    }

    /// Cancels pending frames and freezes the displayed value.
    pub const fn teardown(&mut self) {
        self.phase = CountUpPhase::Cancelled;
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Formatted display text, including prefix and suffix.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{}{}{}",
            self.options.prefix,
            format_number(self.current, self.options.decimals, &self.options.separator),
            self.options.suffix
        )
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "the easing curve is defined over floating point progress"
)]
fn eased(end: f64, progress: f64) -> f64 {
    let remaining = 1.0 - progress;
    let value = end * (1.0 - remaining.powi(4));
    if end >= 0.0 { value.min(end) } else { value.max(end) }
}

/// Renders `value` with `decimals` fractional digits and `separator` between
/// every three integer digits.
#[must_use]
pub fn format_number(value: f64, decimals: usize, separator: &str) -> String {
    let fixed = format!("{value:.decimals$}");
    let (sign, unsigned) = fixed
        .strip_prefix('-')
        .map_or(("", fixed.as_str()), |rest| ("-", rest));
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let digits: Vec<char> = whole.chars().collect();
    let mut grouped = String::with_capacity(whole.len().saturating_mul(2));
    for (position, digit) in digits.iter().enumerate() {
        let remaining = digits.len().saturating_sub(position);
        if position > 0 && remaining.checked_rem(3) == Some(0) {
            grouped.push_str(separator);
        }
        grouped.push(*digit);
    }

    if decimals > 0 {
        format!("{sign}{grouped}.{fraction}")
    } else {
        format!("{sign}{grouped}")
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn counter() -> CountUp {
        CountUp::new(1_000.0, CountUpOptions::default())
    }

    #[rstest]
    #[case::millions(1_234_567.0, 0, ",", "1,234,567")]
    #[case::decimals(1_234.5, 1, ",", "1,234.5")]
    #[case::short(999.0, 0, ",", "999")]
    #[case::exact_group(123_456.0, 0, " ", "123 456")]
    #[case::rounding(2.346, 2, ",", "2.35")]
    #[case::zero(0.0, 0, ",", "0")]
    #[case::negative(-1_234.0, 0, ",", "-1,234")]
    fn formats_numbers(
        #[case] value: f64,
        #[case] decimals: usize,
        #[case] separator: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(format_number(value, decimals, separator), expected);
    }

    #[rstest]
    fn samples_start_and_end(counter: CountUp) {
        assert_eq!(counter.value_at(Duration::ZERO), 0.0);
        assert_eq!(counter.value_at(Duration::from_secs(2)), 1_000.0);
        assert_eq!(counter.value_at(Duration::from_secs(10)), 1_000.0);
    }

    #[rstest]
    fn samples_never_decrease(counter: CountUp) {
        let samples: Vec<f64> = (0..=40_u64)
            .map(|step| counter.value_at(Duration::from_millis(step.saturating_mul(50))))
            .collect();
        assert!(
            samples.windows(2).all(|pair| match pair {
                [earlier, later] => earlier <= later,
                _ => true,
            }),
            "samples should be non-decreasing: {samples:?}"
        );
    }

    #[rstest]
    fn starts_only_once_when_visible(mut counter: CountUp) {
        assert_eq!(counter.phase(), CountUpPhase::Waiting);
        let first = counter.become_visible().expect("first visibility schedules");
        assert_eq!(first.delay, Duration::ZERO);
        assert_eq!(counter.become_visible(), None);
        assert_eq!(counter.phase(), CountUpPhase::Scheduled);
    }

    #[rstest]
    fn runs_frames_until_finished(mut counter: CountUp) {
        let start = Instant::now();
        let scheduled = counter.become_visible().expect("should schedule");
        let next = counter
            .on_frame(scheduled, start)
            .expect("first frame should ask for another");
        assert_eq!(counter.current(), 0.0);
        assert_eq!(next.delay, FRAME_INTERVAL);

        let halfway = counter
            .on_frame(next, start + Duration::from_secs(1))
            .expect("halfway frame should continue");
        assert!(counter.current() > 900.0, "ease-out should front-load growth");

        assert_eq!(counter.on_frame(halfway, start + Duration::from_secs(2)), None);
        assert_eq!(counter.phase(), CountUpPhase::Finished);
        assert_eq!(counter.render(), "1,000");
    }

    #[rstest]
    fn teardown_cancels_pending_frames(mut counter: CountUp) {
        let scheduled = counter.become_visible().expect("should schedule");
        counter.teardown();
        assert_eq!(counter.on_frame(scheduled, Instant::now()), None);
        assert_eq!(counter.phase(), CountUpPhase::Cancelled);
        assert_eq!(counter.render(), "0");
    }

    #[rstest]
    fn renders_prefix_and_suffix() {
        let mut counter = CountUp::new(
            12.5,
            CountUpOptions {
                decimals: 1,
                prefix: "~".to_owned(),
                suffix: " t".to_owned(),
                duration: Duration::ZERO,
                ..CountUpOptions::default()
            },
        );
        let scheduled = counter.become_visible().expect("should schedule");
        assert_eq!(counter.on_frame(scheduled, Instant::now()), None);
        assert_eq!(counter.render(), "~12.5 t");
    }
}
