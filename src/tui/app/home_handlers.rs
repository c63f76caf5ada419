//! Carousel and statistic counter handlers for the home screen.
//!
//! The state machines hand back timer and frame requests; these handlers
//! turn each request into a command that sleeps for the requested delay and
//! reports the request back, so a stale epoch is discarded by the machine
//! that issued it.

use std::any::Any;
use std::time::Instant;

use bubbletea_rs::Cmd;

use super::MarketApp;
use crate::presentation::{CountUp, CountUpOptions, FrameRequest, TimerRequest};
use crate::tui::messages::AppMsg;

impl MarketApp {
    /// Dispatches home screen messages to their handlers.
    pub(super) fn handle_home_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::NextSlide => self.carousel.next().map(carousel_timer_cmd),
            AppMsg::PreviousSlide => self.carousel.previous().map(carousel_timer_cmd),
            AppMsg::ToggleHold => self.handle_toggle_hold(),
            AppMsg::CarouselTimer(request) => {
                self.carousel.on_timer(*request).map(carousel_timer_cmd)
            }
            AppMsg::CounterFrame {
                generation,
                requests,
            } => self.handle_counter_frame(*generation, requests),
            _ => None,
        }
    }

    /// Starts the carousel and, when the home screen is showing, the
    /// counters.
    pub(super) fn handle_initialized(&mut self) -> Option<Cmd> {
        let carousel = self.carousel.start().map(carousel_timer_cmd);
        let counters = if self.view_mode == super::ViewMode::Home {
            self.start_counters()
        } else {
            None
        };
        combine(carousel, counters)
    }

    /// Marks every counter visible. Counters that already ran stay put.
    pub(super) fn start_counters(&mut self) -> Option<Cmd> {
        let requests: Vec<(usize, FrameRequest)> = self
            .counters
            .iter_mut()
            .enumerate()
            .filter_map(|(index, (_, counter))| {
                counter.become_visible().map(|request| (index, request))
            })
            .collect();
        counter_frame_cmd(self.counter_generation, requests)
    }

    /// Replaces the counters with ones for the loaded listings. Frames of
    /// the previous set are ignored from here on.
    pub(super) fn rebuild_counters(&mut self) {
        for (_, counter) in &mut self.counters {
            counter.teardown();
        }
        self.counter_generation = self.counter_generation.wrapping_add(1);

        let posted = count_as_f64(self.listings.len());
        let tonnes: f64 = self.listings.iter().map(|listing| listing.weight).sum();
        let priced = count_as_f64(
            self.listings
                .iter()
                .filter(|listing| listing.price.is_some())
                .count(),
        );
        self.counters = vec![
            ("cargos posted", CountUp::new(posted, CountUpOptions::default())),
            (
                "tonnes on offer",
                CountUp::new(
                    tonnes,
                    CountUpOptions {
                        decimals: 1,
                        suffix: " t".to_owned(),
                        ..CountUpOptions::default()
                    },
                ),
            ),
            ("with a price", CountUp::new(priced, CountUpOptions::default())),
        ];
    }

    fn handle_toggle_hold(&mut self) -> Option<Cmd> {
        self.held = !self.held;
        if self.held {
            self.carousel.hover_enter();
            None
        } else {
            self.carousel.hover_exit().map(carousel_timer_cmd)
        }
    }

    fn handle_counter_frame(
        &mut self,
        generation: u64,
        requests: &[(usize, FrameRequest)],
    ) -> Option<Cmd> {
        if generation != self.counter_generation {
            return None;
        }
        let now = Instant::now();
        let next: Vec<(usize, FrameRequest)> = requests
            .iter()
            .filter_map(|&(index, request)| {
                self.counters
                    .get_mut(index)
                    .and_then(|(_, counter)| counter.on_frame(request, now))
                    .map(|following| (index, following))
            })
            .collect();
        counter_frame_cmd(generation, next)
    }
}

/// Creates a command that reports `request` back after its delay.
pub(super) fn carousel_timer_cmd(request: TimerRequest) -> Cmd {
    Box::pin(async move {
        tokio::time::sleep(request.delay).await;
        Some(Box::new(AppMsg::CarouselTimer(request)) as Box<dyn Any + Send>)
    })
}

/// Creates one command for all pending counter frames, or `None` when no
/// counter wants another frame.
fn counter_frame_cmd(generation: u64, requests: Vec<(usize, FrameRequest)>) -> Option<Cmd> {
    let delay = requests.iter().map(|(_, request)| request.delay).max()?;
    Some(Box::pin(async move {
        tokio::time::sleep(delay).await;
        Some(Box::new(AppMsg::CounterFrame {
            generation,
            requests,
        }) as Box<dyn Any + Send>)
    }))
}

/// Runs two optional commands concurrently.
pub(super) fn combine(first: Option<Cmd>, second: Option<Cmd>) -> Option<Cmd> {
    match (first, second) {
        (Some(one), Some(other)) => Some(bubbletea_rs::batch(vec![one, other])),
        (one, other) => one.or(other),
    }
}

fn count_as_f64(count: usize) -> f64 {
    u32::try_from(count).map_or(f64::from(u32::MAX), f64::from)
}
