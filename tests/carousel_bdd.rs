//! Behavioural tests for the featured cargo carousel.

use std::time::Duration;

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use yukchi::presentation::{Carousel, CarouselMode, TimerRequest};

#[derive(ScenarioState, Default)]
struct CarouselState {
    carousel: Slot<Carousel>,
    pending: Slot<Option<TimerRequest>>,
    kept: Slot<TimerRequest>,
}

#[fixture]
fn carousel_state() -> CarouselState {
    CarouselState::default()
}

fn carousel(state: &CarouselState) -> Carousel {
    state
        .carousel
        .get()
        .unwrap_or_else(|| panic!("carousel not initialised"))
}

fn pending(state: &CarouselState) -> Option<TimerRequest> {
    state.pending.get().flatten()
}

/// Runs `step` against the stored carousel and records the timer it asks for.
fn drive(state: &CarouselState, step: impl FnOnce(&mut Carousel) -> Option<TimerRequest>) {
    let mut current = carousel(state);
    let request = step(&mut current);
    state.carousel.set(current);
    state.pending.set(request);
}

// --- Given steps ---

#[given("a carousel with {count:usize} items")]
fn carousel_with_items(carousel_state: &CarouselState, count: usize) {
    carousel_state
        .carousel
        .set(Carousel::new(count, Duration::from_secs(5)));
}

// --- When steps ---

#[when("the carousel starts")]
fn carousel_starts(carousel_state: &CarouselState) {
    drive(carousel_state, Carousel::start);
}

#[when("{count:usize} advance timers fire")]
fn advance_timers_fire(carousel_state: &CarouselState, count: usize) {
    for _ in 0..count {
        let request = pending(carousel_state).unwrap_or_else(|| panic!("no timer pending"));
        drive(carousel_state, |current| current.on_timer(request));
    }
}

#[when("the user moves to the next item")]
fn user_moves_next(carousel_state: &CarouselState) {
    drive(carousel_state, Carousel::next);
}

#[when("the user moves to the previous item")]
fn user_moves_previous(carousel_state: &CarouselState) {
    drive(carousel_state, Carousel::previous);
}

#[when("the pending timer fires")]
fn pending_timer_fires(carousel_state: &CarouselState) {
    let request = pending(carousel_state).unwrap_or_else(|| panic!("no timer pending"));
    drive(carousel_state, |current| current.on_timer(request));
}

#[when("the first timer is kept aside")]
fn keep_first_timer(carousel_state: &CarouselState) {
    let request = pending(carousel_state).unwrap_or_else(|| panic!("no timer pending"));
    carousel_state.kept.set(request);
}

#[when("the kept timer fires")]
fn kept_timer_fires(carousel_state: &CarouselState) {
    let request = carousel_state
        .kept
        .get()
        .unwrap_or_else(|| panic!("no timer kept"));
    let mut current = carousel(carousel_state);
    assert_eq!(current.on_timer(request), None, "stale timer should be ignored");
    carousel_state.carousel.set(current);
}

// --- Then steps ---

#[then("the carousel shows item {index:usize}")]
fn carousel_shows(carousel_state: &CarouselState, index: usize) {
    assert_eq!(carousel(carousel_state).index(), index);
}

#[then("the carousel is auto-advancing")]
fn carousel_auto_advancing(carousel_state: &CarouselState) {
    assert_eq!(carousel(carousel_state).mode(), CarouselMode::AutoAdvancing);
    assert!(pending(carousel_state).is_some(), "advance timer should be armed");
}

#[then("the carousel is paused")]
fn carousel_paused(carousel_state: &CarouselState) {
    assert_eq!(carousel(carousel_state).mode(), CarouselMode::Paused);
}

#[then("no timer is pending")]
fn no_timer_pending(carousel_state: &CarouselState) {
    assert_eq!(pending(carousel_state), None);
    assert_eq!(carousel(carousel_state).mode(), CarouselMode::Idle);
}

#[scenario(path = "tests/features/carousel.feature", index = 0)]
fn auto_advance_wraps(carousel_state: CarouselState) {
    let _ = carousel_state;
}

#[scenario(path = "tests/features/carousel.feature", index = 1)]
fn manual_navigation_pauses(carousel_state: CarouselState) {
    let _ = carousel_state;
}

#[scenario(path = "tests/features/carousel.feature", index = 2)]
fn stale_timer_ignored(carousel_state: CarouselState) {
    let _ = carousel_state;
}

#[scenario(path = "tests/features/carousel.feature", index = 3)]
fn single_item_has_no_timer(carousel_state: CarouselState) {
    let _ = carousel_state;
}
