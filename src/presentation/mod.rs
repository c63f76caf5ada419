//! Time-driven presentation state machines.
//!
//! Neither machine owns a timer. Each operation returns the next timer it
//! wants as a request tagged with an epoch; the host arms it and feeds the
//! epoch back when it fires. Bumping the epoch is how a machine cancels
//! every request it handed out earlier.

pub mod carousel;
pub mod count_up;

pub use carousel::{Carousel, CarouselMode, DEFAULT_SLIDE_INTERVAL, TimerKind, TimerRequest};
pub use count_up::{
    CountUp, CountUpOptions, CountUpPhase, FRAME_INTERVAL, FrameRequest, format_number,
};
