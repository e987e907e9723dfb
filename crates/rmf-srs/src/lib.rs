//! SRS (Spaced Repetition System) engine for ReMindful
//!
//! This crate provides the scheduling core used when a learning card is reviewed:
//! classifying an attempt into a [`Quality`] grade and advancing a card's
//! [`SchedulingState`] to its next review date.
//!
//! Everything here is a pure computation. The current instant is always passed in
//! (or read from a [`Clock`]), so the same inputs always produce the same output.

pub mod clock;
pub mod error;
pub mod quality;
pub mod schedule;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::SrsError;
pub use quality::{Assessment, Attempt, Quality, infer_quality};
pub use schedule::{
    INITIAL_DIFFICULTY, MAX_DIFFICULTY, MIN_DIFFICULTY, SchedulingState, advance,
};
