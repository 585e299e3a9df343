//! Platform-agnostic trait abstractions.
//!
//! The detection engine never reads a clock itself: callers pass
//! timestamps into [`crate::detector::SwivelDetector::observe`]. Host code
//! that needs a clock (the session layer) goes through [`TimeSource`] so
//! it can be driven deterministically in tests.

pub mod time;

pub use time::{MockTime, TimeSource};
