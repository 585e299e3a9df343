//! swivel_core - Pure no_std swivel-detection logic
//!
//! This crate contains the platform-agnostic algorithms and types behind
//! swivel counting. It can be tested on host without any feature flags,
//! async runtime or sensor hardware.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Platform services injected via traits
//!
//! # Modules
//!
//! - [`traits`]: Platform-agnostic trait abstractions (TimeSource)
//! - [`heading`]: Heading normalization and circular proximity
//! - [`calibration`]: Origin, destination and waypoint headings
//! - [`detector`]: Debounced swivel detector state machine
//! - [`counter`]: Swivel counter with fractional manual adjustments
//! - [`engine`]: Per-session bundle of calibration, detector and counter
//! - [`parameters`]: Parameter store and detection parameter definitions

#![no_std]

pub mod calibration;
pub mod counter;
pub mod detector;
pub mod engine;
pub mod heading;
pub mod parameters;
pub mod traits;

pub use calibration::{CalibrationError, CalibrationStore};
pub use counter::CounterStore;
pub use detector::{DetectionConfig, DetectorMode, SwivelDetector, SwivelEvent};
pub use engine::SwivelEngine;
pub use heading::{Heading, HeadingNormalizer, OrientationSample};
