//! Calibration headings
//!
//! The operator registers an origin, a destination and optionally an
//! ordered list of intermediate waypoints (for example a dump point the
//! swing must pass through). A swivel can only be detected once origin and
//! destination are both set.

mod error;

pub use error::CalibrationError;

use crate::heading::{circular_distance, Heading};
use heapless::Vec;

/// Maximum number of intermediate waypoints
pub const MAX_WAYPOINTS: usize = 4;

/// Reference headings for one detection session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationStore {
    origin: Option<Heading>,
    destination: Option<Heading>,
    waypoints: Vec<Heading, MAX_WAYPOINTS>,
}

impl CalibrationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the origin heading
    pub fn set_origin(&mut self, heading: Heading) {
        self.origin = Some(heading);
    }

    /// Set the destination heading
    pub fn set_destination(&mut self, heading: Heading) {
        self.destination = Some(heading);
    }

    /// Append an intermediate waypoint (path order)
    pub fn push_waypoint(&mut self, heading: Heading) -> Result<(), CalibrationError> {
        self.waypoints
            .push(heading)
            .map_err(|_| CalibrationError::TooManyWaypoints { max: MAX_WAYPOINTS })
    }

    /// Drop all intermediate waypoints
    pub fn clear_waypoints(&mut self) {
        self.waypoints.clear();
    }

    /// Clear every heading at once
    pub fn reset(&mut self) {
        self.origin = None;
        self.destination = None;
        self.waypoints.clear();
    }

    /// True iff origin and destination are both set
    pub fn is_complete(&self) -> bool {
        self.origin.is_some() && self.destination.is_some()
    }

    pub fn origin(&self) -> Option<Heading> {
        self.origin
    }

    pub fn destination(&self) -> Option<Heading> {
        self.destination
    }

    pub fn waypoints(&self) -> &[Heading] {
        &self.waypoints
    }

    /// Every heading currently set, in path order (origin, waypoints, destination)
    pub fn checkpoints(&self) -> impl Iterator<Item = Heading> + '_ {
        self.origin
            .into_iter()
            .chain(self.waypoints.iter().copied())
            .chain(self.destination)
    }

    /// Separation between `heading` and the closest set checkpoint, if the
    /// two tolerance cones would overlap (`separation < 2 * tolerance_deg`).
    pub fn overlap(&self, heading: Heading, tolerance_deg: f32) -> Option<f32> {
        self.checkpoints()
            .map(|other| circular_distance(heading, other))
            .filter(|sep| *sep < 2.0 * tolerance_deg)
            .reduce(f32::min)
    }

    /// Smallest separation between any two set checkpoints, if it is below
    /// `2 * tolerance_deg`.
    pub fn min_overlap(&self, tolerance_deg: f32) -> Option<f32> {
        let mut worst: Option<f32> = None;
        for (i, a) in self.checkpoints().enumerate() {
            for b in self.checkpoints().skip(i + 1) {
                let sep = circular_distance(a, b);
                if sep < 2.0 * tolerance_deg {
                    worst = Some(worst.map_or(sep, |w| w.min(sep)));
                }
            }
        }
        worst
    }
}
