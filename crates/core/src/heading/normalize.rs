//! Heading normalization
//!
//! Platforms report orientation either as an absolute compass heading
//! (clockwise positive, 0 = north) or as a device-frame rotation about the
//! vertical axis (counter-clockwise positive). Everything downstream works
//! on [`Heading`], which always lies in `[0, 360)`.

use core::fmt;

/// Wrap an angle in degrees into `[0, 360)`.
///
/// Non-finite input maps to 0.
pub fn wrap_360(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut a = angle % 360.0;
    if a < 0.0 {
        a += 360.0;
    }
    // Tiny negative inputs round up to exactly 360.0 above
    if a >= 360.0 {
        a -= 360.0;
    }
    // Fold -0.0 into +0.0
    a + 0.0
}

/// Compass heading in degrees, normalized to `[0, 360)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Heading(f32);

impl Heading {
    /// Create a heading from any angle in degrees.
    pub fn new(degrees: f32) -> Self {
        Self(wrap_360(degrees))
    }

    /// Heading in degrees, `[0, 360)`.
    pub fn degrees(self) -> f32 {
        self.0
    }
}

impl From<f32> for Heading {
    fn from(degrees: f32) -> Self {
        Self::new(degrees)
    }
}

impl From<Heading> for f32 {
    fn from(heading: Heading) -> Self {
        heading.0
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

/// One raw orientation reading from the platform sensor.
///
/// Either field may be missing or garbage (NaN) depending on the platform.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientationSample {
    /// Absolute compass heading, clockwise positive (degrees)
    pub absolute_deg: Option<f32>,
    /// Device-frame rotation about the vertical axis, counter-clockwise
    /// positive (degrees)
    pub alpha_deg: Option<f32>,
}

impl OrientationSample {
    /// Sample carrying an absolute compass heading.
    pub fn absolute(degrees: f32) -> Self {
        Self {
            absolute_deg: Some(degrees),
            alpha_deg: None,
        }
    }

    /// Sample carrying only a device-frame rotation.
    pub fn alpha(degrees: f32) -> Self {
        Self {
            absolute_deg: None,
            alpha_deg: Some(degrees),
        }
    }

    /// Sample with no usable orientation.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Maps raw orientation samples to compass headings.
///
/// Holds the last emitted heading so that an unusable sample repeats it
/// instead of injecting a jump into the detector.
#[derive(Debug, Default)]
pub struct HeadingNormalizer {
    last: Option<Heading>,
}

impl HeadingNormalizer {
    /// Create a normalizer that has not emitted anything yet.
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Decode a sample without touching any state.
    ///
    /// The absolute compass field wins when both fields are finite. The
    /// device-frame angle is sign-inverted to match compass convention.
    pub fn decode(sample: &OrientationSample) -> Option<Heading> {
        if let Some(abs) = sample.absolute_deg.filter(|v| v.is_finite()) {
            return Some(Heading::new(abs));
        }
        sample
            .alpha_deg
            .filter(|v| v.is_finite())
            .map(|alpha| Heading::new(360.0 - alpha))
    }

    /// Decode a sample, falling back to the previously emitted heading.
    ///
    /// Returns `None` only if no usable sample has been seen yet.
    pub fn normalize(&mut self, sample: &OrientationSample) -> Option<Heading> {
        if let Some(heading) = Self::decode(sample) {
            self.last = Some(heading);
        }
        self.last
    }

    /// Last emitted heading.
    pub fn last(&self) -> Option<Heading> {
        self.last
    }

    /// Forget the last emitted heading.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
