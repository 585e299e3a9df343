//! Detection timing and tolerance configuration

/// Default proximity tolerance (degrees)
pub const DEFAULT_TOLERANCE_DEG: f32 = 10.0;
/// Default minimum spacing between automatic increments (ms)
pub const DEFAULT_DEBOUNCE_MS: u32 = 1000;
/// Default maximum time from one checkpoint to the next (ms)
pub const DEFAULT_ALIGNMENT_WINDOW_MS: u32 = 4000;

pub const MIN_TOLERANCE_DEG: f32 = 2.0;
pub const MAX_TOLERANCE_DEG: f32 = 45.0;

pub const MIN_DEBOUNCE_MS: u32 = 250;
pub const MAX_DEBOUNCE_MS: u32 = 5000;

pub const MIN_ALIGNMENT_WINDOW_MS: u32 = 500;
pub const MAX_ALIGNMENT_WINDOW_MS: u32 = 30_000;

/// Swivel detection configuration
///
/// Every constructor clamps into the supported ranges, so a config value
/// is always usable by the detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionConfig {
    tolerance_deg: f32,
    debounce_ms: u32,
    alignment_window_ms: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            tolerance_deg: DEFAULT_TOLERANCE_DEG,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            alignment_window_ms: DEFAULT_ALIGNMENT_WINDOW_MS,
        }
    }
}

impl DetectionConfig {
    /// Create a config, clamping each field into its range.
    ///
    /// A non-finite tolerance falls back to the default.
    pub fn new(tolerance_deg: f32, debounce_ms: u32, alignment_window_ms: u32) -> Self {
        Self::default()
            .with_tolerance(tolerance_deg)
            .with_debounce(debounce_ms)
            .with_alignment_window(alignment_window_ms)
    }

    /// Copy with a different tolerance (clamped to 2..=45 degrees)
    pub fn with_tolerance(mut self, tolerance_deg: f32) -> Self {
        self.tolerance_deg = if tolerance_deg.is_finite() {
            tolerance_deg.clamp(MIN_TOLERANCE_DEG, MAX_TOLERANCE_DEG)
        } else {
            DEFAULT_TOLERANCE_DEG
        };
        self
    }

    /// Copy with a different debounce window (clamped to 250..=5000 ms)
    pub fn with_debounce(mut self, debounce_ms: u32) -> Self {
        self.debounce_ms = debounce_ms.clamp(MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS);
        self
    }

    /// Copy with a different alignment window (clamped to 500..=30000 ms)
    pub fn with_alignment_window(mut self, alignment_window_ms: u32) -> Self {
        self.alignment_window_ms =
            alignment_window_ms.clamp(MIN_ALIGNMENT_WINDOW_MS, MAX_ALIGNMENT_WINDOW_MS);
        self
    }

    pub fn tolerance_deg(&self) -> f32 {
        self.tolerance_deg
    }

    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    pub fn alignment_window_ms(&self) -> u32 {
        self.alignment_window_ms
    }
}
