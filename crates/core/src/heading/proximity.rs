//! Circular proximity between compass headings

use super::Heading;
use libm::fabsf;

/// Minimal rotation in degrees between two headings, in `[0, 180]`.
///
/// Symmetric in its arguments: the direction of rotation does not matter.
pub fn circular_distance(a: Heading, b: Heading) -> f32 {
    let d = fabsf(a.degrees() - b.degrees());
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}

/// True when `a` lies within `tolerance_deg` of `b` (inclusive).
pub fn is_near(a: Heading, b: Heading, tolerance_deg: f32) -> bool {
    circular_distance(a, b) <= tolerance_deg
}
