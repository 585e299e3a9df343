//! Compass heading types and angular math
//!
//! - [`Heading`]: degrees normalized to `[0, 360)`
//! - [`HeadingNormalizer`]: raw orientation sample to heading
//! - [`circular_distance`] / [`is_near`]: proximity on the circle

mod normalize;
mod proximity;

pub use normalize::{wrap_360, Heading, HeadingNormalizer, OrientationSample};
pub use proximity::{circular_distance, is_near};
