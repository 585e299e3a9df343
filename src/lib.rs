//! swivel - Swivel counter session layer
//!
//! Runs one detection session on top of [`swivel_core`]: permission and
//! sensor subscription handling, calibration captures raced against a
//! timeout, persistence of count, calibration and tuning through a
//! key/value store, and a serializable status snapshot for a UI.
//!
//! Platform capabilities (orientation sensor, key/value storage, screen
//! keep-awake) are injected through the traits in [`platform::traits`];
//! in-memory implementations live in [`platform::mock`]. The sensor stamps
//! each sample when it arrives, so detection timing never depends on how
//! late the session gets around to reading it.

// Logging macros (must come first so the other modules can use them)
#[macro_use]
pub mod logging;

pub mod error;
pub mod persistence;
pub mod platform;
pub mod session;

#[doc(hidden)]
pub use log as __log;

pub use error::SessionError;
pub use session::{DetectionSession, SessionStatus, StatusSnapshot};
