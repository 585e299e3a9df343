//! Detection session
//!
//! Owns one [`SwivelEngine`] and connects it to the platform: permission,
//! the live sample stream, calibration captures, persistence and the
//! keep-awake lock. Every operation takes `&mut self`, so samples and
//! user actions are serialized and the engine is never re-entered.
//!
//! # Lifecycle
//!
//! ```text
//! new() ──► start() ──► next_event() ... ──► stop()
//!             │              ▲
//!             └── capture_origin() / capture_destination() / adjust_*()
//! ```

mod status;

pub use status::{SessionStatus, StatusSnapshot};

use std::time::Duration;

use swivel_core::calibration::{CalibrationError, CalibrationStore};
use swivel_core::detector::{DetectorMode, SwivelEvent};
use swivel_core::engine::SwivelEngine;
use swivel_core::heading::{Heading, HeadingNormalizer};
use swivel_core::parameters::{
    load_count, register_defaults, write_count, CalibrationParams, DetectionParams, ParamFlags,
    ParameterStore, MAX_MANUAL_STEP, MIN_MANUAL_STEP,
};

use crate::error::SessionError;
use crate::persistence;
use crate::platform::traits::{
    KeyValueStore, OrientationSensor, PermissionState, SensorSubscription, TimedSample, WakeLock,
};

/// How long a calibration capture waits for a fresh sample
pub const CALIBRATION_TIMEOUT: Duration = Duration::from_millis(2000);

const PERMISSION_NOTICE: &str = "Orientation access denied";

/// One swivel-detection session
pub struct DetectionSession<S, K, W>
where
    S: OrientationSensor,
    K: KeyValueStore,
    W: WakeLock,
{
    sensor: S,
    storage: K,
    wake_lock: W,
    engine: SwivelEngine,
    params: ParameterStore,
    normalizer: HeadingNormalizer,
    subscription: Option<SensorSubscription>,
    permission: PermissionState,
    notice: Option<String>,
}

impl<S, K, W> DetectionSession<S, K, W>
where
    S: OrientationSensor,
    K: KeyValueStore,
    W: WakeLock,
{
    /// Create a session, restoring count, calibration and tuning from
    /// `storage`.
    pub fn new(sensor: S, storage: K, wake_lock: W) -> Self {
        let mut params = ParameterStore::new();
        if let Err(e) = register_defaults(&mut params) {
            log_error!("Failed to register session parameters: {}", e);
        }
        persistence::load(&storage, &mut params);

        let tuning = DetectionParams::from_store(&params);
        let mut engine = SwivelEngine::new(tuning.to_config());
        engine.set_manual_step(tuning.manual_step);
        engine.restore_count(load_count(&params));

        let mut session = Self {
            sensor,
            storage,
            wake_lock,
            engine,
            params,
            normalizer: HeadingNormalizer::new(),
            subscription: None,
            permission: PermissionState::Unknown,
            notice: None,
        };

        let restored = CalibrationParams::from_store(&session.params).calibration;
        if restored != CalibrationStore::new() {
            match session.engine.restore_calibration(restored) {
                Ok(()) => log_info!("Restored calibration"),
                Err(e) => {
                    log_warn!("Dropping saved calibration: {}", e);
                    session.params.clear_flagged(ParamFlags::CALIBRATION);
                    session.flush();
                }
            }
        }

        log_debug!(
            "Session ready: count={}, tolerance={}°, debounce={} ms, window={} ms",
            session.engine.count(),
            tuning.tolerance_deg,
            tuning.debounce_ms,
            tuning.alignment_window_ms
        );
        session
    }

    // --- Lifecycle ---

    /// Ask for orientation access. Retryable after a denial.
    pub async fn request_permission(&mut self) -> Result<(), SessionError> {
        let state = self.sensor.request_permission().await;
        if state == PermissionState::Granted {
            log_info!("Orientation permission granted");
            self.permission = PermissionState::Granted;
            if self.notice.as_deref() == Some(PERMISSION_NOTICE) {
                self.notice = None;
            }
            Ok(())
        } else {
            log_warn!("Orientation permission denied");
            self.permission = PermissionState::Denied;
            self.notice = Some(PERMISSION_NOTICE.to_string());
            Err(SessionError::PermissionDenied)
        }
    }

    /// Start detection. No-op when already running.
    ///
    /// Obtains permission first if it has not been granted, then subscribes
    /// to the sensor and acquires the keep-awake lock (best-effort).
    pub async fn start(&mut self) -> Result<(), SessionError> {
        if self.engine.is_running() {
            return Ok(());
        }
        if self.permission != PermissionState::Granted {
            self.request_permission().await?;
        }

        self.subscription = Some(self.sensor.subscribe()?);
        self.engine.start();

        if let Err(e) = self.wake_lock.acquire().await {
            log_debug!("Keep-awake unavailable: {}", e);
        }
        log_info!("Detection started");
        Ok(())
    }

    /// Stop detection. Safe to call at any time.
    ///
    /// Queued samples are discarded and the live heading is forgotten, so a
    /// restarted session reports `Initializing` until a fresh sample arrives.
    pub async fn stop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.normalizer.reset();
        let was_running = self.engine.is_running();
        self.engine.stop();
        self.wake_lock.release().await;
        if was_running {
            log_info!("Detection stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    /// Wait for the next sample and run it through the detector.
    ///
    /// Samples are observed at the time the sensor stamped them, so a
    /// backlog drained late is judged by its real spacing. Returns the
    /// swivel this sample completed, if any. When the sensor closes the
    /// stream the session stops and `SensorClosed` is returned.
    pub async fn next_event(&mut self) -> Result<Option<SwivelEvent>, SessionError> {
        let subscription = self.subscription.as_mut().ok_or(SessionError::NotRunning)?;
        match subscription.next().await {
            Some(timed) => Ok(self.process_sample(&timed)),
            None => {
                log_warn!("Orientation stream closed");
                self.stop().await;
                Err(SessionError::SensorClosed)
            }
        }
    }

    fn process_sample(&mut self, timed: &TimedSample) -> Option<SwivelEvent> {
        let heading = self.normalizer.normalize(&timed.sample)?;
        let event = self.engine.observe(heading, timed.at_ms);
        if let Some(event) = event {
            log_info!(
                "Swivel detected at {} ms, count={}",
                event.at_ms,
                self.engine.count()
            );
            self.persist_count();
        }
        event
    }

    // --- Calibration ---

    /// Register the current heading as the origin.
    pub async fn capture_origin(&mut self) -> Result<Heading, SessionError> {
        let heading = self.read_heading().await?;
        let result = self.engine.set_origin(heading);
        self.commit_calibration("Origin", heading, result)
    }

    /// Register the current heading as the destination.
    pub async fn capture_destination(&mut self) -> Result<Heading, SessionError> {
        let heading = self.read_heading().await?;
        let result = self.engine.set_destination(heading);
        self.commit_calibration("Destination", heading, result)
    }

    /// Append the current heading as the next intermediate waypoint.
    pub async fn capture_waypoint(&mut self) -> Result<Heading, SessionError> {
        let heading = self.read_heading().await?;
        let result = self.engine.push_waypoint(heading);
        self.commit_calibration("Waypoint", heading, result)
    }

    /// Clear every calibration heading and all detection timing memory.
    pub fn recalibrate(&mut self) {
        self.engine.recalibrate();
        self.params.clear_flagged(ParamFlags::CALIBRATION);
        self.flush();
        self.notice = None;
        log_info!("Calibration cleared");
    }

    /// Drop the intermediate waypoints, keeping origin and destination.
    pub fn clear_waypoints(&mut self) {
        self.engine.clear_waypoints();
        self.persist_calibration();
    }

    /// Read one fresh heading on a dedicated subscription.
    ///
    /// The subscription is torn down whether a sample arrives or the
    /// timeout expires, and nothing else changes on failure.
    async fn read_heading(&mut self) -> Result<Heading, SessionError> {
        if self.permission != PermissionState::Granted {
            self.request_permission().await?;
        }

        let mut subscription = self.sensor.subscribe()?;
        let result = tokio::time::timeout(CALIBRATION_TIMEOUT, async {
            while let Some(timed) = subscription.next().await {
                if let Some(heading) = HeadingNormalizer::decode(&timed.sample) {
                    return Some(heading);
                }
            }
            None
        })
        .await;
        subscription.unsubscribe();

        match result {
            Ok(Some(heading)) => Ok(heading),
            Ok(None) => {
                log_warn!("Orientation stream closed during calibration");
                Err(SessionError::SensorClosed)
            }
            Err(_) => {
                let timeout_ms = CALIBRATION_TIMEOUT.as_millis() as u64;
                log_warn!("No heading within {} ms, calibration aborted", timeout_ms);
                self.notice = Some("No heading received, try again".to_string());
                Err(SessionError::CalibrationTimeout(timeout_ms))
            }
        }
    }

    fn commit_calibration(
        &mut self,
        label: &str,
        heading: Heading,
        result: Result<(), CalibrationError>,
    ) -> Result<Heading, SessionError> {
        match result {
            Ok(()) => {
                log_info!("{} set to {}", label, heading);
                self.notice = None;
                self.persist_calibration();
                Ok(heading)
            }
            Err(e) => {
                log_warn!("{} {} rejected: {}", label, heading, e);
                self.notice = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    // --- Counter ---

    /// Add one manual step to the count.
    pub fn adjust_up(&mut self) {
        self.engine.increment_manual();
        self.persist_count();
    }

    /// Remove one manual step from the count (never below zero).
    pub fn adjust_down(&mut self) {
        self.engine.decrement_manual();
        self.persist_count();
    }

    pub fn reset_counter(&mut self) {
        self.engine.reset_counter();
        self.persist_count();
        log_info!("Counter reset");
    }

    pub fn count(&self) -> f64 {
        self.engine.count()
    }

    // --- Configuration ---

    /// Change the proximity tolerance (clamped to its range).
    pub fn set_tolerance(&mut self, tolerance_deg: f32) -> Result<(), SessionError> {
        let config = self.engine.config().with_tolerance(tolerance_deg);
        self.engine.set_config(config).map_err(|e| {
            log_warn!("Tolerance {}° rejected: {}", tolerance_deg, e);
            self.notice = Some(e.to_string());
            SessionError::from(e)
        })?;
        self.persist_tuning();
        Ok(())
    }

    /// Change the debounce window (clamped to its range).
    pub fn set_debounce(&mut self, debounce_ms: u32) {
        let config = self.engine.config().with_debounce(debounce_ms);
        // Debounce never affects checkpoint spacing, so this cannot be rejected.
        if self.engine.set_config(config).is_ok() {
            self.persist_tuning();
        }
    }

    /// Change the alignment window (clamped to its range).
    pub fn set_alignment_window(&mut self, window_ms: u32) {
        let config = self.engine.config().with_alignment_window(window_ms);
        if self.engine.set_config(config).is_ok() {
            self.persist_tuning();
        }
    }

    /// Change the manual adjustment step (clamped to its range).
    pub fn set_manual_step(&mut self, step: f32) {
        if step.is_finite() {
            self.engine
                .set_manual_step(step.clamp(MIN_MANUAL_STEP, MAX_MANUAL_STEP));
            self.persist_tuning();
        }
    }

    // --- Views ---

    pub fn engine(&self) -> &SwivelEngine {
        &self.engine
    }

    pub fn mode(&self) -> DetectorMode {
        self.engine.mode()
    }

    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    /// Most recent live heading
    pub fn heading(&self) -> Option<Heading> {
        self.normalizer.last()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Display snapshot of the whole session
    pub fn status(&self) -> StatusSnapshot {
        let calibration = self.engine.calibration();
        StatusSnapshot {
            status: SessionStatus::resolve(
                self.permission,
                self.engine.mode(),
                self.normalizer.last().is_some(),
            ),
            heading: self.normalizer.last().map(Heading::degrees),
            origin: calibration.origin().map(Heading::degrees),
            destination: calibration.destination().map(Heading::degrees),
            waypoints: calibration
                .waypoints()
                .iter()
                .map(|h| h.degrees())
                .collect(),
            count: self.engine.count(),
            notice: self.notice.clone(),
        }
    }

    // --- Persistence ---

    fn persist_count(&mut self) {
        if let Err(e) = write_count(&mut self.params, self.engine.count()) {
            log_error!("Failed to record count: {}", e);
        }
        self.flush();
    }

    fn persist_calibration(&mut self) {
        if let Err(e) = CalibrationParams::write_to(self.engine.calibration(), &mut self.params) {
            log_error!("Failed to record calibration: {}", e);
        }
        self.flush();
    }

    fn persist_tuning(&mut self) {
        let tuning = DetectionParams::from_config(self.engine.config(), self.engine.manual_step());
        if let Err(e) = tuning.write_to(&mut self.params) {
            log_error!("Failed to record tuning: {}", e);
        }
        self.flush();
    }

    fn flush(&mut self) {
        persistence::flush(&mut self.storage, &mut self.params);
    }
}
