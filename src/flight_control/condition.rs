use crate::flight_control::ports::{PortError, TelemetryPort};
use crate::flight_control::telemetry::VesselSnapshot;
use std::time::Duration;
use strum_macros::Display;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Display)]
pub enum WaitError {
    Telemetry(PortError),
    Timeout,
    Cancelled,
}

impl std::error::Error for WaitError {}

/// Blocks the calling flow until a telemetry predicate becomes true, by
/// sampling the telemetry port at a fixed poll interval.
///
/// Every iteration fetches a fresh snapshot, so a satisfied predicate always
/// refers to a reading at most one poll interval old. A deadline and the
/// cancellation token bound every wait; cancellation is observed both before
/// each poll and while sleeping between polls.
pub struct ConditionWaiter {
    poll_interval: Duration,
    timeout: Option<Duration>,
    cancel: CancellationToken,
}

impl ConditionWaiter {
    /// Default time between two telemetry polls. Coarser wastes precision on
    /// the exit thresholds, finer wastes backend round-trips.
    pub const DEF_POLL_INTERVAL: Duration = Duration::from_millis(100);

    pub fn new(
        poll_interval: Duration,
        timeout: Option<Duration>,
        cancel: CancellationToken,
    ) -> Self {
        Self { poll_interval, timeout, cancel }
    }

    pub fn poll_interval(&self) -> Duration { self.poll_interval }
    pub fn timeout(&self) -> Option<Duration> { self.timeout }
    pub fn cancel_token(&self) -> &CancellationToken { &self.cancel }

    /// Waits until `pred` holds for a freshly fetched snapshot and returns
    /// that snapshot.
    pub async fn wait_until<F>(
        &self,
        telemetry: &dyn TelemetryPort,
        pred: F,
    ) -> Result<VesselSnapshot, WaitError>
    where
        F: Fn(&VesselSnapshot) -> bool,
    {
        let deadline = self.timeout.map(|t| Instant::now() + t);
        loop {
            if self.cancel.is_cancelled() {
                return Err(WaitError::Cancelled);
            }
            let snapshot = telemetry.read_snapshot().await.map_err(WaitError::Telemetry)?;
            if pred(&snapshot) {
                return Ok(snapshot);
            }
            if let Some(d) = deadline {
                if Instant::now() >= d {
                    return Err(WaitError::Timeout);
                }
            }
            tokio::select! {
                () = self.cancel.cancelled() => return Err(WaitError::Cancelled),
                () = sleep(self.poll_interval) => {}
            }
        }
    }

    /// Sleeps for a fixed settle period, aborting early on cancellation.
    pub async fn settle(&self, duration: Duration) -> Result<(), WaitError> {
        tokio::select! {
            () = self.cancel.cancelled() => Err(WaitError::Cancelled),
            () = sleep(duration) => Ok(()),
        }
    }
}
