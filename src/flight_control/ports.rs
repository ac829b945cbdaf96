use crate::flight_control::telemetry::VesselSnapshot;
use async_trait::async_trait;
use strum_macros::Display;

/// Failure of one of the two vessel ports. Both variants abort the running
/// ascent: telemetry cannot be trusted once unreadable, and actuation
/// commands must not be retried since staging is irreversible.
#[derive(Debug, Display, Clone)]
pub enum PortError {
    TelemetryUnavailable(String),
    ActuationFailed(String),
}

impl std::error::Error for PortError {}

/// Pull-based source of truth for vessel state.
///
/// `read_snapshot` is the primitive: one backend round-trip yields the whole
/// snapshot, and the single-value reads delegate to it.
#[async_trait]
pub trait TelemetryPort: Send + Sync {
    async fn read_snapshot(&self) -> Result<VesselSnapshot, PortError>;

    async fn read_altitude(&self) -> Result<f64, PortError> {
        Ok(self.read_snapshot().await?.altitude_m())
    }
    async fn read_fuel(&self, resource: &str) -> Result<f64, PortError> {
        Ok(self.read_snapshot().await?.fuel_fraction(resource))
    }
    async fn read_apoapsis_altitude(&self) -> Result<f64, PortError> {
        Ok(self.read_snapshot().await?.apoapsis_altitude_m())
    }
    async fn read_periapsis_altitude(&self) -> Result<f64, PortError> {
        Ok(self.read_snapshot().await?.periapsis_altitude_m())
    }
    async fn read_time_to_apoapsis(&self) -> Result<f64, PortError> {
        Ok(self.read_snapshot().await?.time_to_apoapsis_s())
    }
}

/// Mutators for the vehicle. `activate_next_stage` is irreversible and
/// strictly ordered; every other command is idempotent.
#[async_trait]
pub trait ActuationPort: Send + Sync {
    async fn set_throttle(&self, fraction: f64) -> Result<(), PortError>;
    async fn set_target_pitch(&self, pitch_deg: f64) -> Result<(), PortError>;
    async fn set_target_pitch_and_heading(
        &self,
        pitch_deg: f64,
        heading_deg: f64,
    ) -> Result<(), PortError>;
    async fn engage_autopilot(&self) -> Result<(), PortError>;
    async fn disengage_autopilot(&self) -> Result<(), PortError>;
    async fn set_rcs(&self, enabled: bool) -> Result<(), PortError>;
    async fn set_sas(&self, enabled: bool) -> Result<(), PortError>;
    async fn activate_next_stage(&self) -> Result<(), PortError>;
}
