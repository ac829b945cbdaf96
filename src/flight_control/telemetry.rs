use crate::http_handler::http_response::telemetry::TelemetryResponse;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A point-in-time, read-only view of the vessel state.
///
/// Snapshots are fetched fresh on every poll and never cached, so a value
/// held by a caller is at most one poll interval old. Fuel levels are
/// reported per resource name as a fraction of capacity remaining.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselSnapshot {
    altitude_m: f64,
    fuel: HashMap<String, f64>,
    apoapsis_altitude_m: f64,
    periapsis_altitude_m: f64,
    time_to_apoapsis_s: f64,
    timestamp: DateTime<Utc>,
}

impl VesselSnapshot {
    pub fn new(
        altitude_m: f64,
        fuel: HashMap<String, f64>,
        apoapsis_altitude_m: f64,
        periapsis_altitude_m: f64,
        time_to_apoapsis_s: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            altitude_m,
            fuel,
            apoapsis_altitude_m,
            periapsis_altitude_m,
            time_to_apoapsis_s,
            timestamp,
        }
    }

    pub fn altitude_m(&self) -> f64 { self.altitude_m }
    pub fn apoapsis_altitude_m(&self) -> f64 { self.apoapsis_altitude_m }
    pub fn periapsis_altitude_m(&self) -> f64 { self.periapsis_altitude_m }
    pub fn time_to_apoapsis_s(&self) -> f64 { self.time_to_apoapsis_s }
    pub fn timestamp(&self) -> DateTime<Utc> { self.timestamp }

    /// Remaining fraction of the named resource. Resources the backend does
    /// not report are treated as empty.
    pub fn fuel_fraction(&self, resource: &str) -> f64 {
        self.fuel.get(resource).copied().unwrap_or(0.0)
    }
}

impl From<TelemetryResponse> for VesselSnapshot {
    fn from(value: TelemetryResponse) -> Self {
        Self {
            altitude_m: value.altitude(),
            fuel: value.fuel().clone(),
            apoapsis_altitude_m: value.apoapsis_altitude(),
            periapsis_altitude_m: value.periapsis_altitude(),
            time_to_apoapsis_s: value.time_to_apoapsis(),
            timestamp: value.timestamp(),
        }
    }
}
