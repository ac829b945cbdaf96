use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;
use std::collections::HashMap;

/// Wire form of one point-in-time vessel telemetry reading.
#[derive(serde::Deserialize, Debug)]
pub struct TelemetryResponse {
    altitude: f64,
    fuel: HashMap<String, f64>,
    apoapsis_altitude: f64,
    periapsis_altitude: f64,
    time_to_apoapsis: f64,
    timestamp: chrono::DateTime<chrono::Utc>,
}

impl SerdeJSONBodyHTTPResponseType for TelemetryResponse {}

impl TelemetryResponse {
    pub fn altitude(&self) -> f64 { self.altitude }
    pub fn fuel(&self) -> &HashMap<String, f64> { &self.fuel }
    pub fn apoapsis_altitude(&self) -> f64 { self.apoapsis_altitude }
    pub fn periapsis_altitude(&self) -> f64 { self.periapsis_altitude }
    pub fn time_to_apoapsis(&self) -> f64 { self.time_to_apoapsis }
    pub fn timestamp(&self) -> chrono::DateTime<chrono::Utc> { self.timestamp }
}
