use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};
use super::telemetry::TelemetryResponse;

#[derive(Debug)]
pub struct TelemetryRequest {}

impl NoBodyHTTPRequestType for TelemetryRequest {}

impl HTTPRequestType for TelemetryRequest {
    type Response = TelemetryResponse;
    fn endpoint(&self) -> &'static str { "/telemetry" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
