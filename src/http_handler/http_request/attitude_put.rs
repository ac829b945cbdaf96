use super::control::ControlResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// Request type for the /control/attitude endpoint.
///
/// A request without a heading retargets pitch only and leaves the current
/// heading untouched.
#[derive(serde::Serialize, Debug)]
pub(crate) struct AttitudeRequest {
    /// The autopilot target pitch in degrees.
    pub(crate) pitch: f64,
    /// The autopilot target heading in degrees, if it should change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) heading: Option<f64>,
}

impl JSONBodyHTTPRequestType for AttitudeRequest {
    type Body = AttitudeRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for AttitudeRequest {
    type Response = ControlResponse;
    fn endpoint(&self) -> &'static str { "/control/attitude" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Put }
}
