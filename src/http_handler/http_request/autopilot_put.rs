use super::control::ControlResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// Request type for the /control/autopilot endpoint.
#[derive(serde::Serialize, Debug)]
pub(crate) struct AutopilotRequest {
    /// Whether the autopilot should steer toward the commanded attitude.
    pub(crate) engaged: bool,
}

impl JSONBodyHTTPRequestType for AutopilotRequest {
    type Body = AutopilotRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for AutopilotRequest {
    type Response = ControlResponse;
    fn endpoint(&self) -> &'static str { "/control/autopilot" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Put }
}
