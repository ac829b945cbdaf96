use super::control::ControlResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// Request type for the /control/rcs endpoint.
#[derive(serde::Serialize, Debug)]
pub(crate) struct RcsRequest {
    /// Whether the reaction control system thrusters are active.
    pub(crate) enabled: bool,
}

impl JSONBodyHTTPRequestType for RcsRequest {
    type Body = RcsRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for RcsRequest {
    type Response = ControlResponse;
    fn endpoint(&self) -> &'static str { "/control/rcs" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Put }
}
