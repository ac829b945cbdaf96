use super::control::ControlResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// Request type for the /control/throttle endpoint.
#[derive(serde::Serialize, Debug)]
pub(crate) struct ThrottleRequest {
    /// The commanded throttle fraction, already clamped to [0, 1].
    pub(crate) throttle: f64,
}

impl JSONBodyHTTPRequestType for ThrottleRequest {
    type Body = ThrottleRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for ThrottleRequest {
    type Response = ControlResponse;
    fn endpoint(&self) -> &'static str { "/control/throttle" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Put }
}
