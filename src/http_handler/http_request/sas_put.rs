use super::control::ControlResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// Request type for the /control/sas endpoint.
#[derive(serde::Serialize, Debug)]
pub(crate) struct SasRequest {
    /// Whether the stability assist system holds the current attitude.
    pub(crate) enabled: bool,
}

impl JSONBodyHTTPRequestType for SasRequest {
    type Body = SasRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for SasRequest {
    type Response = ControlResponse;
    fn endpoint(&self) -> &'static str { "/control/sas" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Put }
}
