use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};
use super::stage::StageResponse;

/// Request type for the /control/stage endpoint.
///
/// Staging is irreversible on the backend side. Callers must never resend
/// this request on failure since a duplicate could fire the wrong stage.
#[derive(Debug)]
pub struct StageRequest {}

impl NoBodyHTTPRequestType for StageRequest {}

impl HTTPRequestType for StageRequest {
    type Response = StageResponse;
    fn endpoint(&self) -> &'static str { "/control/stage" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}
