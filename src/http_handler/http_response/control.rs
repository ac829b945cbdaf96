use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;

/// Acknowledgement returned by all `/control/*` mutator endpoints.
#[derive(serde::Deserialize, Debug)]
pub struct ControlResponse {
    accepted: bool,
}

impl SerdeJSONBodyHTTPResponseType for ControlResponse {}

impl ControlResponse {
    pub fn is_accepted(&self) -> bool { self.accepted }
}
