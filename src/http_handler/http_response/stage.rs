use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;

/// Returned by `POST /control/stage`. Carries the stage index the vehicle
/// is on after the (irreversible) staging action was applied.
#[derive(serde::Deserialize, Debug)]
pub struct StageResponse {
    stage: u32,
}

impl SerdeJSONBodyHTTPResponseType for StageResponse {}

impl StageResponse {
    pub fn stage(&self) -> u32 { self.stage }
}
