use super::http_response::{control, stage, telemetry};

pub mod attitude_put;
pub mod autopilot_put;
pub mod rcs_put;
pub mod request_common;
pub mod sas_put;
pub mod stage_post;
pub mod telemetry_get;
pub mod throttle_put;
