pub mod response_common;

pub mod control;
pub mod stage;
pub mod telemetry;
