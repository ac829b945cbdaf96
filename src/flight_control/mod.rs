mod condition;
pub(crate) mod control_law;
mod direction;
mod phase;
pub(crate) mod ports;
mod remote_vessel;
mod sequencer;
mod telemetry;

#[cfg(test)]
mod tests;

pub use condition::{ConditionWaiter, WaitError};
pub use direction::LaunchDirection;
pub use phase::AscentPhase;
pub use remote_vessel::RemoteVessel;
pub use sequencer::{AscentError, AscentParams, AscentSequencer, PhaseFailure};
pub use telemetry::VesselSnapshot;
