use crate::flight_control::{
    condition::{ConditionWaiter, WaitError},
    control_law,
    direction::LaunchDirection,
    phase::AscentPhase,
    ports::{ActuationPort, PortError, TelemetryPort},
    telemetry::VesselSnapshot,
};
use crate::{info, phase};
use std::time::Duration;
use strum_macros::Display;
use tokio::time::{Instant, sleep};

/// Parameters of one ascent run, immutable for its duration.
#[derive(Debug, Clone, Copy)]
pub struct AscentParams {
    target_altitude_m: f64,
    direction: LaunchDirection,
}

impl AscentParams {
    /// Altitude below which the parachute stage fires during descent.
    pub const PARACHUTE_DEPLOY_ALTITUDE_M: f64 = 4000.0;
    /// Fuel fraction below which a tank counts as empty.
    pub const FUEL_EMPTY_FRAC: f64 = 0.1;
    /// Altitude above which the pitch profile turns toward orbit.
    pub const PITCH_DOWN_ALTITUDE_M: f64 = 3000.0;

    /// `target_altitude_m` is the desired apoapsis and periapsis in meters.
    /// A non-positive target would satisfy the apoapsis and periapsis exit
    /// conditions on the first poll, so it is rejected before any actuation.
    pub fn new(
        target_altitude_m: f64,
        direction: LaunchDirection,
    ) -> Result<Self, AscentError> {
        if target_altitude_m <= 0.0 {
            return Err(AscentError::InvalidTargetAltitude(target_altitude_m));
        }
        Ok(Self { target_altitude_m, direction })
    }

    pub fn target_altitude_m(&self) -> f64 { self.target_altitude_m }
    pub fn direction(&self) -> LaunchDirection { self.direction }
}

/// Why a phase aborted the run.
#[derive(Debug, Display)]
pub enum PhaseFailure {
    Telemetry(PortError),
    Actuation(PortError),
    Timeout,
    Cancelled,
}

impl From<WaitError> for PhaseFailure {
    fn from(value: WaitError) -> Self {
        match value {
            WaitError::Telemetry(e) => PhaseFailure::Telemetry(e),
            WaitError::Timeout => PhaseFailure::Timeout,
            WaitError::Cancelled => PhaseFailure::Cancelled,
        }
    }
}

#[derive(Debug, Display)]
pub enum AscentError {
    /// An unrecognized direction value, rejected before any actuation.
    InvalidDirection(String),
    /// A zero or negative target orbital altitude, rejected before any
    /// actuation.
    InvalidTargetAltitude(f64),
    /// The run aborted in `phase`. `last_seen` is the most recent snapshot
    /// the sequencer held, for diagnostic reporting; the vehicle is left in
    /// its current stage configuration since staging cannot be rolled back.
    PhaseFailed {
        phase: AscentPhase,
        cause: PhaseFailure,
        last_seen: Option<VesselSnapshot>,
    },
}

impl std::error::Error for AscentError {}

/// Drives one vessel from liftoff to a stable orbit and back down to
/// parachute deployment, one phase at a time.
///
/// The sequencer owns its `AscentPhase` exclusively and advances it strictly
/// forward. All suspension happens inside the condition waiter; there is no
/// internal parallelism and at most one sequencer drives one vessel.
pub struct AscentSequencer<'a> {
    telemetry: &'a dyn TelemetryPort,
    actuation: &'a dyn ActuationPort,
    params: AscentParams,
    waiter: ConditionWaiter,
    phase: AscentPhase,
    last_seen: Option<VesselSnapshot>,
}

impl<'a> AscentSequencer<'a> {
    /// Settle time after attitude or throttle profile changes.
    const SETTLE_DELAY: Duration = Duration::from_secs(1);
    /// Resource name of the first-stage booster fuel.
    const SOLID_FUEL: &'static str = "SolidFuel";
    /// Resource name of the second-stage fuel.
    const LIQUID_FUEL: &'static str = "LiquidFuel";

    pub fn new(
        telemetry: &'a dyn TelemetryPort,
        actuation: &'a dyn ActuationPort,
        params: AscentParams,
        waiter: ConditionWaiter,
    ) -> Self {
        Self::from_phase(telemetry, actuation, params, waiter, AscentPhase::Init)
    }

    /// Starts the sequencer in an arbitrary phase. Earlier phases are never
    /// executed, so any staging they would have performed is assumed done.
    pub fn from_phase(
        telemetry: &'a dyn TelemetryPort,
        actuation: &'a dyn ActuationPort,
        params: AscentParams,
        waiter: ConditionWaiter,
        phase: AscentPhase,
    ) -> Self {
        Self { telemetry, actuation, params, waiter, phase, last_seen: None }
    }

    pub fn phase(&self) -> AscentPhase { self.phase }

    /// Runs the remaining phases to completion.
    ///
    /// Any port failure, timeout or cancellation aborts immediately with the
    /// failing phase attached; no actuation command is ever retried, since a
    /// replayed staging command could fire the wrong stage.
    pub async fn run(&mut self) -> Result<(), AscentError> {
        info!(
            "Ascending to a {}m orbit, launching {}",
            self.params.target_altitude_m,
            self.params.direction
        );
        loop {
            // Staging entry actions are irreversible, so a cancellation that
            // arrived during the previous phase must stop the run before the
            // next phase acts.
            if self.waiter.cancel_token().is_cancelled() {
                return Err(AscentError::PhaseFailed {
                    phase: self.phase,
                    cause: PhaseFailure::Cancelled,
                    last_seen: self.last_seen.clone(),
                });
            }
            phase!("{}", self.phase);
            if let Err(cause) = self.exec_phase().await {
                return Err(AscentError::PhaseFailed {
                    phase: self.phase,
                    cause,
                    last_seen: self.last_seen.clone(),
                });
            }
            match self.phase.successor() {
                Some(next) => self.phase = next,
                None => {
                    info!("Ascent sequence complete");
                    return Ok(());
                }
            }
        }
    }

    async fn exec_phase(&mut self) -> Result<(), PhaseFailure> {
        match self.phase {
            AscentPhase::Init => self.init().await,
            AscentPhase::Liftoff => self.liftoff().await,
            AscentPhase::ThrottleDown => self.throttle_down().await,
            AscentPhase::DecoupleBoosters => self.decouple_boosters().await,
            AscentPhase::ApoapsisReached => self.apoapsis_reached().await,
            AscentPhase::PeriapsisRaise => self.raise_periapsis().await,
            AscentPhase::StableOrbit => self.stable_orbit().await,
            AscentPhase::DecoupleSecondStage => self.decouple_second_stage().await,
            AscentPhase::ParachuteArm => self.parachute_arm().await,
            AscentPhase::ParachuteDeploy => self.parachute_deploy().await,
        }
    }

    async fn wait_until<F>(&mut self, pred: F) -> Result<(), PhaseFailure>
    where F: Fn(&VesselSnapshot) -> bool {
        let snapshot = self.waiter.wait_until(self.telemetry, pred).await?;
        self.last_seen = Some(snapshot);
        Ok(())
    }

    fn act(&self, res: Result<(), PortError>) -> Result<(), PhaseFailure> {
        res.map_err(PhaseFailure::Actuation)
    }

    async fn init(&mut self) -> Result<(), PhaseFailure> {
        let heading = self.params.direction.heading_deg();
        let a = self.actuation;
        self.act(a.engage_autopilot().await)?;
        self.act(a.set_target_pitch_and_heading(90.0, heading).await)?;
        self.act(a.set_throttle(1.0).await)?;
        self.waiter.settle(Self::SETTLE_DELAY).await?;
        Ok(())
    }

    async fn liftoff(&mut self) -> Result<(), PhaseFailure> {
        self.act(self.actuation.activate_next_stage().await)?;
        self.wait_until(|s| s.altitude_m() > AscentParams::PITCH_DOWN_ALTITUDE_M).await
    }

    async fn throttle_down(&mut self) -> Result<(), PhaseFailure> {
        self.act(self.actuation.set_throttle(0.7).await)?;
        self.act(self.actuation.set_target_pitch(45.0).await)?;
        self.wait_until(|s| s.fuel_fraction(Self::SOLID_FUEL) < AscentParams::FUEL_EMPTY_FRAC)
            .await
    }

    async fn decouple_boosters(&mut self) -> Result<(), PhaseFailure> {
        self.act(self.actuation.activate_next_stage().await)?;
        let target = self.params.target_altitude_m;
        self.wait_until(move |s| s.apoapsis_altitude_m() > target).await
    }

    async fn apoapsis_reached(&mut self) -> Result<(), PhaseFailure> {
        let a = self.actuation;
        self.act(a.set_target_pitch(0.0).await)?;
        self.act(a.set_throttle(0.0).await)?;
        self.act(a.set_rcs(true).await)?;
        self.waiter.settle(Self::SETTLE_DELAY).await?;
        Ok(())
    }

    /// Bang-bang burn loop near apoapsis until the periapsis clears the
    /// target altitude. Unlike the plain waits this commands the throttle on
    /// every sample, so it carries its own deadline and cancellation checks.
    async fn raise_periapsis(&mut self) -> Result<(), PhaseFailure> {
        let deadline = self.waiter.timeout().map(|t| Instant::now() + t);
        loop {
            if self.waiter.cancel_token().is_cancelled() {
                return Err(PhaseFailure::Cancelled);
            }
            let snapshot =
                self.telemetry.read_snapshot().await.map_err(PhaseFailure::Telemetry)?;
            let periapsis = snapshot.periapsis_altitude_m();
            let tta = snapshot.time_to_apoapsis_s();
            self.last_seen = Some(snapshot);
            if periapsis >= self.params.target_altitude_m {
                info!("At target periapsis: {periapsis}");
                return Ok(());
            }
            let throttle = control_law::periapsis_raise_throttle(tta);
            self.act(self.actuation.set_throttle(throttle).await)?;
            if let Some(d) = deadline {
                if Instant::now() >= d {
                    return Err(PhaseFailure::Timeout);
                }
            }
            tokio::select! {
                () = self.waiter.cancel_token().cancelled() => return Err(PhaseFailure::Cancelled),
                () = sleep(self.waiter.poll_interval()) => {}
            }
        }
    }

    async fn stable_orbit(&mut self) -> Result<(), PhaseFailure> {
        self.act(self.actuation.set_rcs(false).await)?;
        self.act(self.actuation.disengage_autopilot().await)
    }

    async fn decouple_second_stage(&mut self) -> Result<(), PhaseFailure> {
        self.wait_until(|s| s.fuel_fraction(Self::LIQUID_FUEL) < AscentParams::FUEL_EMPTY_FRAC)
            .await?;
        self.act(self.actuation.disengage_autopilot().await)?;
        self.act(self.actuation.activate_next_stage().await)
    }

    async fn parachute_arm(&mut self) -> Result<(), PhaseFailure> {
        self.act(self.actuation.set_sas(false).await)?;
        self.wait_until(|s| s.altitude_m() < AscentParams::PARACHUTE_DEPLOY_ALTITUDE_M).await
    }

    async fn parachute_deploy(&mut self) -> Result<(), PhaseFailure> {
        self.act(self.actuation.activate_next_stage().await)
    }
}
