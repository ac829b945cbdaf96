use super::condition::{ConditionWaiter, WaitError};
use super::control_law;
use super::direction::LaunchDirection;
use super::phase::AscentPhase;
use super::ports::{ActuationPort, PortError, TelemetryPort};
use super::sequencer::{AscentError, AscentParams, AscentSequencer, PhaseFailure};
use super::telemetry::VesselSnapshot;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const TARGET_ALTITUDE: f64 = 100_000.0;

#[derive(Debug, Clone, PartialEq)]
enum Actuation {
    Throttle(f64),
    Pitch(f64),
    PitchAndHeading(f64, f64),
    Autopilot(bool),
    Rcs(bool),
    Sas(bool),
    Stage,
}

/// Test double for both ports: replays a queued snapshot script (holding the
/// last entry once the queue runs dry) and records every actuation in order.
struct ScriptedVessel {
    script: Mutex<VecDeque<VesselSnapshot>>,
    calls: Mutex<Vec<Actuation>>,
    reads: Mutex<usize>,
    fail_staging: bool,
}

impl ScriptedVessel {
    fn new(script: Vec<VesselSnapshot>) -> Self {
        Self {
            script: Mutex::new(VecDeque::from(script)),
            calls: Mutex::new(Vec::new()),
            reads: Mutex::new(0),
            fail_staging: false,
        }
    }

    fn with_failing_staging(script: Vec<VesselSnapshot>) -> Self {
        Self { fail_staging: true, ..Self::new(script) }
    }

    fn calls(&self) -> Vec<Actuation> { self.calls.lock().unwrap().clone() }
    fn reads(&self) -> usize { *self.reads.lock().unwrap() }

    fn stage_count(&self) -> usize {
        self.calls().iter().filter(|c| **c == Actuation::Stage).count()
    }

    fn record(&self, call: Actuation) -> Result<(), PortError> {
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl TelemetryPort for ScriptedVessel {
    async fn read_snapshot(&self) -> Result<VesselSnapshot, PortError> {
        let mut script = self.script.lock().unwrap();
        let snapshot = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        };
        let snapshot = snapshot
            .ok_or_else(|| PortError::TelemetryUnavailable(String::from("script empty")))?;
        *self.reads.lock().unwrap() += 1;
        Ok(snapshot)
    }
}

#[async_trait]
impl ActuationPort for ScriptedVessel {
    async fn set_throttle(&self, fraction: f64) -> Result<(), PortError> {
        self.record(Actuation::Throttle(fraction))
    }
    async fn set_target_pitch(&self, pitch_deg: f64) -> Result<(), PortError> {
        self.record(Actuation::Pitch(pitch_deg))
    }
    async fn set_target_pitch_and_heading(
        &self,
        pitch_deg: f64,
        heading_deg: f64,
    ) -> Result<(), PortError> {
        self.record(Actuation::PitchAndHeading(pitch_deg, heading_deg))
    }
    async fn engage_autopilot(&self) -> Result<(), PortError> {
        self.record(Actuation::Autopilot(true))
    }
    async fn disengage_autopilot(&self) -> Result<(), PortError> {
        self.record(Actuation::Autopilot(false))
    }
    async fn set_rcs(&self, enabled: bool) -> Result<(), PortError> {
        self.record(Actuation::Rcs(enabled))
    }
    async fn set_sas(&self, enabled: bool) -> Result<(), PortError> {
        self.record(Actuation::Sas(enabled))
    }
    async fn activate_next_stage(&self) -> Result<(), PortError> {
        if self.fail_staging {
            return Err(PortError::ActuationFailed(String::from("staging inhibited")));
        }
        self.record(Actuation::Stage)
    }
}

fn snap(
    altitude: f64,
    solid: f64,
    liquid: f64,
    apoapsis: f64,
    periapsis: f64,
    tta: f64,
) -> VesselSnapshot {
    let fuel = HashMap::from([
        (String::from("SolidFuel"), solid),
        (String::from("LiquidFuel"), liquid),
    ]);
    VesselSnapshot::new(altitude, fuel, apoapsis, periapsis, tta, Utc::now())
}

fn test_waiter(cancel: CancellationToken) -> ConditionWaiter {
    ConditionWaiter::new(Duration::from_millis(100), Some(Duration::from_secs(60)), cancel)
}

fn test_params() -> AscentParams {
    AscentParams::new(TARGET_ALTITUDE, LaunchDirection::East).unwrap()
}

#[test]
fn test_direction_headings() {
    assert_eq!(LaunchDirection::North.heading_deg(), 0.0);
    assert_eq!(LaunchDirection::East.heading_deg(), 90.0);
    assert_eq!(LaunchDirection::South.heading_deg(), 180.0);
    assert_eq!(LaunchDirection::West.heading_deg(), 270.0);
}

#[test]
fn test_direction_parsing() {
    assert_eq!(LaunchDirection::try_from("east").unwrap(), LaunchDirection::East);
    assert_eq!(LaunchDirection::try_from("NORTH").unwrap(), LaunchDirection::North);
    assert_eq!(LaunchDirection::try_from("West").unwrap(), LaunchDirection::West);
    assert!(matches!(
        LaunchDirection::try_from("up"),
        Err(AscentError::InvalidDirection(_))
    ));
}

#[test]
fn test_params_reject_nonpositive_target_altitude() {
    for bad in [0.0, -80_000.0] {
        assert!(matches!(
            AscentParams::new(bad, LaunchDirection::East),
            Err(AscentError::InvalidTargetAltitude(_))
        ));
    }
    assert!(AscentParams::new(1.0, LaunchDirection::East).is_ok());
}

#[test]
fn test_phase_chain_is_strictly_forward_and_terminal() {
    let mut walked = vec![AscentPhase::Init];
    while let Some(next) = walked.last().unwrap().successor() {
        assert!(!walked.contains(&next), "phase {next} revisited");
        walked.push(next);
    }
    assert_eq!(walked.len(), 10);
    assert_eq!(*walked.last().unwrap(), AscentPhase::ParachuteDeploy);
}

#[test]
fn test_periapsis_raise_throttle_law() {
    assert_eq!(control_law::periapsis_raise_throttle(10.0), 1.0);
    assert_eq!(control_law::periapsis_raise_throttle(29.9), 1.0);
    assert_eq!(control_law::periapsis_raise_throttle(30.0), 0.0);
    assert_eq!(control_law::periapsis_raise_throttle(50.0), 0.0);
    // No hysteresis: output depends on the sample alone.
    for (tta, expected) in [(40.0, 0.0), (10.0, 1.0), (45.0, 0.0), (5.0, 1.0)] {
        assert_eq!(control_law::periapsis_raise_throttle(tta), expected);
    }
}

#[tokio::test(start_paused = true)]
async fn test_waiter_returns_on_first_satisfying_poll() {
    let script: Vec<VesselSnapshot> =
        (0..=10).map(|i| snap(f64::from(i) * 500.0, 1.0, 1.0, -1.0, -1.0, 0.0)).collect();
    let vessel = ScriptedVessel::new(script);
    let waiter = test_waiter(CancellationToken::new());
    let found = waiter.wait_until(&vessel, |s| s.altitude_m() > 3000.0).await.unwrap();
    // 0, 500, .. 3000 fail, 3500 is the first passing sample.
    assert_eq!(found.altitude_m(), 3500.0);
    assert_eq!(vessel.reads(), 8);
}

#[tokio::test(start_paused = true)]
async fn test_waiter_times_out() {
    let vessel = ScriptedVessel::new(vec![snap(0.0, 1.0, 1.0, -1.0, -1.0, 0.0)]);
    let waiter = ConditionWaiter::new(
        Duration::from_millis(100),
        Some(Duration::from_secs(2)),
        CancellationToken::new(),
    );
    let res = waiter.wait_until(&vessel, |s| s.altitude_m() > 3000.0).await;
    assert!(matches!(res, Err(WaitError::Timeout)));
}

#[tokio::test(start_paused = true)]
async fn test_waiter_observes_cancellation() {
    let vessel = ScriptedVessel::new(vec![snap(0.0, 1.0, 1.0, -1.0, -1.0, 0.0)]);
    let cancel = CancellationToken::new();
    let waiter = test_waiter(cancel.clone());
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(250)).await;
        cancel_clone.cancel();
    });
    let res = waiter.wait_until(&vessel, |s| s.altitude_m() > 3000.0).await;
    assert!(matches!(res, Err(WaitError::Cancelled)));
    // Cancellation fires mid-sleep, so at most one more poll can have happened.
    assert!(vessel.reads() <= 3);
}

#[tokio::test(start_paused = true)]
async fn test_waiter_propagates_telemetry_failure() {
    let vessel = ScriptedVessel::new(vec![]);
    let waiter = test_waiter(CancellationToken::new());
    let res = waiter.wait_until(&vessel, |s| s.altitude_m() > 3000.0).await;
    assert!(matches!(res, Err(WaitError::Telemetry(PortError::TelemetryUnavailable(_)))));
}

#[tokio::test(start_paused = true)]
async fn test_booster_decouple_keys_on_solid_fuel_only() {
    // LiquidFuel stays full the whole time; only the draining SolidFuel may
    // end ThrottleDown. Apoapsis never reaches target, so the run times out
    // inside DecoupleBoosters after exactly one staging action.
    let script = vec![
        snap(4000.0, 1.0, 1.0, 10_000.0, -1.0, 40.0),
        snap(5000.0, 0.6, 1.0, 12_000.0, -1.0, 42.0),
        snap(6000.0, 0.3, 1.0, 14_000.0, -1.0, 44.0),
        snap(7000.0, 0.05, 1.0, 16_000.0, -1.0, 46.0),
    ];
    let vessel = ScriptedVessel::new(script);
    let waiter = ConditionWaiter::new(
        Duration::from_millis(100),
        Some(Duration::from_secs(2)),
        CancellationToken::new(),
    );
    let mut sequencer = AscentSequencer::from_phase(
        &vessel,
        &vessel,
        test_params(),
        waiter,
        AscentPhase::ThrottleDown,
    );
    let res = sequencer.run().await;
    match res {
        Err(AscentError::PhaseFailed { phase, cause: PhaseFailure::Timeout, .. }) => {
            assert_eq!(phase, AscentPhase::DecoupleBoosters);
        }
        other => panic!("expected timeout in DecoupleBoosters, got {other:?}"),
    }
    assert_eq!(vessel.stage_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_periapsis_raise_follows_bang_bang_law() {
    // Alternating time-to-apoapsis around the 30s window; periapsis clears
    // the target on the fifth sample, which must not command a throttle.
    let script = vec![
        snap(95_000.0, 0.0, 0.8, 101_000.0, -1.0, 50.0),
        snap(95_000.0, 0.0, 0.7, 101_000.0, 20_000.0, 20.0),
        snap(95_000.0, 0.0, 0.6, 101_000.0, 50_000.0, 45.0),
        snap(95_000.0, 0.0, 0.5, 101_000.0, 80_000.0, 15.0),
        snap(95_000.0, 0.0, 0.4, 101_000.0, 100_500.0, 25.0),
        // Remaining phases: second stage runs dry, then descent.
        snap(95_000.0, 0.0, 0.05, 101_000.0, 100_500.0, 25.0),
        snap(12_000.0, 0.0, 0.0, 101_000.0, 100_500.0, 0.0),
        snap(3500.0, 0.0, 0.0, 101_000.0, 100_500.0, 0.0),
    ];
    let vessel = ScriptedVessel::new(script);
    let waiter = test_waiter(CancellationToken::new());
    let mut sequencer = AscentSequencer::from_phase(
        &vessel,
        &vessel,
        test_params(),
        waiter,
        AscentPhase::PeriapsisRaise,
    );
    sequencer.run().await.unwrap();

    let throttles: Vec<f64> = vessel
        .calls()
        .iter()
        .filter_map(|c| match c {
            Actuation::Throttle(t) => Some(*t),
            _ => None,
        })
        .collect();
    assert_eq!(throttles, vec![0.0, 1.0, 0.0, 1.0]);
    // Started past all ascent stagings: only second-stage decouple and
    // parachute deploy may fire.
    assert_eq!(vessel.stage_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_mid_periapsis_raise_stops_actuation() {
    let script = vec![snap(95_000.0, 0.0, 0.8, 101_000.0, -1.0, 50.0)];
    let vessel = ScriptedVessel::new(script);
    let cancel = CancellationToken::new();
    let waiter = test_waiter(cancel.clone());
    let mut sequencer = AscentSequencer::from_phase(
        &vessel,
        &vessel,
        test_params(),
        waiter,
        AscentPhase::PeriapsisRaise,
    );
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(250)).await;
        cancel_clone.cancel();
    });
    let res = sequencer.run().await;
    match res {
        Err(AscentError::PhaseFailed { phase, cause: PhaseFailure::Cancelled, .. }) => {
            assert_eq!(phase, AscentPhase::PeriapsisRaise);
        }
        other => panic!("expected cancellation in PeriapsisRaise, got {other:?}"),
    }
    // Only bang-bang throttle commands before the abort, nothing after.
    let calls = vessel.calls();
    assert!(calls.iter().all(|c| matches!(c, Actuation::Throttle(_))));
    assert!(calls.len() <= 4);
    assert_eq!(vessel.stage_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_at_phase_boundary_blocks_entry_staging() {
    // A cancellation that lands before a phase starts must stop the run
    // before that phase's entry actions fire; Liftoff opens with the
    // irreversible staging command.
    let script = vec![snap(0.0, 1.0, 1.0, -1.0, -1.0, 0.0)];
    let vessel = ScriptedVessel::new(script);
    let cancel = CancellationToken::new();
    cancel.cancel();
    let waiter = test_waiter(cancel.clone());
    let mut sequencer = AscentSequencer::from_phase(
        &vessel,
        &vessel,
        test_params(),
        waiter,
        AscentPhase::Liftoff,
    );
    let res = sequencer.run().await;
    match res {
        Err(AscentError::PhaseFailed { phase, cause: PhaseFailure::Cancelled, .. }) => {
            assert_eq!(phase, AscentPhase::Liftoff);
        }
        other => panic!("expected cancellation before Liftoff, got {other:?}"),
    }
    assert_eq!(vessel.stage_count(), 0);
    assert!(vessel.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_staging_failure_aborts_without_retry() {
    let script = vec![snap(0.0, 1.0, 1.0, -1.0, -1.0, 0.0)];
    let vessel = ScriptedVessel::with_failing_staging(script);
    let waiter = test_waiter(CancellationToken::new());
    let mut sequencer = AscentSequencer::new(&vessel, &vessel, test_params(), waiter);
    let res = sequencer.run().await;
    match res {
        Err(AscentError::PhaseFailed { phase, cause: PhaseFailure::Actuation(_), .. }) => {
            assert_eq!(phase, AscentPhase::Liftoff);
        }
        other => panic!("expected actuation failure in Liftoff, got {other:?}"),
    }
    assert_eq!(vessel.stage_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_full_ascent_stages_exactly_four_times() {
    let script = vec![
        // Liftoff: climb through the pitch-down altitude.
        snap(0.0, 1.0, 1.0, -1.0, -1.0, 0.0),
        snap(1500.0, 0.9, 1.0, 5000.0, -1.0, 30.0),
        snap(3200.0, 0.8, 1.0, 9000.0, -1.0, 40.0),
        // ThrottleDown: boosters drain.
        snap(4200.0, 0.6, 1.0, 15_000.0, -1.0, 45.0),
        snap(5200.0, 0.3, 1.0, 25_000.0, -1.0, 50.0),
        snap(6200.0, 0.05, 1.0, 35_000.0, -1.0, 55.0),
        // DecoupleBoosters: burn until apoapsis clears the target.
        snap(15_000.0, 0.0, 0.9, 60_000.0, -1.0, 60.0),
        snap(30_000.0, 0.0, 0.8, 85_000.0, -1.0, 65.0),
        snap(45_000.0, 0.0, 0.7, 120_000.0, -1.0, 70.0),
        // PeriapsisRaise: coast, burn inside the window, reach target.
        snap(80_000.0, 0.0, 0.6, 120_000.0, -1.0, 50.0),
        snap(90_000.0, 0.0, 0.5, 120_000.0, 30_000.0, 20.0),
        snap(95_000.0, 0.0, 0.4, 120_000.0, 100_500.0, 28.0),
        // DecoupleSecondStage: second stage runs dry.
        snap(95_000.0, 0.0, 0.5, 120_000.0, 100_500.0, 28.0),
        snap(95_000.0, 0.0, 0.05, 120_000.0, 100_500.0, 28.0),
        // ParachuteArm: descend below the deploy altitude.
        snap(12_000.0, 0.0, 0.0, 120_000.0, 100_500.0, 0.0),
        snap(3500.0, 0.0, 0.0, 120_000.0, 100_500.0, 0.0),
    ];
    let vessel = ScriptedVessel::new(script);
    let waiter = test_waiter(CancellationToken::new());
    let mut sequencer = AscentSequencer::new(&vessel, &vessel, test_params(), waiter);
    sequencer.run().await.unwrap();

    assert_eq!(vessel.stage_count(), 4);
    assert_eq!(
        vessel.calls(),
        vec![
            Actuation::Autopilot(true),
            Actuation::PitchAndHeading(90.0, 90.0),
            Actuation::Throttle(1.0),
            Actuation::Stage, // booster ignition
            Actuation::Throttle(0.7),
            Actuation::Pitch(45.0),
            Actuation::Stage, // booster decouple
            Actuation::Pitch(0.0),
            Actuation::Throttle(0.0),
            Actuation::Rcs(true),
            Actuation::Throttle(0.0),
            Actuation::Throttle(1.0),
            Actuation::Rcs(false),
            Actuation::Autopilot(false),
            Actuation::Autopilot(false),
            Actuation::Stage, // second-stage decouple
            Actuation::Sas(false),
            Actuation::Stage, // parachute deploy
        ]
    );
}
