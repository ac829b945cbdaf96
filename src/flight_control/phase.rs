use strum_macros::Display;

/// The sequencer's explicit state. Phases advance strictly forward through
/// `successor()`; no phase is ever revisited or skipped.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum AscentPhase {
    Init,
    Liftoff,
    ThrottleDown,
    DecoupleBoosters,
    ApoapsisReached,
    PeriapsisRaise,
    StableOrbit,
    DecoupleSecondStage,
    ParachuteArm,
    ParachuteDeploy,
}

impl AscentPhase {
    /// The next phase in the fixed staging topology, `None` once terminal.
    pub fn successor(self) -> Option<AscentPhase> {
        match self {
            AscentPhase::Init => Some(AscentPhase::Liftoff),
            AscentPhase::Liftoff => Some(AscentPhase::ThrottleDown),
            AscentPhase::ThrottleDown => Some(AscentPhase::DecoupleBoosters),
            AscentPhase::DecoupleBoosters => Some(AscentPhase::ApoapsisReached),
            AscentPhase::ApoapsisReached => Some(AscentPhase::PeriapsisRaise),
            AscentPhase::PeriapsisRaise => Some(AscentPhase::StableOrbit),
            AscentPhase::StableOrbit => Some(AscentPhase::DecoupleSecondStage),
            AscentPhase::DecoupleSecondStage => Some(AscentPhase::ParachuteArm),
            AscentPhase::ParachuteArm => Some(AscentPhase::ParachuteDeploy),
            AscentPhase::ParachuteDeploy => None,
        }
    }
}
