/// Time-to-apoapsis threshold below which the periapsis-raise burn is on.
pub const BURN_WINDOW_S: f64 = 30.0;

/// Bang-bang throttle law for the periapsis-raise phase.
///
/// Full throttle while the vessel is within the burn window ahead of
/// apoapsis, zero otherwise. The comparison is strict with no hysteresis;
/// the effective tolerance is whatever one poll interval of throttle lag
/// produces, which is acceptable because the goal is reaching at least the
/// target periapsis, not holding a precise value.
pub fn periapsis_raise_throttle(time_to_apoapsis_s: f64) -> f64 {
    if time_to_apoapsis_s < BURN_WINDOW_S { 1.0 } else { 0.0 }
}
