#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod flight_control;
mod http_handler;
mod logger;

use crate::flight_control::{
    AscentParams, AscentSequencer, ConditionWaiter, LaunchDirection, RemoteVessel,
};
use std::{env, process, time::Duration};
use tokio_util::sync::CancellationToken;

/// Upper bound on any single condition wait. Generous enough for a full
/// gravity turn, small enough that a vessel stuck without fuel does not spin
/// the loop forever.
const MAX_WAIT: Duration = Duration::from_secs(1800);

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    let base_url_var = env::var("SIM_BASE_URL");
    let base_url = base_url_var.as_ref().map_or("http://localhost:50000", |v| v.as_str());
    let direction_var = env::var("LAUNCH_DIRECTION");
    let direction_str = direction_var.as_ref().map_or("east", |v| v.as_str());
    let target_altitude = env::var("TARGET_ALTITUDE_M").ok().map_or(100_000.0, |v| {
        v.parse::<f64>().unwrap_or_else(|_| fatal!("Invalid TARGET_ALTITUDE_M: {v}"))
    });

    let direction = LaunchDirection::try_from(direction_str)
        .unwrap_or_else(|e| fatal!("Refusing to launch: {e:?}"));

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Cancellation requested, unwinding without further staging!");
            cancel_clone.cancel();
        }
    });

    let vessel = RemoteVessel::new(base_url);
    let params = AscentParams::new(target_altitude, direction)
        .unwrap_or_else(|e| fatal!("Refusing to launch: {e:?}"));
    let waiter =
        ConditionWaiter::new(ConditionWaiter::DEF_POLL_INTERVAL, Some(MAX_WAIT), cancel);
    let mut sequencer = AscentSequencer::new(&vessel, &vessel, params, waiter);

    if let Err(e) = sequencer.run().await {
        error!("Ascent aborted: {e:?}");
        process::exit(1);
    }
}
