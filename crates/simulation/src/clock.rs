use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::game_params::GameParams;

/// Absolute simulation time in milliseconds. Walkers and houses schedule against
/// instants on this clock ("fires when now >= instant") instead of counting down.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimClock {
    pub now_ms: f64,
    /// Raw delta of the last frame, unclamped.
    pub frame_dt_ms: f64,
    /// Single source of truth for pausing. Mirrored onto `Time<Virtual>` so the
    /// fixed-step systems stop together with walkers and houses.
    pub paused: bool,
}

impl SimClock {
    pub fn advance(&mut self, dt_ms: f64) {
        if self.paused || !dt_ms.is_finite() || dt_ms <= 0.0 {
            self.frame_dt_ms = 0.0;
            return;
        }
        self.frame_dt_ms = dt_ms;
        self.now_ms += dt_ms;
    }

    pub fn seconds(&self) -> f64 {
        self.now_ms / 1000.0
    }
}

/// Advances the clock from the engine's virtual time.
pub fn advance_sim_clock(time: Res<Time<Virtual>>, mut clock: ResMut<SimClock>) {
    clock.advance(time.delta().as_secs_f64() * 1000.0);
}

/// Pauses or resumes virtual time to match [`SimClock::paused`]. Runs before the
/// engine's time update so the paused frame already has a zero delta.
pub fn sync_virtual_pause(clock: Res<SimClock>, time: Option<ResMut<Time<Virtual>>>) {
    let Some(mut time) = time else {
        return;
    };
    if clock.paused && !time.is_paused() {
        time.pause();
    } else if !clock.paused && time.is_paused() {
        time.unpause();
    }
}

/// Virtual time clamps long frames (250ms by default). Catch-up after a stall must
/// see the whole gap, so the clamp is raised to an hour.
pub fn unclamp_virtual_time(time: Option<ResMut<Time<Virtual>>>) {
    if let Some(mut time) = time {
        time.set_max_delta(Duration::from_secs(3_600));
    }
}

/// Keeps the FixedUpdate timestep equal to the configured production step.
pub fn sync_fixed_timestep(params: Res<GameParams>, time: Option<ResMut<Time<Fixed>>>) {
    if !params.is_changed() {
        return;
    }
    if let Some(mut time) = time {
        time.set_timestep(Duration::from_millis(params.production.step_ms.max(1)));
    }
}
