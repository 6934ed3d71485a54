//! Bubble Pop - A casual bubble popping game
//!
//! Core modules:
//! - `sim`: Simulation (bubbles, particles, scoring, timers, session)
//! - `audio`: Procedurally synthesized sound effects
//! - `renderer`: WebGPU rendering pipeline
//! - `persistence`: Key/value storage (LocalStorage on web)
//! - `settings`: Player preferences
//! - `effects`: HTML overlays (ripples, floating labels) shown on a pop

pub mod audio;
pub mod best_score;
pub mod effects;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use best_score::BestScore;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Motion is expressed per frame, where one frame is 1/60 s.
pub mod consts {
    /// Duration of one simulation frame in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest frame step applied in a single update (stalled tabs, hitches)
    pub const MAX_FRAME_STEP: f32 = 3.0;

    /// Bubble radius = BASE + size_setting * STEP + U[0, JITTER)
    pub const BUBBLE_BASE_RADIUS: f32 = 25.0;
    pub const BUBBLE_RADIUS_STEP: f32 = 10.0;
    pub const BUBBLE_RADIUS_JITTER: f32 = 20.0;

    /// Rise speed = (MIN + U[0, JITTER)) * speed_setting, px/frame
    pub const BUBBLE_MIN_SPEED: f32 = 0.5;
    pub const BUBBLE_SPEED_JITTER: f32 = 0.5;

    /// Wobble rate band (rad/frame) and horizontal drift amplitude (px/frame)
    pub const WOBBLE_MIN_RATE: f32 = 0.02;
    pub const WOBBLE_RATE_JITTER: f32 = 0.02;
    pub const WOBBLE_AMPLITUDE: f32 = 0.5;

    /// Opacity = MIN + U[0, JITTER)
    pub const BUBBLE_MIN_OPACITY: f32 = 0.8;
    pub const BUBBLE_OPACITY_JITTER: f32 = 0.2;

    /// Particle burst: count = floor(radius / DIVISOR) + BASE
    pub const PARTICLE_COUNT_DIVISOR: f32 = 5.0;
    pub const PARTICLE_COUNT_BASE: usize = 10;
    /// Random angle added to each evenly spaced ejection slot (radians)
    pub const PARTICLE_ANGLE_JITTER: f32 = 0.5;
    pub const PARTICLE_MIN_SPEED: f32 = 2.0;
    pub const PARTICLE_SPEED_JITTER: f32 = 4.0;
    pub const PARTICLE_MIN_SIZE: f32 = 3.0;
    pub const PARTICLE_SIZE_JITTER: f32 = 5.0;
    pub const PARTICLE_MIN_DECAY: f32 = 0.02;
    pub const PARTICLE_DECAY_JITTER: f32 = 0.02;
    /// Downward acceleration on particles, px/frame²
    pub const PARTICLE_GRAVITY: f32 = 0.1;

    /// Combo resets after this much inactivity
    pub const COMBO_TIMEOUT_MS: f64 = 1500.0;
    /// Combo chimes play above this combo level
    pub const COMBO_CHIME_THRESHOLD: u32 = 2;
    /// The combo counter pulses on pops above this combo level
    pub const COMBO_PULSE_THRESHOLD: u32 = 3;

    /// Spawn interval = BASE / speed_setting
    pub const SPAWN_BASE_INTERVAL_MS: f64 = 2000.0;
    /// Front-loaded spawns on (re)start: BASE + speed_setting, STAGGER apart
    pub const BURST_BASE_COUNT: u32 = 3;
    pub const BURST_STAGGER_MS: f64 = 200.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_polar_to_cartesian() {
        let v = polar_to_cartesian(2.0, PI / 2.0);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 2.0).abs() < 1e-6);
    }
}
