//! Per-frame simulation step
//!
//! Advances bubbles and particles by `frames` display frames (1.0 = 1/60 s).

use super::state::GameState;
use crate::consts::*;

/// Advance the game state by `frames` frames
pub fn update(state: &mut GameState, frames: f32) {
    let frames = frames.clamp(0.0, MAX_FRAME_STEP);
    if frames == 0.0 {
        return;
    }

    // Bubbles rise and drift side to side
    for bubble in state.bubbles.iter_mut() {
        bubble.pos.y -= bubble.speed * frames;
        bubble.wobble_phase += bubble.wobble_rate * frames;
        bubble.pos.x += bubble.wobble_phase.sin() * WOBBLE_AMPLITUDE * frames;
    }
    state.bubbles.retain(|b| !b.is_offscreen());

    // Particles fly, fall and fade
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel * frames;
        particle.vel.y += PARTICLE_GRAVITY * frames;
        particle.life -= particle.decay * frames;
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Convert an elapsed wall-clock interval into a frame step
#[inline]
pub fn frames_between(last_ms: f64, now_ms: f64) -> f32 {
    (((now_ms - last_ms) / FRAME_MS) as f32).clamp(0.0, MAX_FRAME_STEP)
}
