//! Frame tessellation
//!
//! Turns the simulation's entity lists into canvas-space triangles. Reads
//! the state, never mutates it.

use glam::Vec2;

use super::shapes::{circle, focal_gradient, rect, ring, segments_for};
use super::vertex::{Vertex, colors, with_alpha};
use crate::sim::{Bubble, GameState, Particle, Phase};

/// Glow is drawn this far past the bubble rim (px)
const GLOW_REACH: f32 = 5.0;
/// The glow gradient would reach zero this far past the rim (px)
const GLOW_FALLOFF: f32 = 10.0;

/// Glow strength left at the drawn edge. The gradient runs from half the
/// radius out to `radius + GLOW_FALLOFF` but is cut off at `GLOW_REACH`.
fn glow_edge_strength(radius: f32) -> f32 {
    (GLOW_FALLOFF - GLOW_REACH) / (radius * 0.5 + GLOW_FALLOFF)
}

/// Build all vertices for one frame: particles behind bubbles, pause shade on top
pub fn build_scene(state: &GameState, phase: Phase) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for particle in &state.particles {
        push_particle(&mut vertices, particle);
    }
    for bubble in &state.bubbles {
        push_bubble(&mut vertices, bubble);
    }
    if phase == Phase::Paused {
        vertices.extend(rect(
            Vec2::ZERO,
            Vec2::new(state.width, state.height),
            colors::PAUSE_SHADE,
        ));
    }

    vertices
}

fn push_particle(out: &mut Vec<Vertex>, particle: &Particle) {
    let radius = particle.size * particle.life;
    if radius <= 0.0 {
        return;
    }
    out.extend(circle(
        particle.pos,
        radius,
        with_alpha(particle.color, particle.life),
        8,
    ));
}

fn push_bubble(out: &mut Vec<Vertex>, bubble: &Bubble) {
    let Bubble {
        pos,
        radius,
        color,
        opacity,
        ..
    } = *bubble;
    let segments = segments_for(radius);

    // Glow
    out.extend(ring(
        pos,
        radius * 0.5,
        radius + GLOW_REACH,
        color.glow,
        with_alpha(color.glow, glow_edge_strength(radius)),
        segments,
    ));

    // Body, lit from the upper left; solid main color from halfway out
    let focus = pos - Vec2::splat(radius * 0.3);
    let main = with_alpha(color.main, opacity);
    out.extend(focal_gradient(
        focus,
        pos,
        radius,
        [with_alpha(color.light, opacity), main, main],
        segments,
    ));

    // Highlights
    out.extend(circle(focus, radius * 0.25, colors::SHINE, segments / 2));
    out.extend(circle(
        pos - Vec2::new(radius * 0.15, radius * 0.5),
        radius * 0.1,
        colors::SHINE_SMALL,
        8,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SpawnParams;

    const PARAMS: SpawnParams = SpawnParams {
        speed: 1.0,
        size: 1.0,
    };

    #[test]
    fn test_empty_scene() {
        let state = GameState::new(1, 800.0, 600.0, 0);
        assert!(build_scene(&state, Phase::Idle).is_empty());
        assert_eq!(build_scene(&state, Phase::Paused).len(), 6);
    }

    #[test]
    fn test_particles_drawn_before_bubbles() {
        let mut state = GameState::new(1, 800.0, 600.0, 0);
        let id = state.spawn_bubble(&PARAMS);
        state.spawn_bubble(&PARAMS);
        let popped = state.bubble(id).unwrap().pos;
        state.pop(id).unwrap();

        let vertices = build_scene(&state, Phase::Running);
        let particle_vertices = state.particles.len() * 8 * 3;
        assert!(vertices.len() > particle_vertices);
        for v in &vertices[..particle_vertices] {
            assert!(Vec2::from(v.position).distance(popped) < 10.0);
        }
        assert!(vertices.len() % 3 == 0);
    }

    #[test]
    fn test_glow_keeps_strength_at_edge() {
        let mut state = GameState::new(1, 800.0, 600.0, 0);
        let id = state.spawn_bubble(&PARAMS);
        let bubble = state.bubbles.iter_mut().find(|b| b.id == id).unwrap();
        bubble.radius = 30.0;
        bubble.pos = Vec2::new(200.0, 200.0);
        let glow = bubble.color.glow;

        // 0.5 * 30 = 15 .. 40 gradient, cut at 35: a fifth of the glow remains
        assert!((glow_edge_strength(30.0) - 0.2).abs() < 1e-6);

        let vertices = build_scene(&state, Phase::Running);
        let glow_len = (segments_for(30.0) * 6) as usize;
        for v in &vertices[..glow_len] {
            let d = Vec2::from(v.position).distance(Vec2::new(200.0, 200.0));
            if (d - 35.0).abs() < 1e-3 {
                assert!((v.color[3] - glow[3] * 0.2).abs() < 1e-6);
            } else {
                assert!((d - 15.0).abs() < 1e-3);
                assert_eq!(v.color, glow);
            }
        }
    }

    #[test]
    fn test_faded_particles_are_translucent() {
        let mut state = GameState::new(1, 800.0, 600.0, 0);
        let id = state.spawn_bubble(&PARAMS);
        state.pop(id).unwrap();
        for p in state.particles.iter_mut() {
            p.life = 0.5;
        }
        let vertices = build_scene(&state, Phase::Running);
        assert!(vertices.iter().all(|v| v.color[3] <= 0.5 + 1e-6));
    }
}
