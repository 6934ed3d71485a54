//! Game state and core simulation types
//!
//! Entity lists, seeded RNG and the score live here. Nothing in this module
//! knows about the canvas, the DOM or audio; callers read the lists to draw
//! and react to the returned `PopEvent`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::score::Scoreboard;
use crate::consts::*;
use crate::polar_to_cartesian;

/// RGBA color, components in [0, 1]
pub type Color = [f32; 4];

const fn hex(rgb: u32, alpha: f32) -> Color {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Color triple for a bubble
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleColor {
    pub main: Color,
    pub light: Color,
    pub glow: Color,
}

impl BubbleColor {
    const fn new(main: u32, light: u32) -> Self {
        Self {
            main: hex(main, 1.0),
            light: hex(light, 1.0),
            glow: hex(main, 0.5),
        }
    }
}

/// Bubble palette: pink, purple, cyan, green, amber, red, violet
pub const PALETTE: [BubbleColor; 7] = [
    BubbleColor::new(0xf472b6, 0xfce7f3),
    BubbleColor::new(0xa855f7, 0xf3e8ff),
    BubbleColor::new(0x06b6d4, 0xcffafe),
    BubbleColor::new(0x10b981, 0xd1fae5),
    BubbleColor::new(0xf59e0b, 0xfef3c7),
    BubbleColor::new(0xef4444, 0xfee2e2),
    BubbleColor::new(0x8b5cf6, 0xede9fe),
];

/// A rising bubble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub color: BubbleColor,
    /// Rise speed, px/frame
    pub speed: f32,
    /// Wobble phase (radians)
    pub wobble_phase: f32,
    /// Wobble angular speed, rad/frame
    pub wobble_rate: f32,
    /// In (0, 1]
    pub opacity: f32,
}

impl Bubble {
    /// True if `point` lies strictly inside the bubble
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.radius
    }

    /// True once the bubble has risen more than two radii above the top edge
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.pos.y < -self.radius * 2.0
    }
}

/// A fragment thrown out by a pop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Color,
    /// 0-1, decreases every frame
    pub life: f32,
    /// Life lost per frame
    pub decay: f32,
}

/// Spawn parameters taken from the player's settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    /// Speed setting (>= 1)
    pub speed: f32,
    /// Size setting (>= 1)
    pub size: f32,
}

impl SpawnParams {
    pub fn base_radius(&self) -> f32 {
        BUBBLE_BASE_RADIUS + self.size * BUBBLE_RADIUS_STEP
    }
}

/// Everything a caller needs to drive feedback for one pop
#[derive(Debug, Clone, PartialEq)]
pub struct PopEvent {
    pub bubble_id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub color: BubbleColor,
    /// Combo value after this pop
    pub combo: u32,
    /// Pop count after this pop
    pub pop_count: u32,
    /// This pop raised the best score
    pub new_best: bool,
}

impl PopEvent {
    /// Pitch multiplier for the pop sound (bigger bubbles pitch higher)
    pub fn pitch(&self) -> f32 {
        0.8 + self.radius / 100.0
    }

    /// Whether the combo chime should accompany this pop
    pub fn plays_combo(&self) -> bool {
        self.combo > COMBO_CHIME_THRESHOLD
    }

    /// Whether the HUD combo counter should pulse
    pub fn pulses_combo(&self) -> bool {
        self.combo > COMBO_PULSE_THRESHOLD
    }

    /// Floating text shown at the pop position
    pub fn label(&self) -> String {
        if self.combo > 1 {
            format!("+{}", self.combo)
        } else {
            "Pop!".to_string()
        }
    }
}

/// Particles produced by popping a bubble of the given radius
#[inline]
pub fn particle_count(radius: f32) -> usize {
    (radius / PARTICLE_COUNT_DIVISOR).floor().max(0.0) as usize + PARTICLE_COUNT_BASE
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Playfield size in canvas pixels
    pub width: f32,
    pub height: f32,
    /// Live bubbles, oldest first
    pub bubbles: Vec<Bubble>,
    /// Live particles
    pub particles: Vec<Particle>,
    pub score: Scoreboard,
    rng: Pcg32,
    /// Next bubble ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and persisted best score
    pub fn new(seed: u64, width: f32, height: f32, best: u32) -> Self {
        Self {
            width,
            height,
            bubbles: Vec::new(),
            particles: Vec::new(),
            score: Scoreboard::new(best),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn next_bubble_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a new bubble just below the bottom edge. Returns its ID.
    pub fn spawn_bubble(&mut self, params: &SpawnParams) -> u32 {
        let radius = params.base_radius() + self.rng.random::<f32>() * BUBBLE_RADIUS_JITTER;
        let color = PALETTE[self.rng.random_range(0..PALETTE.len())];

        // Narrow canvases collapse the range to the left edge rather than panic
        let span = (self.width - radius * 2.0).max(0.0);
        let x = radius + self.rng.random::<f32>() * span;

        let id = self.next_bubble_id();
        let bubble = Bubble {
            id,
            pos: Vec2::new(x, self.height + radius),
            radius,
            color,
            speed: (BUBBLE_MIN_SPEED + self.rng.random::<f32>() * BUBBLE_SPEED_JITTER)
                * params.speed,
            wobble_phase: self.rng.random::<f32>() * std::f32::consts::TAU,
            wobble_rate: WOBBLE_MIN_RATE + self.rng.random::<f32>() * WOBBLE_RATE_JITTER,
            opacity: BUBBLE_MIN_OPACITY + self.rng.random::<f32>() * BUBBLE_OPACITY_JITTER,
        };
        self.bubbles.push(bubble);
        id
    }

    /// Find the newest bubble containing the point
    pub fn hit_test(&self, x: f32, y: f32) -> Option<u32> {
        let point = Vec2::new(x, y);
        self.bubbles
            .iter()
            .rev()
            .find(|b| b.contains(point))
            .map(|b| b.id)
    }

    /// Look up a live bubble
    pub fn bubble(&self, id: u32) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.id == id)
    }

    /// Pop a live bubble: remove it, score it, burst it.
    ///
    /// Returns `None` if the bubble is no longer live (already popped or
    /// risen off screen).
    pub fn pop(&mut self, id: u32) -> Option<PopEvent> {
        let index = self.bubbles.iter().position(|b| b.id == id)?;
        let bubble = self.bubbles.remove(index);

        let new_best = self.score.record_pop();
        self.burst(&bubble);

        Some(PopEvent {
            bubble_id: bubble.id,
            pos: bubble.pos,
            radius: bubble.radius,
            color: bubble.color,
            combo: self.score.combo,
            pop_count: self.score.pop_count,
            new_best,
        })
    }

    /// Spawn a ring of particles at the bubble's position
    fn burst(&mut self, bubble: &Bubble) {
        let count = particle_count(bubble.radius);
        let slot = std::f32::consts::TAU / count as f32;
        self.particles.reserve(count);

        for i in 0..count {
            let angle = slot * i as f32 + self.rng.random::<f32>() * PARTICLE_ANGLE_JITTER;
            let speed = PARTICLE_MIN_SPEED + self.rng.random::<f32>() * PARTICLE_SPEED_JITTER;
            let color = if self.rng.random_bool(0.5) {
                bubble.color.main
            } else {
                bubble.color.light
            };

            self.particles.push(Particle {
                pos: bubble.pos,
                vel: polar_to_cartesian(speed, angle),
                size: PARTICLE_MIN_SIZE + self.rng.random::<f32>() * PARTICLE_SIZE_JITTER,
                color,
                life: 1.0,
                decay: PARTICLE_MIN_DECAY + self.rng.random::<f32>() * PARTICLE_DECAY_JITTER,
            });
        }
    }

    /// Combo inactivity timeout fired
    pub fn expire_combo(&mut self) {
        self.score.expire_combo();
    }

    /// Explicit stop: clear the playfield and the session score
    pub fn reset(&mut self) {
        self.bubbles.clear();
        self.particles.clear();
        self.score.reset_session();
    }
}
