//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Time supplied by the caller (frames and milliseconds)
//! - Stable iteration order (oldest bubble first)
//! - No rendering, audio or platform dependencies

pub mod score;
pub mod session;
pub mod state;
pub mod tick;
pub mod timers;

pub use score::Scoreboard;
pub use session::{Phase, Session, TimerTask};
pub use state::{
    Bubble, BubbleColor, Color, GameState, PALETTE, Particle, PopEvent, SpawnParams,
    particle_count,
};
pub use tick::{frames_between, update};
pub use timers::{TaskHandle, Timers};
