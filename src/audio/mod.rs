//! Audio system
//!
//! Procedurally generated sound effects - no external files needed!
//! `SoundManager` owns the on/off state machine and builds each sound from
//! the recipes in `synth`; an `AudioEngine` plays them. The browser engine
//! lives in `web` (Web Audio API).

pub mod synth;
#[cfg(target_arch = "wasm32")]
pub mod web;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use thiserror::Error;

use crate::sim::PopEvent;
pub use synth::{NoiseBurst, Ramp, Tone, Waveform};
#[cfg(target_arch = "wasm32")]
pub use web::WebAudioEngine;

/// Something that can play voices. Every call is fire-and-forget: each voice
/// tears itself down after its duration, overlapping calls overlap.
pub trait AudioEngine {
    fn sample_rate(&self) -> f32;
    /// Wake the engine if the platform suspended it
    fn resume(&self);
    fn play_tone(&self, tone: &Tone);
    fn play_noise(&self, burst: &NoiseBurst);
}

/// Failure to bring up an audio engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    /// The platform has no usable audio API
    #[error("audio unsupported: {0}")]
    Unsupported(String),
    /// The API exists but refused to construct a context
    #[error("audio context failed: {0}")]
    ContextFailed(String),
}

/// Externally visible audio state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    /// No engine yet (waiting for a user gesture)
    Uninitialized,
    /// Engine up and sound enabled
    Ready,
    /// Muted by the player, or the engine could not be built
    Disabled,
}

enum EngineSlot<E> {
    Empty,
    Ready(E),
    /// Construction failed; never retried
    Unavailable,
}

/// Build one voice graph in a fixed order: source nodes, then the gain,
/// then the links between them, and the route to the output last. Any
/// failure stops before the output is touched, so no half-built voice ends
/// up attached to it.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn assemble_voice<S, G>(
    source: impl FnOnce() -> Option<S>,
    gain: impl FnOnce() -> Option<G>,
    link: impl FnOnce(&S, &G) -> bool,
    route: impl FnOnce(&G) -> bool,
) -> Option<(S, G)> {
    let source = source()?;
    let gain = gain()?;
    if !link(&source, &gain) || !route(&gain) {
        return None;
    }
    Some((source, gain))
}

/// Sound effects front end
pub struct SoundManager<E: AudioEngine> {
    engine: EngineSlot<E>,
    enabled: bool,
    rng: Pcg32,
}

impl<E: AudioEngine> SoundManager<E> {
    pub fn new(seed: u64) -> Self {
        Self {
            engine: EngineSlot::Empty,
            enabled: true,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Bring up the engine. Call from a user gesture handler. Idempotent;
    /// a failed construction latches audio off for good.
    pub fn init<F>(&mut self, build: F)
    where
        F: FnOnce() -> Result<E, AudioError>,
    {
        if !matches!(self.engine, EngineSlot::Empty) {
            return;
        }
        self.engine = match build() {
            Ok(engine) => {
                log::info!("Audio ready ({} Hz)", engine.sample_rate());
                EngineSlot::Ready(engine)
            }
            Err(e) => {
                log::warn!("{e} - audio disabled");
                EngineSlot::Unavailable
            }
        };
    }

    /// Player sound toggle
    pub fn toggle(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn state(&self) -> AudioState {
        match (&self.engine, self.enabled) {
            (EngineSlot::Unavailable, _) | (_, false) => AudioState::Disabled,
            (EngineSlot::Ready(_), true) => AudioState::Ready,
            (EngineSlot::Empty, true) => AudioState::Uninitialized,
        }
    }

    fn active_engine(&self) -> Option<&E> {
        match &self.engine {
            EngineSlot::Ready(engine) if self.enabled => Some(engine),
            _ => None,
        }
    }

    /// Pop: a falling sine blip with a splash layered under it
    pub fn play_pop(&mut self, pitch: f32) {
        let base_hz = synth::pop_base_hz(&mut self.rng);
        let Some(engine) = self.active_engine() else {
            return;
        };
        engine.resume();
        engine.play_tone(&synth::pop_tone(base_hz, pitch));
        self.play_splash(pitch);
    }

    /// Water splash: band-passed decaying noise
    pub fn play_splash(&mut self, pitch: f32) {
        let Some(sample_rate) = self.active_engine().map(|e| e.sample_rate()) else {
            return;
        };
        let burst = synth::splash(&mut self.rng, pitch, sample_rate);
        if let Some(engine) = self.active_engine() {
            engine.play_noise(&burst);
        }
    }

    /// Combo celebration: up to five rising chimes, 50 ms apart
    pub fn play_combo(&mut self, level: u32) {
        let Some(engine) = self.active_engine() else {
            return;
        };
        for chime in synth::combo_chimes(level) {
            engine.play_tone(&chime);
        }
    }

    /// All audio feedback for one pop
    pub fn play_pop_event(&mut self, event: &PopEvent) {
        self.play_pop(event.pitch());
        if event.plays_combo() {
            self.play_combo(event.combo);
        }
    }
}
