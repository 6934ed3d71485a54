//! Web Audio API engine
//!
//! Every voice builds its own small node graph, schedules start/stop on the
//! context clock and is dropped; the browser tears the graph down when the
//! source stops.

use web_sys::{
    AudioContext, AudioContextState, AudioParam, BiquadFilterType, GainNode, OscillatorType,
};

use super::synth::{NoiseBurst, Ramp, Tone, Waveform};
use super::{AudioEngine, AudioError, assemble_voice};

pub struct WebAudioEngine {
    ctx: AudioContext,
}

impl WebAudioEngine {
    /// Create the audio context (may fail outside a secure context or
    /// without Web Audio support)
    pub fn new() -> Result<Self, AudioError> {
        let ctx = AudioContext::new()
            .map_err(|e| AudioError::ContextFailed(format!("{e:?}")))?;
        Ok(Self { ctx })
    }

    /// Gain node shaped by `ramp` starting at `t`, not yet routed anywhere
    fn gain_stage(&self, ramp: &Ramp, t: f64) -> Option<GainNode> {
        let gain = self.ctx.create_gain().ok()?;
        apply_ramp(&gain.gain(), ramp, t);
        Some(gain)
    }

    /// Connect a voice's gain to the speakers
    fn route(&self, gain: &GainNode) -> bool {
        gain.connect_with_audio_node(&self.ctx.destination()).is_ok()
    }
}

/// Schedule an exponential ramp on a parameter
fn apply_ramp(param: &AudioParam, ramp: &Ramp, t: f64) {
    param.set_value_at_time(ramp.from, t).ok();
    if !ramp.is_constant() {
        param
            .exponential_ramp_to_value_at_time(ramp.to, t + ramp.seconds)
            .ok();
    }
}

impl AudioEngine for WebAudioEngine {
    fn sample_rate(&self) -> f32 {
        self.ctx.sample_rate()
    }

    fn resume(&self) {
        // Browsers start contexts suspended until a user gesture
        if self.ctx.state() == AudioContextState::Suspended {
            let _ = self.ctx.resume();
        }
    }

    fn play_tone(&self, tone: &Tone) {
        let t = self.ctx.current_time() + tone.offset;
        let voice = assemble_voice(
            || {
                let osc = self.ctx.create_oscillator().ok()?;
                osc.set_type(match tone.waveform {
                    Waveform::Sine => OscillatorType::Sine,
                    Waveform::Triangle => OscillatorType::Triangle,
                });
                apply_ramp(&osc.frequency(), &tone.frequency, t);
                Some(osc)
            },
            || self.gain_stage(&tone.gain, t),
            |osc, gain| osc.connect_with_audio_node(gain).is_ok(),
            |gain| self.route(gain),
        );
        let Some((osc, _gain)) = voice else {
            return;
        };

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + tone.duration).ok();
    }

    fn play_noise(&self, burst: &NoiseBurst) {
        if burst.samples.is_empty() {
            return;
        }
        let t = self.ctx.current_time();

        let voice = assemble_voice(
            || {
                let buffer = self
                    .ctx
                    .create_buffer(1, burst.samples.len() as u32, burst.sample_rate)
                    .ok()?;
                let mut samples = burst.samples.clone();
                buffer.copy_to_channel(&mut samples, 0).ok()?;

                let source = self.ctx.create_buffer_source().ok()?;
                source.set_buffer(Some(&buffer));

                let filter = self.ctx.create_biquad_filter().ok()?;
                filter.set_type(BiquadFilterType::Bandpass);
                filter.frequency().set_value_at_time(burst.center_hz, t).ok();
                filter.q().set_value_at_time(burst.q, t).ok();
                Some((source, filter))
            },
            || self.gain_stage(&burst.gain, t),
            |(source, filter), gain| {
                source.connect_with_audio_node(filter).is_ok()
                    && filter.connect_with_audio_node(gain).is_ok()
            },
            |gain| self.route(gain),
        );
        let Some(((source, _filter), _gain)) = voice else {
            return;
        };

        source.start_with_when(t).ok();
        source.stop_with_when(t + burst.duration).ok();
    }
}
