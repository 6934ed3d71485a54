//! Sound recipes
//!
//! Pure builders for the pop, splash and combo sounds. Each returns a
//! description of a short self-terminating voice; an `AudioEngine` turns it
//! into actual sound.

use rand::Rng;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// Exponential ramp from `from` to `to` over `seconds`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub from: f32,
    pub to: f32,
    pub seconds: f64,
}

impl Ramp {
    pub const fn new(from: f32, to: f32, seconds: f64) -> Self {
        Self { from, to, seconds }
    }

    /// Hold a constant value
    pub const fn hold(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            seconds: 0.0,
        }
    }

    pub fn is_constant(&self) -> bool {
        self.seconds <= 0.0 || self.from == self.to
    }

    /// Value `t` seconds into the ramp
    pub fn value_at(&self, t: f64) -> f32 {
        if self.is_constant() || t <= 0.0 {
            return self.from;
        }
        if t >= self.seconds {
            return self.to;
        }
        let k = (t / self.seconds) as f32;
        self.from * (self.to / self.from).powf(k)
    }
}

/// A single oscillator voice
#[derive(Debug, Clone, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    /// Delay before the voice starts, seconds
    pub offset: f64,
    pub frequency: Ramp,
    pub gain: Ramp,
    /// Voice length from its start, seconds
    pub duration: f64,
}

/// A band-passed noise burst
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseBurst {
    /// Mono samples with the decay envelope already applied
    pub samples: Vec<f32>,
    pub sample_rate: f32,
    /// Band-pass centre, Hz
    pub center_hz: f32,
    pub q: f32,
    pub gain: Ramp,
    pub duration: f64,
}

/// Pop tone: sine sweep from `base_hz * pitch` down an octave
pub const POP_SWEEP_SECONDS: f64 = 0.1;
pub const POP_SECONDS: f64 = 0.15;
pub const POP_MIN_HZ: f32 = 400.0;
pub const POP_HZ_JITTER: f32 = 200.0;

pub const SPLASH_SECONDS: f64 = 0.1;
pub const SPLASH_CENTER_HZ: f32 = 1500.0;
pub const SPLASH_Q: f32 = 5.0;

pub const CHIME_SECONDS: f64 = 0.3;
pub const CHIME_BASE_HZ: f32 = 800.0;
pub const CHIME_SPACING_SECONDS: f64 = 0.05;
pub const MAX_CHIMES: u32 = 5;

/// Random pop base frequency in [400, 600) Hz
pub fn pop_base_hz<R: Rng>(rng: &mut R) -> f32 {
    POP_MIN_HZ + rng.random::<f32>() * POP_HZ_JITTER
}

pub fn pop_tone(base_hz: f32, pitch: f32) -> Tone {
    let start = base_hz * pitch;
    Tone {
        waveform: Waveform::Sine,
        offset: 0.0,
        frequency: Ramp::new(start, start * 0.5, POP_SWEEP_SECONDS),
        gain: Ramp::new(0.3, 0.01, POP_SECONDS),
        duration: POP_SECONDS,
    }
}

/// White noise with an exponential decay baked into the samples
pub fn splash<R: Rng>(rng: &mut R, pitch: f32, sample_rate: f32) -> NoiseBurst {
    let len = (sample_rate as f64 * SPLASH_SECONDS) as usize;
    let tau = len as f32 * 0.2;
    let samples = (0..len)
        .map(|i| (rng.random::<f32>() * 2.0 - 1.0) * (-(i as f32) / tau).exp())
        .collect();

    NoiseBurst {
        samples,
        sample_rate,
        center_hz: SPLASH_CENTER_HZ * pitch,
        q: SPLASH_Q,
        gain: Ramp::new(0.15, 0.01, SPLASH_SECONDS),
        duration: SPLASH_SECONDS,
    }
}

/// Rising triangle chimes, one per combo level up to `MAX_CHIMES`
pub fn combo_chimes(level: u32) -> Vec<Tone> {
    let pitch = 1.0 + level as f32 * 0.1;
    (0..level.min(MAX_CHIMES))
        .map(|i| Tone {
            waveform: Waveform::Triangle,
            offset: i as f64 * CHIME_SPACING_SECONDS,
            frequency: Ramp::hold(CHIME_BASE_HZ * (pitch + i as f32 * 0.2)),
            gain: Ramp::new(0.1, 0.01, CHIME_SECONDS),
            duration: CHIME_SECONDS,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_pop_tone_sweeps_down_an_octave() {
        let tone = pop_tone(500.0, 1.2);
        assert_eq!(tone.waveform, Waveform::Sine);
        assert!((tone.frequency.from - 600.0).abs() < 1e-3);
        assert!((tone.frequency.to - 300.0).abs() < 1e-3);
        assert_eq!(tone.frequency.seconds, 0.1);
        assert_eq!(tone.gain, Ramp::new(0.3, 0.01, 0.15));
    }

    #[test]
    fn test_pop_base_range() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..500 {
            let hz = pop_base_hz(&mut rng);
            assert!((400.0..600.0).contains(&hz));
        }
    }

    #[test]
    fn test_splash_decays() {
        let mut rng = Pcg32::seed_from_u64(9);
        let burst = splash(&mut rng, 2.0, 48_000.0);
        assert_eq!(burst.samples.len(), 4800);
        assert_eq!(burst.center_hz, 3000.0);
        assert_eq!(burst.q, 5.0);

        let envelope = |i: usize| (-(i as f32) / 960.0).exp();
        for (i, s) in burst.samples.iter().enumerate() {
            assert!(s.abs() <= envelope(i) + 1e-6);
        }
        let head: f32 = burst.samples[..480].iter().map(|s| s.abs()).sum();
        let tail: f32 = burst.samples[4320..].iter().map(|s| s.abs()).sum();
        assert!(head > tail * 10.0);
    }

    #[test]
    fn test_combo_chimes_capped_and_rising() {
        assert!(combo_chimes(0).is_empty());
        assert_eq!(combo_chimes(3).len(), 3);

        let chimes = combo_chimes(12);
        assert_eq!(chimes.len(), 5);
        for (i, chime) in chimes.iter().enumerate() {
            assert_eq!(chime.waveform, Waveform::Triangle);
            assert!((chime.offset - i as f64 * 0.05).abs() < 1e-9);
            assert!(chime.frequency.is_constant());
            assert_eq!(chime.gain, Ramp::new(0.1, 0.01, 0.3));
        }
        for pair in chimes.windows(2) {
            assert!(pair[1].frequency.from > pair[0].frequency.from);
        }
        // Level 3: pitch 1.3, first chime 1040 Hz
        assert!((combo_chimes(3)[0].frequency.from - 1040.0).abs() < 1e-2);
    }

    #[test]
    fn test_ramp_values() {
        let ramp = Ramp::new(0.3, 0.01, 0.15);
        assert_eq!(ramp.value_at(0.0), 0.3);
        assert_eq!(ramp.value_at(1.0), 0.01);
        let mid = ramp.value_at(0.075);
        assert!((mid - (0.3f32 * 0.01).sqrt()).abs() < 1e-4);
        assert_eq!(Ramp::hold(5.0).value_at(0.2), 5.0);
    }
}
