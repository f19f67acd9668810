//! Procedural sound effects
//!
//! Short synthesized tones played through rodio; no sound files are
//! shipped. Every trigger gets a slightly randomized pitch so repeated
//! bounces do not sound mechanical, and the paddle bounce can be gated on
//! "previous one still playing" to avoid audio stacking when the ball
//! re-collides frame after frame.

use rand::Rng;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

const SAMPLE_RATE: u32 = 44_100;
/// Pitch is randomized within +-5% per trigger
const PITCH_JITTER: f32 = 0.05;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// UI button click
    Button,
    /// Ball hits a wall or the paddle
    Bounce,
    /// Block destroyed
    Brick,
    /// All blocks cleared
    LevelComplete,
    /// Round lost
    GameOver,
}

/// Audio output wrapper. Degrades to silent if no output device exists,
/// so headless runs and machines without sound still work.
pub struct AudioManager {
    // Stream must stay alive as long as anything plays
    _stream: Option<OutputStream>,
    handle: Option<OutputStreamHandle>,
    /// Dedicated sink for the bounce effect so re-triggers can check
    /// whether the previous one finished
    bounce_sink: Option<Sink>,
}

impl AudioManager {
    pub fn new() -> Self {
        match OutputStream::try_default() {
            Ok((stream, handle)) => {
                let bounce_sink = Sink::try_new(&handle).ok();
                Self {
                    _stream: Some(stream),
                    handle: Some(handle),
                    bounce_sink,
                }
            }
            Err(e) => {
                log::warn!("audio unavailable ({e}); continuing without sound");
                Self {
                    _stream: None,
                    handle: None,
                    bounce_sink: None,
                }
            }
        }
    }

    /// Fire-and-forget playback with randomized pitch
    pub fn play(&self, effect: SoundEffect) {
        let Some(handle) = &self.handle else { return };
        let source = synth(effect).speed(random_pitch());
        let _ = handle.play_raw(source.convert_samples());
    }

    /// Play only if the previous gated trigger has finished
    pub fn play_gated(&self, effect: SoundEffect) {
        let Some(sink) = &self.bounce_sink else { return };
        if sink.empty() {
            sink.append(synth(effect).speed(random_pitch()));
        }
    }

    /// Whether the gated channel is still sounding
    pub fn is_playing(&self) -> bool {
        self.bounce_sink.as_ref().is_some_and(|s| !s.empty())
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

fn random_pitch() -> f32 {
    rand::rng().random_range(1.0 - PITCH_JITTER..=1.0 + PITCH_JITTER)
}

/// Build the sample buffer for an effect
fn synth(effect: SoundEffect) -> SamplesBuffer<f32> {
    let samples = match effect {
        SoundEffect::Button => ping(1200.0, 40, 40.0),
        SoundEffect::Bounce => ping(880.0, 70, 30.0),
        SoundEffect::Brick => ping(520.0, 60, 35.0),
        SoundEffect::LevelComplete => sequence(&[(523.25, 110), (659.25, 110), (783.99, 160)]),
        SoundEffect::GameOver => sequence(&[(392.0, 160), (329.63, 160), (261.63, 160), (196.0, 260)]),
    };
    SamplesBuffer::new(1, SAMPLE_RATE, samples)
}

/// Sine tone with exponential decay
fn ping(frequency: f32, duration_ms: u64, decay: f32) -> Vec<f32> {
    let count = (u64::from(SAMPLE_RATE) * duration_ms / 1000) as usize;
    let sample_rate = SAMPLE_RATE as f32;

    (0..count)
        .map(|i| {
            let t = i as f32 / sample_rate;
            let envelope = (-t * decay).exp();
            let wave = (2.0 * std::f32::consts::PI * frequency * t).sin();
            wave * envelope * 0.3
        })
        .collect()
}

/// Notes played back to back, each with a soft decay
fn sequence(notes: &[(f32, u64)]) -> Vec<f32> {
    let mut samples = Vec::new();
    for &(frequency, duration_ms) in notes {
        samples.extend(ping(frequency, duration_ms, 12.0));
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_length_matches_duration() {
        let samples = ping(440.0, 100, 20.0);
        assert_eq!(samples.len(), SAMPLE_RATE as usize / 10);
    }

    #[test]
    fn ping_decays_toward_silence() {
        let samples = ping(440.0, 100, 20.0);
        let head: f32 = samples[..200].iter().map(|s| s.abs()).sum();
        let tail: f32 = samples[samples.len() - 200..].iter().map(|s| s.abs()).sum();
        assert!(head > tail * 2.0);
        assert!(samples.iter().all(|s| s.abs() <= 0.3));
    }

    #[test]
    fn sequence_concatenates_notes() {
        let samples = sequence(&[(440.0, 50), (660.0, 50)]);
        assert_eq!(samples.len(), SAMPLE_RATE as usize / 10);
    }

    #[test]
    fn random_pitch_stays_within_jitter() {
        for _ in 0..100 {
            let pitch = random_pitch();
            assert!((1.0 - PITCH_JITTER..=1.0 + PITCH_JITTER).contains(&pitch));
        }
    }
}
