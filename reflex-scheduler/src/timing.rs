use rand::Rng;
use reflex_core::{Configuration, StimulusId};

use crate::output::AudioOutput;

/// Draws delays and durations, fixed or uniform within their range. A new
/// value is drawn every cycle.
#[derive(Debug, Clone)]
pub struct IntervalSampler {
    config: Configuration,
}

impl IntervalSampler {
    /// Expects a sanitized configuration; ranges are clamped again anyway.
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    /// Seconds to wait before the next presentation.
    pub fn compute_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let c = &self.config;
        if c.randomize_delay {
            draw(c.min_delay, c.max_delay, rng)
        } else {
            c.delay.max(0.0)
        }
    }

    /// Seconds a visual stimulus stays up. Never shorter than the clip it
    /// accompanies; a clip of unknown length counts as zero.
    pub fn compute_duration<R, A>(
        &self,
        pending_audio: Option<&StimulusId>,
        audio: &A,
        rng: &mut R,
    ) -> f64
    where
        R: Rng + ?Sized,
        A: AudioOutput + ?Sized,
    {
        let c = &self.config;
        let base = if c.randomize_duration {
            draw(c.min_duration, c.max_duration, rng)
        } else {
            c.duration.max(0.0)
        };
        let clip = pending_audio
            .and_then(|id| audio.lookup_duration(id))
            .filter(|len| len.is_finite())
            .unwrap_or(0.0);
        base.max(clip)
    }
}

fn draw<R: Rng + ?Sized>(min: f64, max: f64, rng: &mut R) -> f64 {
    let hi = max.max(0.0);
    let lo = min.max(0.0).min(hi);
    if lo >= hi {
        lo
    } else {
        rng.random_range(lo..=hi)
    }
}
