//! Stand-ins for the mixer and the stimulus screen. Both validate
//! identifiers against the catalogue exactly as the real outputs would.

use std::time::Duration;

use reflex_core::{SoundName, StimulusError, StimulusId, VisualCue};
use reflex_scheduler::{AudioOutput, VisualDisplay};
use reflex_timing::Timer;

struct Clip {
    sound: SoundName,
    started: u64,
}

/// One-voice mixer whose clips run for a fixed length on the session clock.
pub struct SimulatedAudio<T: Timer<Timestamp = u64>> {
    timer: T,
    clip_length: Duration,
    voice: Option<Clip>,
    played: u32,
}

impl<T: Timer<Timestamp = u64>> SimulatedAudio<T> {
    pub fn new(timer: T, clip_length: Duration) -> Self {
        Self {
            timer,
            clip_length,
            voice: None,
            played: 0,
        }
    }

    pub fn stop(&mut self) {
        if let Some(clip) = self.voice.take() {
            log::debug!("audio: {} stopped", clip.sound);
        }
    }

    pub fn played(&self) -> u32 {
        self.played
    }
}

impl<T: Timer<Timestamp = u64>> AudioOutput for SimulatedAudio<T> {
    fn play(&mut self, id: &StimulusId) -> Result<(), StimulusError> {
        let sound = SoundName::from_pool_id(id)?;
        let busy = self.is_playing();
        let previous = self.voice.replace(Clip {
            sound,
            started: self.timer.now(),
        });
        if let (true, Some(previous)) = (busy, previous) {
            log::warn!("audio: {} cut off by {sound}", previous.sound);
        }
        self.played += 1;
        log::info!("audio: {sound}");
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.voice
            .as_ref()
            .is_some_and(|clip| self.timer.elapsed(clip.started) < self.clip_length)
    }

    fn lookup_duration(&self, id: &StimulusId) -> Option<f64> {
        SoundName::from_pool_id(id)
            .ok()
            .map(|_| self.clip_length.as_secs_f64())
    }
}

/// Screen that reports what it would draw.
#[derive(Debug, Default)]
pub struct SimulatedDisplay {
    current: Option<VisualCue>,
    shown: u32,
}

impl SimulatedDisplay {
    pub fn current(&self) -> Option<&VisualCue> {
        self.current.as_ref()
    }

    pub fn shown(&self) -> u32 {
        self.shown
    }
}

impl VisualDisplay for SimulatedDisplay {
    fn show(&mut self, id: &StimulusId) -> Result<(), StimulusError> {
        let cue = VisualCue::resolve(id)?;
        match &cue {
            VisualCue::Color { rgba } => log::info!("screen: fill {rgba:?}"),
            VisualCue::Arrow { direction } => log::info!(
                "screen: arrow {direction:?} ({:.0} deg)",
                direction.rotation_degrees()
            ),
            VisualCue::Symbol { glyph } => log::info!("screen: symbol '{glyph}'"),
        }
        self.current = Some(cue);
        self.shown += 1;
        Ok(())
    }

    fn hide(&mut self) {
        if self.current.take().is_some() {
            log::debug!("screen: cleared");
        }
    }
}
