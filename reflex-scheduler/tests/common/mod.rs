#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use reflex_core::{Configuration, StimulusError, StimulusId, StimulusPools};
use reflex_scheduler::{AudioOutput, Observation, Scheduler, SessionHost, VisualDisplay};

/// Single-voice mixer whose clips finish when the test says so.
#[derive(Debug, Default)]
pub struct FakeAudio {
    pub playing: Option<StimulusId>,
    pub played: Vec<StimulusId>,
    pub lengths: HashMap<StimulusId, f64>,
    pub unknown: HashSet<StimulusId>,
}

impl FakeAudio {
    pub fn with_length(mut self, id: &str, seconds: f64) -> Self {
        self.lengths.insert(StimulusId::from(id), seconds);
        self
    }

    pub fn with_unknown(mut self, id: &str) -> Self {
        self.unknown.insert(StimulusId::from(id));
        self
    }

    pub fn finish(&mut self) {
        self.playing = None;
    }
}

impl AudioOutput for FakeAudio {
    fn play(&mut self, id: &StimulusId) -> Result<(), StimulusError> {
        if self.unknown.contains(id) {
            return Err(StimulusError::UnknownStimulusId(id.clone()));
        }
        assert!(self.playing.is_none(), "overlapping audio triggered: {id}");
        self.playing = Some(id.clone());
        self.played.push(id.clone());
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playing.is_some()
    }

    fn lookup_duration(&self, id: &StimulusId) -> Option<f64> {
        self.lengths.get(id).copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Show(StimulusId),
    Hide,
}

#[derive(Debug, Default)]
pub struct FakeVisual {
    pub showing: Option<StimulusId>,
    pub log: Vec<Screen>,
    pub unknown: HashSet<StimulusId>,
}

impl FakeVisual {
    pub fn with_unknown(mut self, id: &str) -> Self {
        self.unknown.insert(StimulusId::from(id));
        self
    }

    pub fn shows(&self) -> usize {
        self.log.iter().filter(|e| matches!(e, Screen::Show(_))).count()
    }

    pub fn hides(&self) -> usize {
        self.log.iter().filter(|e| matches!(e, Screen::Hide)).count()
    }
}

impl VisualDisplay for FakeVisual {
    fn show(&mut self, id: &StimulusId) -> Result<(), StimulusError> {
        if self.unknown.contains(id) {
            return Err(StimulusError::UnknownStimulusId(id.clone()));
        }
        self.showing = Some(id.clone());
        self.log.push(Screen::Show(id.clone()));
        Ok(())
    }

    fn hide(&mut self) {
        self.showing = None;
        self.log.push(Screen::Hide);
    }
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub observations: Vec<Observation>,
    pub completed: Vec<u32>,
    pub quits: usize,
    pub restarts: usize,
}

impl Recorder {
    pub fn count(&self, pred: impl Fn(&Observation) -> bool) -> usize {
        self.observations.iter().filter(|o| pred(o)).count()
    }
}

impl SessionHost for Recorder {
    fn observe(&mut self, observation: Observation) {
        self.observations.push(observation);
    }
    fn on_completed(&mut self, rounds: u32) {
        self.completed.push(rounds);
    }
    fn on_quit_requested(&mut self) {
        self.quits += 1;
    }
    fn on_restart_requested(&mut self) {
        self.restarts += 1;
    }
}

pub type TestScheduler = Scheduler<StdRng, FakeAudio, FakeVisual, Recorder>;

pub fn fixed_config(delay: f64, duration: f64) -> Configuration {
    Configuration {
        delay,
        duration,
        randomize_delay: false,
        randomize_duration: false,
        unlimited_rounds: true,
        ..Configuration::default()
    }
}

pub fn scheduler(config: Configuration, visual: &[&str], audio: &[&str]) -> TestScheduler {
    scheduler_with(config, visual, audio, FakeAudio::default(), FakeVisual::default())
}

pub fn scheduler_with(
    config: Configuration,
    visual: &[&str],
    audio: &[&str],
    fake_audio: FakeAudio,
    fake_visual: FakeVisual,
) -> TestScheduler {
    Scheduler::new(
        config,
        StimulusPools::new(visual.iter().copied(), audio.iter().copied()),
        StdRng::seed_from_u64(42),
        fake_audio,
        fake_visual,
        Recorder::default(),
    )
}

pub fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}
