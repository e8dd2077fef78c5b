use std::time::Duration;

use rand::Rng;
use reflex_core::{Channel, Configuration, PhaseKind, StimulusError, StimulusId, StimulusPools};

use crate::error::SchedulerWarning;
use crate::host::{Observation, SessionHost};
use crate::output::{AudioOutput, VisualDisplay};
use crate::pause::LEAD_IN_SECONDS;
use crate::rounds::RoundTracker;
use crate::selector::{Selection, StimulusSelector};
use crate::timing::IntervalSampler;

/// Upper bound on phase transitions evaluated within one tick.
const MAX_STEPS_PER_TICK: usize = 8;

/// Scheduler phase together with the timers that only exist in it.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    LeadIn {
        remaining: f64,
    },
    AwaitingNext {
        delay_remaining: f64,
    },
    PresentingVisual {
        visual: StimulusId,
        duration_remaining: f64,
    },
    PresentingAudio {
        audio: StimulusId,
    },
    /// Both channels run independently; the cycle closes when the second
    /// one finishes.
    PresentingBoth {
        visual: StimulusId,
        audio: StimulusId,
        duration_remaining: f64,
        visual_done: bool,
        audio_done: bool,
    },
    Paused {
        preempted: PhaseKind,
    },
    Completed,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Self::LeadIn { .. } => PhaseKind::LeadIn,
            Self::AwaitingNext { .. } => PhaseKind::AwaitingNext,
            Self::PresentingVisual { .. } => PhaseKind::PresentingVisual,
            Self::PresentingAudio { .. } => PhaseKind::PresentingAudio,
            Self::PresentingBoth { .. } => PhaseKind::PresentingBoth,
            Self::Paused { .. } => PhaseKind::Paused,
            Self::Completed => PhaseKind::Completed,
        }
    }

    /// Whether a visual stimulus is currently on screen.
    pub fn shows_visual(&self) -> bool {
        matches!(
            self,
            Self::PresentingVisual { .. }
                | Self::PresentingBoth {
                    visual_done: false,
                    ..
                }
        )
    }
}

/// What `advance` should do after one evaluation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Nothing changed that needs re-evaluation this tick.
    Hold,
    /// Entered a new phase; evaluate it again with zero elapsed time.
    Continue,
    /// Nothing could be presented; wait for the freshly armed delay.
    EndTick,
}

/// The presentation state machine. Owns its collaborators and is driven by
/// a single [`Scheduler::advance`] call per frame.
pub struct Scheduler<R, A, V, H>
where
    R: Rng,
    A: AudioOutput,
    V: VisualDisplay,
    H: SessionHost,
{
    pub(crate) phase: Phase,
    pub(crate) pending: Selection,
    pub(crate) audio_queued: bool,
    config: Configuration,
    selector: StimulusSelector,
    sampler: IntervalSampler,
    rounds: RoundTracker,
    pub(crate) rng: R,
    pub(crate) audio: A,
    pub(crate) visual: V,
    pub(crate) host: H,
}

impl<R, A, V, H> Scheduler<R, A, V, H>
where
    R: Rng,
    A: AudioOutput,
    V: VisualDisplay,
    H: SessionHost,
{
    pub fn new(
        config: Configuration,
        pools: StimulusPools,
        rng: R,
        audio: A,
        visual: V,
        mut host: H,
    ) -> Self {
        let (config, findings) = config.sanitized();
        for finding in findings {
            let warning = SchedulerWarning::from(finding);
            log::warn!("{warning}");
            host.observe(Observation::Warning(warning));
        }
        config.log_summary();

        let rounds = RoundTracker::new(config.round_limit());
        if let Some(remaining) = rounds.remaining() {
            host.observe(Observation::RoundsRemaining { remaining });
        }
        log::info!(
            "session starts: {} visual / {} audio stimuli",
            pools.visual.len(),
            pools.audio.len()
        );

        Self {
            phase: Phase::LeadIn {
                remaining: LEAD_IN_SECONDS,
            },
            pending: Selection::default(),
            audio_queued: false,
            selector: StimulusSelector::new(pools, config.simultaneous_visual_audio_stimuli),
            sampler: IntervalSampler::new(config.clone()),
            rounds,
            config,
            rng,
            audio,
            visual,
            host,
        }
    }

    /// Feeds one frame's elapsed time through the machine. All resulting
    /// transitions complete before this returns. A no-op while paused or
    /// after completion.
    pub fn advance(&mut self, dt: Duration) {
        if matches!(self.phase, Phase::Paused { .. } | Phase::Completed) {
            return;
        }
        let mut dt = dt.as_secs_f64();
        let mut cycle_closed = false;
        for _ in 0..MAX_STEPS_PER_TICK {
            // A presentation started after a closed cycle runs from the next tick.
            if cycle_closed && self.phase.kind().is_presenting() {
                break;
            }
            let before = self.rounds.completed();
            let flow = self.step(dt);
            cycle_closed |= self.rounds.completed() != before;
            dt = 0.0;
            if flow != Flow::Continue {
                break;
            }
        }
    }

    fn step(&mut self, dt: f64) -> Flow {
        match &mut self.phase {
            Phase::LeadIn { remaining } => {
                *remaining -= dt;
                let left = *remaining;
                self.on_lead_in(left)
            }
            Phase::AwaitingNext { delay_remaining } => {
                *delay_remaining -= dt;
                let left = *delay_remaining;
                self.on_delay(left)
            }
            Phase::PresentingVisual {
                duration_remaining, ..
            } => {
                *duration_remaining -= dt;
                let left = *duration_remaining;
                self.on_visual(left)
            }
            Phase::PresentingAudio { .. } => self.on_audio(),
            Phase::PresentingBoth {
                duration_remaining,
                visual_done,
                ..
            } => {
                if !*visual_done {
                    *duration_remaining -= dt;
                }
                self.on_both()
            }
            Phase::Paused { .. } | Phase::Completed => Flow::Hold,
        }
    }

    fn on_lead_in(&mut self, left: f64) -> Flow {
        self.host.observe(Observation::LeadInCountdown {
            remaining: left.max(0.0),
        });
        if left > 0.0 {
            return Flow::Hold;
        }
        self.await_next();
        Flow::Continue
    }

    fn on_delay(&mut self, left: f64) -> Flow {
        if left > 0.0 {
            self.host
                .observe(Observation::DelayCountdown { remaining: left });
            return Flow::Hold;
        }
        self.begin_presentation()
    }

    fn on_visual(&mut self, left: f64) -> Flow {
        if left > 0.0 {
            self.host
                .observe(Observation::DurationCountdown { remaining: left });
            return Flow::Hold;
        }
        self.hide_visual();
        self.finish_cycle()
    }

    fn on_audio(&mut self) -> Flow {
        if self.audio.is_playing() {
            return Flow::Hold;
        }
        if let Phase::PresentingAudio { audio } = &self.phase {
            let id = audio.clone();
            self.host.observe(Observation::AudioFinished { id });
        }
        self.finish_cycle()
    }

    fn on_both(&mut self) -> Flow {
        let Phase::PresentingBoth {
            audio,
            duration_remaining,
            visual_done,
            audio_done,
            ..
        } = &self.phase
        else {
            return Flow::Hold;
        };
        let (audio_id, left) = (audio.clone(), *duration_remaining);
        let (mut v_done, mut a_done) = (*visual_done, *audio_done);

        if !v_done && left <= 0.0 {
            self.hide_visual();
            v_done = true;
        }
        if !a_done && !self.audio.is_playing() {
            self.host
                .observe(Observation::AudioFinished { id: audio_id });
            a_done = true;
        }
        if v_done && a_done {
            return self.finish_cycle();
        }

        if let Phase::PresentingBoth {
            visual_done,
            audio_done,
            ..
        } = &mut self.phase
        {
            *visual_done = v_done;
            *audio_done = a_done;
        }
        if !v_done {
            self.host
                .observe(Observation::DurationCountdown { remaining: left });
        }
        Flow::Hold
    }

    /// Arms a fresh delay, selecting the next stimulus first unless one is
    /// already waiting.
    fn await_next(&mut self) {
        if self.pending.is_empty() {
            self.pending = self.select();
        }
        let delay_remaining = self.sampler.compute_delay(&mut self.rng);
        self.set_phase(Phase::AwaitingNext { delay_remaining });
    }

    fn select(&mut self) -> Selection {
        match self.selector.select_next(&mut self.rng) {
            Ok(selection) => {
                log::debug!(
                    "next stimulus: visual={:?} audio={:?}",
                    selection.visual,
                    selection.audio
                );
                selection
            }
            Err(e) => {
                let warning = SchedulerWarning::from(e);
                log::warn!("{warning}");
                self.host.observe(Observation::Warning(warning));
                Selection::default()
            }
        }
    }

    fn begin_presentation(&mut self) -> Flow {
        if self.pending.is_empty() {
            // Nothing to present: re-arm and try again after another delay.
            self.await_next();
            return Flow::EndTick;
        }

        if let Some(id) = &self.pending.audio {
            if self.audio.is_playing() {
                if !self.audio_queued {
                    let warning = SchedulerWarning::AudioVoiceBusy { id: id.clone() };
                    log::debug!("{warning}");
                    self.host.observe(Observation::Warning(warning));
                    self.audio_queued = true;
                }
                self.phase = Phase::AwaitingNext {
                    delay_remaining: 0.0,
                };
                return Flow::Hold;
            }
        }
        self.audio_queued = false;

        let Selection { visual, audio } = std::mem::take(&mut self.pending);
        let visual = visual.filter(|id| self.show_visual(id));
        let audio = audio.filter(|id| self.play_audio(id));

        // Only a clip that actually started can stretch the visual.
        let duration_remaining = match visual {
            Some(_) => self
                .sampler
                .compute_duration(audio.as_ref(), &self.audio, &mut self.rng),
            None => 0.0,
        };

        let next = match (visual, audio) {
            (Some(visual), Some(audio)) => Phase::PresentingBoth {
                visual,
                audio,
                duration_remaining,
                visual_done: false,
                audio_done: false,
            },
            (Some(visual), None) => Phase::PresentingVisual {
                visual,
                duration_remaining,
            },
            (None, Some(audio)) => Phase::PresentingAudio { audio },
            (None, None) => {
                log::debug!("no channel could present; cycle skipped");
                self.await_next();
                return Flow::EndTick;
            }
        };
        self.set_phase(next);
        Flow::Continue
    }

    fn show_visual(&mut self, id: &StimulusId) -> bool {
        match self.visual.show(id) {
            Ok(()) => {
                log::debug!("showing visual stimulus {id}");
                self.host
                    .observe(Observation::VisualShown { id: id.clone() });
                true
            }
            Err(e) => {
                self.skip_channel(Channel::Visual, id, e);
                false
            }
        }
    }

    fn play_audio(&mut self, id: &StimulusId) -> bool {
        match self.audio.play(id) {
            Ok(()) => {
                log::debug!("playing audio stimulus {id}");
                self.host
                    .observe(Observation::AudioStarted { id: id.clone() });
                true
            }
            Err(e) => {
                self.skip_channel(Channel::Audio, id, e);
                false
            }
        }
    }

    fn skip_channel(&mut self, channel: Channel, id: &StimulusId, cause: StimulusError) {
        let warning = SchedulerWarning::UnknownStimulus {
            channel,
            id: id.clone(),
        };
        log::warn!("{warning} ({cause})");
        self.host.observe(Observation::Warning(warning));
    }

    pub(crate) fn hide_visual(&mut self) {
        self.visual.hide();
        self.host.observe(Observation::VisualHidden);
    }

    /// Closes the current cycle once every active channel has finished.
    fn finish_cycle(&mut self) -> Flow {
        let update = self.rounds.increment();
        log::debug!("round {} complete", update.round);
        self.host
            .observe(Observation::RoundCompleted { round: update.round });
        if let Some(remaining) = update.remaining {
            self.host.observe(Observation::RoundsRemaining { remaining });
        }

        if update.finished {
            self.set_phase(Phase::Completed);
            log::info!("test over: {} rounds completed", update.round);
            self.host.observe(Observation::SessionCompleted {
                rounds: update.round,
            });
            self.host.on_completed(update.round);
            Flow::Hold
        } else {
            self.await_next();
            Flow::Continue
        }
    }

    pub(crate) fn set_phase(&mut self, next: Phase) {
        let from = self.phase.kind();
        let to = next.kind();
        self.phase = next;
        if from != to {
            log::debug!("phase {from:?} -> {to:?}");
            self.host.observe(Observation::PhaseChanged { from, to });
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    /// The stimulus chosen for the next presentation, if already drawn.
    pub fn pending(&self) -> &Selection {
        &self.pending
    }

    pub fn current_round(&self) -> u32 {
        self.rounds.completed()
    }

    pub fn rounds(&self) -> &RoundTracker {
        &self.rounds
    }

    /// The sanitized configuration this session runs on.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn delay_remaining(&self) -> Option<f64> {
        match self.phase {
            Phase::AwaitingNext { delay_remaining } => Some(delay_remaining),
            _ => None,
        }
    }

    pub fn duration_remaining(&self) -> Option<f64> {
        match self.phase {
            Phase::PresentingVisual {
                duration_remaining, ..
            }
            | Phase::PresentingBoth {
                duration_remaining, ..
            } => Some(duration_remaining),
            _ => None,
        }
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn visual(&self) -> &V {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut V {
        &mut self.visual
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Discards all scheduling state and hands the collaborators back, so a
    /// restarted session can be built around them.
    pub fn into_parts(self) -> (R, A, V, H) {
        (self.rng, self.audio, self.visual, self.host)
    }
}
