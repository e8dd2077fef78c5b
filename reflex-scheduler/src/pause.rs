//! Pause/resume and the session-control requests that are only honoured
//! while paused or finished.

use rand::Rng;

use crate::host::SessionHost;
use crate::output::{AudioOutput, VisualDisplay};
use crate::state::{Phase, Scheduler};

/// Countdown before the first stimulus and after every resume, in seconds.
pub const LEAD_IN_SECONDS: f64 = 3.0;

impl<R, A, V, H> Scheduler<R, A, V, H>
where
    R: Rng,
    A: AudioOutput,
    V: VisualDisplay,
    H: SessionHost,
{
    /// Suspends all timers. Ignored when already paused or completed.
    ///
    /// A stimulus that is on screen is cleared; the interrupted cycle does
    /// not count as a round. A stimulus chosen but not yet presented stays
    /// pending.
    pub fn pause(&mut self) -> bool {
        let preempted = self.phase.kind();
        if !preempted.accepts_pause() {
            log::debug!("pause ignored in {preempted:?}");
            return false;
        }
        if self.phase.shows_visual() {
            self.hide_visual();
        }
        self.audio_queued = false;
        self.set_phase(Phase::Paused { preempted });
        log::info!("paused during {preempted:?}");
        true
    }

    /// Leaves the pause through a fresh lead-in. Timers from before the
    /// pause are discarded, whatever phase was interrupted.
    pub fn resume(&mut self) -> bool {
        if !self.is_paused() {
            log::debug!("resume ignored in {:?}", self.phase.kind());
            return false;
        }
        self.set_phase(Phase::LeadIn {
            remaining: LEAD_IN_SECONDS,
        });
        log::info!("resuming after {LEAD_IN_SECONDS:.0}s lead-in");
        true
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused { .. })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.phase, Phase::Completed)
    }

    /// Asks the host to leave the session. Only available while paused or
    /// after the last round.
    pub fn request_quit(&mut self) -> bool {
        if !self.phase.kind().allows_session_control() {
            return false;
        }
        self.host.on_quit_requested();
        true
    }

    /// Asks the host to start over with a new scheduler. Only available
    /// while paused or after the last round.
    pub fn request_restart(&mut self) -> bool {
        if !self.phase.kind().allows_session_control() {
            return false;
        }
        self.host.on_restart_requested();
        true
    }
}
