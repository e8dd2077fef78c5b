use reflex_core::{PhaseKind, StimulusId};

use crate::error::SchedulerWarning;

/// What the scheduler reports to its host. Write-only: nothing here feeds
/// back into scheduling.
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    PhaseChanged { from: PhaseKind, to: PhaseKind },
    LeadInCountdown { remaining: f64 },
    DelayCountdown { remaining: f64 },
    DurationCountdown { remaining: f64 },
    VisualShown { id: StimulusId },
    VisualHidden,
    AudioStarted { id: StimulusId },
    AudioFinished { id: StimulusId },
    RoundCompleted { round: u32 },
    RoundsRemaining { remaining: u32 },
    SessionCompleted { rounds: u32 },
    Warning(SchedulerWarning),
}

impl Observation {
    /// On-screen text for observations that have one.
    pub fn display_text(&self) -> Option<String> {
        Some(match self {
            Self::LeadInCountdown { remaining } => format!("Starting in: {remaining:.1}s"),
            Self::DelayCountdown { remaining } => format!("Next stimulus in: {remaining:.1}s"),
            Self::DurationCountdown { remaining } => format!("Stimulus ends in: {remaining:.1}s"),
            Self::RoundsRemaining { remaining: 1 } => "1 round left".to_owned(),
            Self::RoundsRemaining { remaining } => format!("{remaining} rounds left"),
            Self::SessionCompleted { rounds } => format!("Test over: {rounds} rounds completed."),
            _ => return None,
        })
    }
}

/// The screen or process hosting a session. The scheduler never navigates
/// on its own; it only notifies.
pub trait SessionHost {
    fn observe(&mut self, observation: Observation);
    fn on_completed(&mut self, _rounds: u32) {}
    fn on_quit_requested(&mut self) {}
    fn on_restart_requested(&mut self) {}
}

impl SessionHost for Vec<Observation> {
    fn observe(&mut self, observation: Observation) {
        self.push(observation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdowns_render_with_one_decimal() {
        let text = |o: Observation| o.display_text().unwrap();
        assert_eq!(text(Observation::LeadInCountdown { remaining: 2.46 }), "Starting in: 2.5s");
        assert_eq!(
            text(Observation::DelayCountdown { remaining: 0.04 }),
            "Next stimulus in: 0.0s"
        );
        assert_eq!(
            text(Observation::DurationCountdown { remaining: 1.0 }),
            "Stimulus ends in: 1.0s"
        );
    }

    #[test]
    fn rounds_left_is_singular_for_one() {
        let text = |remaining| Observation::RoundsRemaining { remaining }.display_text().unwrap();
        assert_eq!(text(1), "1 round left");
        assert_eq!(text(0), "0 rounds left");
        assert_eq!(text(12), "12 rounds left");
    }

    #[test]
    fn effects_have_no_text() {
        assert_eq!(Observation::VisualHidden.display_text(), None);
    }
}
