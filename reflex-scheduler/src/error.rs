use reflex_core::{Channel, RangeFinding, StimulusId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("need at least 1 visual or audio stimulus")]
    NoStimuliConfigured,
}

/// Recoverable conditions. None of them stop the scheduler; the affected
/// channel is treated as absent for the current cycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerWarning {
    #[error("need at least 1 visual or audio stimulus")]
    NoStimuliConfigured,
    #[error("{channel} stimulus `{id}` could not be resolved; skipped this cycle")]
    UnknownStimulus { channel: Channel, id: StimulusId },
    #[error("{field} range {min}..{max} is inverted; collapsed to a single value")]
    InvalidRange { field: &'static str, min: f64, max: f64 },
    #[error("audio voice still busy; `{id}` waits for it to finish")]
    AudioVoiceBusy { id: StimulusId },
}

impl From<SelectionError> for SchedulerWarning {
    fn from(e: SelectionError) -> Self {
        match e {
            SelectionError::NoStimuliConfigured => Self::NoStimuliConfigured,
        }
    }
}

impl From<RangeFinding> for SchedulerWarning {
    fn from(f: RangeFinding) -> Self {
        Self::InvalidRange {
            field: f.field,
            min: f.min,
            max: f.max,
        }
    }
}
