use reflex_core::{StimulusError, StimulusId};

/// The single-voice audio mixer.
pub trait AudioOutput {
    /// Starts playing a clip. Fire-and-forget; completion is observed
    /// through [`AudioOutput::is_playing`].
    fn play(&mut self, id: &StimulusId) -> Result<(), StimulusError>;
    fn is_playing(&self) -> bool;
    /// Intrinsic length of a clip in seconds, if known.
    fn lookup_duration(&self, id: &StimulusId) -> Option<f64>;
}

/// The surface visual stimuli are drawn on.
pub trait VisualDisplay {
    fn show(&mut self, id: &StimulusId) -> Result<(), StimulusError>;
    /// Clears any visual stimulus. Safe to call when nothing is shown.
    fn hide(&mut self);
}
