pub mod config;
pub mod error;
pub mod phase;
pub mod pool;
pub mod stimulus;

pub use config::{Configuration, DisplayToggles, RangeFinding};
pub use error::StimulusError;
pub use phase::{Channel, PhaseKind};
pub use pool::{StimulusId, StimulusPools};
pub use stimulus::{ArrowDirection, BACKGROUND_RGBA, SoundName, VisualCue};
