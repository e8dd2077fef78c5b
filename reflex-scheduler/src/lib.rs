//! Tick-driven scheduler deciding when each stimulus is shown or played,
//! for how long, and when a session is over.

pub mod error;
pub mod filter;
pub mod host;
pub mod output;
pub mod pause;
pub mod rounds;
pub mod selector;
pub mod state;
pub mod timing;

pub use error::{SchedulerWarning, SelectionError};
pub use filter::DisplayFilter;
pub use host::{Observation, SessionHost};
pub use output::{AudioOutput, VisualDisplay};
pub use pause::LEAD_IN_SECONDS;
pub use rounds::{RoundTracker, RoundUpdate};
pub use selector::{Selection, StimulusSelector};
pub use state::{Phase, Scheduler};
pub use timing::IntervalSampler;
