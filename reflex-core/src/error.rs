use thiserror::Error;

use crate::pool::StimulusId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StimulusError {
    #[error("unknown stimulus id `{0}`")]
    UnknownStimulusId(StimulusId),
    #[error("`{0}` does not name a sound")]
    UnknownSound(String),
}
