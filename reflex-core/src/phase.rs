use serde::{Deserialize, Serialize};

/// Scheduler phases as seen from the outside.
#[derive(Copy, Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    #[default]
    LeadIn,
    AwaitingNext,
    PresentingVisual,
    PresentingAudio,
    PresentingBoth,
    Paused,
    Completed,
}

impl PhaseKind {
    pub fn is_presenting(&self) -> bool {
        matches!(
            self,
            Self::PresentingVisual | Self::PresentingAudio | Self::PresentingBoth
        )
    }

    /// A pause request is honoured from every phase except these two.
    pub fn accepts_pause(&self) -> bool {
        !matches!(self, Self::Paused | Self::Completed)
    }

    /// Restart and quit are only offered while paused or after the last round.
    pub fn allows_session_control(&self) -> bool {
        matches!(self, Self::Paused | Self::Completed)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// The two output modalities a stimulus can travel on.
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Visual,
    Audio,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Visual => f.write_str("visual"),
            Channel::Audio => f.write_str("audio"),
        }
    }
}
