use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a selectable stimulus, as stored by the stimulus menus
/// (e.g. `RedColorButton`, `UpArrowButton`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StimulusId(String);

impl StimulusId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StimulusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StimulusId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for StimulusId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for StimulusId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The visual and audio identifiers eligible for selection in one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StimulusPools {
    pub visual: Vec<StimulusId>,
    pub audio: Vec<StimulusId>,
}

impl StimulusPools {
    pub fn new<V, A>(visual: V, audio: A) -> Self
    where
        V: IntoIterator,
        V::Item: Into<StimulusId>,
        A: IntoIterator,
        A::Item: Into<StimulusId>,
    {
        Self {
            visual: visual.into_iter().map(Into::into).collect(),
            audio: audio.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.visual.is_empty() && self.audio.is_empty()
    }

    pub fn total(&self) -> usize {
        self.visual.len() + self.audio.len()
    }
}
