use rand::Rng;
use reflex_core::{StimulusId, StimulusPools};

use crate::error::SelectionError;

/// The stimulus (or pair) chosen for the next presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub visual: Option<StimulusId>,
    pub audio: Option<StimulusId>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.visual.is_none() && self.audio.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct StimulusSelector {
    pools: StimulusPools,
    simultaneous: bool,
}

impl StimulusSelector {
    pub fn new(pools: StimulusPools, simultaneous: bool) -> Self {
        Self {
            pools,
            simultaneous,
        }
    }

    pub fn pools(&self) -> &StimulusPools {
        &self.pools
    }

    pub fn is_simultaneous(&self) -> bool {
        self.simultaneous
    }

    /// Picks the next presentation.
    ///
    /// Simultaneous mode draws independently from each non-empty pool.
    /// Exclusive mode draws one modality, weighted by pool size, then one
    /// stimulus from it, so exactly one side of the result is set.
    pub fn select_next<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Selection, SelectionError> {
        if self.pools.is_empty() {
            return Err(SelectionError::NoStimuliConfigured);
        }

        let visual = &self.pools.visual;
        let audio = &self.pools.audio;

        if self.simultaneous {
            return Ok(Selection {
                visual: pick_uniform(visual, rng).cloned(),
                audio: pick_uniform(audio, rng).cloned(),
            });
        }

        let is_visual = if audio.is_empty() {
            true
        } else if visual.is_empty() {
            false
        } else {
            rng.random_range(0..self.pools.total()) < visual.len()
        };

        Ok(if is_visual {
            Selection {
                visual: pick_uniform(visual, rng).cloned(),
                audio: None,
            }
        } else {
            Selection {
                visual: None,
                audio: pick_uniform(audio, rng).cloned(),
            }
        })
    }
}

/// Uniform pick from a pool. A single-element pool never touches the
/// generator.
pub fn pick_uniform<'a, R: Rng + ?Sized>(
    pool: &'a [StimulusId],
    rng: &mut R,
) -> Option<&'a StimulusId> {
    match pool.len() {
        0 => None,
        1 => pool.first(),
        n => pool.get(rng.random_range(0..n)),
    }
}
