use reflex_core::DisplayToggles;

use crate::host::{Observation, SessionHost};

/// Drops countdown observations the subject chose not to see. The toggles
/// can be flipped while the session runs, as the pause menu allows.
#[derive(Debug, Clone)]
pub struct DisplayFilter<H> {
    inner: H,
    toggles: DisplayToggles,
}

impl<H: SessionHost> DisplayFilter<H> {
    pub fn new(inner: H, toggles: DisplayToggles) -> Self {
        Self { inner, toggles }
    }

    pub fn toggles(&self) -> DisplayToggles {
        self.toggles
    }

    pub fn toggle_delay_countdown(&mut self) -> bool {
        self.toggles.delay_countdown = !self.toggles.delay_countdown;
        self.toggles.delay_countdown
    }

    pub fn toggle_duration_countdown(&mut self) -> bool {
        self.toggles.duration_countdown = !self.toggles.duration_countdown;
        self.toggles.duration_countdown
    }

    pub fn toggle_rounds_left(&mut self) -> bool {
        self.toggles.rounds_left = !self.toggles.rounds_left;
        self.toggles.rounds_left
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut H {
        &mut self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }

    fn passes(&self, observation: &Observation) -> bool {
        match observation {
            Observation::DelayCountdown { .. } => self.toggles.delay_countdown,
            Observation::DurationCountdown { .. } => self.toggles.duration_countdown,
            Observation::RoundsRemaining { .. } => self.toggles.rounds_left,
            _ => true,
        }
    }
}

impl<H: SessionHost> SessionHost for DisplayFilter<H> {
    fn observe(&mut self, observation: Observation) {
        if self.passes(&observation) {
            self.inner.observe(observation);
        }
    }

    fn on_completed(&mut self, rounds: u32) {
        self.inner.on_completed(rounds);
    }

    fn on_quit_requested(&mut self) {
        self.inner.on_quit_requested();
    }

    fn on_restart_requested(&mut self) {
        self.inner.on_restart_requested();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(filter: &mut DisplayFilter<Vec<Observation>>) {
        filter.observe(Observation::LeadInCountdown { remaining: 1.0 });
        filter.observe(Observation::DelayCountdown { remaining: 1.0 });
        filter.observe(Observation::DurationCountdown { remaining: 1.0 });
        filter.observe(Observation::RoundsRemaining { remaining: 3 });
    }

    #[test]
    fn hidden_countdowns_are_dropped() {
        let mut filter = DisplayFilter::new(Vec::new(), DisplayToggles::default());
        feed(&mut filter);
        assert_eq!(
            filter.into_inner(),
            vec![Observation::LeadInCountdown { remaining: 1.0 }],
            "the lead-in countdown is always shown"
        );
    }

    #[test]
    fn toggling_takes_effect_immediately() {
        let mut filter = DisplayFilter::new(Vec::new(), DisplayToggles::default());
        assert!(filter.toggle_delay_countdown());
        assert!(filter.toggle_rounds_left());
        feed(&mut filter);
        assert_eq!(filter.inner().len(), 3);

        assert!(!filter.toggle_delay_countdown());
        filter.inner_mut().clear();
        feed(&mut filter);
        assert!(!filter
            .inner()
            .iter()
            .any(|o| matches!(o, Observation::DelayCountdown { .. })));
    }
}
