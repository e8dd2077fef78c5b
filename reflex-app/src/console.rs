use reflex_scheduler::{Observation, SessionHost};

/// Prints session text to the log and remembers navigation requests until
/// the main loop acts on them.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    quit: bool,
    restart: bool,
    completed: Option<u32>,
    last_text: Option<String>,
}

impl ConsoleHost {
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart)
    }

    pub fn completed(&self) -> Option<u32> {
        self.completed
    }

    /// Clears per-session state before the host is reused by a restart.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl SessionHost for ConsoleHost {
    fn observe(&mut self, observation: Observation) {
        match &observation {
            Observation::PhaseChanged { from, to } => log::debug!("{from:?} -> {to:?}"),
            // already logged where it was raised
            Observation::Warning(_) => {}
            Observation::LeadInCountdown { .. }
            | Observation::DelayCountdown { .. }
            | Observation::DurationCountdown { .. } => {
                // Countdowns arrive every frame; only print when the text changes.
                let text = observation.display_text();
                if text != self.last_text {
                    if let Some(text) = &text {
                        log::trace!("{text}");
                    }
                    self.last_text = text;
                }
            }
            other => {
                if let Some(text) = other.display_text() {
                    log::info!("{text}");
                }
            }
        }
    }

    fn on_completed(&mut self, rounds: u32) {
        self.completed = Some(rounds);
    }

    fn on_quit_requested(&mut self) {
        self.quit = true;
    }

    fn on_restart_requested(&mut self) {
        self.restart = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_request_is_consumed_once() {
        let mut host = ConsoleHost::default();
        host.on_restart_requested();
        assert!(host.take_restart());
        assert!(!host.take_restart());
    }

    #[test]
    fn reset_forgets_the_previous_session() {
        let mut host = ConsoleHost::default();
        host.on_completed(12);
        host.on_quit_requested();
        host.reset();
        assert_eq!(host.completed(), None);
        assert!(!host.quit_requested());
    }
}
