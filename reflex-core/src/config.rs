use serde::{Deserialize, Serialize};

/// Timing parameters and toggles for one session. Field names follow the
/// saved time-controls file, so existing saves load as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Configuration {
    /// Seconds a visual stimulus stays on screen.
    pub duration: f64,
    pub min_duration: f64,
    pub max_duration: f64,
    /// Seconds between the end of one stimulus and the start of the next.
    pub delay: f64,
    pub min_delay: f64,
    pub max_delay: f64,
    pub randomize_duration: bool,
    pub randomize_delay: bool,
    pub unlimited_rounds: bool,
    pub number_of_rounds: u32,
    pub simultaneous_visual_audio_stimuli: bool,
    pub show_delay_countdown: bool,
    pub show_duration_countdown: bool,
    pub show_number_of_rounds_left: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            duration: 5.0,
            min_duration: 3.0,
            max_duration: 7.0,
            delay: 5.0,
            min_delay: 3.0,
            max_delay: 7.0,
            randomize_duration: false,
            randomize_delay: false,
            unlimited_rounds: false,
            number_of_rounds: 12,
            simultaneous_visual_audio_stimuli: false,
            show_delay_countdown: false,
            show_duration_countdown: false,
            show_number_of_rounds_left: false,
        }
    }
}

/// Which countdowns a host should display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayToggles {
    pub delay_countdown: bool,
    pub duration_countdown: bool,
    pub rounds_left: bool,
}

/// A randomized range whose bounds were inverted and had to be collapsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFinding {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

impl Configuration {
    /// Returns a copy that is safe to schedule with: no negative seconds,
    /// `min <= max` on both ranges and at least one round. Inverted ranges
    /// collapse onto their maximum and are reported.
    pub fn sanitized(&self) -> (Self, Vec<RangeFinding>) {
        let mut out = self.clone();
        let mut findings = Vec::new();

        out.duration = non_negative(self.duration);
        out.delay = non_negative(self.delay);
        (out.min_duration, out.max_duration) =
            clamp_range("duration", self.min_duration, self.max_duration, &mut findings);
        (out.min_delay, out.max_delay) =
            clamp_range("delay", self.min_delay, self.max_delay, &mut findings);
        out.number_of_rounds = self.number_of_rounds.max(1);

        (out, findings)
    }

    /// The number of rounds after which the session ends, if any.
    pub fn round_limit(&self) -> Option<u32> {
        (!self.unlimited_rounds).then(|| self.number_of_rounds.max(1))
    }

    pub fn display(&self) -> DisplayToggles {
        DisplayToggles {
            delay_countdown: self.show_delay_countdown,
            duration_countdown: self.show_duration_countdown,
            rounds_left: self.show_number_of_rounds_left,
        }
    }

    pub fn log_summary(&self) {
        log::info!(
            "duration {:.1}s [{:.1}..{:.1}] randomized={} | delay {:.1}s [{:.1}..{:.1}] randomized={} | rounds {} unlimited={} | simultaneous={}",
            self.duration,
            self.min_duration,
            self.max_duration,
            self.randomize_duration,
            self.delay,
            self.min_delay,
            self.max_delay,
            self.randomize_delay,
            self.number_of_rounds,
            self.unlimited_rounds,
            self.simultaneous_visual_audio_stimuli,
        );
    }
}

fn non_negative(seconds: f64) -> f64 {
    if seconds.is_nan() { 0.0 } else { seconds.max(0.0) }
}

fn clamp_range(
    field: &'static str,
    min: f64,
    max: f64,
    findings: &mut Vec<RangeFinding>,
) -> (f64, f64) {
    let lo = non_negative(min);
    let hi = non_negative(max);
    if lo > hi {
        findings.push(RangeFinding { field, min, max });
        (hi, hi)
    } else {
        (lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_fresh_install() {
        let c = Configuration::default();
        assert_eq!((c.duration, c.delay), (5.0, 5.0));
        assert_eq!((c.min_delay, c.max_delay), (3.0, 7.0));
        assert_eq!(c.round_limit(), Some(12));
    }

    #[test]
    fn loads_saved_time_controls() {
        let json = r#"{"Duration":2.5,"MinDuration":1.0,"MaxDuration":4.0,"Delay":1.0,
            "RandomizeDelay":true,"UnlimitedRounds":true,"ShowDelayCountdown":true,
            "SimultaneousVisualAudioStimuli":true,"NumberOfRounds":3}"#;
        let c: Configuration = serde_json::from_str(json).unwrap();
        assert_eq!(c.duration, 2.5);
        assert!(c.randomize_delay);
        assert!(c.simultaneous_visual_audio_stimuli);
        assert_eq!(c.round_limit(), None);
        assert_eq!(c.max_delay, 7.0, "missing fields keep their defaults");
        assert!(c.display().delay_countdown);
        assert!(!c.display().rounds_left);
    }

    #[test]
    fn inverted_ranges_collapse_onto_max() {
        let c = Configuration {
            min_delay: 4.0,
            max_delay: 2.0,
            min_duration: -1.0,
            max_duration: 3.0,
            duration: -2.0,
            number_of_rounds: 0,
            ..Configuration::default()
        };
        let (s, findings) = c.sanitized();
        assert_eq!((s.min_delay, s.max_delay), (2.0, 2.0));
        assert_eq!((s.min_duration, s.max_duration), (0.0, 3.0));
        assert_eq!(s.duration, 0.0);
        assert_eq!(s.number_of_rounds, 1);
        assert_eq!(findings, vec![RangeFinding { field: "delay", min: 4.0, max: 2.0 }]);
    }
}
