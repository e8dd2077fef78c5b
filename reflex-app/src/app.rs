use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use reflex_scheduler::{DisplayFilter, Scheduler, VisualDisplay};
use reflex_timing::{FrameClock, HighPrecisionTimer, ManualTimer, Timer};

use crate::Args;
use crate::console::ConsoleHost;
use crate::controls::{self, Command};
use crate::devices::{SimulatedAudio, SimulatedDisplay};
use crate::store::DataDir;

/// Session time cap for `--simulate` runs with unlimited rounds.
const SIMULATION_LIMIT_SECONDS: f64 = 600.0;

type Session<T> = Scheduler<StdRng, SimulatedAudio<T>, SimulatedDisplay, DisplayFilter<ConsoleHost>>;

pub struct App {
    args: Args,
    data: DataDir,
}

impl App {
    pub fn new(args: Args) -> Result<Self> {
        anyhow::ensure!(args.fps > 0.0, "--fps must be positive, got {}", args.fps);
        anyhow::ensure!(
            args.clip_length >= 0.0,
            "--clip-length must not be negative, got {}",
            args.clip_length
        );
        let data = DataDir::new(&args.data_dir);
        Ok(Self { args, data })
    }

    pub fn run(self) -> Result<()> {
        log::info!("=== REACTION TEST ===");
        log::info!("Platform: {} / {}", std::env::consts::OS, std::env::consts::ARCH);
        log::info!("Data directory: {}", self.data.root().display());

        if self.args.simulate {
            self.drive(ManualTimer::new(), None)
        } else {
            log::info!("Commands: p = pause/resume, r = restart, q = quit, d/s/n = toggle countdowns");
            self.drive(HighPrecisionTimer::new(), Some(controls::spawn_reader()))
        }
    }

    fn drive<T: Timer<Timestamp = u64>>(
        &self,
        timer: T,
        mut commands: Option<Receiver<Command>>,
    ) -> Result<()> {
        let mut clock = FrameClock::new(timer.clone(), self.args.fps);
        let rng = match self.args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let audio = SimulatedAudio::new(timer, Duration::from_secs_f64(self.args.clip_length));
        let mut session = self.start(rng, audio, SimulatedDisplay::default(), ConsoleHost::default())?;

        let mut limit = self.time_limit(&session);
        let started = clock.timer().now();

        loop {
            let dt = clock.tick();
            session.advance(dt);

            if let Some(rx) = &commands {
                match rx.try_recv() {
                    Ok(command) => apply(command, &mut session),
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => commands = None,
                }
            }

            if session.is_completed() && !self.args.hold {
                session.request_quit();
            }
            if session.host_mut().inner_mut().take_restart() {
                session = self.restart(session)?;
                limit = self.time_limit(&session);
                continue;
            }
            if session.host().inner().quit_requested() {
                break;
            }
            if limit.is_some_and(|limit| clock.timer().elapsed(started) >= limit) {
                log::info!("time limit reached");
                break;
            }

            clock.wait_for_next_frame();
        }

        session.audio_mut().stop();
        self.report(&session, clock.timer());
        Ok(())
    }

    fn start<T: Timer<Timestamp = u64>>(
        &self,
        rng: StdRng,
        audio: SimulatedAudio<T>,
        visual: SimulatedDisplay,
        host: ConsoleHost,
    ) -> Result<Session<T>> {
        let config = self
            .data
            .load_configuration()
            .context("cannot start session without time controls")?;
        let pools = self.data.load_pools().context("cannot load stimulus pools")?;
        let host = DisplayFilter::new(host, config.display());
        Ok(Scheduler::new(config, pools, rng, audio, visual, host))
    }

    /// Restart re-reads the saved settings, like reloading the test scene.
    fn restart<T: Timer<Timestamp = u64>>(&self, session: Session<T>) -> Result<Session<T>> {
        log::info!("restarting after {} rounds", session.current_round());
        let (rng, mut audio, mut visual, host) = session.into_parts();
        audio.stop();
        visual.hide();
        let mut host = host.into_inner();
        host.reset();
        self.start(rng, audio, visual, host)
    }

    /// Run-time cap for the current session's settings.
    fn time_limit<T: Timer<Timestamp = u64>>(&self, session: &Session<T>) -> Option<Duration> {
        let seconds = match self.args.max_seconds {
            Some(seconds) => Some(seconds),
            None if self.args.simulate && session.config().round_limit().is_none() => {
                log::info!("unlimited rounds: simulation stops after {SIMULATION_LIMIT_SECONDS}s");
                Some(SIMULATION_LIMIT_SECONDS)
            }
            None => None,
        };
        seconds.map(Duration::from_secs_f64)
    }

    fn report<T: Timer<Timestamp = u64>>(&self, session: &Session<T>, timer: &T) {
        log::info!(
            "session ended in {:?}: {} rounds, {} visual / {} audio presentations",
            session.phase_kind(),
            session.current_round(),
            session.visual().shown(),
            session.audio().played(),
        );
        if let Some(cue) = session.visual().current() {
            log::debug!("left on screen: {cue:?}");
        }
        if let Some(rounds) = session.host().inner().completed() {
            log::info!("completed all {rounds} rounds");
        }

        let stats = timer.calibration_stats();
        log::info!("Frame timing over {} frames:", timer.frame_count());
        log::info!("  Average frame time: {:.3}ms", stats.average_frame_time_ns / 1e6);
        log::info!("  Jitter: {:.3}ms", stats.jitter_ns / 1e6);
        log::info!(
            "  Min/Max: {:.3}ms / {:.3}ms",
            stats.min_frame_time_ns / 1e6,
            stats.max_frame_time_ns / 1e6
        );
        log::info!("  Effective FPS: {:.1}", stats.effective_fps);
    }
}

fn apply<T: Timer<Timestamp = u64>>(command: Command, session: &mut Session<T>) {
    match command {
        Command::TogglePause => {
            if session.is_paused() {
                session.resume();
            } else if !session.pause() {
                log::info!("nothing to pause");
            }
        }
        Command::Quit => {
            if !session.request_quit() {
                log::info!("quit is available while paused or after the last round");
            }
        }
        Command::Restart => {
            if !session.request_restart() {
                log::info!("restart is available while paused or after the last round");
            }
        }
        Command::ToggleDelayCountdown => {
            let on = session.host_mut().toggle_delay_countdown();
            log::info!("delay countdown {}", if on { "on" } else { "off" });
        }
        Command::ToggleDurationCountdown => {
            let on = session.host_mut().toggle_duration_countdown();
            log::info!("duration countdown {}", if on { "on" } else { "off" });
        }
        Command::ToggleRoundsLeft => {
            let on = session.host_mut().toggle_rounds_left();
            log::info!("rounds left {}", if on { "on" } else { "off" });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(data_dir: PathBuf) -> Args {
        Args {
            data_dir,
            fps: 60.0,
            seed: Some(3),
            simulate: true,
            max_seconds: Some(30.0),
            clip_length: 0.5,
            hold: false,
        }
    }

    #[test]
    fn rejects_non_positive_fps() {
        let mut a = args(PathBuf::from("."));
        a.fps = 0.0;
        assert!(App::new(a).is_err());
    }

    #[test]
    fn restart_rebuilds_session_from_round_zero() {
        let dir = std::env::temp_dir().join(format!("reflex-app-restart-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(crate::store::VISUAL_STIMULI_FILE), r#"["UpArrowButton"]"#).unwrap();
        std::fs::write(
            dir.join(crate::store::TIME_CONTROLS_FILE),
            r#"{"Delay": 0.5, "Duration": 0.5, "UnlimitedRounds": true}"#,
        )
        .unwrap();

        let app = App::new(args(dir.clone())).unwrap();
        let timer = ManualTimer::new();
        let audio = SimulatedAudio::new(timer, Duration::from_millis(500));
        let mut session = app
            .start(StdRng::seed_from_u64(1), audio, SimulatedDisplay::default(), ConsoleHost::default())
            .unwrap();
        for _ in 0..10 {
            session.advance(Duration::from_millis(500));
        }
        assert!(session.current_round() > 0);

        assert!(session.pause());
        assert!(session.request_restart());
        assert!(session.host_mut().inner_mut().take_restart());
        let fresh = app.restart(session).unwrap();
        assert_eq!(fresh.current_round(), 0);
        assert!(!fresh.is_paused());
        assert!(fresh.visual().shown() > 0, "display carried over");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn restart_picks_up_a_changed_round_limit() {
        let dir = std::env::temp_dir().join(format!("reflex-app-limit-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let controls = dir.join(crate::store::TIME_CONTROLS_FILE);
        std::fs::write(&controls, r#"{"UnlimitedRounds": false, "NumberOfRounds": 2}"#).unwrap();

        let mut a = args(dir.clone());
        a.max_seconds = None;
        let app = App::new(a).unwrap();
        let audio = SimulatedAudio::new(ManualTimer::new(), Duration::from_millis(500));
        let mut session = app
            .start(StdRng::seed_from_u64(1), audio, SimulatedDisplay::default(), ConsoleHost::default())
            .unwrap();
        assert_eq!(app.time_limit(&session), None);

        std::fs::write(&controls, r#"{"UnlimitedRounds": true}"#).unwrap();
        assert!(session.pause());
        assert!(session.request_restart());
        let fresh = app.restart(session).unwrap();
        assert_eq!(
            app.time_limit(&fresh),
            Some(Duration::from_secs_f64(SIMULATION_LIMIT_SECONDS))
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
