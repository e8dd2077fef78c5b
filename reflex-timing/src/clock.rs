use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::timer::{CalibrationStats, FrameLog, Timer};

/// Virtual clock for fixed-step simulation. Sleeping advances time instead
/// of blocking; clones share the same clock.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    now_ns: Arc<AtomicU64>,
    frames: FrameLog,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, d: Duration) {
        self.now_ns.fetch_add(d.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Timer for ManualTimer {
    type Timestamp = u64;
    fn now(&self) -> u64 {
        self.now_ns.load(Ordering::SeqCst)
    }
    fn elapsed(&self, ts: u64) -> Duration {
        Duration::from_nanos(self.now().saturating_sub(ts))
    }
    fn sleep(&self, d: Duration) {
        self.advance(d);
    }
    fn record_frame(&mut self, d: Duration) {
        self.frames.record(d);
    }
    fn frame_count(&self) -> usize {
        self.frames.len()
    }
    fn calibration_stats(&self) -> CalibrationStats {
        self.frames.stats()
    }
}

/// Turns successive timer readings into per-tick `dt` values and paces
/// ticks to a target frame period.
#[derive(Debug, Clone)]
pub struct FrameClock<T: Timer<Timestamp = u64>> {
    timer: T,
    last: u64,
    period: Duration,
}

impl<T: Timer<Timestamp = u64>> FrameClock<T> {
    pub fn new(timer: T, fps: f64) -> Self {
        let period = if fps > 0.0 {
            Duration::from_secs_f64(1.0 / fps)
        } else {
            Duration::ZERO
        };
        let last = timer.now();
        Self { timer, last, period }
    }

    /// Time since the previous tick (or since construction). The interval
    /// is recorded as a frame sample.
    pub fn tick(&mut self) -> Duration {
        let now = self.timer.now();
        let dt = Duration::from_nanos(now.saturating_sub(self.last));
        self.last = now;
        self.timer.record_frame(dt);
        dt
    }

    /// Sleeps for whatever is left of the current frame period.
    pub fn wait_for_next_frame(&self) {
        let spent = self.timer.elapsed(self.last);
        if let Some(rest) = self.period.checked_sub(spent) {
            self.timer.sleep(rest);
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_timer_clones_share_time() {
        let a = ManualTimer::new();
        let b = a.clone();
        a.sleep(Duration::from_millis(250));
        assert_eq!(b.now(), 250_000_000);
        assert_eq!(b.elapsed(50_000_000), Duration::from_millis(200));
    }

    #[test]
    fn frame_clock_paces_a_manual_timer() {
        let mut clock = FrameClock::new(ManualTimer::new(), 50.0);
        assert_eq!(clock.period(), Duration::from_millis(20));

        clock.timer().advance(Duration::from_millis(5));
        clock.wait_for_next_frame();
        assert_eq!(clock.tick(), Duration::from_millis(20));

        clock.wait_for_next_frame();
        assert_eq!(clock.tick(), Duration::from_millis(20));
        assert_eq!(clock.timer().frame_count(), 2);
        assert_eq!(clock.timer().calibration_stats().effective_fps, 50.0);
    }

    #[test]
    fn overrunning_frames_do_not_sleep() {
        let mut clock = FrameClock::new(ManualTimer::new(), 100.0);
        clock.timer().advance(Duration::from_millis(30));
        clock.wait_for_next_frame();
        assert_eq!(clock.tick(), Duration::from_millis(30));
    }
}
