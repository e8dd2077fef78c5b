pub mod clock;
pub mod timer;

pub use clock::{FrameClock, ManualTimer};
pub use timer::{CalibrationStats, FrameLog, HighPrecisionTimer, Timer};
