//! System clock

use std::time::{Duration, Instant};

use crate::domain::ports::Clock;
use crate::domain::StopHandle;

/// Granularity of stop checks while sleeping
pub const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Real-time clock; sleeps in `SLEEP_SLICE` steps so a stop request cuts the
/// wait short
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration, stop: &StopHandle) {
        let deadline = Instant::now() + duration;
        while !stop.is_stop_requested() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            std::thread::sleep(remaining.min(SLEEP_SLICE));
        }
    }
}
