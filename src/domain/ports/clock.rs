//! Clock port - time source and inter-tick sleep

use std::time::{Duration, Instant};

use crate::domain::stop::StopHandle;

/// Time source for the polling driver
///
/// Implementations:
/// - `SystemClock` - real time, sleeps in short slices
/// - test clocks that record sleeps instead of blocking
pub trait Clock {
    /// Current instant, used for uptime
    fn now(&self) -> Instant;

    /// Block for `duration`, or less if `stop` is requested meanwhile
    fn sleep(&self, duration: Duration, stop: &StopHandle);
}
