//! Polling driver
//!
//! Runs `PollCycle` ticks until a stop is requested. All per-tick errors are
//! turned into events; only the stop flag ends the loop.

use std::time::Duration;

use crate::domain::ports::watch_events::format_uptime;
use crate::domain::ports::{Clock, DirectoryLister, NotificationSink, WatchEvent};
use crate::domain::StopHandle;
use crate::error::WatchError;
use crate::infrastructure::fs::LocalDirectory;

use super::cycle::PollCycle;
use super::options::WatchOptions;

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    /// Terminal
    Stopping,
}

/// Blocking polling loop
pub struct WatchDriver<C: Clock, L: DirectoryLister = LocalDirectory> {
    cycle: PollCycle<L>,
    clock: C,
    stop: StopHandle,
    state: DriverState,
    directory_missing: bool,
}

impl<C: Clock> WatchDriver<C, LocalDirectory> {
    pub fn new(options: WatchOptions, clock: C, stop: StopHandle) -> Self {
        Self::with_cycle(PollCycle::new(options), clock, stop)
    }
}

impl<C: Clock, L: DirectoryLister> WatchDriver<C, L> {
    /// Drive an already built cycle
    pub fn with_cycle(cycle: PollCycle<L>, clock: C, stop: StopHandle) -> Self {
        Self {
            cycle,
            clock,
            stop,
            state: DriverState::Running,
            directory_missing: false,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn cycle(&self) -> &PollCycle<L> {
        &self.cycle
    }

    /// Handle for requesting a stop from elsewhere
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Run until stopped and return the uptime.
    ///
    /// The stop flag is checked before each tick and before each sleep; a
    /// tick that has started always runs to completion.
    pub fn run<S>(&mut self, sink: &S) -> Duration
    where
        S: NotificationSink + ?Sized,
    {
        let started = self.clock.now();
        sink.notify(&self.started_event());

        while self.state == DriverState::Running {
            if self.check_stop(sink) {
                break;
            }

            let backoff = self.tick(sink);

            if let Some(backoff) = backoff {
                if self.check_stop(sink) {
                    break;
                }
                self.clock.sleep(backoff, &self.stop);
            }

            if self.check_stop(sink) {
                break;
            }
            self.clock.sleep(self.cycle.options().interval, &self.stop);
        }

        let uptime = self.clock.now().saturating_duration_since(started);
        sink.notify(&WatchEvent::Shutdown {
            uptime: format_uptime(uptime),
            uptime_secs: uptime.as_secs_f64(),
        });
        uptime
    }

    /// Run one cycle and classify its outcome. Returns the backoff to apply
    /// when the directory could not be listed.
    fn tick<S>(&mut self, sink: &S) -> Option<Duration>
    where
        S: NotificationSink + ?Sized,
    {
        match self.cycle.run_cycle(sink) {
            Ok(report) => {
                if self.directory_missing {
                    self.directory_missing = false;
                    sink.notify(&WatchEvent::DirectoryRestored {
                        directory: self.directory_display(),
                    });
                }
                sink.notify(&report.to_event());
                None
            }
            Err(err @ WatchError::DirectoryUnavailable { .. }) => {
                if !self.directory_missing {
                    self.directory_missing = true;
                    sink.notify(&WatchEvent::DirectoryUnavailable {
                        directory: self.directory_display(),
                        message: err.to_string(),
                    });
                }
                Some(self.cycle.options().backoff)
            }
            Err(err) => {
                sink.notify(&WatchEvent::UnhandledError {
                    message: err.to_string(),
                });
                None
            }
        }
    }

    fn check_stop<S>(&mut self, sink: &S) -> bool
    where
        S: NotificationSink + ?Sized,
    {
        if self.state == DriverState::Stopping {
            return true;
        }
        if self.stop.is_stop_requested() {
            self.state = DriverState::Stopping;
            sink.notify(&WatchEvent::StopRequested);
            return true;
        }
        false
    }

    fn directory_display(&self) -> String {
        self.cycle.options().directory.display().to_string()
    }

    fn started_event(&self) -> WatchEvent {
        let options = self.cycle.options();
        WatchEvent::WatchStarted {
            directory: options.directory.display().to_string(),
            extension: options.extension.clone(),
            magic: options.magic_word.clone(),
            interval_secs: options.interval.as_secs_f64(),
            pid: std::process::id(),
            started_at: chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
        }
    }
}
