//! Tests for the watch module

use super::cycle::PollCycle;
use super::driver::{DriverState, WatchDriver};
use super::options::WatchOptions;
use crate::domain::ports::{Clock, DirectoryLister, NoopSink, NotificationSink, WatchEvent};
use crate::domain::StopHandle;
use crate::error::{WatchError, WatchResult};
use std::cell::{Cell, RefCell};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::tempdir;

const INTERVAL: Duration = Duration::from_millis(250);

/// Sink that keeps every event
#[derive(Default)]
struct RecordingSink {
    events: RefCell<Vec<WatchEvent>>,
    messages: RefCell<Vec<String>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<WatchEvent> {
        self.events.borrow().clone()
    }

    fn count(&self, pred: impl Fn(&WatchEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }

    fn magic_lines(&self) -> Vec<(String, usize)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                WatchEvent::MagicFound { file, line, .. } => Some((file.clone(), *line)),
                _ => None,
            })
            .collect()
    }
}

impl NotificationSink for RecordingSink {
    fn info(&self, msg: &str) {
        self.messages.borrow_mut().push(msg.to_string());
    }

    fn warning(&self, msg: &str) {
        self.messages.borrow_mut().push(msg.to_string());
    }

    fn error(&self, msg: &str) {
        self.messages.borrow_mut().push(msg.to_string());
    }

    fn notify(&self, event: &WatchEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Clock that records sleeps instead of blocking and requests a stop after
/// a fixed number of them
struct FakeClock {
    now: Cell<Instant>,
    sleeps: RefCell<Vec<Duration>>,
    stop_after: usize,
    stop: StopHandle,
    on_sleep: Box<dyn Fn(usize)>,
}

impl FakeClock {
    fn new(stop: &StopHandle, stop_after: usize) -> Self {
        Self {
            now: Cell::new(Instant::now()),
            sleeps: RefCell::new(Vec::new()),
            stop_after,
            stop: stop.clone(),
            on_sleep: Box::new(|_| {}),
        }
    }

    /// Run `hook(n)` after the n-th sleep (1-based)
    fn on_sleep(mut self, hook: impl Fn(usize) + 'static) -> Self {
        self.on_sleep = Box::new(hook);
        self
    }
}

impl Clock for &FakeClock {
    fn now(&self) -> Instant {
        self.now.get()
    }

    fn sleep(&self, duration: Duration, _stop: &StopHandle) {
        self.now.set(self.now.get() + duration);
        let n = {
            let mut sleeps = self.sleeps.borrow_mut();
            sleeps.push(duration);
            sleeps.len()
        };
        (self.on_sleep)(n);
        if n >= self.stop_after {
            self.stop.request_stop();
        }
    }
}

/// Lister that fails every call with an unclassified I/O error
struct FailingLister {
    calls: Cell<usize>,
}

impl FailingLister {
    fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }
}

impl DirectoryLister for &FailingLister {
    fn list(&self, _dir: &Path) -> WatchResult<Vec<String>> {
        self.calls.set(self.calls.get() + 1);
        Err(WatchError::Io(io::Error::new(
            io::ErrorKind::Other,
            "listing interrupted",
        )))
    }
}

/// Lister returning fixed names regardless of what is on disk
struct FixedLister(Vec<&'static str>);

impl DirectoryLister for FixedLister {
    fn list(&self, _dir: &Path) -> WatchResult<Vec<String>> {
        Ok(self.0.iter().map(|name| name.to_string()).collect())
    }
}

fn options(dir: &Path) -> WatchOptions {
    WatchOptions::new(dir, "MAGIC").with_interval(INTERVAL)
}

fn append(path: &Path, line: &str) {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .unwrap();
    writeln!(file, "{}", line).unwrap();
}

// === PollCycle tests ===

#[test]
fn test_cycle_reports_magic_in_new_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "foo\nMAGIC\nbar\n").unwrap();

    let sink = RecordingSink::default();
    let mut cycle = PollCycle::new(options(dir.path()));
    let report = cycle.run_cycle(&sink).unwrap();

    assert_eq!(report.added, 1);
    assert_eq!(report.scanned, 1);
    assert_eq!(report.matches, 1);
    assert_eq!(cycle.watchlist().offset("a.txt"), Some(3));

    let expected_file = dir.path().join("a.txt").display().to_string();
    assert_eq!(sink.magic_lines(), vec![(expected_file, 2)]);
    assert_eq!(
        sink.events()[0],
        WatchEvent::FileAdded {
            file: "a.txt".to_string()
        }
    );
}

#[test]
fn test_cycle_ignores_other_extensions_and_drops_missing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "").unwrap();

    let sink = RecordingSink::default();
    let mut cycle = PollCycle::new(options(dir.path()));
    cycle.run_cycle(&sink).unwrap();

    fs::write(dir.path().join("b.log"), "MAGIC\n").unwrap();
    cycle.run_cycle(&sink).unwrap();
    assert_eq!(cycle.watchlist().names(), vec!["a.txt"]);

    fs::remove_file(dir.path().join("a.txt")).unwrap();
    let report = cycle.run_cycle(&sink).unwrap();
    assert_eq!(report.removed, 1);
    assert!(cycle.watchlist().is_empty());
    assert!(sink.magic_lines().is_empty());
    assert_eq!(
        sink.count(|e| matches!(e, WatchEvent::FileRemoved { file } if file == "a.txt")),
        1
    );
}

#[test]
fn test_cycle_does_not_rereport_old_matches() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.txt");
    fs::write(&path, "MAGIC\n").unwrap();

    let sink = RecordingSink::default();
    let mut cycle = PollCycle::new(options(dir.path()));
    cycle.run_cycle(&sink).unwrap();
    let report = cycle.run_cycle(&sink).unwrap();
    assert_eq!(report.matches, 0);

    append(&path, "plain");
    append(&path, "MAGIC again");
    let report = cycle.run_cycle(&sink).unwrap();

    assert_eq!(report.matches, 1);
    let lines: Vec<usize> = sink.magic_lines().into_iter().map(|(_, l)| l).collect();
    assert_eq!(lines, vec![1, 3]);
    assert_eq!(cycle.watchlist().offset("a.txt"), Some(3));
}

#[test]
fn test_cycle_unreadable_entry_keeps_offset_and_continues() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("folder.txt")).unwrap();
    fs::write(dir.path().join("z.txt"), "MAGIC\n").unwrap();

    let sink = RecordingSink::default();
    let mut cycle = PollCycle::new(options(dir.path()));
    let report = cycle.run_cycle(&sink).unwrap();

    assert_eq!(report.tracked, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.scanned, 1);
    assert_eq!(cycle.watchlist().offset("folder.txt"), Some(0));
    assert_eq!(cycle.watchlist().offset("z.txt"), Some(1));
    assert_eq!(
        sink.count(|e| matches!(e, WatchEvent::ScanFailed { .. })),
        1
    );
}

#[test]
fn test_cycle_missing_directory_is_error_and_keeps_watchlist() {
    let dir = tempdir().unwrap();
    let watched = dir.path().join("watched");
    fs::create_dir(&watched).unwrap();
    fs::write(watched.join("a.txt"), "one\ntwo\n").unwrap();

    let sink = RecordingSink::default();
    let mut cycle = PollCycle::new(options(&watched));
    cycle.run_cycle(&sink).unwrap();

    fs::rename(&watched, dir.path().join("moved")).unwrap();
    let err = cycle.run_cycle(&sink).unwrap_err();

    assert!(err.is_directory_unavailable());
    assert_eq!(cycle.watchlist().offset("a.txt"), Some(2));
}

#[test]
fn test_cycle_custom_extension() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("app.log"), "MAGIC\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "MAGIC\n").unwrap();

    let sink = RecordingSink::default();
    let mut cycle = PollCycle::new(options(dir.path()).with_extension(".log"));
    cycle.run_cycle(&sink).unwrap();

    assert_eq!(cycle.watchlist().names(), vec!["app.log"]);
    assert_eq!(sink.magic_lines().len(), 1);
}

#[test]
fn test_cycle_uses_injected_lister() {
    let dir = tempdir().unwrap();
    // On disk but not listed: never tracked
    fs::write(dir.path().join("hidden.txt"), "MAGIC\n").unwrap();
    fs::write(dir.path().join("a.txt"), "x\nMAGIC\n").unwrap();

    let sink = RecordingSink::default();
    let lister = FixedLister(vec!["a.txt", "b.log"]);
    let mut cycle = PollCycle::with_lister(options(dir.path()), lister);
    let report = cycle.run_cycle(&sink).unwrap();

    assert_eq!(cycle.watchlist().names(), vec!["a.txt"]);
    assert_eq!(report.matches, 1);
    assert_eq!(sink.magic_lines()[0].1, 2);
}

#[test]
fn test_cycle_lister_error_leaves_watchlist_empty() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "MAGIC\n").unwrap();

    let lister = FailingLister::new();
    let mut cycle = PollCycle::with_lister(options(dir.path()), &lister);
    let err = cycle.run_cycle(&NoopSink).unwrap_err();

    assert!(matches!(err, WatchError::Io(_)));
    assert!(!err.is_directory_unavailable());
    assert!(cycle.watchlist().is_empty());
    assert_eq!(lister.calls.get(), 1);
}

#[test]
fn test_cycle_with_noop_sink_still_records_offsets() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "MAGIC\none\ntwo\n").unwrap();
    fs::write(dir.path().join("b.txt"), "").unwrap();

    let mut cycle = PollCycle::new(options(dir.path()));
    let report = cycle.run_cycle(&NoopSink).unwrap();

    assert_eq!(report.matches, 1);
    assert_eq!(cycle.watchlist().offset("a.txt"), Some(3));
    assert_eq!(cycle.watchlist().offset("b.txt"), Some(0));
}

// === WatchDriver tests ===

#[test]
fn test_driver_stop_before_first_tick_runs_nothing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "MAGIC\n").unwrap();

    let stop = StopHandle::new();
    stop.request_stop();
    let clock = FakeClock::new(&stop, usize::MAX);
    let sink = RecordingSink::default();

    let mut driver = WatchDriver::new(options(dir.path()), &clock, stop.clone());
    let uptime = driver.run(&sink);

    assert_eq!(driver.state(), DriverState::Stopping);
    assert_eq!(uptime, Duration::ZERO);
    assert!(clock.sleeps.borrow().is_empty());
    assert!(driver.cycle().watchlist().is_empty());

    let events = sink.events();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], WatchEvent::WatchStarted { .. }));
    assert_eq!(events[1], WatchEvent::StopRequested);
    assert!(matches!(events[2], WatchEvent::Shutdown { .. }));
}

#[test]
fn test_driver_stop_between_ticks_prevents_next_tick() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "foo\nMAGIC\nbar\n").unwrap();

    let stop = StopHandle::new();
    let clock = FakeClock::new(&stop, 1);
    let sink = RecordingSink::default();

    let mut driver = WatchDriver::new(options(dir.path()), &clock, stop.clone());
    let uptime = driver.run(&sink);

    assert_eq!(*clock.sleeps.borrow(), vec![INTERVAL]);
    assert_eq!(uptime, INTERVAL);
    assert_eq!(
        sink.count(|e| matches!(e, WatchEvent::CycleComplete { .. })),
        1
    );
    assert_eq!(sink.magic_lines().len(), 1);

    match sink.events().last() {
        Some(WatchEvent::Shutdown { uptime, .. }) => assert_eq!(uptime, "0:00:00.250"),
        other => panic!("expected shutdown event, got {:?}", other),
    }
}

#[test]
fn test_driver_picks_up_appended_lines_between_ticks() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.txt");
    fs::write(&path, "MAGIC\n").unwrap();

    let stop = StopHandle::new();
    let hook_path = path.clone();
    let clock = FakeClock::new(&stop, 2).on_sleep(move |n| {
        if n == 1 {
            append(&hook_path, "nothing");
            append(&hook_path, "MAGIC later");
        }
    });
    let sink = RecordingSink::default();

    let mut driver = WatchDriver::new(options(dir.path()), &clock, stop.clone());
    driver.run(&sink);

    let lines: Vec<usize> = sink.magic_lines().into_iter().map(|(_, l)| l).collect();
    assert_eq!(lines, vec![1, 3]);
    assert_eq!(driver.cycle().watchlist().offset("a.txt"), Some(3));
}

#[test]
fn test_driver_missing_directory_backs_off_and_retries() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("not-yet");

    let stop = StopHandle::new();
    let clock = FakeClock::new(&stop, 4);
    let sink = RecordingSink::default();

    let opts = options(&missing).with_backoff(Duration::from_secs(2));
    let mut driver = WatchDriver::new(opts, &clock, stop.clone());
    driver.run(&sink);

    assert_eq!(
        *clock.sleeps.borrow(),
        vec![Duration::from_secs(2), INTERVAL, Duration::from_secs(2), INTERVAL]
    );
    // Reported once, then suppressed while it stays missing
    assert_eq!(
        sink.count(|e| matches!(e, WatchEvent::DirectoryUnavailable { .. })),
        1
    );
    assert!(matches!(sink.events().last(), Some(WatchEvent::Shutdown { .. })));
}

#[test]
fn test_driver_unhandled_error_is_reported_each_tick_without_backoff() {
    let dir = tempdir().unwrap();

    let stop = StopHandle::new();
    let clock = FakeClock::new(&stop, 2);
    let sink = RecordingSink::default();
    let lister = FailingLister::new();

    let opts = options(dir.path()).with_backoff(Duration::from_secs(2));
    let cycle = PollCycle::with_lister(opts, &lister);
    let mut driver = WatchDriver::with_cycle(cycle, &clock, stop.clone());
    let uptime = driver.run(&sink);

    assert_eq!(lister.calls.get(), 2);
    assert_eq!(*clock.sleeps.borrow(), vec![INTERVAL, INTERVAL]);
    assert_eq!(uptime, INTERVAL * 2);
    assert_eq!(
        sink.count(|e| matches!(
            e,
            WatchEvent::UnhandledError { message } if message.contains("listing interrupted")
        )),
        2
    );
    assert_eq!(
        sink.count(|e| matches!(e, WatchEvent::DirectoryUnavailable { .. })),
        0
    );
    assert_eq!(
        sink.count(|e| matches!(e, WatchEvent::CycleComplete { .. })),
        0
    );
    assert_eq!(driver.state(), DriverState::Stopping);
    assert!(matches!(sink.events().last(), Some(WatchEvent::Shutdown { .. })));
}

#[test]
fn test_driver_reports_directory_restored() {
    let dir = tempdir().unwrap();
    let watched = dir.path().join("later");

    let stop = StopHandle::new();
    let hook_dir = watched.clone();
    let clock = FakeClock::new(&stop, 3).on_sleep(move |n| {
        if n == 1 {
            fs::create_dir(&hook_dir).unwrap();
            fs::write(hook_dir.join("a.txt"), "MAGIC\n").unwrap();
        }
    });
    let sink = RecordingSink::default();

    let mut driver = WatchDriver::new(options(&watched), &clock, stop.clone());
    driver.run(&sink);

    assert_eq!(
        sink.count(|e| matches!(e, WatchEvent::DirectoryRestored { .. })),
        1
    );
    assert_eq!(sink.magic_lines().len(), 1);
}

#[test]
fn test_driver_keeps_running_after_scan_failures() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("folder.txt")).unwrap();

    let stop = StopHandle::new();
    let clock = FakeClock::new(&stop, 3);
    let sink = RecordingSink::default();

    let mut driver = WatchDriver::new(options(dir.path()), &clock, stop.clone());
    let uptime = driver.run(&sink);

    assert_eq!(uptime, INTERVAL * 3);
    assert_eq!(
        sink.count(|e| matches!(e, WatchEvent::ScanFailed { .. })),
        3
    );
}

#[test]
fn test_driver_started_event_describes_options() {
    let dir = tempdir().unwrap();

    let stop = StopHandle::new();
    stop.request_stop();
    let clock = FakeClock::new(&stop, usize::MAX);
    let sink = RecordingSink::default();

    let opts = options(dir.path()).with_extension(".log");
    let mut driver = WatchDriver::new(opts, &clock, stop.clone());
    driver.run(&sink);

    match &sink.events()[0] {
        WatchEvent::WatchStarted {
            extension,
            magic,
            interval_secs,
            pid,
            ..
        } => {
            assert_eq!(extension, ".log");
            assert_eq!(magic, "MAGIC");
            assert_eq!(*interval_secs, 0.25);
            assert_eq!(*pid, std::process::id());
        }
        other => panic!("expected start event, got {:?}", other),
    }
}

#[test]
fn test_driver_stop_handle_is_shared() {
    let dir = tempdir().unwrap();
    let stop = StopHandle::new();
    let clock = FakeClock::new(&stop, usize::MAX);

    let driver = WatchDriver::new(options(dir.path()), &clock, stop.clone());
    driver.stop_handle().request_stop();
    assert!(stop.is_stop_requested());
}
