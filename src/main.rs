//! dirwatch CLI - poll a directory for a magic word
//!
//! Usage: dirwatch [OPTIONS] <DIRECTORY> <MAGIC>

mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use dirwatch::config::Config;
use dirwatch::domain::ports::NotificationSink;
use dirwatch::{logging, JsonEventSink, LogSink, StopHandle, SystemClock, WatchDriver, WatchOptions};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, warnings) = Config::resolve(cli.config.as_deref())?;
    if let Some(interval) = cli.interval {
        config.watch.interval = interval;
    }
    if let Some(ext) = cli.ext.clone() {
        config.watch.extension = ext;
    }
    if let Some(log_file) = cli.log_file.clone() {
        config.watch.log_file = Some(log_file);
    }

    logging::init_logging(cli.verbose, config.watch.log_file.as_deref()).with_context(|| {
        format!(
            "cannot open log file {}",
            config
                .watch
                .log_file
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;
    for warning in &warnings {
        log::warn!("{}", warning);
    }

    let options = WatchOptions::from_config(&cli.directory, cli.magic.clone(), &config.watch)?;

    // Signal handler only sets the flag; the loop notices at the next tick boundary.
    let stop = StopHandle::new();
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || {
        log::warn!("Received termination signal");
        handler_stop.request_stop();
    })
    .context("Error setting Ctrl+C handler")?;

    let sink: Box<dyn NotificationSink> = if cli.json {
        Box::new(JsonEventSink::stdout())
    } else {
        Box::new(LogSink::new())
    };

    let mut driver = WatchDriver::new(options, SystemClock::new(), stop);
    driver.run(sink.as_ref());

    Ok(())
}
