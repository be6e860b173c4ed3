//! Logging setup for the dirwatch binary.
//!
//! Lines look like `2024-05-01 12:00:00.123 INFO     dirwatch::watch message`.
//! Without `RUST_LOG` this crate logs at info. A set `RUST_LOG` replaces that
//! default, and `-v`/`-vv` raise this crate's level on top of either.
//! With a log file, every line goes to stderr and is appended to the file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Map `-v` count to this crate's level
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Level to force for this crate, if any
fn crate_level(verbose: u8, rust_log_set: bool) -> Option<LevelFilter> {
    if verbose > 0 || !rust_log_set {
        Some(level_for_verbosity(verbose))
    } else {
        None
    }
}

/// Install the global logger. Later calls are no-ops.
pub fn init_logging(verbose: u8, log_file: Option<&Path>) -> io::Result<()> {
    let env = Env::default();
    let rust_log_set = std::env::var_os("RUST_LOG").is_some_and(|v| !v.is_empty());

    let mut builder = Builder::new();
    builder.parse_env(env);
    if let Some(level) = crate_level(verbose, rust_log_set) {
        builder.filter_module("dirwatch", level);
    }

    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<8} {} {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(Tee { file })));
    }

    let _ = builder.try_init();
    Ok(())
}

/// Writes every buffer to stderr and the log file
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}
