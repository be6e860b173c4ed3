use std::path::PathBuf;

use clap::Parser;

/// dirwatch - poll a directory and report new occurrences of a magic word
#[derive(Parser, Debug)]
#[command(name = "dirwatch")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Press Ctrl+C (or send SIGTERM) to stop.")]
pub struct Cli {
    /// Directory to watch (not recursive)
    pub directory: PathBuf,

    /// Text to watch for
    pub magic: String,

    /// Number of seconds between polling (fractions allowed)
    #[arg(short, long, allow_negative_numbers = true)]
    pub interval: Option<f64>,

    /// Only watch files whose name ends with this suffix [default: .txt]
    #[arg(short, long)]
    pub ext: Option<String>,

    /// Emit NDJSON events on stdout instead of log lines
    #[arg(long)]
    pub json: bool,

    /// Also append log lines to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Config file (defaults to ./dirwatch.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
