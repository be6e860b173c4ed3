//! Incremental magic-word scanner
//!
//! Reads a file line by line and reports lines at or after `start_line`
//! that contain the magic word. Earlier lines are read only to keep the
//! line count exact.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{WatchError, WatchResult};

/// A line containing the magic word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicMatch {
    pub file: PathBuf,
    /// 1-based line number
    pub line_number: usize,
    pub magic_word: String,
}

/// Scan `path` from `start_line` (0-based) and return its total line count.
///
/// Lines are split on `\n` only (a lone `\r` is not a break) and compared as
/// bytes, so files that are not valid UTF-8 still scan. A trailing line
/// without a newline counts. The file handle is closed before returning, on
/// success and on error.
pub fn scan_file<F>(
    path: &Path,
    start_line: usize,
    magic_word: &str,
    mut on_match: F,
) -> WatchResult<usize>
where
    F: FnMut(MagicMatch),
{
    let file = File::open(path).map_err(|source| access_error(path, source))?;
    let mut reader = BufReader::new(file);
    let needle = magic_word.as_bytes();

    let mut line = Vec::new();
    let mut count = 0usize;
    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|source| access_error(path, source))?;
        if read == 0 {
            break;
        }

        if count >= start_line && contains(&line, needle) {
            on_match(MagicMatch {
                file: path.to_path_buf(),
                line_number: count + 1,
                magic_word: magic_word.to_string(),
            });
        }
        count += 1;
    }

    Ok(count)
}

fn access_error(path: &Path, source: std::io::Error) -> WatchError {
    WatchError::FileAccess {
        path: path.to_path_buf(),
        source,
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}
