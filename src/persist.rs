//! Writing candidate and username lists to disk.
//!
//! One entry per line, UTF-8, newline-terminated. Default file names carry a
//! local timestamp so repeated runs never overwrite each other.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDateTime;

/// `<prefix>_YYYYMMDD_HHMMSS.txt`
pub fn timestamped_name(prefix: &str, now: NaiveDateTime) -> String {
    format!("{prefix}_{}.txt", now.format("%Y%m%d_%H%M%S"))
}

/// Default output file for a generated wordlist.
pub fn default_wordlist_name(now: NaiveDateTime) -> String {
    timestamped_name("wordlist", now)
}

/// Default output file for derived usernames.
pub fn default_usernames_name(now: NaiveDateTime) -> String {
    timestamped_name("usernames", now)
}

/// Write `lines` to `path`, one per line, creating parent directories.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
    }
    out.flush()
}
