//! Append-only log of entity IDs that could not be localized.
//!
//! Format: one decimal ID per line, newline terminated, no header. The same
//! ID may appear more than once across runs; the log is a worklist for
//! [`super::service::Localizer::replay`], not a set.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Open handle to a provider's failure log.
///
/// The file is closed when the value is dropped.
#[derive(Debug)]
pub struct FailureLog {
    path: PathBuf,
    file: File,
}

impl FailureLog {
    /// Open (creating if needed) `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one ID.
    ///
    /// A failed write is logged and swallowed; the run goes on.
    pub fn record(&mut self, id: i64) {
        if let Err(e) = writeln!(self.file, "{id}").and_then(|()| self.file.flush()) {
            tracing::error!("Error writing {} to {:?}: {}", id, self.path, e);
        }
    }
}

/// Read every ID from the log at `path`.
///
/// Opening the file is the only hard failure. Reading stops at the first line
/// that is not a number (or at a read error), keeping what came before.
pub fn read_ids(path: impl AsRef<Path>) -> io::Result<Vec<i64>> {
    let file = File::open(path.as_ref())?;
    Ok(read_ids_from(BufReader::new(file)))
}

/// [`read_ids`] over any buffered reader.
pub fn read_ids_from<R: BufRead>(reader: R) -> Vec<i64> {
    let mut ids = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Stopped reading failure log at line {}: {}", index + 1, e);
                break;
            }
        };
        match line.trim().parse::<i64>() {
            Ok(id) => ids.push(id),
            Err(_) => {
                tracing::warn!(
                    "Stopped reading failure log at line {}: {:?} is not an ID",
                    index + 1,
                    line
                );
                break;
            }
        }
    }

    ids
}
