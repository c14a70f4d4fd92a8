//! Progress observation for digest computation.
//!
//! The checksum module reports bytes read through this trait so callers can
//! display or log progress without the hashing loop knowing how.

use std::path::{Path, PathBuf};

/// Receives progress notifications while a file is hashed.
///
/// All hooks default to no-ops. `advance` gets the cumulative byte count, not
/// the size of the last chunk.
pub trait ProgressObserver {
    fn start(&mut self, _path: &Path, _total_bytes: Option<u64>) {}
    fn advance(&mut self, _bytes_done: u64) {}
    fn finish(&mut self) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Logs progress at debug level, once per crossed 10% step.
#[derive(Debug, Default)]
pub struct TracingProgress {
    path: PathBuf,
    total: Option<u64>,
    done: u64,
    last_decile: u64,
}

impl TracingProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressObserver for TracingProgress {
    fn start(&mut self, path: &Path, total_bytes: Option<u64>) {
        self.path = path.to_path_buf();
        self.total = total_bytes;
        self.done = 0;
        self.last_decile = 0;
        tracing::debug!(
            "hashing {} ({} bytes)",
            path.display(),
            total_bytes.map_or_else(|| "?".to_string(), |n| n.to_string())
        );
    }

    fn advance(&mut self, bytes_done: u64) {
        self.done = bytes_done;
        let Some(total) = self.total.filter(|t| *t > 0) else {
            return;
        };
        let decile = (bytes_done.min(total) * 10) / total;
        if decile > self.last_decile {
            self.last_decile = decile;
            tracing::debug!("{}: {}% ({} bytes)", self.path.display(), decile * 10, bytes_done);
        }
    }

    fn finish(&mut self) {
        tracing::debug!("hashed {} ({} bytes)", self.path.display(), self.done);
    }
}
