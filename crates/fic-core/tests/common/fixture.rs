//! Temp-dir fixtures: a directory of files plus a manifest describing them.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Write `body` to `name` (relative to the fixture dir), creating parents.
    pub fn file(&self, name: &str, body: &[u8]) -> PathBuf {
        let p = self.dir.path().join(name);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&p, body).unwrap();
        p
    }

    /// Write the manifest text to `SHA256SUMS` and return its path.
    pub fn manifest(&self, text: &str) -> PathBuf {
        self.file("SHA256SUMS", text.as_bytes())
    }
}
