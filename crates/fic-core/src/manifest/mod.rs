//! Checksum manifest: one `<hex_digest> <path>` entry per line.
//!
//! Blank lines and lines starting with `#` are ignored. Only the first run of
//! whitespace separates digest from path, so paths may contain spaces.

mod error;
mod parse;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub use error::LineError;
pub use parse::{parse_line, parse_manifest, ParsedLine};

/// One (expected digest, file path) pair from the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub expected_digest: String,
    pub file_path: String,
}

/// Read the manifest file into memory as text.
pub fn read_manifest(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read manifest {}", path.display()))
}
