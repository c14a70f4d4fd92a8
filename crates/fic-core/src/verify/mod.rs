//! Verify files against a checksum manifest.
//!
//! Each manifest line is handled to completion before the next one:
//! blank/comment lines are skipped, malformed lines are reported but not
//! counted, and every entry ends up as exactly one passed or failed count.
//! Only a manifest that cannot be read (or output that cannot be written)
//! aborts the run.

pub mod report;

use anyhow::Result;
use std::io;
use std::path::{Path, PathBuf};

use crate::checksum::{self, DEFAULT_CHUNK_SIZE};
use crate::config::{FicConfig, PathBase};
use crate::manifest::{self, ManifestEntry};
use crate::progress::ProgressObserver;

pub use report::{reporter_for, JsonLinesReporter, Reporter, TextReporter};

/// Options that shape how entries are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Read chunk size for hashing.
    pub chunk_size: usize,
    /// Directory that relative entry paths are resolved against (None = cwd).
    pub base_dir: Option<PathBuf>,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            base_dir: None,
        }
    }
}

impl VerifyOptions {
    /// Build options from config for a given manifest location.
    pub fn from_config(cfg: &FicConfig, manifest_path: &Path) -> Self {
        let base_dir = match cfg.path_base {
            PathBase::Cwd => None,
            PathBase::Manifest => Some(
                manifest_path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default(),
            ),
        };
        Self {
            chunk_size: cfg.chunk_size,
            base_dir,
        }
    }

    /// Resolve a manifest path string to the file to hash.
    pub fn resolve(&self, file_path: &str) -> PathBuf {
        let p = Path::new(file_path);
        match &self.base_dir {
            Some(base) if p.is_relative() => base.join(p),
            _ => p.to_path_buf(),
        }
    }
}

/// Comparison of one file's computed digest against the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub path: String,
    pub expected: String,
    pub computed: String,
    pub matched: bool,
}

/// Terminal state of one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// The file was hashed; `matched` tells whether the digest agreed.
    Verified(VerificationResult),
    /// The path does not name an existing regular file. Not hashed.
    Missing { path: String },
    /// Opening or reading the file failed while hashing.
    Unreadable { path: String, error: String },
}

impl EntryOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, EntryOutcome::Verified(r) if r.matched)
    }

    pub fn path(&self) -> &str {
        match self {
            EntryOutcome::Verified(r) => &r.path,
            EntryOutcome::Missing { path } | EntryOutcome::Unreadable { path, .. } => path,
        }
    }
}

/// Pass/fail counts for a run. Skipped and invalid lines are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: u64,
    pub failed: u64,
}

impl RunSummary {
    pub fn total(&self) -> u64 {
        self.passed + self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn record(&mut self, outcome: &EntryOutcome) {
        if outcome.passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Digest equality ignoring ASCII case.
pub fn digests_match(expected: &str, computed: &str) -> bool {
    expected.to_ascii_lowercase() == computed.to_ascii_lowercase()
}

/// Hash an existing file and compare it to the entry's expected digest.
fn hash_and_compare(
    entry: &ManifestEntry,
    target: &Path,
    options: &VerifyOptions,
    observer: &mut dyn ProgressObserver,
) -> EntryOutcome {
    match checksum::sha256_path_with(target, options.chunk_size, observer) {
        Ok(computed) => EntryOutcome::Verified(VerificationResult {
            path: entry.file_path.clone(),
            matched: digests_match(&entry.expected_digest, &computed),
            expected: entry.expected_digest.clone(),
            computed,
        }),
        Err(e) => EntryOutcome::Unreadable {
            path: entry.file_path.clone(),
            error: format!("{e:#}"),
        },
    }
}

/// Check one entry: existence first, then digest.
///
/// `reporter.checking` runs right before an existing file is hashed; its write
/// error is the only error returned.
pub fn verify_entry(
    entry: &ManifestEntry,
    options: &VerifyOptions,
    observer: &mut dyn ProgressObserver,
    reporter: &mut dyn Reporter,
) -> io::Result<EntryOutcome> {
    let target = options.resolve(&entry.file_path);
    if !target.is_file() {
        return Ok(EntryOutcome::Missing {
            path: entry.file_path.clone(),
        });
    }
    reporter.checking(&entry.file_path)?;
    Ok(hash_and_compare(entry, &target, options, observer))
}

/// Verify every entry of manifest text, reporting as it goes.
///
/// Errors only when the reporter fails to write.
pub fn verify_text(
    text: &str,
    options: &VerifyOptions,
    observer: &mut dyn ProgressObserver,
    reporter: &mut dyn Reporter,
) -> io::Result<RunSummary> {
    let mut summary = RunSummary::default();

    for parsed in manifest::parse_manifest(text) {
        let entry = match parsed.result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("line {}: {}", parsed.line_no, err);
                reporter.invalid_line(parsed.line_no, &err)?;
                continue;
            }
        };

        let outcome = verify_entry(&entry, options, observer, reporter)?;

        match &outcome {
            EntryOutcome::Verified(r) if r.matched => {
                tracing::debug!("line {}: {} ok", parsed.line_no, r.path);
            }
            EntryOutcome::Verified(r) => tracing::warn!(
                "line {}: {} mismatch (expected {}, computed {})",
                parsed.line_no,
                r.path,
                r.expected,
                r.computed
            ),
            EntryOutcome::Missing { path } => {
                tracing::warn!("line {}: {} not found", parsed.line_no, path);
            }
            EntryOutcome::Unreadable { path, error } => {
                tracing::warn!("line {}: {} unreadable: {}", parsed.line_no, path, error);
            }
        }

        summary.record(&outcome);
        reporter.outcome(&outcome)?;
    }

    reporter.summary(&summary)?;
    Ok(summary)
}

/// Read a manifest file and verify it. A manifest that cannot be read is fatal.
pub fn verify_manifest(
    manifest_path: &Path,
    options: &VerifyOptions,
    observer: &mut dyn ProgressObserver,
    reporter: &mut dyn Reporter,
) -> Result<RunSummary> {
    let text = manifest::read_manifest(manifest_path)?;
    tracing::info!("verifying manifest {}", manifest_path.display());
    let summary = verify_text(&text, options, observer, reporter)?;
    tracing::info!(
        "manifest {}: passed={} failed={} total={}",
        manifest_path.display(),
        summary.passed,
        summary.failed,
        summary.total()
    );
    Ok(summary)
}
