//! `fic <manifest>` – verify every entry and print a summary.

use anyhow::Result;
use fic_core::config::FicConfig;
use fic_core::progress::TracingProgress;
use fic_core::verify::{self, RunSummary, VerifyOptions};
use std::io;
use std::path::Path;

/// Diagnostic for a manifest path that is not an existing file.
pub fn manifest_not_found(manifest: &Path) -> Option<String> {
    if manifest.is_file() {
        None
    } else {
        Some(format!("Checksum file not found: {}", manifest.display()))
    }
}

pub fn run_verify(manifest: &Path, cfg: &FicConfig) -> Result<RunSummary> {
    let options = VerifyOptions::from_config(cfg, manifest);
    let mut progress = TracingProgress::new();
    let mut reporter = verify::reporter_for(cfg.output_format, io::stdout().lock());
    verify::verify_manifest(manifest, &options, &mut progress, reporter.as_mut())
}
