//! CLI for the fic integrity checker.

mod commands;

use anyhow::Result;
use clap::Parser;
use fic_core::config::{self, FicConfig};
use fic_core::verify::RunSummary;
use std::path::PathBuf;

use commands::{manifest_not_found, run_verify};

/// Exit code for bad usage or a manifest that cannot be found or read.
pub const EXIT_FATAL: i32 = 1;

/// Exit code when the config asks for failures to be fatal and some entry failed.
pub const EXIT_VERIFICATION_FAILED: i32 = 2;

/// Verify files against a SHA-256 checksum manifest.
#[derive(Debug, Parser)]
#[command(name = "fic", version)]
#[command(about = "Verify files against a SHA-256 checksum manifest", long_about = None)]
pub struct Cli {
    /// Manifest file: one `<sha256-hex> <path>` per line, `#` for comments.
    pub manifest: PathBuf,
}

impl Cli {
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Run verification and return the process exit code.
    pub fn run(self) -> Result<i32> {
        if let Some(msg) = manifest_not_found(&self.manifest) {
            tracing::warn!("{}", msg);
            eprintln!("{}", msg);
            return Ok(EXIT_FATAL);
        }

        let cfg = config::load_or_init().unwrap_or_else(|err| {
            tracing::warn!("using default config: {:#}", err);
            FicConfig::default()
        });
        tracing::debug!("loaded config: {:?}", cfg);

        let summary = run_verify(&self.manifest, &cfg)?;
        Ok(exit_code(&summary, &cfg))
    }
}

/// 0 unless `fail_on_mismatch` is set and something failed.
pub fn exit_code(summary: &RunSummary, cfg: &FicConfig) -> i32 {
    if cfg.fail_on_mismatch && !summary.all_passed() {
        EXIT_VERIFICATION_FAILED
    } else {
        0
    }
}
