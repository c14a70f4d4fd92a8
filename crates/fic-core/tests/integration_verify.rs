//! Integration test: manifest file on disk, files next to it, full verification run.

mod common;

use common::fixture::Fixture;
use fic_core::checksum::sha256_path;
use fic_core::config::{FicConfig, OutputFormat, PathBase};
use fic_core::progress::{NoProgress, TracingProgress};
use fic_core::verify::{reporter_for, verify_manifest, RunSummary, TextReporter, VerifyOptions};

const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

fn manifest_relative_config() -> FicConfig {
    FicConfig {
        path_base: PathBase::Manifest,
        ..FicConfig::default()
    }
}

#[test]
fn empty_file_scenario_passes() {
    let fx = Fixture::new();
    fx.file("empty.txt", b"");
    let manifest = fx.manifest(&format!("{EMPTY_SHA256} empty.txt\n"));

    let opts = VerifyOptions::from_config(&manifest_relative_config(), &manifest);
    let mut reporter = TextReporter::new(Vec::new());
    let summary = verify_manifest(&manifest, &opts, &mut NoProgress, &mut reporter).unwrap();

    assert_eq!(summary, RunSummary { passed: 1, failed: 0 });
    let out = String::from_utf8(reporter.into_inner()).unwrap();
    assert!(out.contains("OK: empty.txt integrity verified."));
    assert!(out.ends_with("  Passed: 1\n  Failed: 0\n  Total: 1\n"));
}

#[test]
fn mixed_manifest_counts_only_entries() {
    let fx = Fixture::new();
    let good = fx.file("dist/app.tar.gz", &[7u8; 20_000]);
    let bad = fx.file("dist/app.sig", b"signature v2");
    let good_digest = sha256_path(&good).unwrap().to_uppercase();
    let bad_digest = sha256_path(&bad).unwrap();
    fx.file("dist/app.sig", b"signature v3");

    let text = format!(
        "# release 1.2.3\n\
         \n\
         {good_digest}  dist/app.tar.gz\n\
         {bad_digest}  dist/app.sig\n\
         {EMPTY_SHA256}  dist/missing.bin\n\
         lonely-token\n"
    );
    let manifest = fx.manifest(&text);

    let opts = VerifyOptions::from_config(&manifest_relative_config(), &manifest);
    let mut reporter = TextReporter::new(Vec::new());
    let mut progress = TracingProgress::new();
    let summary = verify_manifest(&manifest, &opts, &mut progress, &mut reporter).unwrap();

    assert_eq!(summary, RunSummary { passed: 1, failed: 2 });
    assert_eq!(summary.total(), 3);
    let out = String::from_utf8(reporter.into_inner()).unwrap();
    assert!(out.contains("Invalid line format: lonely-token"));
    assert!(out.contains("File not found: dist/missing.bin"));
    assert!(out.contains("FAILED: dist/app.sig integrity check failed."));
    assert!(out.contains(&format!("   Expected:   {bad_digest}")));
}

#[test]
fn jsonl_output_is_one_object_per_line() {
    let fx = Fixture::new();
    fx.file("empty.txt", b"");
    let manifest = fx.manifest(&format!(
        "{EMPTY_SHA256} empty.txt\n{EMPTY_SHA256} gone.txt\nbroken\n"
    ));

    let cfg = FicConfig {
        output_format: OutputFormat::Jsonl,
        ..manifest_relative_config()
    };
    let opts = VerifyOptions::from_config(&cfg, &manifest);
    let mut buf = Vec::new();
    let summary = {
        let mut reporter = reporter_for(cfg.output_format, &mut buf);
        verify_manifest(&manifest, &opts, &mut NoProgress, reporter.as_mut()).unwrap()
    };

    assert_eq!(summary, RunSummary { passed: 1, failed: 1 });
    let events: Vec<serde_json::Value> = String::from_utf8(buf)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let kinds: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
    assert_eq!(kinds, ["verified", "missing", "invalid", "summary"]);
    assert_eq!(events[0]["matched"], true);
    assert_eq!(events[2]["line"], 3);
    assert_eq!(events[3]["passed"], 1);
    assert_eq!(events[3]["failed"], 1);
    assert_eq!(events[3]["total"], 2);
}

#[test]
fn small_chunk_size_gives_same_result() {
    let fx = Fixture::new();
    let body: Vec<u8> = (0u8..251).cycle().take(9_999).collect();
    let p = fx.file("blob.bin", &body);
    let digest = sha256_path(&p).unwrap();
    let manifest = fx.manifest(&format!("{digest} blob.bin\n"));

    let cfg = FicConfig {
        chunk_size: 13,
        ..manifest_relative_config()
    };
    let opts = VerifyOptions::from_config(&cfg, &manifest);
    let mut reporter = TextReporter::new(Vec::new());
    let summary = verify_manifest(&manifest, &opts, &mut NoProgress, &mut reporter).unwrap();
    assert!(summary.all_passed());
    assert_eq!(summary.passed, 1);
}
