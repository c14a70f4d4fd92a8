//! SHA-256 digests of files, computed in fixed-size chunks.
//!
//! Memory use is bounded by the chunk size regardless of file size.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::progress::{NoProgress, ProgressObserver};

/// Default read chunk size in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Length of a hex-encoded SHA-256 digest.
pub const SHA256_HEX_LEN: usize = 64;

/// Hash everything `reader` yields and return the digest as lowercase hex.
///
/// `observer.advance` is called with the cumulative byte count after each chunk.
/// A `chunk_size` of zero is treated as one byte.
pub fn sha256_reader<R: Read>(
    mut reader: R,
    chunk_size: usize,
    observer: &mut dyn ProgressObserver,
) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut done: u64 = 0;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
        done += n as u64;
        observer.advance(done);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Compute SHA-256 of a file, reporting progress to `observer`.
pub fn sha256_path_with(
    path: &Path,
    chunk_size: usize,
    observer: &mut dyn ProgressObserver,
) -> Result<String> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let size_hint = f.metadata().ok().map(|m| m.len());
    observer.start(path, size_hint);
    let digest = sha256_reader(f, chunk_size, observer);
    observer.finish();
    digest.with_context(|| format!("read {}", path.display()))
}

/// Compute SHA-256 of a file and return the digest as lowercase hex.
pub fn sha256_path(path: &Path) -> Result<String> {
    sha256_path_with(path, DEFAULT_CHUNK_SIZE, &mut NoProgress)
}
