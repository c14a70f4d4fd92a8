//! Core of fic: verify files against a manifest of expected SHA-256 digests.

pub mod config;
pub mod logging;

pub mod checksum;
pub mod manifest;
pub mod progress;
pub mod verify;
