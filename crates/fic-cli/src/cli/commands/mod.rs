//! CLI command handlers.

mod verify;

pub use verify::{manifest_not_found, run_verify};
