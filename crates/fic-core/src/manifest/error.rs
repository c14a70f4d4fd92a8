//! Error types for manifest line parsing.

/// A manifest line that is neither blank, a comment, nor a valid entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    /// Only one token on the line: a digest (or path) with nothing after it.
    #[error("invalid line format: {line}")]
    MissingPath { line: String },
}

impl LineError {
    /// The trimmed text of the offending line.
    pub fn line(&self) -> &str {
        match self {
            LineError::MissingPath { line } => line,
        }
    }
}
