// ============================================================
// Pipeline Errors
// ============================================================
// Typed errors for the data pipeline. Malformed input lines are
// fatal — a wrong field count means the whole text/cache file is
// corrupt, so there is no per-line recovery path.
//
// Everything else in the crate uses anyhow with context; this
// enum only exists for failures that tests and callers need to
// match on structurally.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A line in the text or sentence-cache file did not split into
    /// the expected number of tab-separated fields.
    #[error("malformed line {line_no} in {path:?}: expected {expected} tab-separated fields")]
    Format {
        path: PathBuf,
        line_no: usize,
        expected: usize,
    },
}

impl PipelineError {
    pub fn format(path: impl Into<PathBuf>, line_no: usize, expected: usize) -> Self {
        Self::Format {
            path: path.into(),
            line_no,
            expected,
        }
    }
}
