use std::path::PathBuf;

/// Errors that can occur while producing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("cannot write report to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for report results.
pub type ReportResult<T> = Result<T, ReportError>;
