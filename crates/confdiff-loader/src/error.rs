//! Error types for the loader crate.

use std::path::PathBuf;

use confdiff_types::ValueError;

/// Errors produced while turning text into value trees.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The text is not valid YAML.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The YAML parsed but does not form a well-formed value tree.
    #[error("malformed document: {0}")]
    Malformed(#[from] ValueError),
}

/// Errors produced while loading a document from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Document {
        path: PathBuf,
        source: DocumentError,
    },
}

/// Convenience alias for loader results.
pub type LoadResult<T> = Result<T, LoadError>;
