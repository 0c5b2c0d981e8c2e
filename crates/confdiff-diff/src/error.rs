//! Error types for the diff crate.
//!
//! Comparing two well-formed trees never fails; only configuration can.

use confdiff_types::ValueKind;

/// Errors that can occur while configuring the diff engine.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// An equivalence group mentions a sequence or mapping kind.
    #[error("equivalence group contains non-scalar kind '{0}'")]
    NonScalarKind(ValueKind),

    /// An equivalence group has fewer than two distinct kinds.
    #[error("equivalence group must name at least two distinct kinds, got {0:?}")]
    DegenerateGroup(Vec<ValueKind>),

    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, DiffError>;
