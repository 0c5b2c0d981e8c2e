use thiserror::Error;

/// Malformed input detected while building a [`Value`](crate::Value) tree.
///
/// These are fatal: a tree that fails construction is never handed to the
/// diff engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("mapping key at '{path}' is not a scalar")]
    NonScalarKey { path: String },

    #[error("duplicate key '{key}' at '{path}'")]
    DuplicateKey { path: String, key: String },

    #[error("NaN is not comparable (at '{path}')")]
    NotANumber { path: String },
}
