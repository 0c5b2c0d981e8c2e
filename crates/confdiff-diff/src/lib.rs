//! Structural diff engine for confdiff.
//!
//! Walks two [`Value`](confdiff_types::Value) trees in lock-step and
//! classifies every difference by path. Scalars are compared through
//! configurable equivalence groups; sequences are reconciled as multisets,
//! so element order never produces a difference.
//!
//! # Key Types
//!
//! - [`Differ`] -- The engine; [`diff_values`] runs it with default settings
//! - [`EquivalenceGroups`] -- Cross-type scalar equality rules
//! - [`DiffEntry`] / [`DiffKind`] -- One classified difference
//! - [`DiffResult`] -- Differences bucketed by kind
//! - [`DiffConfig`] -- Serializable engine configuration

pub mod config;
pub mod engine;
pub mod equivalence;
pub mod error;
pub mod path;
pub mod result;

pub use config::DiffConfig;
pub use engine::{diff_values, Differ};
pub use equivalence::{Equivalence, EquivalenceGroups};
pub use error::{ConfigResult, DiffError};
pub use path::Path;
pub use result::{DiffEntry, DiffKind, DiffResult};
