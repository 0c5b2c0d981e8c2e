//! Foundation types for confdiff.
//!
//! This crate provides the document tree every other confdiff crate works
//! on. Loaders build [`Value`] trees, the diff engine walks them, and reports
//! render them.
//!
//! # Key Types
//!
//! - [`Value`] -- A node of a parsed configuration document
//! - [`Mapping`] -- Insertion-ordered string-keyed map of values
//! - [`ValueKind`] -- Type tag of a value, used by equivalence groups
//! - [`ValueError`] -- Malformed input detected while building a tree

pub mod convert;
pub mod error;
pub mod kind;
pub mod value;

pub use error::ValueError;
pub use kind::ValueKind;
pub use value::{Mapping, Value};
