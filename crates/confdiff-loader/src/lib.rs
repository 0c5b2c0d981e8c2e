//! Document loading for confdiff.
//!
//! Turns files on disk into the [`Value`](confdiff_types::Value) trees the
//! diff engine compares. A file may be a plain YAML (or JSON) document or a
//! Kubernetes `ConfigMap` whose data entries carry embedded YAML; in the
//! latter case the selected payloads are parsed and merged into one tree.
//! An optional dot path narrows the tree further, falling back to the whole
//! tree (with a warning) when the path does not exist.

pub mod document;
pub mod envelope;
pub mod error;
pub mod navigate;
pub mod request;

pub use document::parse_documents;
pub use envelope::{select_tree, CONFIG_MAP_KIND};
pub use error::{DocumentError, LoadError, LoadResult};
pub use navigate::navigate;
pub use request::{load_document, read_documents, DocumentRequest, LoadedDocument, SectionSelector};
