use std::convert::Infallible;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use confdiff_types::Value;
use tracing::debug;

use crate::document::parse_documents;
use crate::envelope::select_tree;
use crate::error::{DocumentError, LoadError, LoadResult};
use crate::navigate::navigate;

/// ConfigMap data keys to select for the left and right documents.
///
/// `"a:b"` selects `a` on the left and `b` on the right; `"a"` selects `a`
/// on both sides. An empty side selects nothing, so every data entry of that
/// document is used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionSelector {
    pub left: Option<String>,
    pub right: Option<String>,
}

fn non_empty(key: &str) -> Option<String> {
    (!key.is_empty()).then(|| key.to_string())
}

impl SectionSelector {
    pub fn parse(text: &str) -> Self {
        let (left, right) = text.split_once(':').unwrap_or((text, text));
        Self {
            left: non_empty(left),
            right: non_empty(right),
        }
    }
}

impl FromStr for SectionSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Everything needed to produce one side of a comparison.
#[derive(Clone, Debug, Default)]
pub struct DocumentRequest {
    pub path: PathBuf,
    /// ConfigMap data key filter.
    pub section: Option<String>,
    /// Dot path to compare from.
    pub start: Option<String>,
}

impl DocumentRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_section(mut self, section: Option<String>) -> Self {
        self.section = section;
        self
    }

    pub fn with_start(mut self, start: Option<String>) -> Self {
        self.start = start;
        self
    }
}

/// A document ready for comparison.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedDocument {
    /// The file name, used to label report columns.
    pub label: String,
    pub value: Value,
}

/// Read and parse every document in a file.
pub fn read_documents(path: &Path) -> LoadResult<Vec<Value>> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_documents(&text).map_err(|source| LoadError::Document {
        path: path.to_path_buf(),
        source,
    })
}

/// Load, unwrap, and navigate one document.
pub fn load_document(request: &DocumentRequest) -> LoadResult<LoadedDocument> {
    let documents = read_documents(&request.path)?;
    let tree = select_tree(documents, request.section.as_deref()).map_err(|e| {
        LoadError::Document {
            path: request.path.clone(),
            source: DocumentError::Malformed(e),
        }
    })?;

    let value = match request.start.as_deref() {
        Some(start) => navigate(&tree, start).clone(),
        None => tree,
    };

    let label = request
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| request.path.display().to_string());
    debug!(%label, kind = %value.kind(), "document loaded");

    Ok(LoadedDocument { label, value })
}
