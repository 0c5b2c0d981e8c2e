use std::fmt;

use serde::{Serialize, Serializer};

/// Separator used when a path is rendered for people.
pub const SEPARATOR: &str = " → ";

/// The location of a value inside a document, as a list of mapping keys.
///
/// Sequences contribute no segment: reconciliation matches elements by
/// content, so an index would not identify anything stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(Vec<String>);

impl Path {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// A new path one key below this one.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.into());
        Self(segments)
    }

    pub(crate) fn push(&mut self, key: &str) {
        self.0.push(key.to_string());
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("(root)");
        }
        f.write_str(&self.0.join(SEPARATOR))
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
