//! Classified diff output.
//!
//! The engine emits a stream of [`DiffEntry`] values; [`DiffResult`] sorts
//! them into one bucket per [`DiffKind`], keeping discovery order within
//! each bucket. Reports read only this structure.

use std::fmt;

use confdiff_types::Value;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::path::Path;

/// The classification of a single difference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// A scalar differs, or the two sides have different shapes.
    Changed,
    /// A mapping key exists only in the old document.
    RemovedKey,
    /// A mapping key exists only in the new document.
    AddedKey,
    /// A sequence element of the old document found no match.
    RemovedListItem,
    /// A sequence element of the new document found no match.
    AddedListItem,
}

impl DiffKind {
    /// Every kind, in bucket order.
    pub const ALL: [DiffKind; 5] = [
        DiffKind::Changed,
        DiffKind::RemovedKey,
        DiffKind::AddedKey,
        DiffKind::RemovedListItem,
        DiffKind::AddedListItem,
    ];

    fn index(self) -> usize {
        match self {
            Self::Changed => 0,
            Self::RemovedKey => 1,
            Self::AddedKey => 2,
            Self::RemovedListItem => 3,
            Self::AddedListItem => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Changed => "changed",
            Self::RemovedKey => "removed_key",
            Self::AddedKey => "added_key",
            Self::RemovedListItem => "removed_list_item",
            Self::AddedListItem => "added_list_item",
        }
    }

    /// The kind this becomes when old and new are swapped.
    pub fn mirrored(self) -> Self {
        match self {
            Self::Changed => Self::Changed,
            Self::RemovedKey => Self::AddedKey,
            Self::AddedKey => Self::RemovedKey,
            Self::RemovedListItem => Self::AddedListItem,
            Self::AddedListItem => Self::RemovedListItem,
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single difference between two documents.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiffEntry {
    Changed { path: Path, old: Value, new: Value },
    RemovedKey { path: Path, value: Value },
    AddedKey { path: Path, value: Value },
    RemovedListItem { path: Path, value: Value },
    AddedListItem { path: Path, value: Value },
}

impl DiffEntry {
    pub fn kind(&self) -> DiffKind {
        match self {
            Self::Changed { .. } => DiffKind::Changed,
            Self::RemovedKey { .. } => DiffKind::RemovedKey,
            Self::AddedKey { .. } => DiffKind::AddedKey,
            Self::RemovedListItem { .. } => DiffKind::RemovedListItem,
            Self::AddedListItem { .. } => DiffKind::AddedListItem,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Changed { path, .. }
            | Self::RemovedKey { path, .. }
            | Self::AddedKey { path, .. }
            | Self::RemovedListItem { path, .. }
            | Self::AddedListItem { path, .. } => path,
        }
    }

    /// The value on the old side, if the entry has one.
    pub fn old_value(&self) -> Option<&Value> {
        match self {
            Self::Changed { old, .. } => Some(old),
            Self::RemovedKey { value, .. } | Self::RemovedListItem { value, .. } => Some(value),
            Self::AddedKey { .. } | Self::AddedListItem { .. } => None,
        }
    }

    /// The value on the new side, if the entry has one.
    pub fn new_value(&self) -> Option<&Value> {
        match self {
            Self::Changed { new, .. } => Some(new),
            Self::AddedKey { value, .. } | Self::AddedListItem { value, .. } => Some(value),
            Self::RemovedKey { .. } | Self::RemovedListItem { .. } => None,
        }
    }

    /// The entry a comparison with old and new swapped would produce.
    pub fn mirrored(self) -> Self {
        match self {
            Self::Changed { path, old, new } => Self::Changed {
                path,
                old: new,
                new: old,
            },
            Self::RemovedKey { path, value } => Self::AddedKey { path, value },
            Self::AddedKey { path, value } => Self::RemovedKey { path, value },
            Self::RemovedListItem { path, value } => Self::AddedListItem { path, value },
            Self::AddedListItem { path, value } => Self::RemovedListItem { path, value },
        }
    }
}

/// Differences bucketed by kind. Empty means the documents are
/// semantically equal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiffResult {
    buckets: [Vec<DiffEntry>; 5],
}

impl DiffResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket a stream of entries, preserving order within each kind.
    pub fn classify(entries: impl IntoIterator<Item = DiffEntry>) -> Self {
        let mut result = Self::new();
        for entry in entries {
            result.push(entry);
        }
        result
    }

    pub fn push(&mut self, entry: DiffEntry) {
        self.buckets[entry.kind().index()].push(entry);
    }

    /// Append every entry of `other` after the entries already held.
    pub fn merge(&mut self, other: DiffResult) {
        for (mine, theirs) in self.buckets.iter_mut().zip(other.buckets) {
            mine.extend(theirs);
        }
    }

    /// Entries of one kind, in discovery order.
    pub fn entries(&self, kind: DiffKind) -> &[DiffEntry] {
        &self.buckets[kind.index()]
    }

    pub fn count(&self, kind: DiffKind) -> usize {
        self.entries(kind).len()
    }

    /// Total number of differences.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Returns `true` if the documents are semantically equal.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// All entries, bucket by bucket in [`DiffKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &DiffEntry> {
        self.buckets.iter().flatten()
    }

    /// The result of the same comparison with old and new swapped.
    pub fn mirrored(self) -> Self {
        Self::classify(
            self.buckets
                .into_iter()
                .flatten()
                .map(DiffEntry::mirrored),
        )
    }
}

impl Serialize for DiffResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(DiffKind::ALL.len()))?;
        for kind in DiffKind::ALL {
            map.serialize_entry(kind.name(), self.entries(kind))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> Path {
        Path::root().child(k)
    }

    fn n(v: i64) -> Value {
        Value::from(v)
    }

    #[test]
    fn empty_result() {
        let result = DiffResult::new();
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        assert_eq!(result.iter().count(), 0);
    }

    #[test]
    fn classify_buckets_by_kind_in_order() {
        let result = DiffResult::classify(vec![
            DiffEntry::AddedKey { path: key("c"), value: n(3) },
            DiffEntry::Changed { path: key("x"), old: n(1), new: n(2) },
            DiffEntry::AddedKey { path: key("d"), value: n(4) },
            DiffEntry::RemovedListItem { path: key("items"), value: n(9) },
        ]);

        assert_eq!(result.len(), 4);
        assert_eq!(result.count(DiffKind::Changed), 1);
        assert_eq!(result.count(DiffKind::AddedKey), 2);
        assert_eq!(result.count(DiffKind::RemovedKey), 0);
        assert_eq!(result.count(DiffKind::RemovedListItem), 1);

        let added: Vec<&Path> = result
            .entries(DiffKind::AddedKey)
            .iter()
            .map(DiffEntry::path)
            .collect();
        assert_eq!(added, vec![&key("c"), &key("d")]);

        // iter() walks buckets in kind order.
        let kinds: Vec<DiffKind> = result.iter().map(DiffEntry::kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiffKind::Changed,
                DiffKind::AddedKey,
                DiffKind::AddedKey,
                DiffKind::RemovedListItem
            ]
        );
    }

    #[test]
    fn entry_values() {
        let changed = DiffEntry::Changed { path: key("p"), old: n(1), new: n(2) };
        assert_eq!(changed.old_value(), Some(&n(1)));
        assert_eq!(changed.new_value(), Some(&n(2)));

        let removed = DiffEntry::RemovedKey { path: key("p"), value: n(1) };
        assert_eq!(removed.old_value(), Some(&n(1)));
        assert_eq!(removed.new_value(), None);
    }

    #[test]
    fn mirrored_swaps_roles() {
        let changed = DiffEntry::Changed { path: key("p"), old: n(1), new: n(2) };
        assert_eq!(
            changed.mirrored(),
            DiffEntry::Changed { path: key("p"), old: n(2), new: n(1) }
        );

        let result = DiffResult::classify(vec![
            DiffEntry::RemovedKey { path: key("a"), value: n(1) },
            DiffEntry::AddedListItem { path: key("l"), value: n(2) },
        ])
        .mirrored();
        assert_eq!(result.count(DiffKind::AddedKey), 1);
        assert_eq!(result.count(DiffKind::RemovedListItem), 1);
        assert_eq!(DiffKind::RemovedKey.mirrored(), DiffKind::AddedKey);
    }

    #[test]
    fn merge_appends_per_bucket() {
        let mut left = DiffResult::classify(vec![DiffEntry::AddedKey { path: key("a"), value: n(1) }]);
        let right = DiffResult::classify(vec![
            DiffEntry::AddedKey { path: key("b"), value: n(2) },
            DiffEntry::Changed { path: key("c"), old: n(1), new: n(2) },
        ]);
        left.merge(right);
        assert_eq!(left.len(), 3);
        assert_eq!(left.entries(DiffKind::AddedKey)[1].path(), &key("b"));
    }

    #[test]
    fn serializes_every_bucket() {
        let result = DiffResult::classify(vec![DiffEntry::Changed {
            path: key("port"),
            old: n(8080),
            new: Value::from("9090"),
        }]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json["changed"][0],
            serde_json::json!({"kind": "changed", "path": ["port"], "old": 8080, "new": "9090"})
        );
        assert_eq!(json["added_key"], serde_json::json!([]));
        assert_eq!(json.as_object().unwrap().len(), 5);
    }
}
