//! The structural diff engine.
//!
//! Two trees are walked in lock-step. Mappings are compared key by key,
//! scalars through the configured [`EquivalenceGroups`], and sequences are
//! reconciled as multisets: an element of one side is matched with the
//! first still-unmatched element of the other side that is deep-equal to
//! it, and whatever is left over is reported as list-level removals and
//! additions. There is no fuzzy pairing, so an element that changed inside
//! a list shows up as one removal plus one addition, never as `Changed`.

use confdiff_types::{Mapping, Value};
use tracing::{debug, trace};

use crate::equivalence::EquivalenceGroups;
use crate::path::Path;
use crate::result::{DiffEntry, DiffKind, DiffResult};

/// Compare two documents with the default equivalence groups.
pub fn diff_values(old: &Value, new: &Value) -> DiffResult {
    Differ::default().compare(old, new)
}

/// Compares value trees under a fixed set of equivalence groups.
#[derive(Clone, Debug, Default)]
pub struct Differ {
    equivalence: EquivalenceGroups,
}

/// Elements left over after sequence reconciliation, in source order.
struct Leftovers<'a> {
    old: Vec<&'a Value>,
    new: Vec<&'a Value>,
}

impl Differ {
    pub fn new(equivalence: EquivalenceGroups) -> Self {
        Self { equivalence }
    }

    pub fn equivalence(&self) -> &EquivalenceGroups {
        &self.equivalence
    }

    /// Compare two documents from the root.
    pub fn compare(&self, old: &Value, new: &Value) -> DiffResult {
        self.compare_at(Path::root(), old, new)
    }

    /// Compare two sub-trees, reporting paths relative to `path`.
    pub fn compare_at(&self, path: Path, old: &Value, new: &Value) -> DiffResult {
        let mut path = path;
        let mut entries = Vec::new();
        self.walk(&mut path, old, new, &mut entries);

        let result = DiffResult::classify(entries);
        debug!(
            total = result.len(),
            changed = result.count(DiffKind::Changed),
            removed_keys = result.count(DiffKind::RemovedKey),
            added_keys = result.count(DiffKind::AddedKey),
            removed_items = result.count(DiffKind::RemovedListItem),
            added_items = result.count(DiffKind::AddedListItem),
            "structural diff complete"
        );
        result
    }

    /// Returns `true` if comparing `a` and `b` would report nothing.
    ///
    /// Stops at the first difference instead of collecting them all.
    pub fn deep_equal(&self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Mapping(x), Value::Mapping(y)) => {
                x.len() == y.len()
                    && x.iter()
                        .all(|(key, v)| y.get(key).is_some_and(|w| self.deep_equal(v, w)))
            }
            (Value::Sequence(x), Value::Sequence(y)) => {
                x.len() == y.len() && self.sequences_match(x, y)
            }
            _ => self.equivalence.evaluate(a, b).is_equal(),
        }
    }

    fn walk(&self, path: &mut Path, old: &Value, new: &Value, out: &mut Vec<DiffEntry>) {
        match (old, new) {
            (Value::Mapping(o), Value::Mapping(n)) => self.walk_mappings(path, o, n, out),
            (Value::Sequence(o), Value::Sequence(n)) => self.walk_sequences(path, o, n, out),
            _ if old.is_scalar() && new.is_scalar() => {
                if !self.equivalence.evaluate(old, new).is_equal() {
                    out.push(DiffEntry::Changed {
                        path: path.clone(),
                        old: old.clone(),
                        new: new.clone(),
                    });
                }
            }
            _ => {
                trace!(%path, old = %old.kind(), new = %new.kind(), "shape mismatch");
                out.push(DiffEntry::Changed {
                    path: path.clone(),
                    old: old.clone(),
                    new: new.clone(),
                });
            }
        }
    }

    fn walk_mappings(&self, path: &mut Path, old: &Mapping, new: &Mapping, out: &mut Vec<DiffEntry>) {
        for (key, value) in old {
            if !new.contains_key(key) {
                out.push(DiffEntry::RemovedKey {
                    path: path.child(key.as_str()),
                    value: value.clone(),
                });
            }
        }

        for (key, value) in new {
            if !old.contains_key(key) {
                out.push(DiffEntry::AddedKey {
                    path: path.child(key.as_str()),
                    value: value.clone(),
                });
            }
        }

        for (key, old_value) in old {
            if let Some(new_value) = new.get(key) {
                path.push(key);
                self.walk(path, old_value, new_value, out);
                path.pop();
            }
        }
    }

    fn walk_sequences(&self, path: &mut Path, old: &[Value], new: &[Value], out: &mut Vec<DiffEntry>) {
        let leftovers = self.reconcile(old, new);
        trace!(
            %path,
            matched = old.len() - leftovers.old.len(),
            unmatched_old = leftovers.old.len(),
            unmatched_new = leftovers.new.len(),
            "sequence reconciled"
        );

        for value in leftovers.old {
            out.push(DiffEntry::RemovedListItem {
                path: path.clone(),
                value: value.clone(),
            });
        }
        for value in leftovers.new {
            out.push(DiffEntry::AddedListItem {
                path: path.clone(),
                value: value.clone(),
            });
        }
    }

    /// Pair each old element with the first unmatched, deep-equal new element.
    fn reconcile<'a>(&self, old: &'a [Value], new: &'a [Value]) -> Leftovers<'a> {
        let mut taken = vec![false; new.len()];
        let mut unmatched_old = Vec::new();

        for item in old {
            match self.first_match(item, new, &taken) {
                Some(i) => taken[i] = true,
                None => unmatched_old.push(item),
            }
        }

        let unmatched_new = new
            .iter()
            .zip(&taken)
            .filter(|(_, taken)| !**taken)
            .map(|(value, _)| value)
            .collect();

        Leftovers {
            old: unmatched_old,
            new: unmatched_new,
        }
    }

    /// Same matching as [`Self::reconcile`], giving up at the first miss.
    fn sequences_match(&self, old: &[Value], new: &[Value]) -> bool {
        let mut taken = vec![false; new.len()];
        for item in old {
            match self.first_match(item, new, &taken) {
                Some(i) => taken[i] = true,
                None => return false,
            }
        }
        taken.iter().all(|t| *t)
    }

    fn first_match(&self, item: &Value, candidates: &[Value], taken: &[bool]) -> Option<usize> {
        candidates
            .iter()
            .enumerate()
            .position(|(i, candidate)| !taken[i] && self.deep_equal(item, candidate))
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            (-50i64..50).prop_map(Value::from),
            "[a-c0-9]{0,2}".prop_map(Value::Text),
        ]
    }

    fn tree() -> impl Strategy<Value = Value> {
        scalar().prop_recursive(4, 48, 5, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Sequence),
                prop::collection::vec(("[a-d]", inner), 0..5)
                    .prop_map(|pairs| Value::Mapping(pairs.into_iter().collect())),
            ]
        })
    }

    /// Same entries per bucket, ignoring order.
    fn same_entries(a: &DiffResult, b: &DiffResult) -> bool {
        DiffKind::ALL.iter().all(|kind| {
            let mut remaining: Vec<&DiffEntry> = b.entries(*kind).iter().collect();
            a.entries(*kind).len() == remaining.len()
                && a.entries(*kind).iter().all(|entry| {
                    match remaining.iter().position(|other| *other == entry) {
                        Some(i) => {
                            remaining.swap_remove(i);
                            true
                        }
                        None => false,
                    }
                })
        })
    }

    proptest! {
        #[test]
        fn compare_is_reflexive(value in tree()) {
            prop_assert!(diff_values(&value, &value).is_empty());
        }

        #[test]
        fn classification_is_symmetric(a in tree(), b in tree()) {
            let differ = Differ::new(EquivalenceGroups::none());
            let forward = differ.compare(&a, &b).mirrored();
            let backward = differ.compare(&b, &a);
            prop_assert!(same_entries(&forward, &backward));
        }

        #[test]
        fn deep_equal_matches_empty_diff(a in tree(), b in tree()) {
            let differ = Differ::default();
            prop_assert_eq!(differ.deep_equal(&a, &b), differ.compare(&a, &b).is_empty());
        }
    }
}
