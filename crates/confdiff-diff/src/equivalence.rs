//! Scalar equivalence: when do two scalars of possibly different types match?
//!
//! Scalars of the same kind compare by value. Scalars of different kinds
//! compare by canonical string form, but only when some configured group
//! contains both kinds. Groups are never chained: with `{number, text}` and
//! `{bool, text}`, `8080` may equal `"8080"` and `true` may equal `"true"`,
//! but a number never equals a boolean.

use std::collections::BTreeSet;

use confdiff_types::{Value, ValueKind};

use crate::error::{ConfigResult, DiffError};

/// Outcome of comparing two scalars.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Equivalence {
    Equal,
    NotEqual,
}

impl Equivalence {
    pub fn is_equal(self) -> bool {
        self == Self::Equal
    }
}

impl From<bool> for Equivalence {
    fn from(equal: bool) -> Self {
        if equal {
            Self::Equal
        } else {
            Self::NotEqual
        }
    }
}

/// A validated set of equivalence groups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquivalenceGroups {
    groups: Vec<BTreeSet<ValueKind>>,
}

impl EquivalenceGroups {
    /// Build groups from lists of kinds.
    ///
    /// Every group must name at least two distinct scalar kinds.
    pub fn new<G, K>(groups: G) -> ConfigResult<Self>
    where
        G: IntoIterator<Item = K>,
        K: IntoIterator<Item = ValueKind>,
    {
        let mut validated = Vec::new();
        for group in groups {
            let kinds: Vec<ValueKind> = group.into_iter().collect();
            if let Some(kind) = kinds.iter().find(|k| !k.is_scalar()) {
                return Err(DiffError::NonScalarKind(*kind));
            }
            let set: BTreeSet<ValueKind> = kinds.iter().copied().collect();
            if set.len() < 2 {
                return Err(DiffError::DegenerateGroup(kinds));
            }
            validated.push(set);
        }
        Ok(Self { groups: validated })
    }

    /// No cross-type equality at all.
    pub fn none() -> Self {
        Self { groups: Vec::new() }
    }

    pub fn groups(&self) -> impl Iterator<Item = &BTreeSet<ValueKind>> {
        self.groups.iter()
    }

    /// Returns `true` if some single group contains both kinds.
    pub fn related(&self, a: ValueKind, b: ValueKind) -> bool {
        self.groups
            .iter()
            .any(|group| group.contains(&a) && group.contains(&b))
    }

    /// Compare two scalars.
    ///
    /// Collections are not scalars and always evaluate to `NotEqual`; the
    /// engine recurses into them instead of calling this.
    pub fn evaluate(&self, a: &Value, b: &Value) -> Equivalence {
        match (a, b) {
            (Value::Null, Value::Null) => Equivalence::Equal,
            (Value::Bool(x), Value::Bool(y)) => (x == y).into(),
            (Value::Number(x), Value::Number(y)) => (x == y).into(),
            (Value::Text(x), Value::Text(y)) => (x == y).into(),
            _ if a.is_scalar() && b.is_scalar() && self.related(a.kind(), b.kind()) => {
                (a.canonical_scalar() == b.canonical_scalar()).into()
            }
            _ => Equivalence::NotEqual,
        }
    }
}

impl Default for EquivalenceGroups {
    /// `{number, text}` and `{bool, text}`.
    fn default() -> Self {
        Self {
            groups: vec![
                BTreeSet::from([ValueKind::Number, ValueKind::Text]),
                BTreeSet::from([ValueKind::Bool, ValueKind::Text]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    fn text(s: &str) -> Value {
        Value::from(s)
    }

    #[test]
    fn same_kind_compares_by_value() {
        let groups = EquivalenceGroups::default();
        assert_eq!(groups.evaluate(&num(1.0), &num(1.0)), Equivalence::Equal);
        assert_eq!(groups.evaluate(&num(1.0), &num(2.0)), Equivalence::NotEqual);
        assert_eq!(groups.evaluate(&text("a"), &text("a")), Equivalence::Equal);
        assert_eq!(groups.evaluate(&Value::Null, &Value::Null), Equivalence::Equal);
        assert_eq!(
            groups.evaluate(&Value::Bool(true), &Value::Bool(false)),
            Equivalence::NotEqual
        );
    }

    #[test]
    fn number_and_text_in_default_group() {
        let groups = EquivalenceGroups::default();
        assert!(groups.evaluate(&num(8080.0), &text("8080")).is_equal());
        assert!(groups.evaluate(&text("8080"), &num(8080.0)).is_equal());
        assert!(!groups.evaluate(&num(8080.0), &text("9090")).is_equal());
        assert!(groups.evaluate(&num(0.25), &text("0.25")).is_equal());
    }

    #[test]
    fn bool_and_text_in_default_group() {
        let groups = EquivalenceGroups::default();
        assert!(groups.evaluate(&Value::Bool(true), &text("true")).is_equal());
        assert!(!groups.evaluate(&Value::Bool(true), &text("True")).is_equal());
    }

    #[test]
    fn groups_do_not_chain() {
        let groups = EquivalenceGroups::default();
        assert!(!groups.evaluate(&num(1.0), &Value::Bool(true)).is_equal());
        assert!(!groups.evaluate(&Value::Null, &text("null")).is_equal());
    }

    #[test]
    fn no_groups_is_strict() {
        let groups = EquivalenceGroups::none();
        assert!(!groups.evaluate(&num(8080.0), &text("8080")).is_equal());
    }

    #[test]
    fn custom_group_with_null() {
        let groups =
            EquivalenceGroups::new([[ValueKind::Null, ValueKind::Text]]).unwrap();
        assert!(groups.evaluate(&Value::Null, &text("null")).is_equal());
        assert!(!groups.evaluate(&num(1.0), &text("1")).is_equal());
    }

    #[test]
    fn collections_are_never_scalar_equal() {
        let groups = EquivalenceGroups::default();
        let empty = Value::Sequence(vec![]);
        assert!(!groups.evaluate(&empty, &empty).is_equal());
    }

    #[test]
    fn rejects_non_scalar_kind() {
        let err = EquivalenceGroups::new([vec![ValueKind::Text, ValueKind::Sequence]]).unwrap_err();
        assert!(matches!(err, DiffError::NonScalarKind(ValueKind::Sequence)));
    }

    #[test]
    fn rejects_degenerate_group() {
        let err = EquivalenceGroups::new([vec![ValueKind::Text, ValueKind::Text]]).unwrap_err();
        assert!(matches!(err, DiffError::DegenerateGroup(_)));
    }
}
