use std::fmt;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::kind::ValueKind;

/// Largest magnitude at which every integer is exactly representable as `f64`.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// A node of a parsed configuration document.
///
/// Trees are fully materialized and own their children, so they are finite
/// and acyclic by construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// The type tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::Text(_) => ValueKind::Text,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Mapping(_) => ValueKind::Mapping,
        }
    }

    /// Returns `true` unless this is a sequence or a mapping.
    pub fn is_scalar(&self) -> bool {
        self.kind().is_scalar()
    }

    /// Canonical string form of a scalar, `None` for collections.
    ///
    /// Numbers use their shortest decimal form (`8080.0` becomes `"8080"`),
    /// booleans are `"true"`/`"false"`, null is `"null"`.
    pub fn canonical_scalar(&self) -> Option<String> {
        match self {
            Self::Null => Some("null".to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(canonical_number(*n)),
            Self::Text(s) => Some(s.clone()),
            Self::Sequence(_) | Self::Mapping(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Look up `key` if this is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|m| m.get(key))
    }
}

/// Shortest decimal rendering of a number, without a trailing `.0`.
pub fn canonical_number(n: f64) -> String {
    if n == 0.0 {
        // Folds -0.0 into 0.
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < EXACT_INTEGER_LIMIT {
        return format!("{}", n as i64);
    }
    n.to_string()
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Self::Mapping(m)
    }
}

/// Top-level text is written bare; everything else uses the flow form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            other => write_flow(f, other),
        }
    }
}

fn write_flow(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => f.write_str(&canonical_number(*n)),
        Value::Text(s) => write!(f, "{s:?}"),
        Value::Sequence(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_flow(f, item)?;
            }
            f.write_str("]")
        }
        Value::Mapping(m) => {
            f.write_str("{")?;
            for (i, (key, item)) in m.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key}: ")?;
                write_flow(f, item)?;
            }
            f.write_str("}")
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < EXACT_INTEGER_LIMIT => {
                serializer.serialize_i64(*n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(m) => m.serialize(serializer),
        }
    }
}

/// An insertion-ordered map from string keys to values.
///
/// Equality ignores key order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping(IndexMap<String, Value>);

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, returning the previous value if the key was present.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(String, Value)> for Mapping {
    fn extend<I: IntoIterator<Item = (String, Value)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
