use std::fmt;

use serde::{Deserialize, Serialize};

/// The type tag of a [`Value`](crate::Value).
///
/// Tags are ordered so they can live in sorted sets; the order itself has no
/// meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    #[serde(alias = "boolean")]
    Bool,
    #[serde(alias = "int", alias = "float")]
    Number,
    #[serde(alias = "string")]
    Text,
    Sequence,
    Mapping,
}

impl ValueKind {
    /// Returns `true` for the four scalar kinds.
    pub fn is_scalar(self) -> bool {
        !matches!(self, Self::Sequence | Self::Mapping)
    }

    /// Lowercase name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::Text => "text",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
