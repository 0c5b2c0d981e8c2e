use confdiff_types::ValueKind;
use serde::{Deserialize, Serialize};

use crate::engine::Differ;
use crate::equivalence::EquivalenceGroups;
use crate::error::ConfigResult;

/// Configuration for the diff engine.
///
/// Read once at start-up; every comparison made by the resulting [`Differ`]
/// uses the same rules.
///
/// ```toml
/// equivalence_groups = [["number", "text"], ["bool", "text"]]
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Sets of scalar kinds whose values may compare equal through their
    /// canonical string form.
    pub equivalence_groups: Vec<Vec<ValueKind>>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            equivalence_groups: vec![
                vec![ValueKind::Number, ValueKind::Text],
                vec![ValueKind::Bool, ValueKind::Text],
            ],
        }
    }
}

impl DiffConfig {
    /// Values only compare equal when their kinds match.
    pub fn strict() -> Self {
        Self {
            equivalence_groups: Vec::new(),
        }
    }

    /// Parse a configuration from TOML. Missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Validate the groups and build an engine.
    pub fn differ(&self) -> ConfigResult<Differ> {
        let groups = EquivalenceGroups::new(self.equivalence_groups.iter().cloned())?;
        Ok(Differ::new(groups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiffError;

    #[test]
    fn default_matches_default_groups() {
        let differ = DiffConfig::default().differ().unwrap();
        assert_eq!(differ.equivalence(), &EquivalenceGroups::default());
    }

    #[test]
    fn strict_has_no_groups() {
        let differ = DiffConfig::strict().differ().unwrap();
        assert_eq!(differ.equivalence().groups().count(), 0);
    }

    #[test]
    fn parse_toml() {
        let config = DiffConfig::from_toml_str(
            r#"equivalence_groups = [["number", "string"], ["null", "text"]]"#,
        )
        .unwrap();
        assert_eq!(
            config.equivalence_groups,
            vec![
                vec![ValueKind::Number, ValueKind::Text],
                vec![ValueKind::Null, ValueKind::Text],
            ]
        );
    }

    #[test]
    fn empty_toml_uses_defaults() {
        assert_eq!(DiffConfig::from_toml_str("").unwrap(), DiffConfig::default());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = DiffConfig::from_toml_str(r#"equivalence_groups = [["number", "date"]]"#)
            .unwrap_err();
        assert!(matches!(err, DiffError::Config(_)));
    }

    #[test]
    fn invalid_group_fails_at_build() {
        let config = DiffConfig {
            equivalence_groups: vec![vec![ValueKind::Mapping, ValueKind::Text]],
        };
        assert!(matches!(config.differ(), Err(DiffError::NonScalarKind(ValueKind::Mapping))));
    }
}
