//! ConfigMap envelopes.
//!
//! Kubernetes `ConfigMap`s keep configuration as strings under `data`, each
//! string being a YAML document of its own. Comparing two ConfigMaps means
//! comparing those embedded documents, not the envelopes.

use confdiff_types::{Mapping, Value, ValueError};
use tracing::{debug, warn};

/// The `kind` that marks a document as an envelope.
pub const CONFIG_MAP_KIND: &str = "ConfigMap";

fn is_config_map(document: &Value) -> bool {
    document.get("kind").and_then(Value::as_str) == Some(CONFIG_MAP_KIND)
}

/// Pick the tree to compare from the documents of one file.
///
/// With a ConfigMap present, the first one wins: every `data` entry whose key
/// contains `section` (all entries when `section` is `None`) is parsed as
/// YAML and its top-level keys are merged into one mapping, later entries
/// overriding earlier ones. Entries that are not valid YAML or not mappings
/// are skipped.
///
/// Without a ConfigMap the first document is used as is and `section` is
/// ignored. A file without documents yields an empty mapping.
pub fn select_tree(documents: Vec<Value>, section: Option<&str>) -> Result<Value, ValueError> {
    if let Some(envelope) = documents.iter().find(|d| is_config_map(d)) {
        return merge_payloads(envelope, section).map(Value::Mapping);
    }

    if let Some(section) = section {
        debug!(section, "no ConfigMap found; section selector ignored");
    }
    Ok(documents
        .into_iter()
        .next()
        .unwrap_or_else(|| Value::Mapping(Mapping::new())))
}

fn merge_payloads(envelope: &Value, section: Option<&str>) -> Result<Mapping, ValueError> {
    let mut merged = Mapping::new();
    let Some(data) = envelope.get("data").and_then(Value::as_mapping) else {
        warn!("ConfigMap has no data mapping");
        return Ok(merged);
    };

    for (key, payload) in data {
        if section.is_some_and(|s| !key.contains(s)) {
            continue;
        }
        let Some(text) = payload.as_str() else {
            continue;
        };

        let parsed = serde_yaml::from_str::<serde_yaml::Value>(text).and_then(|mut yaml| {
            yaml.apply_merge()?;
            Ok(yaml)
        });
        let yaml = match parsed {
            Ok(yaml) => yaml,
            Err(e) => {
                warn!(key = %key, error = %e, "skipping ConfigMap entry that is not valid YAML");
                continue;
            }
        };

        match Value::try_from(yaml)? {
            Value::Mapping(entries) => {
                debug!(key = %key, keys = entries.len(), "merged ConfigMap entry");
                merged.extend(entries);
            }
            other => {
                debug!(key = %key, kind = %other.kind(), "skipping ConfigMap entry that is not a mapping");
            }
        }
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_documents;

    const CONFIG_MAP: &str = r#"
apiVersion: v1
kind: ConfigMap
metadata:
  name: ipo
data:
  ipo-config: |
    ipo:
      robot:
        speed: 10
  ipo-config-prod: |
    ipo:
      robot:
        speed: 12
    region: eu
  log-level: debug
  broken: "a: [1"
"#;

    fn select(text: &str, section: Option<&str>) -> Value {
        select_tree(parse_documents(text).unwrap(), section).unwrap()
    }

    #[test]
    fn plain_document_is_used_directly() {
        let tree = select("a: 1\nb: 2\n", Some("ignored"));
        assert_eq!(tree.get("a"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn section_is_a_substring_match() {
        // "ipo-config" matches both ipo-config and ipo-config-prod; the
        // later entry overrides the shared top-level key.
        let tree = select(CONFIG_MAP, Some("ipo-config"));
        let speed = tree.get("ipo").and_then(|v| v.get("robot")).and_then(|v| v.get("speed"));
        assert_eq!(speed, Some(&Value::Number(12.0)));
        assert_eq!(tree.get("region"), Some(&Value::from("eu")));
    }

    #[test]
    fn exact_section() {
        let tree = select(CONFIG_MAP, Some("prod"));
        assert_eq!(tree.get("region"), Some(&Value::from("eu")));
        assert_eq!(tree.as_mapping().unwrap().len(), 2);
    }

    #[test]
    fn no_section_merges_every_mapping_entry() {
        // "log-level: debug" is a scalar payload and "broken" is not YAML;
        // both are skipped.
        let tree = select(CONFIG_MAP, None);
        let keys: Vec<&String> = tree.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, vec!["ipo", "region"]);
    }

    #[test]
    fn config_map_found_after_other_documents() {
        let text = format!("kind: Service\nname: web\n---{CONFIG_MAP}");
        let tree = select(&text, Some("prod"));
        assert!(tree.get("region").is_some());
    }

    #[test]
    fn payload_merge_keys_are_expanded() {
        let text = "kind: ConfigMap\ndata:\n  cfg: |\n    base: &b\n      a: 1\n    x:\n      <<: *b\n      c: 2\n";
        let tree = select(text, None);
        let expanded = parse_documents("a: 1\nc: 2\n").unwrap().remove(0);
        assert_eq!(tree.get("x"), Some(&expanded));
    }

    #[test]
    fn config_map_without_data() {
        let tree = select("kind: ConfigMap\nmetadata:\n  name: x\n", None);
        assert_eq!(tree, Value::Mapping(Mapping::new()));
    }

    #[test]
    fn no_documents_is_empty_mapping() {
        assert_eq!(select("", None), Value::Mapping(Mapping::new()));
    }

    #[test]
    fn malformed_payload_is_fatal() {
        let text = "kind: ConfigMap\ndata:\n  cfg: \"ratio: .nan\"\n";
        let result = select_tree(parse_documents(text).unwrap(), None);
        assert!(matches!(result, Err(ValueError::NotANumber { .. })));
    }
}
