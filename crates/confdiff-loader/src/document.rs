use confdiff_types::Value;
use serde::Deserialize;
use tracing::debug;

use crate::error::DocumentError;

/// Parse every document of a (possibly multi-document) YAML text.
///
/// Empty documents, such as a trailing `---`, are skipped.
pub fn parse_documents(text: &str) -> Result<Vec<Value>, DocumentError> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let mut yaml = serde_yaml::Value::deserialize(document)?;
        if yaml.is_null() {
            continue;
        }
        yaml.apply_merge()?;
        documents.push(Value::try_from(yaml)?);
    }
    debug!(count = documents.len(), "parsed documents");
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_document() {
        let docs = parse_documents("a: 1\n").unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].get("a"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn multiple_documents_skip_empty() {
        let docs = parse_documents("---\na: 1\n---\n---\nb: 2\n").unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs[1].get("b").is_some());
    }

    #[test]
    fn merge_keys_are_expanded() {
        let merged = parse_documents("base: &b\n  a: 1\nx:\n  <<: *b\n  c: 2\n").unwrap();
        let expanded = parse_documents("base:\n  a: 1\nx:\n  a: 1\n  c: 2\n").unwrap();
        assert_eq!(merged, expanded);
    }

    #[test]
    fn explicit_keys_override_merged_ones() {
        let docs = parse_documents("base: &b\n  a: 1\nx:\n  <<: *b\n  a: 5\n").unwrap();
        assert_eq!(docs[0].get("x").and_then(|x| x.get("a")), Some(&Value::Number(5.0)));
    }

    #[test]
    fn json_is_accepted() {
        let docs = parse_documents(r#"{"port": 8080, "hosts": ["a"]}"#).unwrap();
        assert_eq!(docs[0].get("port"), Some(&Value::Number(8080.0)));
    }

    #[test]
    fn empty_text_has_no_documents() {
        assert!(parse_documents("").unwrap().is_empty());
    }

    #[test]
    fn syntax_error() {
        let err = parse_documents("a: [1, 2\n").unwrap_err();
        assert!(matches!(err, DocumentError::Yaml(_)));
    }

    #[test]
    fn malformed_tree() {
        let err = parse_documents("ratio: .nan\n").unwrap_err();
        assert!(matches!(err, DocumentError::Malformed(_)));
    }
}
