//! Construction of [`Value`] trees from parsed YAML and JSON documents.
//!
//! YAML trees may carry things the value model cannot hold (non-scalar
//! keys, tags, NaN), so that conversion is fallible. JSON trees always fit.

use serde_yaml::Value as YamlValue;

use crate::error::ValueError;
use crate::value::{canonical_number, Mapping, Value};

impl TryFrom<YamlValue> for Value {
    type Error = ValueError;

    fn try_from(yaml: YamlValue) -> Result<Self, Self::Error> {
        TreeBuilder::default().build(yaml)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

/// Tracks the key path while converting so errors can say where they happened.
#[derive(Default)]
struct TreeBuilder {
    path: Vec<String>,
}

impl TreeBuilder {
    fn location(&self) -> String {
        if self.path.is_empty() {
            "(root)".to_string()
        } else {
            self.path.join(".")
        }
    }

    fn build(&mut self, yaml: YamlValue) -> Result<Value, ValueError> {
        match yaml {
            YamlValue::Null => Ok(Value::Null),
            YamlValue::Bool(b) => Ok(Value::Bool(b)),
            YamlValue::Number(n) => self.number(&n).map(Value::Number),
            YamlValue::String(s) => Ok(Value::Text(s)),
            YamlValue::Sequence(items) => items
                .into_iter()
                .map(|item| self.build(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            YamlValue::Mapping(map) => {
                let mut out = Mapping::new();
                for (key, value) in map {
                    let key = self.key(key)?;
                    if out.contains_key(&key) {
                        return Err(ValueError::DuplicateKey {
                            path: self.location(),
                            key,
                        });
                    }
                    self.path.push(key.clone());
                    let value = self.build(value);
                    self.path.pop();
                    out.insert(key, value?);
                }
                Ok(Value::Mapping(out))
            }
            YamlValue::Tagged(tagged) => self.build(tagged.value),
        }
    }

    fn number(&self, n: &serde_yaml::Number) -> Result<f64, ValueError> {
        let value = n.as_f64().unwrap_or(f64::NAN);
        if value.is_nan() {
            return Err(ValueError::NotANumber {
                path: self.location(),
            });
        }
        Ok(value)
    }

    fn key(&self, key: YamlValue) -> Result<String, ValueError> {
        match key {
            YamlValue::Null => Ok("null".to_string()),
            YamlValue::Bool(b) => Ok(b.to_string()),
            YamlValue::Number(n) => self.number(&n).map(canonical_number),
            YamlValue::String(s) => Ok(s),
            YamlValue::Tagged(tagged) => self.key(tagged.value),
            YamlValue::Sequence(_) | YamlValue::Mapping(_) => Err(ValueError::NonScalarKey {
                path: self.location(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn from_yaml(text: &str) -> Result<Value, ValueError> {
        let yaml: YamlValue = serde_yaml::from_str(text).unwrap();
        Value::try_from(yaml)
    }

    #[test]
    fn nested_document() {
        let value = from_yaml("server:\n  port: 8080\n  hosts: [a, b]\n  debug: false\n").unwrap();
        let server = value.get("server").unwrap();
        assert_eq!(server.get("port"), Some(&Value::Number(8080.0)));
        assert_eq!(
            server.get("hosts"),
            Some(&Value::Sequence(vec![Value::from("a"), Value::from("b")]))
        );
        assert_eq!(server.get("debug"), Some(&Value::Bool(false)));
    }

    #[test]
    fn scalar_keys_are_canonicalized() {
        let value = from_yaml("8080: http\ntrue: yes-literal\n~: nothing\n").unwrap();
        assert_eq!(value.get("8080"), Some(&Value::from("http")));
        assert!(value.get("true").is_some());
        assert_eq!(value.get("null"), Some(&Value::from("nothing")));
    }

    #[test]
    fn tags_are_stripped() {
        let value = from_yaml("secret: !vault s3cr3t\n").unwrap();
        assert_eq!(value.get("secret"), Some(&Value::from("s3cr3t")));
    }

    #[test]
    fn non_scalar_key_is_malformed() {
        let err = from_yaml("outer:\n  ? [a, b]\n  : value\n").unwrap_err();
        assert_eq!(
            err,
            ValueError::NonScalarKey {
                path: "outer".into()
            }
        );
    }

    #[test]
    fn colliding_keys_are_malformed() {
        let err = from_yaml("1: a\n\"1\": b\n").unwrap_err();
        assert!(matches!(err, ValueError::DuplicateKey { ref key, .. } if key == "1"));
    }

    #[test]
    fn nan_is_malformed() {
        let err = from_yaml("limits:\n  ratio: .nan\n").unwrap_err();
        assert_eq!(
            err,
            ValueError::NotANumber {
                path: "limits.ratio".into()
            }
        );
    }

    #[test]
    fn from_json_tree() {
        let value = Value::from(json!({"port": 8080, "tags": ["a", true, null]}));
        assert_eq!(value.get("port"), Some(&Value::Number(8080.0)));
        assert_eq!(
            value.get("tags"),
            Some(&Value::Sequence(vec![
                Value::from("a"),
                Value::Bool(true),
                Value::Null
            ]))
        );
    }
}
