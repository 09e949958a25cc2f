/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Utility functions for parsing flagd definitions written as JSON or YAML.
 * Works only with in-memory strings (no file I/O).
 */

use serde_json::{Map, Number, Value};
use yaml_rust::{Yaml, YamlLoader};

use crate::parser::error::ParseError;

/// Parse a flagd definition from a string.
///
/// The format is picked from the file extension when one is given
/// (`.json`, `.yaml`, `.yml`). Otherwise JSON is tried first, then YAML.
/// The YAML result is only taken when it is a mapping; in every other case
/// the JSON error is reported.
///
/// Object key order is kept as written in the document.
///
/// # Errors
///
/// Returns `ParseError` if the content is not valid JSON (or YAML).
pub fn parse_definition(content: &str, file_path: Option<&str>) -> Result<Value, ParseError> {
    if let Some(path) = file_path {
        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".json") {
            return parse_json(content);
        }
        if path_lower.ends_with(".yaml") || path_lower.ends_with(".yml") {
            return parse_yaml(content);
        }
    }

    // a YAML fallback only counts when it yields a mapping; prose parses as a scalar
    match parse_json(content) {
        Ok(value) => Ok(value),
        Err(json_error) => match parse_yaml(content) {
            Ok(value) if value.is_object() => Ok(value),
            _ => Err(json_error),
        },
    }
}

fn parse_json(content: &str) -> Result<Value, ParseError> {
    serde_json::from_str(content).map_err(|e| ParseError::InvalidJson(e.to_string()))
}

/// Parse YAML content, then convert the first document to `serde_json::Value`.
fn parse_yaml(content: &str) -> Result<Value, ParseError> {
    let docs =
        YamlLoader::load_from_str(content).map_err(|e| ParseError::InvalidYaml(e.to_string()))?;

    let doc = docs
        .first()
        .ok_or_else(|| ParseError::InvalidYaml("document is empty".to_string()))?;

    yaml_to_json_value(doc)
        .ok_or_else(|| ParseError::InvalidYaml("document cannot be represented as JSON".to_string()))
}

/// Convert a YAML node to a JSON value. Hash order is kept.
fn yaml_to_json_value(yaml: &Yaml) -> Option<Value> {
    match yaml {
        Yaml::Real(s) => Some(
            s.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map_or_else(|| Value::String(s.clone()), Value::Number),
        ),
        Yaml::Integer(i) => Some(Value::Number(Number::from(*i))),
        Yaml::String(s) => Some(Value::String(s.clone())),
        Yaml::Boolean(b) => Some(Value::Bool(*b)),
        Yaml::Array(items) => items
            .iter()
            .map(yaml_to_json_value)
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
        Yaml::Hash(hash) => {
            let mut map = Map::new();
            for (k, v) in hash {
                map.insert(yaml_key(k)?, yaml_to_json_value(v)?);
            }
            Some(Value::Object(map))
        }
        Yaml::Null => Some(Value::Null),
        Yaml::BadValue | Yaml::Alias(_) => None,
    }
}

/// Mapping keys become JSON object keys.
fn yaml_key(yaml: &Yaml) -> Option<String> {
    match yaml {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        Yaml::Null => Some("null".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAG_YAML: &str = r#"
my-flag:
  state: ENABLED
  variants:
    zeta: -3
    alpha: 1.5
    on: true
  defaultVariant: zeta
  targeting:
    if:
      - in:
          - var: country
          - [us, ca]
      - alpha
      - zeta
"#;

    #[test]
    fn test_parse_json_definition() {
        let json = r#"{"f": {"state": "ENABLED", "variants": {"b": 1, "a": 2}, "defaultVariant": "b"}}"#;
        let result = parse_definition(json, Some("flags.json")).unwrap();
        assert_eq!(result["f"]["state"], "ENABLED");
        let keys: Vec<&String> = result["f"]["variants"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_parse_yaml_definition_keeps_order_and_numbers() {
        let result = parse_definition(FLAG_YAML, Some("flags.yaml")).unwrap();
        let variants = result["my-flag"]["variants"].as_object().unwrap();
        let keys: Vec<&String> = variants.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "on"]);
        assert_eq!(variants["zeta"], -3);
        assert_eq!(variants["alpha"], 1.5);
        assert_eq!(variants["on"], true);
        assert_eq!(result["my-flag"]["targeting"]["if"][0]["in"][1][1], "ca");
    }

    #[test]
    fn test_parse_without_extension_tries_json_then_yaml() {
        let result = parse_definition(r#"{"test": "value"}"#, None).unwrap();
        assert_eq!(result["test"], "value");

        let result = parse_definition("test: value", Some("flags.txt")).unwrap();
        assert_eq!(result["test"], "value");
    }

    #[test]
    fn test_parse_invalid_json_reports_json_error() {
        let err = parse_definition(r#"{"key": unclosed"#, Some("flags.json")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson(_)));
        assert!(err.to_string().starts_with("JSON parse error: "));

        // both formats fail: the JSON error wins
        let err = parse_definition("{ not: [valid", None).unwrap_err();
        assert!(err.to_string().starts_with("JSON parse error: "));
    }

    #[test]
    fn test_parse_prose_without_extension_reports_json_error() {
        for path in [None, Some("flags.txt"), Some("flags")] {
            let err = parse_definition("hello world", path).unwrap_err();
            assert!(matches!(err, ParseError::InvalidJson(_)));
            assert!(err.to_string().starts_with("JSON parse error: "));
        }

        let err = parse_definition("- a\n- b\n", None).unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson(_)));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = parse_definition("key: [unclosed", Some("flags.yml")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidYaml(_)));
    }

    #[test]
    fn test_parse_empty_yaml_document() {
        assert!(parse_definition("", Some("flags.yaml")).is_err());
    }
}
