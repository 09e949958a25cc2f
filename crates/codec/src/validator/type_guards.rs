/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use serde_json::{Map, Value};

/// Type guard to check if value is a record: a non-null, non-array object.
pub fn is_record(value: &Value) -> bool {
    value.is_object()
}

/// Fields of a flag entry. Entries that are not records have no fields.
pub fn flag_fields(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object()
}

/// Variant names of a `variants` value, when it is a record.
pub fn variant_names(value: &Value) -> Option<Vec<&str>> {
    value
        .as_object()
        .map(|variants| variants.keys().map(String::as_str).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_record() {
        assert!(is_record(&json!({})));
        assert!(!is_record(&json!(null)));
        assert!(!is_record(&json!([])));
        assert!(!is_record(&json!("object")));
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(variant_names(&json!({"on": true, "off": false})), Some(vec!["on", "off"]));
        assert_eq!(variant_names(&json!(["on"])), None);
    }
}
