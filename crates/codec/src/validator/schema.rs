/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use jsonschema::JSONSchema;
use serde_json::Value;

use crate::validator::error::{convert_jsonschema_error, ValidationError, ValidationResult};

/// Validate data against a JSON schema, reporting every schema violation.
pub fn validate_with_schema(schema: &Value, data: &Value) -> ValidationResult {
    // Compile schema
    let compiled = match JSONSchema::compile(schema) {
        Ok(compiled) => compiled,
        Err(err) => {
            return ValidationResult::from_errors(vec![ValidationError::document(format!(
                "Failed to compile schema: {err}"
            ))]);
        }
    };

    // Validate against schema
    let errors: Vec<ValidationError> = match compiled.validate(data) {
        Ok(()) => Vec::new(),
        Err(errors) => errors.map(|error| convert_jsonschema_error(&error)).collect(),
    };

    ValidationResult::from_errors(errors)
}
