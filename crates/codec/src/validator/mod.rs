/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

pub mod definition;
pub mod error;
pub mod schema;
pub mod type_guards;


use serde_json::Value;

use crate::schemas;
use crate::validator::definition::validate_definition;
use crate::validator::error::ValidationError;
use crate::validator::schema::validate_with_schema;

pub use crate::validator::error::ValidationResult;

/// Validate raw flagd wire JSON: required fields, allowed values and the
/// default variant reference.
pub fn validate(input: &Value) -> ValidationResult {
    validate_definition(input)
}

/// Validator for flagd flag documents.
/// Runs the wire-format checks and, in strict mode, the embedded JSON schema.
pub struct Validator {
    flag_schema: Value,
}

impl Validator {
    /// Create a new Validator instance with the embedded schema.
    ///
    /// This constructor loads the schema embedded at compile time (WASM-compatible).
    pub fn new() -> Self {
        Self {
            flag_schema: schemas::load_flag_schema(),
        }
    }

    /// Create a new Validator instance with a custom schema.
    ///
    /// This is useful for testing or when schemas need to be provided dynamically.
    pub fn with_schema(flag_schema: Value) -> Self {
        Self { flag_schema }
    }

    /// Wire-format checks only.
    pub fn validate(&self, data: &Value) -> ValidationResult {
        validate_definition(data)
    }

    /// Wire-format checks followed by the schema check, which also covers the
    /// condition shapes inside `targeting.if`.
    pub fn validate_strict(&self, data: &Value) -> ValidationResult {
        validate_definition(data).merge(validate_with_schema(&self.flag_schema, data))
    }

    /// Format validation errors for display.
    pub fn format_errors(&self, errors: &[ValidationError]) -> String {
        if errors.is_empty() {
            return String::new();
        }

        let mut error_lines = vec!["✗ Validation failed\n".to_string()];

        for error in errors {
            error_lines.push(format!("  Error: {}", error.message));

            if let Some(path) = &error.path {
                error_lines.push(format!("  Path: {path}"));
            }

            if let Some(suggestion) = &error.suggestion {
                error_lines.push(format!("  Suggestion: {suggestion}"));
            }

            error_lines.push(String::new());
        }

        error_lines.join("\n")
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
