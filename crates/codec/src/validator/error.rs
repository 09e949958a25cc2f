/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single validation finding.
///
/// `message` is the user-facing text; `flag` and `path` locate the finding
/// when it belongs to one flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationError {
    pub flag: Option<String>,
    pub message: String,
    pub path: Option<String>,
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// A finding about the document as a whole.
    pub fn document(message: impl Into<String>) -> Self {
        Self {
            flag: None,
            message: message.into(),
            path: None,
            suggestion: None,
        }
    }

    /// A finding about one field of one flag: `Flag '<key>': '<field>' <reason>`.
    ///
    /// `field` may name a nested field with dots (`targeting.if`).
    pub fn field(flag_key: &str, field: &str, reason: &str) -> Self {
        let mut path = format!("/{}", escape_pointer(flag_key));
        for segment in field.split('.') {
            path.push('/');
            path.push_str(&escape_pointer(segment));
        }

        Self {
            flag: Some(flag_key.to_string()),
            message: format!("Flag '{flag_key}': '{field}' {reason}"),
            path: Some(path),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of validating a document. Findings keep the order they were found in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a valid result with no errors
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Create a result from collected errors; valid only if there are none.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// The finding messages, in order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Append the findings of another result.
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        self.valid = self.errors.is_empty();
        self
    }
}

/// Escape a JSON pointer reference token (RFC 6901).
fn escape_pointer(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// Convert a jsonschema ValidationError to our ValidationError format.
///
/// The flag key is taken from the first segment of the instance path.
pub fn convert_jsonschema_error(error: &jsonschema::ValidationError) -> ValidationError {
    let instance_path = error.instance_path.to_string();
    let flag = instance_path
        .strip_prefix('/')
        .and_then(|rest| rest.split('/').next())
        .filter(|key| !key.is_empty())
        .map(|key| key.replace("~1", "/").replace("~0", "~"));

    ValidationError {
        flag,
        message: format!("Schema: {error}"),
        path: if instance_path.is_empty() {
            None
        } else {
            Some(instance_path)
        },
        suggestion: generate_suggestion_from_error(error),
    }
}

/// Generate a helpful suggestion based on jsonschema error.
fn generate_suggestion_from_error(error: &jsonschema::ValidationError) -> Option<String> {
    // Use Debug formatting to get the keyword name
    let keyword = format!("{:?}", error.kind);

    if keyword.contains("Required") {
        Some("Add the missing required field".to_string())
    } else if keyword.contains("Enum") {
        Some("Use one of the allowed values".to_string())
    } else if keyword.contains("OneOf") || keyword.contains("AnyOf") {
        Some("Check the condition against the supported operators".to_string())
    } else if keyword.contains("Type") {
        Some("Check the field type".to_string())
    } else {
        None
    }
}
