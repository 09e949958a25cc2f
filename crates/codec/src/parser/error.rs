/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Parser-specific error types.
 */

use thiserror::Error;

/// Parser error type for JSON/YAML parsing failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    InvalidJson(String),

    #[error("YAML parse error: {0}")]
    InvalidYaml(String),
}
