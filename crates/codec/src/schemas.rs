/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
use serde_json::Value;

/// Embed the flag definition schema at compile time
/// This avoids file I/O which is not available in WASM environments
const FLAG_SCHEMA_JSON: &str = include_str!("../../../schemas/flagd-flag.schema.v1.json");

/// Load the flag definition schema
///
/// Returns the parsed JSON schema as a `serde_json::Value`.
/// This function never fails at runtime since the schema is embedded at compile time.
///
/// # Panics
///
/// Panics if the embedded schema JSON is invalid (this should never happen).
#[must_use]
pub fn load_flag_schema() -> Value {
    serde_json::from_str(FLAG_SCHEMA_JSON)
        .expect("Failed to parse embedded flag schema - this should never happen")
}
