//! flagd Flag Codec Library
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.
//!
//! This library converts flagd flag definitions between their JSON wire format and
//! an editable model, and validates wire documents.
//! It is designed to be WASM-compatible and works only with in-memory data (no file I/O).
//!
//! # Example
//!
//! ```rust,no_run
//! use flagd_codec::{encode, import_flag, validate, Operator, Rule, Condition};
//!
//! let wire = r#"{
//!   "new-checkout": {
//!     "state": "ENABLED",
//!     "variants": {"on": true, "off": false},
//!     "defaultVariant": "off"
//!   }
//! }"#;
//!
//! let mut flag = import_flag(wire, None)?;
//! flag.targeting_enabled = true;
//! flag.rules = vec![Rule::new(Condition::new("email", Operator::EndsWith, "@example.com"), "on")];
//!
//! let encoded = encode(&flag);
//! assert!(validate(&encoded).valid);
//! # Ok::<(), flagd_codec::FlagdError>(())
//! ```

pub mod codec;
pub mod error;
pub mod model;
pub mod parser;
pub mod schemas;
pub mod validator;

pub use codec::{decode, encode, to_pretty_json};
pub use error::{FlagdError, ParseError};
pub use model::{
    Condition, Flag, Operator, Rule, SemVerComparison, ValueShape, ValueType, Variant,
    VariantValue,
};
pub use validator::error::ValidationError;
pub use validator::{validate, ValidationResult, Validator};

/// Parse flagd definition text (JSON or YAML) and decode its first flag.
///
/// `file_path` is only used to pick the format from its extension.
///
/// # Errors
///
/// Returns `FlagdError::Parse` if the text cannot be parsed, and
/// `FlagdError::InvalidFormat` if it parses but is not a flagd definition.
pub fn import_flag(content: &str, file_path: Option<&str>) -> Result<Flag, FlagdError> {
    let wire = parser::parse_definition(content, file_path)?;
    decode(&wire).ok_or(FlagdError::InvalidFormat)
}

/// Encode a flag and render it as pretty JSON with the given indent width.
///
/// This function never fails.
pub fn export_flag(flag: &Flag, indent: usize) -> String {
    to_pretty_json(&encode(flag), indent)
}
