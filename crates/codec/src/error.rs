/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
use thiserror::Error;

pub use crate::parser::error::ParseError;

/// Top-level error type for importing flagd definitions.
///
/// Encoding, decoding and validation are total and never return this;
/// only the text import path can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlagdError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid flagd format: Could not parse the definition")]
    InvalidFormat,
}
