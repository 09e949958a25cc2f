/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Structural and referential checks on raw flagd wire JSON.
 * Independent of the codec model: any JSON value is accepted as input.
 */

use serde_json::{Map, Value};
use strsim::levenshtein;

use crate::codec::{STATE_DISABLED, STATE_ENABLED};
use crate::validator::error::{ValidationError, ValidationResult};
use crate::validator::type_guards::{flag_fields, is_record, variant_names};

pub const NOT_AN_OBJECT: &str = "Input must be a non-null object";
pub const NO_FLAGS: &str = "At least one flag definition is required";

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    Required,
    InvalidState,
    NotAnObject,
    NoVariants,
    NotAString,
    UnknownVariant,
    NotAnArray,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Required => "is required",
            Reason::InvalidState => "must be 'ENABLED' or 'DISABLED'",
            Reason::NotAnObject => "must be an object",
            Reason::NoVariants => "must have at least one variant",
            Reason::NotAString => "must be a string",
            Reason::UnknownVariant => "must reference an existing variant",
            Reason::NotAnArray => "must be an array",
        }
    }
}

/// Validate a flagd document. Findings accumulate across all flags and all
/// checks within a flag.
pub fn validate_definition(input: &Value) -> ValidationResult {
    let Some(flags) = input.as_object() else {
        return ValidationResult::from_errors(vec![ValidationError::document(NOT_AN_OBJECT)]);
    };
    if flags.is_empty() {
        return ValidationResult::from_errors(vec![ValidationError::document(NO_FLAGS)]);
    }

    let empty = Map::new();
    let mut errors = Vec::new();
    for (flag_key, flag) in flags {
        let fields = flag_fields(flag).unwrap_or(&empty);
        validate_flag(flag_key, fields, &mut errors);
    }

    tracing::debug!(flags = flags.len(), errors = errors.len(), "Validated flagd definition");
    ValidationResult::from_errors(errors)
}

fn validate_flag(flag_key: &str, flag: &Map<String, Value>, errors: &mut Vec<ValidationError>) {
    let report = |errors: &mut Vec<ValidationError>, field: &str, reason: Reason| {
        errors.push(ValidationError::field(flag_key, field, reason.as_str()));
    };

    let state = flag.get("state");
    let variants = flag.get("variants");
    let default_variant = flag.get("defaultVariant");

    for (field, value) in [
        ("state", state),
        ("variants", variants),
        ("defaultVariant", default_variant),
    ] {
        if value.is_none() {
            report(errors, field, Reason::Required);
        }
    }

    if let Some(state) = state {
        let state = state.as_str();
        if state != Some(STATE_ENABLED) && state != Some(STATE_DISABLED) {
            report(errors, "state", Reason::InvalidState);
        }
    }

    if let Some(variants) = variants {
        if !is_record(variants) {
            report(errors, "variants", Reason::NotAnObject);
        } else if variants.as_object().map_or(true, Map::is_empty) {
            report(errors, "variants", Reason::NoVariants);
        }
    }

    if let Some(default_variant) = default_variant {
        match default_variant.as_str() {
            None => report(errors, "defaultVariant", Reason::NotAString),
            Some(name) => {
                let names = variants.and_then(variant_names).unwrap_or_default();
                if !names.is_empty() && !names.contains(&name) {
                    let mut error = ValidationError::field(
                        flag_key,
                        "defaultVariant",
                        Reason::UnknownVariant.as_str(),
                    );
                    if let Some(closest) = closest_name(name, &names) {
                        error = error.with_suggestion(format!("Did you mean '{closest}'?"));
                    }
                    errors.push(error);
                }
            }
        }
    }

    if let Some(targeting) = flag.get("targeting") {
        if !is_record(targeting) {
            report(errors, "targeting", Reason::NotAnObject);
        } else if targeting.get("if").is_some_and(|if_array| !if_array.is_array()) {
            report(errors, "targeting.if", Reason::NotAnArray);
        }
    }
}

/// Closest variant name when it is within half the longer name's length.
fn closest_name<'a>(name: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|candidate| (*candidate, levenshtein(name, candidate)))
        .filter(|(candidate, distance)| {
            *distance > 0 && *distance <= name.len().max(candidate.len()) / 2
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}
