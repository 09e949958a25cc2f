/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Flag codec: converts a whole flag between the editing model and flagd wire JSON.
 * Works only with in-memory values (no file I/O).
 */

pub mod condition;
pub mod rules;


use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::codec::rules::{decode_rules, encode_rules};
use crate::model::{Flag, Rule, ValueType, Variant, VariantValue};

pub const STATE_ENABLED: &str = "ENABLED";
pub const STATE_DISABLED: &str = "DISABLED";

/// Variant targeted by the synthetic rule when the flag has no variants.
const FALLBACK_TARGET: &str = "true";

/// Encode a flag into its wire object, keyed by the flag key.
///
/// A flag with an empty key encodes to an empty object. `targeting` is only
/// emitted when targeting is enabled and there is at least one rule or a
/// default rule.
pub fn encode(flag: &Flag) -> Value {
    let mut document = Map::new();
    if flag.key.is_empty() {
        return Value::Object(document);
    }

    let mut body = Map::new();
    body.insert(
        "state".to_string(),
        Value::String(if flag.enabled { STATE_ENABLED } else { STATE_DISABLED }.to_string()),
    );
    body.insert(
        "variants".to_string(),
        Value::Object(encode_variants(flag.value_type, &flag.variants)),
    );
    body.insert(
        "defaultVariant".to_string(),
        Value::String(flag.default_variant_name.clone()),
    );

    if flag.targeting_enabled {
        let default_rule = flag
            .has_default_rule
            .then_some(flag.default_rule_variant.as_str());
        let if_array = encode_rules(&flag.rules, default_rule);
        if !if_array.is_empty() {
            let mut targeting = Map::new();
            targeting.insert("if".to_string(), Value::Array(if_array));
            body.insert("targeting".to_string(), Value::Object(targeting));
        }
    }

    tracing::debug!(
        flag = %flag.key,
        variants = flag.variants.len(),
        rules = flag.rules.len(),
        "Encoded flag"
    );

    document.insert(flag.key.clone(), Value::Object(body));
    Value::Object(document)
}

fn encode_variants(value_type: ValueType, variants: &[Variant]) -> Map<String, Value> {
    variants
        .iter()
        .map(|variant| (variant.name.clone(), encode_variant_value(value_type, &variant.value)))
        .collect()
}

/// Object-typed values are stored as JSON text; anything that does not parse
/// is emitted as an empty string.
fn encode_variant_value(value_type: ValueType, value: &VariantValue) -> Value {
    match value_type {
        ValueType::Object => serde_json::from_str(&value.to_text()).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "Object variant is not valid JSON, emitting empty string");
            Value::String(String::new())
        }),
        _ => value.to_json(),
    }
}

/// Decode a wire object into a flag.
///
/// Returns `None` when the input is not an object, has no keys, or the first
/// entry is not an object. Only the first flag in the document is read.
pub fn decode(wire: &Value) -> Option<Flag> {
    let (key, flag_data) = wire.as_object()?.iter().next()?;
    let flag_data = flag_data.as_object()?;

    let enabled = flag_data.get("state").and_then(Value::as_str) == Some(STATE_ENABLED);

    let empty = Map::new();
    let variants_map = flag_data
        .get("variants")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let value_type = infer_value_type(variants_map);
    let variants: Vec<Variant> = variants_map
        .iter()
        .map(|(name, value)| Variant::new(name.clone(), decode_variant_value(value_type, value)))
        .collect();
    let first_variant = variants.first().map(|v| v.name.clone());

    let default_variant_name = flag_data
        .get("defaultVariant")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let if_array = flag_data
        .get("targeting")
        .and_then(|targeting| targeting.get("if"))
        .and_then(Value::as_array)
        .filter(|if_array| !if_array.is_empty());
    let targeting_enabled = if_array.is_some();
    let rule_set = if_array.map(|a| decode_rules(a)).unwrap_or_default();

    let mut rules = rule_set.rules;
    if rules.is_empty() {
        rules.push(Rule::placeholder(
            first_variant.as_deref().unwrap_or(FALLBACK_TARGET),
        ));
    }
    let default_rule_variant = if rule_set.has_default_rule {
        rule_set.default_rule_variant
    } else {
        first_variant.unwrap_or_default()
    };

    tracing::debug!(
        flag = %key,
        value_type = %value_type,
        variants = variants.len(),
        rules = rules.len(),
        targeting = targeting_enabled,
        "Decoded flag"
    );

    Some(Flag {
        key: key.clone(),
        enabled,
        value_type,
        variants,
        default_variant_name,
        targeting_enabled,
        rules,
        has_default_rule: rule_set.has_default_rule,
        default_rule_variant,
    })
}

/// Infer the value type from the first variant only. Arrays count as objects.
/// No variants means `string`.
pub fn infer_value_type(variants: &Map<String, Value>) -> ValueType {
    match variants.values().next() {
        Some(Value::Bool(_)) => ValueType::Boolean,
        Some(Value::Number(_)) => ValueType::Number,
        Some(Value::Object(_) | Value::Array(_)) => ValueType::Object,
        _ => ValueType::String,
    }
}

fn decode_variant_value(value_type: ValueType, value: &Value) -> VariantValue {
    match value_type {
        ValueType::Object => VariantValue::Text(value.to_string()),
        _ => VariantValue::from_wire(value),
    }
}

/// Pretty-print wire JSON with `indent` spaces per level.
pub fn to_pretty_json(value: &Value, indent: usize) -> String {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}
