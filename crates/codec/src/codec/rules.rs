/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Encoding and decoding of the ordered rule list to and from the flat `if` array:
 * `condition, target, condition, target, ..., [default]`.
 */

use serde_json::Value;

use crate::codec::condition::{decode_condition, encode_condition, render_operand, DecodedCondition};
use crate::model::Rule;

/// Rules decoded from an `if` array, plus the optional trailing default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
    pub has_default_rule: bool,
    pub default_rule_variant: String,
}

/// Flatten rules into the `if` array, appending `default_rule` as a bare target.
pub fn encode_rules(rules: &[Rule], default_rule: Option<&str>) -> Vec<Value> {
    let mut if_array = Vec::with_capacity(rules.len() * 2 + usize::from(default_rule.is_some()));
    for rule in rules {
        if_array.push(encode_condition(&rule.condition));
        if_array.push(Value::String(rule.target_variant_name.clone()));
    }
    if let Some(default_rule) = default_rule {
        if_array.push(Value::String(default_rule.to_string()));
    }
    if_array
}

/// Split an `if` array back into rules. The last element is only read as a
/// default when the array length is odd.
pub fn decode_rules(if_array: &[Value]) -> RuleSet {
    let has_default_rule = if_array.len() % 2 == 1;
    let pair_count = if has_default_rule {
        if_array.len() - 1
    } else {
        if_array.len()
    };

    let rules = if_array[..pair_count]
        .chunks_exact(2)
        .map(|pair| decode_rule(&pair[0], &pair[1]))
        .collect();

    let default_rule_variant = if has_default_rule {
        if_array.last().map(render_operand).unwrap_or_default()
    } else {
        String::new()
    };

    RuleSet {
        rules,
        has_default_rule,
        default_rule_variant,
    }
}

fn decode_rule(condition: &Value, target: &Value) -> Rule {
    let target_variant_name = render_operand(target);
    match decode_condition(condition) {
        DecodedCondition::Recognized(condition) => Rule::new(condition, target_variant_name),
        DecodedCondition::Unrecognized(raw) => {
            tracing::warn!(
                condition = %raw,
                target = %target_variant_name,
                "Unrecognized targeting condition, substituting placeholder"
            );
            let mut rule = Rule::placeholder(target_variant_name);
            rule.unrecognized = Some(raw);
            rule
        }
    }
}
