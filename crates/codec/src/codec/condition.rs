/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Encoding and decoding of a single targeting condition to and from its
 * JsonLogic expression.
 */

use serde_json::{Map, Number, Value};

use crate::model::{Condition, Operator, SemVerComparison, ValueShape};

/// Separator between elements of a list value in the model.
pub const LIST_SEPARATOR: &str = ", ";

const NEGATION_KEY: &str = "!";
const VAR_KEY: &str = "var";

/// Result of decoding a condition node.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedCondition {
    Recognized(Condition),
    /// The node is not a supported expression. Carries the original node.
    Unrecognized(Value),
}

impl DecodedCondition {
    /// The decoded condition, or the placeholder when the node was not recognized.
    pub fn into_condition(self) -> Condition {
        match self {
            DecodedCondition::Recognized(condition) => condition,
            DecodedCondition::Unrecognized(_) => Condition::placeholder(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, DecodedCondition::Recognized(_))
    }
}

/// Encode a condition into its JsonLogic expression.
pub fn encode_condition(condition: &Condition) -> Value {
    let expression = encode_expression(condition);
    if condition.operator.is_negated() {
        single_key(NEGATION_KEY, expression)
    } else {
        expression
    }
}

/// The un-negated expression: `{ <key>: [ {"var": attr}, ... ] }`.
fn encode_expression(condition: &Condition) -> Value {
    let operator = condition.operator;
    let mut operands = Vec::with_capacity(operator.arity());
    operands.push(single_key(
        VAR_KEY,
        Value::String(condition.attribute_name.clone()),
    ));

    match operator.value_shape() {
        ValueShape::Version => {
            operands.push(Value::String(condition.sub_operator.as_str().to_string()));
            operands.push(Value::String(condition.value.clone()));
        }
        ValueShape::List => operands.push(Value::Array(
            split_list(&condition.value)
                .into_iter()
                .map(Value::String)
                .collect(),
        )),
        ValueShape::Numeric => operands.push(coerce_numeric(&condition.value)),
        ValueShape::Text => operands.push(Value::String(condition.value.clone())),
    }

    single_key(operator.wire_key(), Value::Array(operands))
}

/// Split a list value on `", "`, trimming elements and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join list elements into the model's list value.
pub fn join_list(items: &[Value]) -> String {
    items
        .iter()
        .map(render_operand)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Numeric comparison values are emitted as JSON numbers when the text is
/// exactly the canonical rendering of a number, so decoding gives back the
/// same text. Anything else stays a string.
fn coerce_numeric(value: &str) -> Value {
    match serde_json::from_str::<Number>(value) {
        Ok(number) if number.to_string() == value => Value::Number(number),
        _ => Value::String(value.to_string()),
    }
}

/// Decode a JsonLogic node into a condition.
///
/// Never fails: anything outside the supported operator set comes back as
/// [`DecodedCondition::Unrecognized`] holding the original node.
pub fn decode_condition(node: &Value) -> DecodedCondition {
    let decoded = sole_entry(node).and_then(|(key, operands)| {
        if key == NEGATION_KEY {
            let (inner_key, inner_operands) = sole_entry(operands)?;
            decode_expression(inner_key, inner_operands)
                .and_then(negate)
        } else {
            decode_expression(key, operands)
        }
    });

    match decoded {
        Some(condition) => DecodedCondition::Recognized(condition),
        None => DecodedCondition::Unrecognized(node.clone()),
    }
}

fn negate(mut condition: Condition) -> Option<Condition> {
    condition.operator = condition.operator.negated()?;
    Some(condition)
}

fn decode_expression(key: &str, operands: &Value) -> Option<Condition> {
    let operands = operands.as_array().filter(|ops| !ops.is_empty())?;
    let attribute_name = attribute_of(&operands[0]);

    let condition = match key {
        "sem_ver" => {
            let comparison: SemVerComparison = match operands.get(1) {
                None | Some(Value::Null) => SemVerComparison::default(),
                Some(Value::String(s)) if s.is_empty() => SemVerComparison::default(),
                Some(value) => value.as_str()?.parse().ok()?,
            };
            Condition::sem_ver(
                attribute_name,
                comparison,
                operands.get(2).map(render_operand).unwrap_or_default(),
            )
        }
        "in" => match operands.get(1) {
            Some(Value::Array(items)) => {
                Condition::new(attribute_name, Operator::InList, join_list(items))
            }
            other => Condition::new(
                attribute_name,
                Operator::InString,
                other.map(render_operand).unwrap_or_default(),
            ),
        },
        _ => Condition::new(
            attribute_name,
            Operator::from_wire_key(key)?,
            operands.get(1).map(render_operand).unwrap_or_default(),
        ),
    };

    Some(condition)
}

/// Attribute name of a `{"var": ...}` operand. The array form
/// `{"var": [name, fallback]}` names the attribute in its first element.
fn attribute_of(operand: &Value) -> String {
    let var = match operand.get(VAR_KEY) {
        Some(Value::Array(items)) => items.first(),
        other => other,
    };
    var.and_then(Value::as_str).unwrap_or_default().to_string()
}

/// Text form of an operand: strings verbatim, null as empty, anything else as JSON.
pub fn render_operand(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn sole_entry(node: &Value) -> Option<(&str, &Value)> {
    let object = node.as_object()?;
    if object.len() != 1 {
        return None;
    }
    object.iter().next().map(|(k, v)| (k.as_str(), v))
}

fn single_key(key: &str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), value);
    Value::Object(map)
}
