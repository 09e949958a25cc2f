/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Editable in-memory model of a single flagd flag.
 * The codecs read and produce this model; an editing session mutates it field by field.
 */

pub mod condition;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

pub use condition::{Condition, Operator, SemVerComparison, ValueShape};

/// Value type of a flag. Governs how variant values are interpreted and serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Boolean,
    String,
    Number,
    Object,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Boolean => "boolean",
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Object => "object",
        }
    }

    /// Variants and default variant name a flag starts with for this type.
    pub fn default_variants(self) -> (Vec<Variant>, String) {
        let variants = match self {
            ValueType::Boolean => vec![
                Variant::new("true", VariantValue::Bool(true)),
                Variant::new("false", VariantValue::Bool(false)),
            ],
            ValueType::String => vec![
                Variant::new("foo", VariantValue::Text("foo".to_string())),
                Variant::new("bar", VariantValue::Text("bar".to_string())),
            ],
            ValueType::Number => vec![
                Variant::new("1", VariantValue::Number(Number::from(1))),
                Variant::new("2", VariantValue::Number(Number::from(2))),
            ],
            ValueType::Object => vec![
                Variant::new("foo", VariantValue::Text(r#"{"foo":"foo"}"#.to_string())),
                Variant::new("bar", VariantValue::Text(r#"{"bar":"bar"}"#.to_string())),
            ],
        };
        let default_variant = match self {
            ValueType::Boolean => "false",
            ValueType::String | ValueType::Object => "foo",
            ValueType::Number => "1",
        };
        (variants, default_variant.to_string())
    }

    /// Value given to a newly added variant.
    pub fn zero_value(self) -> VariantValue {
        match self {
            ValueType::Boolean => VariantValue::Bool(false),
            ValueType::String => VariantValue::Text(String::new()),
            ValueType::Number => VariantValue::Number(Number::from(0)),
            ValueType::Object => VariantValue::Text("{}".to_string()),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "boolean" => Ok(ValueType::Boolean),
            "string" => Ok(ValueType::String),
            "number" => Ok(ValueType::Number),
            "object" => Ok(ValueType::Object),
            _ => Err(format!(
                "Unknown value type: '{s}'. Expected one of: boolean, string, number, object"
            )),
        }
    }
}

/// Raw value of a variant as held by the model.
///
/// Object-typed flags keep their values as JSON text in [`VariantValue::Text`];
/// they are only parsed back into structured JSON on encode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantValue {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl VariantValue {
    /// Model value for a wire value. Non-scalar values are kept as compact JSON text.
    pub fn from_wire(value: &Value) -> Self {
        match value {
            Value::Bool(b) => VariantValue::Bool(*b),
            Value::Number(n) => VariantValue::Number(n.clone()),
            Value::String(s) => VariantValue::Text(s.clone()),
            Value::Null => VariantValue::Text(String::new()),
            other => VariantValue::Text(other.to_string()),
        }
    }

    /// Text rendering, used for object-typed flags where the text is JSON.
    pub fn to_text(&self) -> String {
        match self {
            VariantValue::Bool(b) => b.to_string(),
            VariantValue::Number(n) => n.to_string(),
            VariantValue::Text(s) => s.clone(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            VariantValue::Bool(b) => Value::Bool(*b),
            VariantValue::Number(n) => Value::Number(n.clone()),
            VariantValue::Text(s) => Value::String(s.clone()),
        }
    }
}

/// One named possible value of a flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub value: VariantValue,
}

impl Variant {
    pub fn new(name: impl Into<String>, value: VariantValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A targeting rule: serve `target_variant_name` when `condition` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub condition: Condition,
    pub target_variant_name: String,
    /// Original JsonLogic node when the condition could not be decoded and
    /// `condition` holds the placeholder instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unrecognized: Option<Value>,
}

impl Rule {
    pub fn new(condition: Condition, target_variant_name: impl Into<String>) -> Self {
        Self {
            condition,
            target_variant_name: target_variant_name.into(),
            unrecognized: None,
        }
    }

    /// Rule row with the placeholder condition.
    pub fn placeholder(target_variant_name: impl Into<String>) -> Self {
        Self::new(Condition::placeholder(), target_variant_name)
    }
}

/// A flag definition being edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flag {
    pub key: String,
    pub enabled: bool,
    pub value_type: ValueType,
    pub variants: Vec<Variant>,
    pub default_variant_name: String,
    #[serde(default)]
    pub targeting_enabled: bool,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub has_default_rule: bool,
    #[serde(default)]
    pub default_rule_variant: String,
}

impl Flag {
    /// Fresh flag with the default variants for `value_type`.
    pub fn new(key: impl Into<String>, value_type: ValueType) -> Self {
        let (variants, default_variant_name) = value_type.default_variants();
        Self {
            key: key.into(),
            enabled: true,
            value_type,
            variants,
            default_rule_variant: default_variant_name.clone(),
            default_variant_name,
            targeting_enabled: false,
            rules: vec![Rule::placeholder("true")],
            has_default_rule: false,
        }
    }

    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.name.as_str())
    }

    /// Switch the value type, replacing variants and default with that type's defaults.
    pub fn set_value_type(&mut self, value_type: ValueType) {
        let (variants, default_variant_name) = value_type.default_variants();
        self.value_type = value_type;
        self.variants = variants;
        self.default_variant_name = default_variant_name;
    }

    /// Append an unnamed variant holding the type's zero value.
    pub fn add_variant(&mut self) {
        self.variants
            .push(Variant::new(String::new(), self.value_type.zero_value()));
    }

    pub fn set_variant_name(&mut self, index: usize, name: impl Into<String>) {
        if let Some(variant) = self.variants.get_mut(index) {
            variant.name = name.into();
            self.follow_single_variant();
        }
    }

    pub fn set_variant_value(&mut self, index: usize, value: VariantValue) {
        if let Some(variant) = self.variants.get_mut(index) {
            variant.value = value;
            self.follow_single_variant();
        }
    }

    /// Remove a variant. If it was the default, the first remaining variant becomes the default.
    pub fn remove_variant(&mut self, index: usize) {
        if index >= self.variants.len() {
            return;
        }
        let removed = self.variants.remove(index);
        if removed.name == self.default_variant_name {
            self.default_variant_name = self
                .variants
                .first()
                .map(|v| v.name.clone())
                .unwrap_or_default();
        }
    }

    pub fn add_rule(&mut self) {
        self.rules.push(Rule::placeholder("true"));
    }

    pub fn remove_rule(&mut self, index: usize) {
        if index < self.rules.len() {
            self.rules.remove(index);
        }
    }

    // a lone variant is always the default
    fn follow_single_variant(&mut self) {
        if let [only] = self.variants.as_slice() {
            self.default_variant_name = only.name.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_flag_defaults_per_type() {
        let flag = Flag::new("test-feature", ValueType::Boolean);
        assert!(flag.enabled);
        assert_eq!(flag.variant_names().collect::<Vec<_>>(), vec!["true", "false"]);
        assert_eq!(flag.default_variant_name, "false");
        assert_eq!(flag.default_rule_variant, "false");
        assert!(!flag.targeting_enabled);
        assert_eq!(flag.rules.len(), 1);
        assert!(flag.rules[0].condition.is_placeholder());
        assert_eq!(flag.rules[0].target_variant_name, "true");

        let flag = Flag::new("n", ValueType::Number);
        assert_eq!(flag.default_variant_name, "1");
        assert_eq!(flag.variants[1].value, VariantValue::Number(Number::from(2)));

        let flag = Flag::new("o", ValueType::Object);
        assert_eq!(flag.default_variant_name, "foo");
        assert_eq!(flag.variants[0].value, VariantValue::Text(r#"{"foo":"foo"}"#.to_string()));
    }

    #[test]
    fn test_set_value_type_resets_variants() {
        let mut flag = Flag::new("f", ValueType::Boolean);
        flag.set_value_type(ValueType::String);
        assert_eq!(flag.value_type, ValueType::String);
        assert_eq!(flag.variant_names().collect::<Vec<_>>(), vec!["foo", "bar"]);
        assert_eq!(flag.default_variant_name, "foo");
    }

    #[test]
    fn test_add_variant_uses_zero_value() {
        let mut flag = Flag::new("f", ValueType::Object);
        flag.add_variant();
        let added = flag.variants.last().unwrap();
        assert!(added.name.is_empty());
        assert_eq!(added.value, VariantValue::Text("{}".to_string()));

        let mut flag = Flag::new("f", ValueType::Number);
        flag.add_variant();
        assert_eq!(flag.variants[2].value, VariantValue::Number(Number::from(0)));
    }

    #[test]
    fn test_single_variant_becomes_default() {
        let mut flag = Flag::new("f", ValueType::Boolean);
        flag.remove_variant(0);
        flag.set_variant_name(0, "off");
        assert_eq!(flag.default_variant_name, "off");

        // with two variants the default is left alone
        flag.add_variant();
        flag.set_variant_name(1, "on");
        assert_eq!(flag.default_variant_name, "off");
    }

    #[test]
    fn test_remove_default_variant_moves_default() {
        let mut flag = Flag::new("f", ValueType::Boolean);
        flag.remove_variant(1);
        assert_eq!(flag.default_variant_name, "true");
        flag.remove_variant(0);
        assert_eq!(flag.default_variant_name, "");
        // out of range is ignored
        flag.remove_variant(5);
        assert!(flag.variants.is_empty());
    }

    #[test]
    fn test_add_and_remove_rules() {
        let mut flag = Flag::new("f", ValueType::Boolean);
        flag.add_rule();
        assert_eq!(flag.rules.len(), 2);
        flag.remove_rule(0);
        flag.remove_rule(9);
        assert_eq!(flag.rules.len(), 1);
    }

    #[test]
    fn test_variant_value_from_wire() {
        assert_eq!(VariantValue::from_wire(&json!(true)), VariantValue::Bool(true));
        assert_eq!(VariantValue::from_wire(&json!("x")), VariantValue::Text("x".to_string()));
        assert_eq!(VariantValue::from_wire(&json!(null)), VariantValue::Text(String::new()));
        assert_eq!(
            VariantValue::from_wire(&json!({"a": 1})),
            VariantValue::Text(r#"{"a":1}"#.to_string())
        );
    }

    #[test]
    fn test_flag_model_json_shape() {
        let flag = Flag::new("my-flag", ValueType::Boolean);
        let json = serde_json::to_value(&flag).unwrap();
        assert_eq!(json["key"], "my-flag");
        assert_eq!(json["valueType"], "boolean");
        assert_eq!(json["defaultVariantName"], "false");
        assert_eq!(json["variants"][0]["value"], true);
        assert!(json["rules"][0].get("unrecognized").is_none());

        let back: Flag = serde_json::from_value(json).unwrap();
        assert_eq!(back, flag);
    }

    #[test]
    fn test_value_type_from_str() {
        assert_eq!("Object".parse::<ValueType>().unwrap(), ValueType::Object);
        assert!("list".parse::<ValueType>().is_err());
    }
}
