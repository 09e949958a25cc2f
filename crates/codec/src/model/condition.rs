/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Targeting conditions and the closed operator set they are built from.
 */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Shape of the value a condition compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// Single string kept verbatim.
    Text,
    /// Single value emitted as a JSON number when the text is a canonical number.
    Numeric,
    /// Comma-space separated text, emitted as a JSON array.
    List,
    /// Semantic version text, paired with a [`SemVerComparison`].
    Version,
}

/// Operators a targeting condition can use.
///
/// The model names differ from the JsonLogic keys for the membership
/// operators: `in_list`/`in_string` both encode to `in`, and the `not_`
/// variants wrap that in `!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "ends_with")]
    EndsWith,
    #[serde(rename = "starts_with")]
    StartsWith,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "===")]
    StrictEqual,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "!==")]
    StrictNotEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "in_list")]
    InList,
    #[serde(rename = "in_string")]
    InString,
    #[serde(rename = "not_in_list")]
    NotInList,
    #[serde(rename = "not_in_string")]
    NotInString,
    #[serde(rename = "sem_ver")]
    SemVer,
}

impl Operator {
    pub const ALL: [Operator; 15] = [
        Operator::EndsWith,
        Operator::StartsWith,
        Operator::Equal,
        Operator::StrictEqual,
        Operator::NotEqual,
        Operator::StrictNotEqual,
        Operator::GreaterThan,
        Operator::GreaterOrEqual,
        Operator::LessThan,
        Operator::LessOrEqual,
        Operator::InList,
        Operator::InString,
        Operator::NotInList,
        Operator::NotInString,
        Operator::SemVer,
    ];

    /// Name used by the editing model.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::EndsWith => "ends_with",
            Operator::StartsWith => "starts_with",
            Operator::Equal => "==",
            Operator::StrictEqual => "===",
            Operator::NotEqual => "!=",
            Operator::StrictNotEqual => "!==",
            Operator::GreaterThan => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessOrEqual => "<=",
            Operator::InList => "in_list",
            Operator::InString => "in_string",
            Operator::NotInList => "not_in_list",
            Operator::NotInString => "not_in_string",
            Operator::SemVer => "sem_ver",
        }
    }

    /// JsonLogic key of the (innermost) expression this operator encodes to.
    pub fn wire_key(self) -> &'static str {
        match self {
            Operator::InList | Operator::InString | Operator::NotInList | Operator::NotInString => {
                "in"
            }
            other => other.as_str(),
        }
    }

    /// Number of operands in the encoded expression, including the `var` operand.
    pub fn arity(self) -> usize {
        match self {
            Operator::SemVer => 3,
            _ => 2,
        }
    }

    pub fn value_shape(self) -> ValueShape {
        match self {
            Operator::EndsWith
            | Operator::StartsWith
            | Operator::Equal
            | Operator::StrictEqual
            | Operator::NotEqual
            | Operator::StrictNotEqual
            | Operator::InString
            | Operator::NotInString => ValueShape::Text,
            Operator::GreaterThan
            | Operator::GreaterOrEqual
            | Operator::LessThan
            | Operator::LessOrEqual => ValueShape::Numeric,
            Operator::InList | Operator::NotInList => ValueShape::List,
            Operator::SemVer => ValueShape::Version,
        }
    }

    /// Whether the encoded expression is wrapped in `!`.
    pub fn is_negated(self) -> bool {
        matches!(self, Operator::NotInList | Operator::NotInString)
    }

    /// The negated form of a membership operator. Only `in` supports negation.
    pub fn negated(self) -> Option<Operator> {
        match self {
            Operator::InList => Some(Operator::NotInList),
            Operator::InString => Some(Operator::NotInString),
            _ => None,
        }
    }

    /// Operator for a JsonLogic key whose operands map one-to-one onto the model.
    ///
    /// `in` is not resolved here because its model operator depends on the
    /// shape of the second operand.
    pub fn from_wire_key(key: &str) -> Option<Operator> {
        key.parse::<Operator>()
            .ok()
            .filter(|op| op.wire_key() == key)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("Unknown operator: '{s}'"))
    }
}

/// Comparison applied by the `sem_ver` operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SemVerComparison {
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[default]
    #[serde(rename = ">=")]
    GreaterOrEqual,
}

impl SemVerComparison {
    pub const ALL: [SemVerComparison; 6] = [
        SemVerComparison::Equal,
        SemVerComparison::NotEqual,
        SemVerComparison::LessThan,
        SemVerComparison::LessOrEqual,
        SemVerComparison::GreaterThan,
        SemVerComparison::GreaterOrEqual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SemVerComparison::Equal => "=",
            SemVerComparison::NotEqual => "!=",
            SemVerComparison::LessThan => "<",
            SemVerComparison::LessOrEqual => "<=",
            SemVerComparison::GreaterThan => ">",
            SemVerComparison::GreaterOrEqual => ">=",
        }
    }
}

impl fmt::Display for SemVerComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemVerComparison {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemVerComparison::ALL
            .iter()
            .copied()
            .find(|cmp| cmp.as_str() == s)
            .ok_or_else(|| format!("Unknown sem_ver comparison: '{s}'"))
    }
}

/// A single comparison over a request attribute.
///
/// `sub_operator` is only read for [`Operator::SemVer`], and equality ignores
/// it for every other operator. For the list operators `value` holds the
/// elements joined with `", "`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default)]
    pub attribute_name: String,
    pub operator: Operator,
    #[serde(default)]
    pub sub_operator: SemVerComparison,
    #[serde(default)]
    pub value: String,
}

impl Condition {
    pub fn new(attribute_name: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            operator,
            sub_operator: SemVerComparison::default(),
            value: value.into(),
        }
    }

    pub fn sem_ver(
        attribute_name: impl Into<String>,
        comparison: SemVerComparison,
        version: impl Into<String>,
    ) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            operator: Operator::SemVer,
            sub_operator: comparison,
            value: version.into(),
        }
    }

    /// Stand-in used for fresh rule rows and for conditions that could not be decoded.
    pub fn placeholder() -> Self {
        Self::new("", Operator::EndsWith, "")
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        self.attribute_name == other.attribute_name
            && self.operator == other.operator
            && self.value == other.value
            && (self.operator != Operator::SemVer || self.sub_operator == other.sub_operator)
    }
}

impl Eq for Condition {}

impl Default for Condition {
    fn default() -> Self {
        Self::placeholder()
    }
}
