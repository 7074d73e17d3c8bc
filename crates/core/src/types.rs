//! Enumerations and value carriers shared by the field spec and the engine.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Invariant rendering of a parsed date (`MM/dd/yyyy HH:mm:ss`).
pub const INVARIANT_DATE_DISPLAY: &str = "%m/%d/%Y %H:%M:%S";

/// Which structural check a field applies to textual input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatType {
    #[default]
    #[serde(alias = "None")]
    None,
    #[serde(alias = "Date")]
    Date,
    #[serde(alias = "Number")]
    Number,
    #[serde(alias = "Regex")]
    Regex,
}

impl FormatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Date => "date",
            Self::Number => "number",
            Self::Regex => "regex",
        }
    }
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fallback policy when a value fails its number, regex or email check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidAction {
    /// Replace the invalid value with an empty string.
    #[default]
    #[serde(alias = "Empty")]
    Empty,
    /// Keep the invalid value as it was given.
    #[serde(alias = "Ignore")]
    Ignore,
    /// Fail the call.
    #[serde(alias = "Reject")]
    Reject,
}

impl InvalidAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Ignore => "ignore",
            Self::Reject => "reject",
        }
    }
}

impl std::fmt::Display for InvalidAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw column value handed to the engine.
///
/// Only `Text` takes part in format and length validation; `Other` is
/// checked for emptiness and otherwise passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Text(String),
    Other(Value),
}

impl FieldInput {
    /// Textual form used by the required / empty checks.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Other(v) => stringify_value(v),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for FieldInput {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

/// JSON strings are text; every other JSON value is opaque.
impl From<Value> for FieldInput {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            other => Self::Other(other),
        }
    }
}

fn stringify_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The normalized result of a validation call.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A non-required field received no value.
    Empty,
    Text(String),
    Date(NaiveDateTime),
    /// Non-textual input, returned as received.
    Other(Value),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format(INVARIANT_DATE_DISPLAY)),
            Self::Other(v) => f.write_str(&stringify_value(v)),
        }
    }
}
