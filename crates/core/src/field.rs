//! Per-column validation and formatting rules.

use serde::{Deserialize, Serialize};

use crate::types::{FormatType, InvalidAction};

/// Declarative rules for one source → target column pair.
///
/// Built once by the caller (usually from a [`ColumnMapping`](crate::mapping::ColumnMapping))
/// and only ever read by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSpec {
    // Column information
    #[serde(alias = "sourceColumn")]
    pub source_column: String,
    #[serde(alias = "targetColumn")]
    pub target_column: String,
    /// `None` or anything `<= 1` disables the length check.
    #[serde(alias = "targetMaxLength", alias = "targetColumnMaxLength")]
    pub target_max_length: Option<usize>,
    #[serde(alias = "truncateOnExceeded", alias = "truncateMaxLengthExceededColumn")]
    pub truncate_on_exceeded: bool,

    // Validation and formatting
    pub required: bool,
    #[serde(alias = "formatType", alias = "dataFormatType")]
    pub format_type: FormatType,
    /// Date pattern or regex, depending on `format_type`.
    #[serde(alias = "formatPattern", alias = "generalFormat")]
    pub format_pattern: String,
    #[serde(alias = "invalidAction", alias = "invalidDataAction")]
    pub invalid_action: InvalidAction,

    // Culture and separators
    /// Takes priority over the explicit separators when non-empty.
    pub culture: Option<String>,
    #[serde(alias = "thousandsSeparator")]
    pub thousands_separator: Option<String>,
    #[serde(alias = "decimalSeparator")]
    pub decimal_separator: Option<String>,
}

impl FieldSpec {
    pub fn new(source_column: impl Into<String>, target_column: impl Into<String>) -> Self {
        Self {
            source_column: source_column.into(),
            target_column: target_column.into(),
            ..Self::default()
        }
    }

    /// The culture identifier, if one is configured and non-empty.
    pub fn culture(&self) -> Option<&str> {
        self.culture.as_deref().filter(|c| !c.is_empty())
    }

    /// The length limit that is actually enforced.
    pub fn effective_max_length(&self) -> Option<usize> {
        self.target_max_length.filter(|&max| max > 1)
    }

    pub(crate) fn thousands_separator(&self) -> Option<&str> {
        self.thousands_separator.as_deref().filter(|s| !s.is_empty())
    }

    pub(crate) fn decimal_separator(&self) -> Option<&str> {
        self.decimal_separator.as_deref().filter(|s| !s.is_empty())
    }
}
