/// Configuration-level failures (loading or checking a column mapping).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// A value-level failure raised by the validation engine.
///
/// Every variant is terminal: the same value validated against the same
/// field spec will fail the same way again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("SourceColumn \"{source_column}\" violates REQUIRED property of TargetColumn \"{target_column}\".")]
    RequiredField {
        target_column: String,
        source_column: String,
    },

    #[error("No date format specified for targetColumn \"{target_column}\". Check ColumnMapper to change the format.")]
    NullDateFormat { target_column: String },

    #[error("Date format \"{pattern}\" cannot be parsed for target column \"{target_column}\". Date Value : \"{value}\". Exception Message: {message}")]
    InvalidDateFormat {
        target_column: String,
        pattern: String,
        value: String,
        message: String,
    },

    #[error("Value \"{value}\" does not match regex \"{pattern}\"")]
    RegexMismatch { value: String, pattern: String },

    #[error("Cannot convert number : \"{value}\" to number for target column \"{target_column}\". Exception Message: {message}")]
    InvalidNumberFormat {
        target_column: String,
        value: String,
        message: String,
    },

    #[error("Value \"{value}\" reached maximum length of column:{column} maxLength={max_length}, providedLength={}", .value.chars().count())]
    MaxLengthExceeded {
        value: String,
        column: String,
        max_length: usize,
    },

    /// The configured regex does not compile.
    #[error("Regex \"{pattern}\" is not a valid pattern: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The configured culture is not known to the culture provider.
    #[error("Culture \"{culture}\" is not supported")]
    UnsupportedCulture { culture: String },
}

impl ValidationError {
    /// Stable snake_case name of the failure, for grouping rejected rows.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RequiredField { .. } => "required_field",
            Self::NullDateFormat { .. } => "null_date_format",
            Self::InvalidDateFormat { .. } => "invalid_date_format",
            Self::RegexMismatch { .. } => "regex_mismatch",
            Self::InvalidNumberFormat { .. } => "invalid_number_format",
            Self::MaxLengthExceeded { .. } => "max_length_exceeded",
            Self::InvalidPattern { .. } => "invalid_pattern",
            Self::UnsupportedCulture { .. } => "unsupported_culture",
        }
    }
}
