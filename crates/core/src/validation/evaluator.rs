//! Field evaluator: pure logic, no I/O.

use super::format::{apply_date_validation, apply_number_validation_with, apply_regex_validation};
use crate::culture::{BuiltinCultures, NumberCulture};
use crate::error::ValidationError;
use crate::field::FieldSpec;
use crate::types::{FieldInput, FieldValue, FormatType};

/// Validate one raw value against one field spec.
///
/// Order: required check, empty short-circuit, format check (text input
/// only), then length enforcement on the formatted result.
pub fn validate(
    spec: &FieldSpec,
    value: impl Into<FieldInput>,
) -> Result<FieldValue, ValidationError> {
    validate_with(spec, value, &BuiltinCultures)
}

/// [`validate`] with a caller-supplied culture provider for number fields.
pub fn validate_with(
    spec: &FieldSpec,
    value: impl Into<FieldInput>,
    cultures: &dyn NumberCulture,
) -> Result<FieldValue, ValidationError> {
    let input = value.into();

    if input.to_text().is_empty() {
        if spec.required {
            return Err(ValidationError::RequiredField {
                target_column: spec.target_column.clone(),
                source_column: spec.source_column.clone(),
            });
        }
        return Ok(FieldValue::Empty);
    }

    // Non-textual values are not format- or length-checked.
    let text = match input {
        FieldInput::Text(text) => text,
        FieldInput::Other(value) => return Ok(FieldValue::Other(value)),
    };

    tracing::trace!(
        target_column = %spec.target_column,
        format_type = %spec.format_type,
        "Validating field"
    );

    let formatted = match spec.format_type {
        FormatType::Date => FieldValue::Date(apply_date_validation(spec, &text)?),
        FormatType::Regex => FieldValue::Text(apply_regex_validation(spec, &text)?),
        FormatType::Number => {
            FieldValue::Text(apply_number_validation_with(spec, &text, cultures)?)
        }
        FormatType::None => FieldValue::Text(text),
    };

    enforce_max_length(spec, formatted)
}

/// Truncate or reject `value` when it is longer than the field allows.
///
/// Length is counted in characters. Limits of `1` or less are not enforced.
pub fn apply_max_length_validation(
    spec: &FieldSpec,
    value: &str,
) -> Result<String, ValidationError> {
    let Some(max_length) = spec.effective_max_length() else {
        return Ok(value.to_string());
    };
    if value.chars().count() <= max_length {
        return Ok(value.to_string());
    }

    if spec.truncate_on_exceeded {
        Ok(value.chars().take(max_length).collect())
    } else {
        Err(ValidationError::MaxLengthExceeded {
            value: value.to_string(),
            column: spec.target_column.clone(),
            max_length,
        })
    }
}

/// Dates are measured by their rendered form and only become text when
/// truncated.
fn enforce_max_length(spec: &FieldSpec, value: FieldValue) -> Result<FieldValue, ValidationError> {
    match value {
        FieldValue::Text(text) => apply_max_length_validation(spec, &text).map(FieldValue::Text),
        FieldValue::Date(date) => {
            let rendered = FieldValue::Date(date).to_string();
            let checked = apply_max_length_validation(spec, &rendered)?;
            if checked == rendered {
                Ok(FieldValue::Date(date))
            } else {
                Ok(FieldValue::Text(checked))
            }
        }
        other => Ok(other),
    }
}
