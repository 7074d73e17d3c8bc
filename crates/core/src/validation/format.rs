//! Format checks: date, regex, number and email.
//!
//! Each `apply_*` function is usable on its own; [`super::evaluator::validate`]
//! dispatches to them according to the field's format type.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use rust_decimal::Decimal;

use super::outcome::FormatOutcome;
use crate::culture::{BuiltinCultures, CultureError, NumberCulture};
use crate::date_format::parse_exact;
use crate::error::ValidationError;
use crate::field::FieldSpec;
use crate::number::{normalize_separators, parse_decimal, NumberStyle, INVARIANT_SYMBOLS};
use crate::types::InvalidAction;

/// Built-in pattern used by [`validate_email`].
pub const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

const NUMBER_FAILURE_MESSAGE: &str = "Value not convertible to number.";

/// Parse `value` exactly against the field's date pattern.
///
/// Failures are always returned as errors; the invalid-data action does
/// not apply to dates.
pub fn apply_date_validation(
    spec: &FieldSpec,
    value: &str,
) -> Result<NaiveDateTime, ValidationError> {
    if spec.format_pattern.is_empty() {
        return Err(ValidationError::NullDateFormat {
            target_column: spec.target_column.clone(),
        });
    }

    parse_exact(value, &spec.format_pattern).map_err(|e| ValidationError::InvalidDateFormat {
        target_column: spec.target_column.clone(),
        pattern: spec.format_pattern.clone(),
        value: value.to_string(),
        message: e.to_string(),
    })
}

/// Check `value` against the field's regex (unanchored) and apply the
/// invalid-data action on a miss.
pub fn apply_regex_validation(spec: &FieldSpec, value: &str) -> Result<String, ValidationError> {
    let outcome = check_regex(spec, value)?;
    apply_invalid_action(spec, outcome, value)
}

/// Number check using the built-in culture table.
pub fn apply_number_validation(spec: &FieldSpec, value: &str) -> Result<String, ValidationError> {
    apply_number_validation_with(spec, value, &BuiltinCultures)
}

/// Number check with a caller-supplied culture provider.
pub fn apply_number_validation_with(
    spec: &FieldSpec,
    value: &str,
    cultures: &dyn NumberCulture,
) -> Result<String, ValidationError> {
    let outcome = check_number(spec, value, cultures);
    apply_invalid_action(spec, outcome, value)
}

/// Check `value` against [`EMAIL_PATTERN`] and apply the invalid-data action.
pub fn validate_email(spec: &FieldSpec, value: &str) -> Result<String, ValidationError> {
    let outcome = if EMAIL_RE.is_match(value) {
        FormatOutcome::Valid(value.to_string())
    } else {
        FormatOutcome::Invalid(ValidationError::RegexMismatch {
            value: value.to_string(),
            pattern: EMAIL_PATTERN.to_string(),
        })
    };
    apply_invalid_action(spec, outcome, value)
}

/// A pattern that does not compile is a configuration error and is
/// returned directly, whatever the invalid-data action.
pub fn check_regex(spec: &FieldSpec, value: &str) -> Result<FormatOutcome, ValidationError> {
    let re = Regex::new(&spec.format_pattern).map_err(|e| ValidationError::InvalidPattern {
        pattern: spec.format_pattern.clone(),
        message: e.to_string(),
    })?;

    if re.is_match(value) {
        Ok(FormatOutcome::Valid(value.to_string()))
    } else {
        Ok(FormatOutcome::Invalid(ValidationError::RegexMismatch {
            value: value.to_string(),
            pattern: spec.format_pattern.clone(),
        }))
    }
}

/// Culture path: a value the culture cannot parse becomes `"0"` and is
/// reported valid. Separator path: the normalised text is kept as-is.
pub fn check_number(spec: &FieldSpec, value: &str, cultures: &dyn NumberCulture) -> FormatOutcome {
    if let Some(culture) = spec.culture() {
        return match cultures.parse_decimal(value, culture) {
            Ok(number) => FormatOutcome::Valid(number.to_string()),
            Err(CultureError::Unparseable { .. }) => {
                tracing::debug!(
                    target_column = %spec.target_column,
                    culture,
                    "Unparseable number under culture, substituting zero"
                );
                FormatOutcome::Valid(Decimal::ZERO.to_string())
            }
            Err(CultureError::Unsupported(culture)) => {
                FormatOutcome::Invalid(ValidationError::UnsupportedCulture { culture })
            }
        };
    }

    let normalized =
        normalize_separators(value, spec.thousands_separator(), spec.decimal_separator());
    match parse_decimal(&normalized, &INVARIANT_SYMBOLS, NumberStyle::Number) {
        Some(_) => FormatOutcome::Valid(normalized),
        None => FormatOutcome::Invalid(ValidationError::InvalidNumberFormat {
            target_column: spec.target_column.clone(),
            value: value.to_string(),
            message: NUMBER_FAILURE_MESSAGE.to_string(),
        }),
    }
}

fn apply_invalid_action(
    spec: &FieldSpec,
    outcome: FormatOutcome,
    raw: &str,
) -> Result<String, ValidationError> {
    match &outcome {
        FormatOutcome::Invalid(err) if spec.invalid_action != InvalidAction::Reject => {
            tracing::debug!(
                target_column = %spec.target_column,
                action = %spec.invalid_action,
                error = %err,
                "Invalid value replaced by fallback"
            );
        }
        _ => {}
    }
    spec.invalid_action.resolve(outcome, raw)
}
