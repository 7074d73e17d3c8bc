//! Integration tests for single-field validation through the public API.
//!
//! Covers the import scenarios column mappers rely on: exact dates,
//! culture and separator numbers, regex fallbacks and truncation.

use assert_matches::assert_matches;
use fieldval_core::{
    validate, ColumnMapping, FieldSpec, FieldValue, FormatType, InvalidAction, ValidationError,
};

fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// A compact date does not satisfy a dashed pattern, whatever the policy.
#[test]
fn date_is_parsed_exactly() {
    for action in [InvalidAction::Empty, InvalidAction::Ignore, InvalidAction::Reject] {
        let spec = FieldSpec {
            format_type: FormatType::Date,
            invalid_action: action,
            format_pattern: "yyyy-MM-dd".to_string(),
            ..FieldSpec::default()
        };
        assert_matches!(
            validate(&spec, "20240101"),
            Err(ValidationError::InvalidDateFormat { .. })
        );
    }
}

#[test]
fn date_without_pattern_fails_outright() {
    let spec = FieldSpec {
        format_type: FormatType::Date,
        invalid_action: InvalidAction::Ignore,
        ..FieldSpec::new("BORN", "born")
    };
    assert_matches!(
        validate(&spec, "2024-01-01"),
        Err(ValidationError::NullDateFormat { target_column }) if target_column == "born"
    );
}

#[test]
fn valid_date_is_returned_as_date() {
    let spec = FieldSpec {
        format_type: FormatType::Date,
        format_pattern: "dd/MM/yyyy HH:mm".to_string(),
        ..FieldSpec::default()
    };
    let value = validate(&spec, "31/12/2023 23:59").expect("valid date");
    assert_eq!(value.to_string(), "12/31/2023 23:59:00");
    assert!(value.as_date().is_some());
}

/// A time-only value whose offset crosses midnight stays on the default day.
#[test]
fn time_only_value_with_offset_is_accepted() {
    let spec = FieldSpec {
        format_type: FormatType::Date,
        invalid_action: InvalidAction::Reject,
        format_pattern: "HH:mmzzz".to_string(),
        ..FieldSpec::default()
    };
    let value = validate(&spec, "00:30+01:00").expect("valid time");
    assert_eq!(value.to_string(), "01/01/0001 23:30:00");
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

#[test]
fn decimal_with_culture() {
    let mut spec = FieldSpec {
        format_type: FormatType::Number,
        invalid_action: InvalidAction::Reject,
        culture: Some("en-US".to_string()),
        ..FieldSpec::default()
    };
    assert_eq!(validate(&spec, "1.65"), Ok(text("1.65")));

    spec.culture = Some("fr-FR".to_string());
    assert_eq!(validate(&spec, "1,650"), Ok(text("1.650")));
}

#[test]
fn decimal_with_period_separator() {
    let spec = FieldSpec {
        format_type: FormatType::Number,
        invalid_action: InvalidAction::Reject,
        thousands_separator: Some(String::new()),
        decimal_separator: Some(".".to_string()),
        ..FieldSpec::default()
    };
    assert_eq!(validate(&spec, "0.0"), Ok(text("0.0")));
}

#[test]
fn decimal_with_comma_separator_rejects_garbage() {
    let spec = FieldSpec {
        format_type: FormatType::Number,
        invalid_action: InvalidAction::Reject,
        thousands_separator: Some(String::new()),
        decimal_separator: Some(",".to_string()),
        ..FieldSpec::default()
    };
    assert_matches!(
        validate(&spec, "1,65AWERTY"),
        Err(ValidationError::InvalidNumberFormat { value, .. }) if value == "1,65AWERTY"
    );
}

#[test]
fn decimal_with_comma_separator_ignores_garbage() {
    let spec = FieldSpec {
        format_type: FormatType::Number,
        invalid_action: InvalidAction::Ignore,
        thousands_separator: Some(String::new()),
        decimal_separator: Some(",".to_string()),
        ..FieldSpec::default()
    };
    assert_eq!(validate(&spec, "1,65AWERTY"), Ok(text("1,65AWERTY")));
}

/// Culture parsing never consults the invalid-data action on a bad value.
#[test]
fn culture_parse_failure_yields_zero() {
    let spec = FieldSpec {
        format_type: FormatType::Number,
        invalid_action: InvalidAction::Reject,
        culture: Some("de-DE".to_string()),
        ..FieldSpec::default()
    };
    assert_eq!(validate(&spec, "zwölf"), Ok(text("0")));
}

// ---------------------------------------------------------------------------
// Regex
// ---------------------------------------------------------------------------

fn placeholder_spec(action: InvalidAction) -> FieldSpec {
    FieldSpec {
        invalid_action: action,
        format_type: FormatType::Regex,
        format_pattern: r"\$\{.*?\}".to_string(),
        ..FieldSpec::default()
    }
}

#[test]
fn regex_match_keeps_value() {
    let spec = placeholder_spec(InvalidAction::Empty);
    assert_eq!(validate(&spec, "${TTEESTTT}"), Ok(text("${TTEESTTT}")));
}

#[test]
fn regex_mismatch_with_empty_action_blanks_value() {
    let spec = placeholder_spec(InvalidAction::Empty);
    assert_eq!(validate(&spec, "${TTEES"), Ok(text("")));
}

#[test]
fn regex_mismatch_with_reject_action_fails() {
    let spec = placeholder_spec(InvalidAction::Reject);
    assert_matches!(
        validate(&spec, "${TTEES"),
        Err(ValidationError::RegexMismatch { value, pattern })
            if value == "${TTEES" && pattern == r"\$\{.*?\}"
    );
}

// ---------------------------------------------------------------------------
// Length
// ---------------------------------------------------------------------------

#[test]
fn truncates_long_value() {
    let spec = FieldSpec {
        target_max_length: Some(6),
        truncate_on_exceeded: true,
        ..FieldSpec::default()
    };
    assert_eq!(validate(&spec, "Albert Einstein"), Ok(text("Albert")));
}

#[test]
fn normalized_number_is_length_checked() {
    let spec = FieldSpec {
        format_type: FormatType::Number,
        culture: Some("fr-FR".to_string()),
        target_max_length: Some(4),
        ..FieldSpec::new("PRICE", "price")
    };
    assert_matches!(
        validate(&spec, "1 234,50"),
        Err(ValidationError::MaxLengthExceeded { value, column, max_length: 4 })
            if value == "1234.50" && column == "price"
    );
}

// ---------------------------------------------------------------------------
// Mapping-driven validation
// ---------------------------------------------------------------------------

/// Field specs loaded from a mapping document drive validation per column.
#[test]
fn mapping_fields_validate_their_columns() {
    let mapping = ColumnMapping::from_json(
        r#"{
            "fields": [
                {"sourceColumn": "CITY", "targetColumn": "city", "targetColumnMaxLength": 5,
                 "truncateMaxLengthExceededColumn": true},
                {"sourceColumn": "SINCE", "targetColumn": "since", "dataFormatType": "Date",
                 "generalFormat": "yyyyMMdd", "required": true}
            ]
        }"#,
    )
    .expect("valid mapping");
    mapping.check().expect("consistent mapping");

    let city = mapping.field_for_target("city").expect("city mapped");
    assert_eq!(validate(city, "Amsterdam"), Ok(text("Amste")));

    let since = mapping.field_for_target("since").expect("since mapped");
    assert!(validate(since, "20240229").is_ok());
    assert_matches!(
        validate(since, ""),
        Err(ValidationError::RequiredField { source_column, .. }) if source_column == "SINCE"
    );
}
