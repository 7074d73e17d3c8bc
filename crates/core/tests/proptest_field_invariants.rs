//! Property tests for invariants that hold across every field configuration.

use fieldval_core::{validate, FieldSpec, FieldValue, FormatType, InvalidAction, ValidationError};
use proptest::prelude::*;

fn format_type() -> impl Strategy<Value = FormatType> {
    prop_oneof![
        Just(FormatType::None),
        Just(FormatType::Date),
        Just(FormatType::Number),
        Just(FormatType::Regex),
    ]
}

fn invalid_action() -> impl Strategy<Value = InvalidAction> {
    prop_oneof![
        Just(InvalidAction::Empty),
        Just(InvalidAction::Ignore),
        Just(InvalidAction::Reject),
    ]
}

fn any_spec(required: bool) -> impl Strategy<Value = FieldSpec> {
    (
        format_type(),
        invalid_action(),
        proptest::option::of(0usize..20),
        any::<bool>(),
        "[a-z\\-]{0,10}",
    )
        .prop_map(move |(format_type, invalid_action, max, truncate, pattern)| FieldSpec {
            required,
            format_type,
            invalid_action,
            target_max_length: max,
            truncate_on_exceeded: truncate,
            format_pattern: pattern,
            ..FieldSpec::new("SRC", "dst")
        })
}

proptest! {
    #[test]
    fn required_empty_input_always_fails(spec in any_spec(true)) {
        let result = validate(&spec, "");
        prop_assert!(
            matches!(result, Err(ValidationError::RequiredField { .. })),
            "expected a required-field error, got {:?}",
            result
        );
    }

    #[test]
    fn optional_empty_input_is_always_empty(spec in any_spec(false)) {
        prop_assert_eq!(validate(&spec, ""), Ok(FieldValue::Empty));
    }

    #[test]
    fn truncation_respects_limit(value in "\\PC{1,40}", max in 2usize..20) {
        let spec = FieldSpec {
            target_max_length: Some(max),
            truncate_on_exceeded: true,
            ..FieldSpec::default()
        };
        let result = validate(&spec, value.as_str());
        prop_assert!(result.is_ok());
        let normalized = result.unwrap().to_string();
        prop_assert!(normalized.chars().count() <= max);
        prop_assert!(value.starts_with(&normalized));
    }

    #[test]
    fn revalidating_text_is_idempotent(
        value in "\\PC{1,40}",
        max in 2usize..20,
        action in invalid_action(),
    ) {
        let spec = FieldSpec {
            format_type: FormatType::Regex,
            format_pattern: "^[A-Za-z ]+$".to_string(),
            invalid_action: match action {
                InvalidAction::Reject => InvalidAction::Ignore,
                other => other,
            },
            target_max_length: Some(max),
            truncate_on_exceeded: true,
            ..FieldSpec::default()
        };
        let first = validate(&spec, value.as_str()).unwrap().to_string();
        prop_assume!(!first.is_empty());
        let second = validate(&spec, first.as_str()).unwrap().to_string();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn revalidating_number_is_idempotent(value in "-?[0-9]{1,9}(,[0-9]{1,4})?") {
        let spec = FieldSpec {
            format_type: FormatType::Number,
            invalid_action: InvalidAction::Reject,
            decimal_separator: Some(",".to_string()),
            ..FieldSpec::default()
        };
        let first = validate(&spec, value.as_str());
        prop_assert!(first.is_ok());
        let first = first.unwrap();
        prop_assert_eq!(validate(&spec, first.to_string()), Ok(first));
    }
}
