//! Result of a single format check, before the fallback policy applies.

use crate::error::ValidationError;
use crate::types::InvalidAction;

/// What a number, regex or email check concluded about a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    /// The value passed; carries the (possibly normalised) text to keep.
    Valid(String),
    /// The value failed; carries the error a `Reject` policy surfaces.
    Invalid(ValidationError),
}

impl FormatOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

impl InvalidAction {
    /// Turn a check outcome into the field's final text.
    ///
    /// `raw` is the value as it was given, which `Ignore` keeps even when
    /// the check normalised it.
    pub fn resolve(self, outcome: FormatOutcome, raw: &str) -> Result<String, ValidationError> {
        match (outcome, self) {
            (FormatOutcome::Valid(value), _) => Ok(value),
            (FormatOutcome::Invalid(_), Self::Empty) => Ok(String::new()),
            (FormatOutcome::Invalid(_), Self::Ignore) => Ok(raw.to_string()),
            (FormatOutcome::Invalid(err), Self::Reject) => Err(err),
        }
    }
}
