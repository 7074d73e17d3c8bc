//! Data validation engine.
//!
//! Provides the single-field evaluator, the per-format checks it dispatches
//! to, and the outcome type the invalid-data policies act on.

pub mod evaluator;
pub mod format;
pub mod outcome;

pub use evaluator::{apply_max_length_validation, validate, validate_with};
pub use format::{
    apply_date_validation, apply_number_validation, apply_number_validation_with,
    apply_regex_validation, check_number, check_regex, validate_email, EMAIL_PATTERN,
};
pub use outcome::FormatOutcome;
