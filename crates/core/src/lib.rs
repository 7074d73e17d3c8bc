//! Field-level validation and normalization for column-mapping imports.
//!
//! One call validates one raw value against one [`FieldSpec`]: required
//! check, format check (date, number or regex) with an invalid-data
//! fallback policy, then max-length truncation or rejection.

pub mod culture;
pub mod date_format;
pub mod error;
pub mod field;
pub mod mapping;
pub mod number;
pub mod types;
pub mod validation;

pub use culture::{BuiltinCultures, CultureError, NumberCulture};
pub use date_format::{parse_exact, DateParseError};
pub use error::{CoreError, ValidationError};
pub use field::FieldSpec;
pub use mapping::ColumnMapping;
pub use types::{FieldInput, FieldValue, FormatType, InvalidAction};
pub use validation::{
    apply_date_validation, apply_max_length_validation, apply_number_validation,
    apply_number_validation_with, apply_regex_validation, validate, validate_email,
    validate_with, FormatOutcome, EMAIL_PATTERN,
};
