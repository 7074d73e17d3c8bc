//! Column mapping configuration: the set of field specs an import uses.
//!
//! Loading is from an in-memory JSON document; where the document comes
//! from (file, database, request body) is the caller's concern.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::field::FieldSpec;
use crate::types::FormatType;

/// All field specs of one source → target mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl ColumnMapping {
    /// Parse a mapping document of the form `{"fields": [ ... ]}`.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn field_for_target(&self, target_column: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.target_column == target_column)
    }

    pub fn field_for_source(&self, source_column: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.source_column == source_column)
    }

    /// Report mistakes that would make every value of a column fail.
    ///
    /// Returns the first problem found, naming the offending field.
    pub fn check(&self) -> Result<(), CoreError> {
        let mut targets = HashSet::new();

        for (index, field) in self.fields.iter().enumerate() {
            if field.target_column.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "Field {} has an empty target column",
                    index + 1
                )));
            }
            if !targets.insert(field.target_column.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Target column \"{}\" is mapped more than once",
                    field.target_column
                )));
            }
            match field.format_type {
                FormatType::Date if field.format_pattern.is_empty() => {
                    return Err(CoreError::Validation(format!(
                        "Date column \"{}\" has no date format",
                        field.target_column
                    )));
                }
                FormatType::Regex => {
                    if let Err(e) = Regex::new(&field.format_pattern) {
                        return Err(CoreError::Validation(format!(
                            "Regex for column \"{}\" does not compile: {e}",
                            field.target_column
                        )));
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}
