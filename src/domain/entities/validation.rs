//! Outcome of validating regex settings.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::rule_set::PatternField;

/// Validation messages keyed by the offending field, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(BTreeMap<PatternField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: PatternField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: PatternField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: PatternField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PatternField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Serializable `(field name, message)` list.
    pub fn entries(&self) -> Vec<FieldError> {
        self.iter()
            .map(|(field, message)| FieldError {
                field: field.name(),
                message: message.to_string(),
            })
            .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.0.keys().map(PatternField::name).collect();
        write!(f, "invalid pattern(s): {}", names.join(", "))
    }
}

/// One entry of a [`FieldErrors`] map in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Result of checking every configured pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(FieldErrors),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Errors reported by validation; empty when valid.
    pub fn errors(&self) -> FieldErrors {
        match self {
            Self::Valid => FieldErrors::new(),
            Self::Invalid(errors) => errors.clone(),
        }
    }
}

impl From<FieldErrors> for ValidationResult {
    fn from(errors: FieldErrors) -> Self {
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }
}
