// Validation errors

use crate::RuleError;
use std::fmt;
use thiserror::Error;

/// The kind of rule violation a [`ValidationError`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    MissingRequiredField,
    InvalidFormat,
    NotInAllowedSet,
    BelowMinimum,
    AboveMaximum,
    PatternMismatch,
    LengthMismatch,
    LengthOutOfRange,
    /// The rule was declared against a field of the wrong type.
    TypeMismatch,
}

impl ValidationErrorKind {
    /// Get the kind name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::MissingRequiredField => "missing_required_field",
            ValidationErrorKind::InvalidFormat => "invalid_format",
            ValidationErrorKind::NotInAllowedSet => "not_in_allowed_set",
            ValidationErrorKind::BelowMinimum => "below_minimum",
            ValidationErrorKind::AboveMaximum => "above_maximum",
            ValidationErrorKind::PatternMismatch => "pattern_mismatch",
            ValidationErrorKind::LengthMismatch => "length_mismatch",
            ValidationErrorKind::LengthOutOfRange => "length_out_of_range",
            ValidationErrorKind::TypeMismatch => "type_mismatch",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation error for a single field
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Path of the field that failed validation (`address.city`, `items[1].sku`)
    pub field: String,

    /// What went wrong
    pub kind: ValidationErrorKind,

    /// Error message
    pub message: String,

    /// Rule keyword that failed
    pub constraint: String,

    /// Value that failed validation (optional)
    pub value: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(
        field: impl Into<String>,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
            constraint: "custom".to_string(),
            value: None,
        }
    }

    /// Error for a rule applied to a value of the wrong type.
    pub fn type_mismatch(field: &str, constraint: &str, expected: &str, actual: &str) -> Self {
        Self::new(
            field,
            ValidationErrorKind::TypeMismatch,
            format!(
                "{} expects {} but {} is {}",
                constraint, expected, field, actual
            ),
        )
        .with_constraint(constraint)
    }

    /// Set the constraint name
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = constraint.into();
        self
    }

    /// Set the invalid value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Prefix the field path with the name of the enclosing field.
    pub(crate) fn nested_under(mut self, parent: &str) -> Self {
        self.field = if self.field.starts_with('[') {
            format!("{}{}", parent, self.field)
        } else {
            format!("{}.{}", parent, self.field)
        };
        self
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "field": self.field,
            "kind": self.kind.as_str(),
            "message": self.message,
            "constraint": self.constraint,
            "value": self.value,
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Everything that can go wrong between raw input and a validated record.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Nothing was passed in or JSON featured an empty object")]
    EmptyInput,

    #[error("Failed to decode input: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid rule on field `{field}`: {source}")]
    Configuration {
        field: String,
        #[source]
        source: RuleError,
    },
}

impl Error {
    /// Configuration errors point at broken rule strings and must not be
    /// reported to clients as bad input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Configuration { .. })
    }

    /// The validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// Shortcut for `as_validation().map(|e| e.kind)`.
    pub fn validation_kind(&self) -> Option<ValidationErrorKind> {
        self.as_validation().map(|err| err.kind)
    }

    pub(crate) fn nested_under(self, parent: &str) -> Self {
        match self {
            Error::Validation(err) => Error::Validation(err.nested_under(parent)),
            Error::Configuration { field, source } => Error::Configuration {
                field: if field.starts_with('[') {
                    format!("{}{}", parent, field)
                } else {
                    format!("{}.{}", parent, field)
                },
                source,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
