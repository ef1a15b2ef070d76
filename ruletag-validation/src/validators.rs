// Built-in validators

use crate::{Bound, ValidationError, ValidationErrorKind, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

// Common regex patterns
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9.-]+$").expect("email pattern")
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$").expect("url pattern")
});

static ALPHA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{L}+$").expect("alpha pattern"));

static ALPHA_DASH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alphadash pattern"));

static ALPHANUMERIC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("alphanumeric pattern"));

/// Borrow the string behind `value` or report a type mismatch.
fn expect_str<'v>(
    value: &Value<'v>,
    field: &str,
    constraint: &str,
) -> Result<&'v str, ValidationError> {
    match value {
        Value::Str(s) => Ok(*s),
        other => Err(ValidationError::type_mismatch(
            field,
            constraint,
            "a string",
            other.type_name(),
        )),
    }
}

fn format_check(
    regex: &Regex,
    value: &Value<'_>,
    field: &str,
    constraint: &str,
    what: &str,
) -> Result<(), ValidationError> {
    let s = expect_str(value, field, constraint)?;
    if regex.is_match(s) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            ValidationErrorKind::InvalidFormat,
            format!("{} must be {}", field, what),
        )
        .with_constraint(constraint)
        .with_value(s))
    }
}

/// Validates that a value was supplied
pub struct Required;

impl Required {
    pub fn validate(value: &Value<'_>, field: &str) -> Result<(), ValidationError> {
        if value.is_absent() {
            Err(ValidationError::new(
                field,
                ValidationErrorKind::MissingRequiredField,
                format!("The required field {} was not submitted", field),
            )
            .with_constraint("required"))
        } else {
            Ok(())
        }
    }
}

/// Validates email format
pub struct IsEmail;

impl IsEmail {
    pub fn validate(value: &Value<'_>, field: &str) -> Result<(), ValidationError> {
        format_check(&EMAIL_REGEX, value, field, "email", "a valid email")
    }
}

/// Validates URL format (scheme optional)
pub struct IsUrl;

impl IsUrl {
    pub fn validate(value: &Value<'_>, field: &str) -> Result<(), ValidationError> {
        format_check(&URL_REGEX, value, field, "url", "a valid URL")
    }
}

/// Validates letters only (any script)
pub struct IsAlpha;

impl IsAlpha {
    pub fn validate(value: &Value<'_>, field: &str) -> Result<(), ValidationError> {
        format_check(&ALPHA_REGEX, value, field, "alpha", "letters only")
    }
}

/// Validates ASCII letters, digits, dashes and underscores
pub struct IsAlphaDash;

impl IsAlphaDash {
    pub fn validate(value: &Value<'_>, field: &str) -> Result<(), ValidationError> {
        format_check(
            &ALPHA_DASH_REGEX,
            value,
            field,
            "alphadash",
            "letters, numbers, dashes and underscores only",
        )
    }
}

/// Validates alphanumeric characters only
pub struct IsAlphanumeric;

impl IsAlphanumeric {
    pub fn validate(value: &Value<'_>, field: &str) -> Result<(), ValidationError> {
        format_check(
            &ALPHANUMERIC_REGEX,
            value,
            field,
            "alphanumeric",
            "letters and numbers only",
        )
    }
}

/// Validates membership in a fixed list of literals
pub struct OneOf<'a>(pub &'a [String]);

impl OneOf<'_> {
    pub fn validate(&self, value: &Value<'_>, field: &str) -> Result<(), ValidationError> {
        let found = match value {
            Value::Str(s) => self.0.iter().any(|option| option == s),
            Value::Int(i) => self
                .0
                .iter()
                .any(|option| option.parse::<i128>().is_ok_and(|option| option == *i)),
            other => {
                return Err(ValidationError::type_mismatch(
                    field,
                    "in",
                    "a string or an integer",
                    other.type_name(),
                ));
            }
        };

        if found {
            return Ok(());
        }

        let mut err = ValidationError::new(
            field,
            ValidationErrorKind::NotInAllowedSet,
            format!("{} must be one of: {}", field, self.0.join(", ")),
        )
        .with_constraint("in");
        if let Some(shown) = value.display() {
            err = err.with_value(shown);
        }
        Err(err)
    }
}

/// Compare a numeric value against a bound. The outer `None` means the value
/// is not numeric; the inner `None` means NaN, which is never within bounds.
fn compare(value: &Value<'_>, bound: Bound) -> Option<Option<Ordering>> {
    match (value, bound) {
        (Value::Int(v), Bound::Int(b)) => Some(Some(v.cmp(&b))),
        (Value::Int(v), Bound::Float(b)) => Some((*v as f64).partial_cmp(&b)),
        (Value::Float(v), Bound::Int(b)) => Some(v.partial_cmp(&(b as f64))),
        (Value::Float(v), Bound::Float(b)) => Some(v.partial_cmp(&b)),
        _ => None,
    }
}

/// Validates minimum value
pub struct Min(pub Bound);

impl Min {
    pub fn validate(&self, value: &Value<'_>, field: &str) -> Result<(), ValidationError> {
        match compare(value, self.0) {
            None => Err(ValidationError::type_mismatch(
                field,
                "min",
                "a number",
                value.type_name(),
            )),
            Some(Some(Ordering::Greater | Ordering::Equal)) => Ok(()),
            Some(_) => Err(ValidationError::new(
                field,
                ValidationErrorKind::BelowMinimum,
                format!("{} must be at least {}", field, self.0),
            )
            .with_constraint("min")
            .with_value(value.display().unwrap_or_default())),
        }
    }
}

/// Validates maximum value
pub struct Max(pub Bound);

impl Max {
    pub fn validate(&self, value: &Value<'_>, field: &str) -> Result<(), ValidationError> {
        match compare(value, self.0) {
            None => Err(ValidationError::type_mismatch(
                field,
                "max",
                "a number",
                value.type_name(),
            )),
            Some(Some(Ordering::Less | Ordering::Equal)) => Ok(()),
            Some(_) => Err(ValidationError::new(
                field,
                ValidationErrorKind::AboveMaximum,
                format!("{} must be at most {}", field, self.0),
            )
            .with_constraint("max")
            .with_value(value.display().unwrap_or_default())),
        }
    }
}

/// Custom regex validator. Searches rather than anchoring.
pub struct Matches<'a>(pub &'a Regex);

impl Matches<'_> {
    pub fn validate(&self, value: &Value<'_>, field: &str) -> Result<(), ValidationError> {
        let text = match value {
            Value::Str(s) => (*s).to_string(),
            Value::Int(i) => i.to_string(),
            other => {
                return Err(ValidationError::type_mismatch(
                    field,
                    "regex",
                    "a string or an integer",
                    other.type_name(),
                ));
            }
        };

        if self.0.is_match(&text) {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                ValidationErrorKind::PatternMismatch,
                format!("{} does not match pattern {}", field, self.0.as_str()),
            )
            .with_constraint("regex")
            .with_value(text))
        }
    }
}

/// Validates exact string length in characters
pub struct Length(pub usize);

impl Length {
    pub fn validate(&self, value: &Value<'_>, field: &str) -> Result<(), ValidationError> {
        let s = expect_str(value, field, "length")?;
        let len = s.chars().count();
        if len == self.0 {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                ValidationErrorKind::LengthMismatch,
                format!(
                    "{} must be exactly {} characters, got {}",
                    field, self.0, len
                ),
            )
            .with_constraint("length")
            .with_value(s))
        }
    }
}

/// Validates string length within an inclusive range
pub struct LengthBetween {
    pub min: usize,
    pub max: usize,
}

impl LengthBetween {
    pub fn validate(&self, value: &Value<'_>, field: &str) -> Result<(), ValidationError> {
        let s = expect_str(value, field, "length_between")?;
        let len = s.chars().count();
        if (self.min..=self.max).contains(&len) {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                ValidationErrorKind::LengthOutOfRange,
                format!(
                    "{} must be between {} and {} characters, got {}",
                    field, self.min, self.max, len
                ),
            )
            .with_constraint("length_between")
            .with_value(s))
        }
    }
}
