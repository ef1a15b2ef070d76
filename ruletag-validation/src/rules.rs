// Rule dispatch

use crate::validators::*;
use crate::{ValidationError, Value};

pub use ruletag_rules::{
    Bound, KNOWN_RULES, PARAM_DELIMITER, RULE_DELIMITER, Rule, RuleError, RuleSet,
};

/// Runs the predicate behind a parsed rule.
pub trait Check {
    fn check(&self, value: &Value<'_>, field: &str) -> Result<(), ValidationError>;
}

impl Check for Rule {
    fn check(&self, value: &Value<'_>, field: &str) -> Result<(), ValidationError> {
        match self {
            Rule::Required => Required::validate(value, field),
            Rule::Email => IsEmail::validate(value, field),
            Rule::Url => IsUrl::validate(value, field),
            Rule::Alpha => IsAlpha::validate(value, field),
            Rule::AlphaDash => IsAlphaDash::validate(value, field),
            Rule::Alphanumeric => IsAlphanumeric::validate(value, field),
            Rule::In(options) => OneOf(options).validate(value, field),
            Rule::Min(bound) => Min(*bound).validate(value, field),
            Rule::Max(bound) => Max(*bound).validate(value, field),
            Rule::Regex(regex) => Matches(regex).validate(value, field),
            Rule::Length(len) => Length(*len).validate(value, field),
            Rule::LengthBetween { min, max } => LengthBetween {
                min: *min,
                max: *max,
            }
            .validate(value, field),
        }
    }
}
