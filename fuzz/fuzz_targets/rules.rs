//! Fuzz target for rule string parsing.
//!
//! Feeds arbitrary rule strings and values through the parser and every
//! parsed predicate. Malformed rules must come back as errors, never panics.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ruletag_validation::{Check, RuleSet, Value};

/// Arbitrary rule scenario for fuzzing.
#[derive(Debug, Arbitrary)]
struct FuzzRules {
    /// Raw rule string, e.g. "required|length_between:3,9"
    rules: String,
    /// Values to check against the parsed rules
    values: Vec<FuzzValue>,
}

#[derive(Debug, Arbitrary)]
enum FuzzValue {
    Absent,
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<String>),
}

impl FuzzValue {
    fn as_value(&self) -> Value<'_> {
        match self {
            FuzzValue::Absent => Value::Absent,
            FuzzValue::Str(s) => Value::Str(s),
            FuzzValue::Int(n) => Value::Int(i128::from(*n)),
            FuzzValue::Float(f) => Value::Float(*f),
            FuzzValue::Bool(b) => Value::Bool(*b),
            FuzzValue::List(items) => Value::List(items.iter().map(|s| Value::Str(s)).collect()),
        }
    }
}

fuzz_target!(|data: FuzzRules| {
    let Ok(rules) = RuleSet::parse(&data.rules) else {
        return;
    };

    // Parsing is deterministic
    assert!(RuleSet::parse(&data.rules).is_ok());

    for value in &data.values {
        let value = value.as_value();
        for rule in &rules {
            let _ = rule.check(&value, "field");
        }
    }
});
