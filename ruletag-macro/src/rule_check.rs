//! Compile-time rule string checks
//!
//! Rule strings are parsed with the same grammar the engine uses at runtime,
//! so every mistake it would report as a configuration error fails the build
//! instead:
//! - Unknown rule keywords (including empty tokens from a stray `|`)
//! - Keywords that need a `:` payload but have none
//! - Bare keywords given a payload they do not accept
//! - Numeric payloads that do not parse or are not finite
//! - Regex payloads that do not compile

use proc_macro2::Span;
use ruletag_rules::{KNOWN_RULES, RULE_DELIMITER, Rule, RuleError};
use syn::Error;

/// Validate a whole rule string such as `"required|length_between:4,6"`.
pub fn validate_rule_string(rules: &str, span: Span) -> Result<(), Error> {
    if rules.is_empty() {
        return Ok(());
    }

    for token in rules.split(RULE_DELIMITER) {
        if let Err(err) = Rule::parse(token) {
            return Err(Error::new(span, describe(&err, token, rules)));
        }
    }

    Ok(())
}

fn describe(err: &RuleError, token: &str, rules: &str) -> String {
    match err {
        RuleError::UnknownRule(_) if token.is_empty() => format!(
            "empty rule in \"{}\"\n\
             hint: remove the leading, trailing or doubled '|'",
            rules
        ),
        RuleError::UnknownRule(keyword) => format!(
            "unknown rule '{}' in \"{}\"\n\
             hint: expected one of {}",
            keyword,
            rules,
            KNOWN_RULES.join(", ")
        ),
        RuleError::MissingParameter(keyword) => format!(
            "rule '{}' requires a parameter\n\
             hint: write it as \"{}:<value>\"",
            keyword, keyword
        ),
        RuleError::UnexpectedParameter { rule, param } => format!(
            "rule '{}' does not take a parameter, got \"{}\"\n\
             hint: write it as \"{}\"",
            rule, param, rule
        ),
        RuleError::InvalidParameter {
            rule: "length_between",
            param,
            reason,
        } => format!(
            "rule 'length_between' {}, got \"{}\"\n\
             hint: write it as \"length_between:<low>,<high>\" with low <= high",
            reason, param
        ),
        RuleError::InvalidParameter { rule, param, reason } => format!(
            "rule '{}' has an invalid parameter \"{}\": {}",
            rule, param, reason
        ),
        RuleError::InvalidPattern { pattern, source } => format!(
            "rule 'regex' has an invalid pattern \"{}\": {}\n\
             hint: '|' separates rules and cannot appear inside a pattern",
            pattern, source
        ),
    }
}
