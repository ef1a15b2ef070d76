//! Rule string grammar for ruletag
//!
//! A rule string is an ordered list of tokens separated by `|`. Each token is
//! a bare keyword (`required`, `email`) or a keyword with a payload after the
//! first `:` (`in:admin,user`, `length_between:4,6`).
//!
//! The validation engine and the `#[derive(Validate)]` macro both parse with
//! this crate, so a rule string that compiles is a rule string that runs.
//!
//! ```
//! use ruletag_rules::{Rule, RuleSet};
//!
//! let set = RuleSet::parse("required|length_between:4,6").unwrap();
//! let keywords: Vec<_> = set.iter().map(Rule::keyword).collect();
//! assert_eq!(keywords, ["required", "length_between"]);
//!
//! assert!(RuleSet::parse("required|bogus_check").is_err());
//! ```

use regex::Regex;
use thiserror::Error;

/// Separates rule tokens within a rule string.
pub const RULE_DELIMITER: char = '|';

/// Separates a rule keyword from its parameter payload.
pub const PARAM_DELIMITER: char = ':';

/// Every keyword the engine understands.
pub const KNOWN_RULES: &[&str] = &[
    "required",
    "email",
    "url",
    "alpha",
    "alphadash",
    "alphanumeric",
    "in",
    "min",
    "max",
    "regex",
    "length",
    "length_between",
];

/// A defect in a rule string. These come from the program, never from input data.
#[derive(Error, Debug, Clone)]
pub enum RuleError {
    #[error("`{0}` is not a valid validation check")]
    UnknownRule(String),

    #[error("rule `{0}` requires a parameter")]
    MissingParameter(&'static str),

    #[error("rule `{rule}` does not take a parameter (got `{param}`)")]
    UnexpectedParameter { rule: &'static str, param: String },

    #[error("invalid parameter `{param}` for rule `{rule}`: {reason}")]
    InvalidParameter {
        rule: &'static str,
        param: String,
        reason: String,
    },

    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A numeric bound from a `min`/`max` payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Int(i128),
    Float(f64),
}

impl Bound {
    /// Integers first, then finite floats. `inf` and `NaN` are rejected.
    fn parse(rule: &'static str, param: &str) -> Result<Self, RuleError> {
        if let Ok(int) = param.parse::<i128>() {
            return Ok(Bound::Int(int));
        }
        param
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Bound::Float)
            .ok_or_else(|| RuleError::InvalidParameter {
                rule,
                param: param.to_string(),
                reason: "expected a finite number".to_string(),
            })
    }
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Int(i) => write!(f, "{}", i),
            Bound::Float(x) => write!(f, "{}", x),
        }
    }
}

/// One parsed rule token.
#[derive(Debug, Clone)]
pub enum Rule {
    Required,
    Email,
    Url,
    Alpha,
    AlphaDash,
    Alphanumeric,
    In(Vec<String>),
    Min(Bound),
    Max(Bound),
    Regex(Regex),
    Length(usize),
    LengthBetween { min: usize, max: usize },
}

impl Rule {
    /// Parse a single token such as `email` or `length_between:4,6`.
    ///
    /// Only the first `:` separates keyword from payload, so regex payloads
    /// may contain colons.
    pub fn parse(token: &str) -> Result<Self, RuleError> {
        let (keyword, param) = match token.split_once(PARAM_DELIMITER) {
            Some((keyword, param)) => (keyword, Some(param)),
            None => (token, None),
        };

        let rule = match keyword {
            "required" => no_param("required", param, Rule::Required)?,
            "email" => no_param("email", param, Rule::Email)?,
            "url" => no_param("url", param, Rule::Url)?,
            "alpha" => no_param("alpha", param, Rule::Alpha)?,
            "alphadash" => no_param("alphadash", param, Rule::AlphaDash)?,
            "alphanumeric" => no_param("alphanumeric", param, Rule::Alphanumeric)?,
            "in" => {
                let param = param.ok_or(RuleError::MissingParameter("in"))?;
                Rule::In(param.split(',').map(str::to_string).collect())
            }
            "min" => Rule::Min(Bound::parse(
                "min",
                param.ok_or(RuleError::MissingParameter("min"))?,
            )?),
            "max" => Rule::Max(Bound::parse(
                "max",
                param.ok_or(RuleError::MissingParameter("max"))?,
            )?),
            "regex" => {
                let pattern = param.ok_or(RuleError::MissingParameter("regex"))?;
                let regex = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })?;
                Rule::Regex(regex)
            }
            "length" => {
                let param = param.ok_or(RuleError::MissingParameter("length"))?;
                Rule::Length(parse_len("length", param)?)
            }
            "length_between" => {
                let param = param.ok_or(RuleError::MissingParameter("length_between"))?;
                let (low, high) =
                    param
                        .split_once(',')
                        .ok_or_else(|| RuleError::InvalidParameter {
                            rule: "length_between",
                            param: param.to_string(),
                            reason: "requires exactly two parameters".to_string(),
                        })?;
                let min = parse_len("length_between", low)?;
                let max = parse_len("length_between", high)?;
                if min > max {
                    return Err(RuleError::InvalidParameter {
                        rule: "length_between",
                        param: param.to_string(),
                        reason: "lower bound exceeds upper bound".to_string(),
                    });
                }
                Rule::LengthBetween { min, max }
            }
            _ => return Err(RuleError::UnknownRule(token.to_string())),
        };

        Ok(rule)
    }

    /// The rule's keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Email => "email",
            Rule::Url => "url",
            Rule::Alpha => "alpha",
            Rule::AlphaDash => "alphadash",
            Rule::Alphanumeric => "alphanumeric",
            Rule::In(_) => "in",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
            Rule::Regex(_) => "regex",
            Rule::Length(_) => "length",
            Rule::LengthBetween { .. } => "length_between",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Rule::Required)
    }
}

fn no_param(keyword: &'static str, param: Option<&str>, rule: Rule) -> Result<Rule, RuleError> {
    match param {
        None => Ok(rule),
        Some(param) => Err(RuleError::UnexpectedParameter {
            rule: keyword,
            param: param.to_string(),
        }),
    }
}

fn parse_len(rule: &'static str, param: &str) -> Result<usize, RuleError> {
    param
        .parse::<usize>()
        .map_err(|e| RuleError::InvalidParameter {
            rule,
            param: param.to_string(),
            reason: e.to_string(),
        })
}

/// The ordered rule tokens of one field.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Parse a whole rule string. The empty string yields an empty set.
    pub fn parse(rules: &str) -> Result<Self, RuleError> {
        if rules.is_empty() {
            return Ok(Self::default());
        }

        let rules = rules
            .split(RULE_DELIMITER)
            .map(Rule::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether `required` appears at any position.
    pub fn has_required(&self) -> bool {
        self.rules.iter().any(Rule::is_required)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
