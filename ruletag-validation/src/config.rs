// Validator configuration

use std::env;

/// How an absent field is treated when its rules mention `required`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequiredPolicy {
    /// An absent field fails if `required` appears anywhere in its rules.
    #[default]
    Anywhere,
    /// Legacy behaviour: tokens are walked left to right and the first
    /// non-`required` token on an absent field skips the rest, so
    /// `email|required` never reports the missing value.
    Leading,
}

impl RequiredPolicy {
    /// Get policy from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "anywhere" => Some(RequiredPolicy::Anywhere),
            "leading" | "legacy" => Some(RequiredPolicy::Leading),
            _ => None,
        }
    }
}

/// Engine and binder settings. Carried by value; nothing here is global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Absent-field policy for `required`
    pub required_policy: RequiredPolicy,
    /// Treat `{}` as empty input when binding
    pub reject_empty_object: bool,
    /// Ignore surrounding whitespace when checking for empty input
    pub trim_input: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            required_policy: RequiredPolicy::Anywhere,
            reject_empty_object: true,
            trim_input: true,
        }
    }
}

impl ValidatorConfig {
    /// Create config from environment variables.
    ///
    /// - `RULETAG_REQUIRED_POLICY=anywhere|leading`
    /// - `RULETAG_REJECT_EMPTY_OBJECT=1|0`
    /// - `RULETAG_TRIM_INPUT=1|0`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let required_policy = env::var("RULETAG_REQUIRED_POLICY")
            .ok()
            .and_then(|s| RequiredPolicy::from_str(&s))
            .unwrap_or(defaults.required_policy);

        let reject_empty_object = env::var("RULETAG_REJECT_EMPTY_OBJECT")
            .map(|v| flag(&v))
            .unwrap_or(defaults.reject_empty_object);

        let trim_input = env::var("RULETAG_TRIM_INPUT")
            .map(|v| flag(&v))
            .unwrap_or(defaults.trim_input);

        Self {
            required_policy,
            reject_empty_object,
            trim_input,
        }
    }

    /// Set the absent-field policy
    pub fn with_required_policy(mut self, policy: RequiredPolicy) -> Self {
        self.required_policy = policy;
        self
    }

    /// Set whether `{}` counts as empty input
    pub fn with_reject_empty_object(mut self, reject: bool) -> Self {
        self.reject_empty_object = reject;
        self
    }

    /// Set whether surrounding whitespace is ignored for the empty check
    pub fn with_trim_input(mut self, trim: bool) -> Self {
        self.trim_input = trim;
        self
    }
}

fn flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
