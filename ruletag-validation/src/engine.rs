// Traversal and dispatch engine

use crate::{
    Check, Error, Field, FieldValue, Record, RequiredPolicy, Required, Result, RuleError,
    RuleSet, ValidationError, ValidatorConfig, Value,
};
use ruletag_log::{debug, error, trace};

const TARGET: &str = "ruletag::engine";

/// Walks records field by field and applies their rule strings.
///
/// Holds no state besides its configuration, so one validator can be shared
/// freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Create a validator with the given configuration
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a record, returning the first failure in field order.
    ///
    /// Nested records are checked depth-first, before the rules of the field
    /// that holds them.
    pub fn validate<R: Record + ?Sized>(&self, record: &R) -> Result<()> {
        self.walk(record.fields())
    }

    /// Validate anything with a [`Value`] view. Records (and lists of them)
    /// are walked; any other value has no fields and passes.
    pub fn validate_value<T: FieldValue + ?Sized>(&self, value: &T) -> Result<()> {
        self.descend(&value.field_value())
    }

    fn walk(&self, fields: Vec<Field<'_>>) -> Result<()> {
        for field in &fields {
            self.descend(&field.value)
                .map_err(|err| err.nested_under(field.name))?;

            if let Some(rules) = field.rules {
                self.check_field(field, rules)?;
            }
        }
        Ok(())
    }

    fn descend(&self, value: &Value<'_>) -> Result<()> {
        match value {
            Value::Record(record) => self.walk(record.fields()),
            Value::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.descend(item)
                        .map_err(|err| err.nested_under(&format!("[{}]", index)))?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn check_field(&self, field: &Field<'_>, rules: &str) -> Result<()> {
        let parsed;
        let rules = match field.parsed() {
            Some(Ok(set)) => set,
            Some(Err(source)) => return Err(self.misconfigured(field, source.clone())),
            None => {
                parsed = RuleSet::parse(rules).map_err(|source| self.misconfigured(field, source))?;
                &parsed
            }
        };

        let absent = field.value.is_absent();

        if absent && self.config.required_policy == RequiredPolicy::Anywhere && rules.has_required()
        {
            Required::validate(&field.value, field.name).map_err(|err| self.reject(err))?;
        }

        for rule in rules {
            if absent && !rule.is_required() {
                debug!(
                    target: TARGET,
                    "field {} absent, skipping remaining rules from {}",
                    field.name,
                    rule.keyword()
                );
                return Ok(());
            }

            trace!(target: TARGET, "field {}: checking {}", field.name, rule.keyword());
            rule.check(&field.value, field.name)
                .map_err(|err| self.reject(err))?;
        }

        Ok(())
    }

    fn misconfigured(&self, field: &Field<'_>, source: RuleError) -> Error {
        error!(target: TARGET, "field {}: {}", field.name, source);
        Error::Configuration {
            field: field.name.to_string(),
            source,
        }
    }

    fn reject(&self, err: ValidationError) -> Error {
        debug!(
            target: TARGET,
            "field {} failed {} ({})", err.field, err.constraint, err.kind
        );
        Error::Validation(err)
    }
}

/// Validate a record with the default configuration.
pub fn validate<R: Record + ?Sized>(record: &R) -> Result<()> {
    Validator::default().validate(record)
}
