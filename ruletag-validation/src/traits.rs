// Validation traits

use crate::{FieldValue, Result, RuleError, RuleSet, Validator, Value};

/// One field of a record as the engine sees it.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    /// Field name as reported in errors
    pub name: &'static str,

    /// Rule string, e.g. `"required|in:admin,user,guest"`
    pub rules: Option<&'static str>,

    /// Current value
    pub value: Value<'a>,

    parsed: Option<&'static std::result::Result<RuleSet, RuleError>>,
}

impl<'a> Field<'a> {
    /// Create a field from anything that exposes a [`Value`].
    pub fn new<T: FieldValue + ?Sized>(
        name: &'static str,
        rules: Option<&'static str>,
        value: &'a T,
    ) -> Self {
        Self::from_value(name, rules, value.field_value())
    }

    /// Create a field from an already built [`Value`].
    pub fn from_value(name: &'static str, rules: Option<&'static str>, value: Value<'a>) -> Self {
        Self {
            name,
            rules,
            value,
            parsed: None,
        }
    }

    /// Attach the parse of `rules` so the engine does not parse it again.
    ///
    /// Derived impls keep one parse per field in a static.
    pub fn with_parsed(mut self, parsed: &'static std::result::Result<RuleSet, RuleError>) -> Self {
        self.parsed = Some(parsed);
        self
    }

    pub(crate) fn parsed(&self) -> Option<&'static std::result::Result<RuleSet, RuleError>> {
        self.parsed
    }
}

/// A structured aggregate whose fields can be walked by the engine.
///
/// Usually derived with `#[derive(Validate)]`; implement it by hand to attach
/// rules from a side table or to types that cannot carry attributes.
///
/// ```
/// use ruletag_validation::{Field, Record, Validate};
///
/// struct Login {
///     user: Option<String>,
/// }
///
/// impl Record for Login {
///     fn fields(&self) -> Vec<Field<'_>> {
///         vec![Field::new("user", Some("required|length_between:3,16"), &self.user)]
///     }
/// }
///
/// assert!(Login { user: Some("alice".into()) }.validate().is_ok());
/// assert!(Login { user: None }.validate().is_err());
/// ```
pub trait Record {
    /// Fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

impl<T: Record + ?Sized> Record for &T {
    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

/// Trait for validatable types
pub trait Validate {
    /// Validate with the default configuration, stopping at the first failure.
    fn validate(&self) -> Result<()>;
}

impl<T: Record + ?Sized> Validate for T {
    fn validate(&self) -> Result<()> {
        Validator::default().validate(self)
    }
}
