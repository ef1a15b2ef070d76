// ruletag - declarative validation of decoded JSON records
//
// Fields carry compact rule strings ("required|email", "in:admin,user,guest")
// and the engine walks the record, recursing into nested records, until the
// first violation.

// Re-export the validation engine
pub use ruletag_validation::*;

// Re-export optional crates
#[cfg(feature = "log")]
pub use ruletag_log as log;

/// Prelude for the common imports
pub mod prelude {
    pub use ruletag_validation::{
        Binder, Error, Field, FieldValue, Record, RequiredPolicy, Result, Validate,
        ValidationError, ValidationErrorKind, Validator, ValidatorConfig, Value, bind,
        bind_async_reader, bind_reader, bind_str,
    };
}
