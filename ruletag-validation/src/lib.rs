//! Rule-string validation for decoded records
//!
//! Fields carry compact rule strings such as `"required|email"` or
//! `"required|in:admin,user,guest"`. The engine walks a record in field
//! declaration order, recurses into nested records and lists of records,
//! and stops at the first violation.
//!
//! # Examples
//!
//! ## Deriving rules
//!
//! ```
//! use ruletag_validation::{Validate, ValidationErrorKind};
//!
//! #[derive(Validate)]
//! struct Register {
//!     #[validate("required")]
//!     username: Option<String>,
//!     #[validate("required|email")]
//!     email: Option<String>,
//!     #[validate("required|in:admin,user,guest")]
//!     kind: Option<String>,
//! }
//!
//! let input = Register {
//!     username: Some("a".to_string()),
//!     email: Some("a@b.com".to_string()),
//!     kind: Some("admin".to_string()),
//! };
//! assert!(input.validate().is_ok());
//!
//! let input = Register { email: None, ..input };
//! let err = input.validate().unwrap_err();
//! assert_eq!(err.validation_kind(), Some(ValidationErrorKind::MissingRequiredField));
//! ```
//!
//! ## Binding JSON
//!
//! ```
//! use ruletag_validation::{bind_str, Error, Validate};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Validate)]
//! struct Signup {
//!     #[validate("required|length_between:4,6")]
//!     code: Option<String>,
//! }
//!
//! let signup: Signup = bind_str(r#"{"code": "aaaa"}"#).unwrap();
//! assert_eq!(signup.code.as_deref(), Some("aaaa"));
//!
//! assert!(matches!(bind_str::<Signup>("{}"), Err(Error::EmptyInput)));
//! ```
//!
//! ## Unknown rules
//!
//! A rule keyword the engine does not know is a bug in the program, reported
//! as [`Error::Configuration`] rather than as invalid input.
//!
//! ```
//! use ruletag_validation::{Field, Record, Validate};
//!
//! struct Broken {
//!     name: String,
//! }
//!
//! impl Record for Broken {
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![Field::new("name", Some("bogus_check"), &self.name)]
//!     }
//! }
//!
//! let err = Broken { name: "x".into() }.validate().unwrap_err();
//! assert!(err.is_fatal());
//! ```

// Lets derived impls name this crate from inside its own tests.
extern crate self as ruletag_validation;

mod bind;
mod config;
mod engine;
mod errors;
mod rules;
mod traits;
mod validators;
mod value;

pub use bind::*;
pub use config::*;
pub use engine::*;
pub use errors::*;
pub use rules::*;
pub use traits::*;
pub use validators::*;
pub use value::*;

#[cfg(feature = "derive")]
pub use ruletag_macro::Validate;

// Used by derived impls.
#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
