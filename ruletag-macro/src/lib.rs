// Procedural macros for ruletag
// Attaches rule strings to struct fields and exposes them to the validation engine

use proc_macro::TokenStream;

mod derive;
mod rule_check;

/// Derives `Record` (and `FieldValue`) so the struct can be validated.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct Register {
///     #[validate("required")]
///     username: Option<String>,
///     #[validate("required|email")]
///     email: Option<String>,
///     #[binding("required|in:yes,no")]
///     notify: Option<String>,
///     #[validate(skip)]
///     session: Session,
///     address: Option<Address>, // no rules, still walked if it is a record
/// }
/// ```
///
/// Rule strings are checked at compile time. Generated code refers to
/// `::ruletag_validation`; use `#[validate(crate = "path")]` on the struct
/// when the crate is reached through a re-export.
#[proc_macro_derive(Validate, attributes(validate, binding))]
pub fn validate_derive(input: TokenStream) -> TokenStream {
    derive::derive_validate_impl(input)
}
