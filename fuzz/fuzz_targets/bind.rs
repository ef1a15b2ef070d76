//! Fuzz target for decode-then-validate binding.
//!
//! Arbitrary bytes must end in one of the input error classes or a valid
//! record. Configuration errors would mean a rule string broke at runtime.

#![no_main]

use libfuzzer_sys::fuzz_target;
use serde::Deserialize;

use ruletag_validation::{Error, Validate, bind};

#[derive(Debug, Deserialize, Validate)]
struct Signup {
    #[validate("required|alphadash|length_between:3,16")]
    username: Option<String>,
    #[validate("required|email")]
    email: Option<String>,
    #[validate("in:admin,user,guest")]
    role: Option<String>,
    #[validate("min:13|max:120")]
    age: Option<i64>,
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Debug, Deserialize, Validate)]
struct Link {
    #[validate("required|url")]
    href: Option<String>,
}

fuzz_target!(|data: &[u8]| {
    match bind::<Signup>(data) {
        Ok(signup) => {
            assert!(signup.username.is_some());
            assert!(signup.validate().is_ok());
        }
        Err(err) => assert!(!matches!(err, Error::Configuration { .. })),
    }
});
