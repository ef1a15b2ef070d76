//! Integration tests for common ruletag workflows.
//!
//! These go through the facade crate the way an application would: derive
//! rules on request types, bind raw JSON, and branch on the error class.

use ruletag::prelude::*;
use serde::Deserialize;

// =============================================================================
// Request Types
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
#[validate(crate = "ruletag")]
struct CreateUser {
    #[validate("required|alphadash|length_between:3,16")]
    username: Option<String>,
    #[validate("required|length_between:8,64")]
    password: Option<String>,
    #[validate("required|email")]
    email: Option<String>,
    #[validate("in:admin,user,guest")]
    role: Option<String>,
    #[validate("url")]
    homepage: Option<String>,
    profile: Option<Profile>,
}

#[derive(Debug, Deserialize, Validate)]
#[validate(crate = "ruletag")]
struct Profile {
    #[validate("required|min:13|max:120")]
    age: Option<i32>,
    #[validate("alpha")]
    nickname: Option<String>,
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Debug, Deserialize, Validate)]
#[validate(crate = "ruletag")]
struct Link {
    #[validate("required|url")]
    href: Option<String>,
}

/// Mirrors how a transport layer maps the error classes to responses.
fn status_for(err: &Error) -> u16 {
    match err {
        Error::EmptyInput | Error::Decode(_) | Error::Validation(_) => 400,
        Error::Io(_) => 500,
        Error::Configuration { .. } => 500,
    }
}

// =============================================================================
// Binding
// =============================================================================

#[test]
fn test_bind_full_request() {
    let user: CreateUser = bind_str(
        r#"{
            "username": "ada_l",
            "password": "correct horse",
            "email": "ada@example.com",
            "role": "admin",
            "homepage": "https://example.com/ada",
            "profile": {
                "age": 36,
                "nickname": "Ada",
                "links": [{"href": "https://github.com/ada"}]
            }
        }"#,
    )
    .unwrap();

    assert_eq!(user.role.as_deref(), Some("admin"));
    assert_eq!(user.profile.unwrap().links.len(), 1);
}

#[test]
fn test_bind_minimal_request() {
    let user: CreateUser = bind_str(
        r#"{"username": "ada", "password": "12345678", "email": "ada@example.com"}"#,
    )
    .unwrap();
    assert!(user.role.is_none());
    assert!(user.profile.is_none());
}

#[test]
fn test_first_failure_in_field_order() {
    // Both username and email are wrong; username is declared first
    let err = bind_str::<CreateUser>(
        r#"{"username": "a b", "password": "12345678", "email": "nope"}"#,
    )
    .unwrap_err();

    let failure = err.as_validation().unwrap();
    assert_eq!(failure.field, "username");
    assert_eq!(failure.kind, ValidationErrorKind::InvalidFormat);
    assert_eq!(status_for(&err), 400);
}

#[test]
fn test_nested_list_failure_path() {
    let err = bind_str::<CreateUser>(
        r#"{
            "username": "ada",
            "password": "12345678",
            "email": "ada@example.com",
            "profile": {"age": 36, "links": [{"href": "https://a.io"}, {}]}
        }"#,
    )
    .unwrap_err();

    let failure = err.as_validation().unwrap();
    assert_eq!(failure.kind, ValidationErrorKind::MissingRequiredField);
    assert_eq!(failure.field, "profile.links[1].href");
}

#[test]
fn test_nested_bounds() {
    let err = bind_str::<CreateUser>(
        r#"{
            "username": "ada",
            "password": "12345678",
            "email": "ada@example.com",
            "profile": {"age": 12}
        }"#,
    )
    .unwrap_err();
    assert_eq!(
        err.validation_kind(),
        Some(ValidationErrorKind::BelowMinimum)
    );
}

#[test]
fn test_empty_and_malformed_bodies() {
    for body in ["", "{}", "   "] {
        let err = bind_str::<CreateUser>(body).unwrap_err();
        assert!(matches!(err, Error::EmptyInput), "body {:?}", body);
    }

    let err = bind_str::<CreateUser>(r#"{"username": ["ada"]}"#).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
    assert!(!err.is_fatal());
}

#[test]
fn test_reader_input() {
    let body = br#"{"username": "ada", "password": "12345678", "email": "ada@example.com"}"#;
    let user: CreateUser = bind_reader(&body[..]).unwrap();
    assert_eq!(user.username.as_deref(), Some("ada"));
}

#[tokio::test]
async fn test_async_reader_input() {
    let body: &[u8] = br#"{"username": "ada", "password": "short", "email": "ada@example.com"}"#;
    let err = bind_async_reader::<CreateUser, _>(body).await.unwrap_err();
    assert_eq!(
        err.validation_kind(),
        Some(ValidationErrorKind::LengthOutOfRange)
    );
}

// =============================================================================
// Configuration
// =============================================================================

struct Optin {
    email: Option<String>,
}

impl Record for Optin {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new("email", Some("email|required"), &self.email)]
    }
}

#[test]
fn test_required_policy() {
    let record = Optin { email: None };

    let err = Validator::default().validate(&record).unwrap_err();
    assert_eq!(
        err.validation_kind(),
        Some(ValidationErrorKind::MissingRequiredField)
    );

    let legacy = Validator::new(
        ValidatorConfig::default().with_required_policy(RequiredPolicy::Leading),
    );
    assert!(legacy.validate(&record).is_ok());
}

#[test]
fn test_binder_with_config() {
    let binder = Binder::new(ValidatorConfig::default().with_reject_empty_object(false));
    let err = binder.bind::<CreateUser>(b"{}").unwrap_err();
    assert_eq!(err.as_validation().unwrap().field, "username");
}

// =============================================================================
// Rule Defects
// =============================================================================

#[test]
fn test_configuration_error_is_distinct() {
    struct Misconfigured {
        name: Option<String>,
    }

    impl Record for Misconfigured {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![Field::new("name", Some("required|length_between:9,3"), &self.name)]
        }
    }

    let err = Misconfigured {
        name: Some("ada".to_string()),
    }
    .validate()
    .unwrap_err();

    assert!(err.is_fatal());
    assert_eq!(status_for(&err), 500);
    assert!(err.to_string().contains("length_between"));
}

// =============================================================================
// Plain Values
// =============================================================================

#[test]
fn test_json_value_records_via_side_table() {
    // Rules supplied from a side table rather than attributes
    struct Payload(serde_json::Value);

    const RULES: &[(&str, &str)] = &[
        ("sku", "required|regex:^[A-Z]{3}-[0-9]+$"),
        ("qty", "min:1"),
    ];

    impl Record for Payload {
        fn fields(&self) -> Vec<Field<'_>> {
            RULES
                .iter()
                .map(|&(name, rules)| {
                    let value = self.0.get(name).map_or(Value::Absent, |v| v.field_value());
                    Field::from_value(name, Some(rules), value)
                })
                .collect()
        }
    }

    let ok = Payload(serde_json::json!({"sku": "ABC-12", "qty": 3}));
    assert!(ok.validate().is_ok());

    let bad = Payload(serde_json::json!({"sku": "ABC-12", "qty": 0}));
    assert_eq!(
        bad.validate().unwrap_err().validation_kind(),
        Some(ValidationErrorKind::BelowMinimum)
    );

    let missing = Payload(serde_json::json!({"qty": 2}));
    assert_eq!(
        missing.validate().unwrap_err().validation_kind(),
        Some(ValidationErrorKind::MissingRequiredField)
    );
}

#[test]
fn test_non_records_pass_trivially() {
    let validator = Validator::default();
    assert!(validator.validate_value("just a string").is_ok());
    assert!(validator.validate_value(&vec![1, 2, 3]).is_ok());
}
