//! Integration tests for ruletag-validation

use ruletag_validation::*;
use serde::Deserialize;

#[derive(Debug, Deserialize, Validate)]
struct Register {
    #[validate("required")]
    username: Option<String>,
    #[validate("required")]
    password: Option<String>,
    #[validate("required|email")]
    email: Option<String>,
    #[serde(rename = "type")]
    #[validate("required|in:admin,user,guest")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct Contact {
    #[validate("email")]
    email: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct Level {
    #[validate("in:1,3,2")]
    level: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
struct Code {
    #[validate("length_between:4,6")]
    code: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct Address {
    #[validate("required")]
    street: Option<String>,
    #[validate("required|length:5|regex:^[0-9]+$")]
    zip: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct Customer {
    #[validate("required|alpha")]
    name: Option<String>,
    address: Option<Address>,
    #[validate("required")]
    billing: Option<Address>,
    #[serde(default)]
    previous: Vec<Address>,
    #[validate("min:18|max:130")]
    age: Option<u32>,
}

#[derive(Debug, Deserialize, Validate)]
struct Legacy {
    #[binding("required|in:yes,no")]
    notify: Option<String>,
    #[validate("")]
    #[binding("required")]
    token: Option<String>,
}

#[derive(Debug, Validate)]
struct Wrapper(#[validate("required|url")] Option<String>, #[validate(skip)] Vec<u8>);

#[derive(Debug, Validate)]
struct Tagged<T> {
    #[validate("required")]
    inner: Option<T>,
}

fn some(s: &str) -> Option<String> {
    Some(s.to_string())
}

fn kind_of(result: Result<()>) -> Option<ValidationErrorKind> {
    result.expect_err("expected a failure").validation_kind()
}

fn address() -> Address {
    Address {
        street: some("1 Main St"),
        zip: some("12345"),
    }
}

#[test]
fn test_all_rules_satisfied() {
    let register = Register {
        username: some("a"),
        password: some("b"),
        email: some("a@b.com"),
        kind: some("admin"),
    };
    assert!(register.validate().is_ok());
}

#[test]
fn test_required_absent_regardless_of_position() {
    let register = Register {
        username: some("a"),
        password: None,
        email: some("a@b.com"),
        kind: some("admin"),
    };
    let err = register.validate().unwrap_err();
    let err = err.as_validation().unwrap();
    assert_eq!(err.kind, ValidationErrorKind::MissingRequiredField);
    assert_eq!(err.field, "password");
}

#[test]
fn test_optional_email_skipped() {
    assert!(Contact { email: None }.validate().is_ok());
}

#[test]
fn test_email_format() {
    assert_eq!(
        kind_of(Contact { email: some("michaeljs.edu") }.validate()),
        Some(ValidationErrorKind::InvalidFormat)
    );
    assert!(Contact { email: some("michaeljs@gmail.com") }.validate().is_ok());
}

#[test]
fn test_in_with_integers() {
    assert_eq!(
        kind_of(Level { level: Some(6) }.validate()),
        Some(ValidationErrorKind::NotInAllowedSet)
    );
    assert!(Level { level: Some(3) }.validate().is_ok());
}

#[test]
fn test_length_between() {
    assert!(Code { code: some("aaaa") }.validate().is_ok());
    assert_eq!(
        kind_of(Code { code: some("aa") }.validate()),
        Some(ValidationErrorKind::LengthOutOfRange)
    );
}

#[test]
fn test_nested_failure_is_reported() {
    let customer = Customer {
        name: some("Ada"),
        address: Some(Address {
            street: None,
            zip: some("12345"),
        }),
        billing: Some(address()),
        previous: Vec::new(),
        age: Some(36),
    };
    let err = customer.validate().unwrap_err();
    let err = err.as_validation().unwrap();
    assert_eq!(err.kind, ValidationErrorKind::MissingRequiredField);
    assert_eq!(err.field, "address.street");
}

#[test]
fn test_nested_record_without_rules_may_be_absent() {
    let customer = Customer {
        name: some("Ada"),
        address: None,
        billing: Some(address()),
        previous: vec![address()],
        age: None,
    };
    assert!(customer.validate().is_ok());
}

#[test]
fn test_required_nested_record() {
    let customer = Customer {
        name: some("Ada"),
        address: None,
        billing: None,
        previous: Vec::new(),
        age: None,
    };
    assert_eq!(
        customer.validate().unwrap_err().as_validation().unwrap().field,
        "billing"
    );
}

#[test]
fn test_list_elements_are_walked() {
    let customer = Customer {
        name: some("Ada"),
        address: None,
        billing: Some(address()),
        previous: vec![
            address(),
            Address {
                street: some("2 Side St"),
                zip: some("1234a"),
            },
        ],
        age: None,
    };
    let err = customer.validate().unwrap_err();
    let err = err.as_validation().unwrap();
    assert_eq!(err.kind, ValidationErrorKind::PatternMismatch);
    assert_eq!(err.field, "previous[1].zip");
}

#[test]
fn test_numeric_bounds() {
    let mut customer = Customer {
        name: some("Ada"),
        address: None,
        billing: Some(address()),
        previous: Vec::new(),
        age: Some(17),
    };
    assert_eq!(
        kind_of(customer.validate()),
        Some(ValidationErrorKind::BelowMinimum)
    );
    customer.age = Some(131);
    assert_eq!(
        kind_of(customer.validate()),
        Some(ValidationErrorKind::AboveMaximum)
    );
    customer.age = Some(0);
    assert_eq!(
        kind_of(customer.validate()),
        Some(ValidationErrorKind::BelowMinimum)
    );
}

#[test]
fn test_idempotent() {
    let code = Code { code: some("aa") };
    let first = code.validate().unwrap_err();
    let second = code.validate().unwrap_err();
    assert_eq!(first.as_validation(), second.as_validation());
}

#[test]
fn test_legacy_binding_attribute() {
    assert!(Legacy {
        notify: some("yes"),
        token: some("t"),
    }
    .validate()
    .is_ok());

    let err = Legacy {
        notify: some("yes"),
        token: None,
    }
    .validate()
    .unwrap_err();
    assert_eq!(err.as_validation().unwrap().field, "token");
}

#[test]
fn test_tuple_struct_and_skip() {
    assert!(Wrapper(some("https://example.com"), vec![1]).validate().is_ok());
    let err = Wrapper(some("nope"), Vec::new()).validate().unwrap_err();
    assert_eq!(err.as_validation().unwrap().field, "0");
}

#[test]
fn test_generic_record() {
    assert!(Tagged { inner: Some(5u8) }.validate().is_ok());
    assert!(Tagged::<u8> { inner: None }.validate().is_err());
    assert!(Tagged { inner: some("x") }.validate().is_ok());
    assert!(Tagged::<String> { inner: None }.validate().is_err());
}

#[test]
fn test_derived_rules_reused_across_calls() {
    let fields = address().fields().into_iter().map(|f| (f.name, f.rules)).collect::<Vec<_>>();
    assert_eq!(
        fields,
        vec![
            ("street", Some("required")),
            ("zip", Some("required|length:5|regex:^[0-9]+$")),
        ]
    );

    for zip in ["12345", "1234a", "54321"] {
        let result = Address {
            street: some("1 Main St"),
            zip: some(zip),
        }
        .validate();
        assert_eq!(result.is_ok(), zip != "1234a", "zip {:?}", zip);
    }
}

#[test]
fn test_bind_and_validate() {
    let register: Register = bind_str(
        r#"{"username": "a", "password": "b", "email": "a@b.com", "type": "guest"}"#,
    )
    .unwrap();
    assert_eq!(register.kind.as_deref(), Some("guest"));

    let err = bind_str::<Register>(
        r#"{"username": "a", "password": "b", "email": "a@b.com", "type": "root"}"#,
    )
    .unwrap_err();
    assert_eq!(
        err.validation_kind(),
        Some(ValidationErrorKind::NotInAllowedSet)
    );
}

#[test]
fn test_bind_null_is_absent() {
    let err = bind_str::<Register>(
        r#"{"username": null, "password": "b", "email": "a@b.com", "type": "guest"}"#,
    )
    .unwrap_err();
    assert_eq!(err.as_validation().unwrap().field, "username");
}

#[test]
fn test_bind_empty_and_malformed() {
    assert!(matches!(bind::<Register>(b""), Err(Error::EmptyInput)));
    assert!(matches!(bind::<Register>(b"{}"), Err(Error::EmptyInput)));
    assert!(matches!(
        bind::<Register>(b"[1, 2"),
        Err(Error::Decode(_))
    ));
}

#[test]
fn test_bind_nested_json() {
    let err = bind_str::<Customer>(
        r#"{"name": "Ada", "billing": {"street": "x", "zip": "123"}}"#,
    )
    .unwrap_err();
    let err = err.as_validation().unwrap();
    assert_eq!(err.kind, ValidationErrorKind::LengthMismatch);
    assert_eq!(err.field, "billing.zip");
}

#[test]
fn test_validation_error_json() {
    let err = Code { code: some("aa") }.validate().unwrap_err();
    let json = err.as_validation().unwrap().to_json();
    assert_eq!(json["field"], "code");
    assert_eq!(json["kind"], "length_out_of_range");
    assert_eq!(json["constraint"], "length_between");
    assert_eq!(json["value"], "aa");
}

#[test]
fn test_hand_written_record_with_unknown_rule() {
    struct Broken {
        name: Option<String>,
    }

    impl Record for Broken {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![Field::new("name", Some("required|bogus_check"), &self.name)]
        }
    }

    let err = Broken { name: some("x") }.validate().unwrap_err();
    assert!(err.is_fatal());
    assert!(err.as_validation().is_none());
    assert!(matches!(
        err,
        Error::Configuration {
            source: RuleError::UnknownRule(_),
            ..
        }
    ));
}

#[test]
fn test_type_mismatch_is_reported() {
    struct Misdeclared {
        age: Option<String>,
    }

    impl Record for Misdeclared {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![Field::new("age", Some("min:18"), &self.age)]
        }
    }

    assert_eq!(
        kind_of(Misdeclared { age: some("20") }.validate()),
        Some(ValidationErrorKind::TypeMismatch)
    );
}

#[test]
fn test_validate_records_from_many_threads() {
    let register = std::sync::Arc::new(Register {
        username: some("a"),
        password: some("b"),
        email: some("not-an-email"),
        kind: some("admin"),
    });

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let register = std::sync::Arc::clone(&register);
            std::thread::spawn(move || register.validate().unwrap_err().validation_kind())
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            Some(ValidationErrorKind::InvalidFormat)
        );
    }
}
