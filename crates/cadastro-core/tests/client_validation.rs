//! # End-to-End Client Validation
//!
//! Drives [`DocumentValidator`] with stub resolvers that count their calls,
//! checking that each field check consults exactly the collaborator it needs
//! and that one validator can be shared across threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use cadastro_core::{
    CallingPlan, Client, ClientError, CountryCode, DocumentValidator, Field, MailExchangeResolver,
    MxRecord, NumberingPlanResolver, ResolverError, StaticMailExchange, ValidatorConfig,
};

/// Mail-exchange stub answering every domain the same way.
#[derive(Default)]
struct CountingMail {
    calls: AtomicUsize,
    answer: Option<Vec<MxRecord>>,
}

impl CountingMail {
    fn with_records() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            answer: Some(vec![MxRecord {
                preference: 10,
                exchange: "mx.example.com".to_string(),
            }]),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MailExchangeResolver for CountingMail {
    fn resolve(&self, domain: &str) -> Result<Vec<MxRecord>, ResolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone().ok_or_else(|| ResolverError::Lookup {
            target: domain.to_string(),
            reason: "NXDOMAIN".to_string(),
        })
    }

    fn resolver_name(&self) -> &str {
        "CountingMail"
    }
}

/// Numbering-plan stub that always answers with a fixed country.
struct FixedPlan {
    country: &'static str,
    canonical: Option<&'static str>,
}

impl NumberingPlanResolver for FixedPlan {
    fn country_for(&self, _digits: &str) -> Option<CountryCode> {
        CountryCode::new(self.country).ok()
    }

    fn canonicalize(&self, _digits: &str, _country: &CountryCode) -> Option<String> {
        self.canonical.map(str::to_string)
    }
}

fn populated_client() -> Client {
    Client {
        name: "Empresa Exemplo Ltda".to_string(),
        document: 11222333000181,
        email: "contato@example.com".to_string(),
        phone: 5511999999999,
        password: "s3cret".to_string(),
        ..Client::new()
    }
}

#[test]
fn populated_record_is_valid() {
    let mail = Arc::new(CountingMail::with_records());
    let validator = DocumentValidator::new(mail.clone(), Arc::new(CallingPlan::new()));
    let report = validator.validate(&populated_client());
    assert!(report.is_valid(), "{report:?}");
    assert_eq!(mail.calls(), 1);
}

#[test]
fn malformed_email_never_reaches_resolver() {
    let mail = Arc::new(CountingMail::with_records());
    let validator = DocumentValidator::new(mail.clone(), Arc::new(CallingPlan::new()));

    for email in ["", "contato", "contato@", "a@b@example.com"] {
        let client = Client {
            email: email.to_string(),
            ..populated_client()
        };
        assert!(validator.validate_email(&client).is_err(), "{email}");
    }
    assert_eq!(mail.calls(), 0);
}

#[test]
fn resolver_failure_is_unreachable_domain() {
    let mail = Arc::new(CountingMail::default());
    let validator = DocumentValidator::new(mail.clone(), Arc::new(CallingPlan::new()));
    assert_eq!(
        validator.validate_email(&populated_client()),
        Err(ClientError::UnreachableDomain("example.com".to_string()))
    );
    assert_eq!(mail.calls(), 1);
}

#[test]
fn empty_resolver_answer_is_unreachable_domain() {
    let validator = DocumentValidator::new(
        Arc::new(StaticMailExchange::new()),
        Arc::new(CallingPlan::new()),
    );
    let err = validator.validate_email(&populated_client()).unwrap_err();
    assert_eq!(err, ClientError::UnreachableDomain("example.com".to_string()));
    assert_eq!(err.field(), Field::Email);
}

#[test]
fn mx_check_disabled_skips_resolver() {
    let mail = Arc::new(CountingMail::default());
    let config = ValidatorConfig {
        mx_check: false,
        ..ValidatorConfig::default()
    };
    let validator =
        DocumentValidator::with_config(mail.clone(), Arc::new(CallingPlan::new()), config);
    assert!(validator.validate_email(&populated_client()).is_ok());
    assert_eq!(mail.calls(), 0);
}

#[test]
fn canonical_form_must_be_numeric_and_non_zero() {
    let mail = Arc::new(CountingMail::with_records());
    let cases = [
        (None, Err(ClientError::InvalidPhoneFormat)),
        (Some(""), Err(ClientError::InvalidPhoneFormat)),
        (Some("0"), Err(ClientError::InvalidPhoneFormat)),
        (Some("55 11 99999 9999"), Err(ClientError::InvalidPhoneFormat)),
        (Some("5511999999999"), Ok(())),
    ];
    for (canonical, expected) in cases {
        let plan = FixedPlan {
            country: "BR",
            canonical,
        };
        let validator = DocumentValidator::new(mail.clone(), Arc::new(plan));
        assert_eq!(
            validator.validate_phone(&populated_client()),
            expected,
            "{canonical:?}"
        );
    }
}

#[test]
fn calling_plan_phone_countries() {
    let validator = DocumentValidator::new(
        Arc::new(StaticMailExchange::new()),
        Arc::new(CallingPlan::new()),
    );
    let cases: [(u64, Option<&str>); 6] = [
        (5511999999999, Some("BR")),
        (551199999999, Some("BR")),
        (12129240446, Some("US")),
        (559919899999, None),
        (99899999, None),
        (0, None),
    ];
    for (phone, expected) in cases {
        let client = Client {
            phone,
            ..Client::default()
        };
        let country = validator.get_phone_country(&client);
        assert_eq!(
            country.as_ref().map(CountryCode::as_str),
            expected,
            "{phone}"
        );
    }
}

#[test]
fn foreign_mobile_numbers_validate() {
    let validator = DocumentValidator::new(
        Arc::new(StaticMailExchange::new()),
        Arc::new(CallingPlan::new()),
    );
    for (phone, expected) in [
        (79251234567, "RU"),
        (61412345678, "AU"),
        (27821234567, "ZA"),
        (306912345678, "GR"),
        (31612345678, "NL"),
        (41781234567, "CH"),
    ] {
        let client = Client {
            phone,
            ..populated_client()
        };
        assert_eq!(validator.validate_phone(&client), Ok(()), "{phone}");
        let country = validator.get_phone_country(&client);
        assert_eq!(country.as_ref().map(CountryCode::as_str), Some(expected));
    }
}

#[test]
fn validator_is_shareable_across_threads() {
    let validator = Arc::new(DocumentValidator::new(
        Arc::new(CountingMail::with_records()),
        Arc::new(CallingPlan::new()),
    ));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let client = Client {
                    document: if i % 2 == 0 { 52998224725 } else { 11222333000181 },
                    ..populated_client()
                };
                validator.validate(&client).is_valid()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("validation thread panicked"));
    }
}

#[test]
fn json_record_round_trip_through_validation() {
    let raw = r#"{
        "id": "cf357e707dc94e738323f9ae2be36f4a",
        "name": "Ana",
        "document": 52998224725,
        "email": "ana@example.com",
        "phone": 12129240446,
        "password": "x"
    }"#;
    let client: Client = serde_json::from_str(raw).expect("record parses");
    let validator = DocumentValidator::new(
        Arc::new(StaticMailExchange::new().with_domain("example.com", "mx.example.com")),
        Arc::new(CallingPlan::new()),
    );
    assert!(validator.validate(&client).is_valid());
}
