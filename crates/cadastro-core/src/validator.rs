//! # Document Validator
//!
//! [`DocumentValidator`] bundles the two external resolvers with a
//! [`ValidatorConfig`] and checks [`Client`] records field by field.
//!
//! The validator holds no mutable state. Share one behind an `Arc` and call
//! it from as many threads as needed; each call is a pure function of the
//! record plus whatever the resolvers answer. Resolver calls block and carry
//! no timeout; callers that need a deadline wrap the call themselves.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::client::{Client, Field};
use crate::config::ValidatorConfig;
use crate::email::{self, MailExchangeResolver};
use crate::error::ClientError;
use crate::identity::CountryCode;
use crate::phone::{self, NumberingPlanResolver};

/// Validates client records against injected resolvers.
#[derive(Clone)]
pub struct DocumentValidator {
    mail: Arc<dyn MailExchangeResolver>,
    plan: Arc<dyn NumberingPlanResolver>,
    config: ValidatorConfig,
}

impl std::fmt::Debug for DocumentValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentValidator")
            .field("mail", &self.mail.resolver_name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DocumentValidator {
    /// Create a validator with the default configuration.
    pub fn new(
        mail: Arc<dyn MailExchangeResolver>,
        plan: Arc<dyn NumberingPlanResolver>,
    ) -> Self {
        Self::with_config(mail, plan, ValidatorConfig::default())
    }

    /// Create a validator with an explicit configuration.
    pub fn with_config(
        mail: Arc<dyn MailExchangeResolver>,
        plan: Arc<dyn NumberingPlanResolver>,
        config: ValidatorConfig,
    ) -> Self {
        Self { mail, plan, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// See [`Client::validate_id`].
    pub fn validate_id(&self, client: &Client) -> Result<(), ClientError> {
        traced(Field::Id, client.validate_id())
    }

    /// See [`Client::validate_name`].
    pub fn validate_name(&self, client: &Client) -> Result<(), ClientError> {
        traced(Field::Name, client.validate_name())
    }

    /// CPF/CNPJ checksum under the configured CPF remainder policy.
    pub fn validate_document(&self, client: &Client) -> Result<(), ClientError> {
        traced(
            Field::Document,
            client.validate_document_with(self.config.cpf_remainder),
        )
    }

    /// E-mail syntax, then mail-exchange reachability unless disabled by
    /// [`ValidatorConfig::mx_check`].
    pub fn validate_email(&self, client: &Client) -> Result<(), ClientError> {
        let result = email::parse(&client.email).and_then(|address| {
            if self.config.mx_check {
                email::ensure_reachable(&address, self.mail.as_ref())
            } else {
                Ok(())
            }
        });
        traced(Field::Email, result)
    }

    /// See [`Client::validate_phone`].
    pub fn validate_phone(&self, client: &Client) -> Result<(), ClientError> {
        traced(
            Field::Phone,
            phone::validate(client.phone, self.plan.as_ref()).map(|_| ()),
        )
    }

    /// See [`Client::get_phone_country`].
    pub fn get_phone_country(&self, client: &Client) -> Option<CountryCode> {
        phone::country_of(client.phone, self.plan.as_ref())
    }

    /// Run every field check independently and collect the outcomes.
    pub fn validate(&self, client: &Client) -> ValidationReport {
        let outcomes = Field::ALL
            .into_iter()
            .map(|field| {
                let outcome = match field {
                    Field::Id => self.validate_id(client),
                    Field::Name => self.validate_name(client),
                    Field::Document => self.validate_document(client),
                    Field::Email => self.validate_email(client),
                    Field::Phone => self.validate_phone(client),
                };
                (field, outcome)
            })
            .collect();
        ValidationReport { outcomes }
    }
}

fn traced(field: Field, result: Result<(), ClientError>) -> Result<(), ClientError> {
    if let Err(e) = &result {
        tracing::debug!(%field, error = %e, "client field rejected");
    }
    result
}

/// Per-field outcomes of [`DocumentValidator::validate`].
///
/// Each field keeps its own result; failures are never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    outcomes: BTreeMap<Field, Result<(), ClientError>>,
}

impl ValidationReport {
    /// Whether every field passed.
    pub fn is_valid(&self) -> bool {
        self.outcomes.values().all(Result::is_ok)
    }

    /// Outcome for one field.
    pub fn outcome(&self, field: Field) -> Option<&Result<(), ClientError>> {
        self.outcomes.get(&field)
    }

    /// Failed fields with their errors, in record order.
    pub fn failures(&self) -> impl Iterator<Item = (Field, &ClientError)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|(field, outcome)| outcome.as_ref().err().map(|e| (*field, e)))
    }
}
