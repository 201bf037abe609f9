//! # Client Record
//!
//! The [`Client`] record carries identity, contact, and fiscal-registration
//! data for a person or company. Every `validate_*` method is a pure read of
//! the current field values; nothing is mutated or persisted.
//!
//! Checks that need an external collaborator (mail exchange, numbering plan)
//! take the resolver as an argument. [`DocumentValidator`](crate::DocumentValidator)
//! bundles the resolvers and configuration for callers that validate many
//! records.

use serde::{Deserialize, Serialize};

use crate::email::{self, MailExchangeResolver};
use crate::error::ClientError;
use crate::fiscal::{self, CpfRemainder, DocumentKind};
use crate::identity::{ClientId, CountryCode};
use crate::phone::{self, NumberingPlanResolver};

/// A validated field of the client record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// `id`
    Id,
    /// `name`
    Name,
    /// `document`
    Document,
    /// `email`
    Email,
    /// `phone`
    Phone,
}

impl Field {
    /// All validated fields, in record order.
    pub const ALL: [Field; 5] = [
        Field::Id,
        Field::Name,
        Field::Document,
        Field::Email,
        Field::Phone,
    ];

    /// The serialized key of this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Document => "document",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity, contact, and fiscal data of a person or company.
///
/// Serializes field-for-field as
/// `{"id", "name", "document", "email", "phone", "password"}` with
/// `document` and `phone` as unsigned integers.
///
/// `document` and `phone` are numeric, so leading zeros are not preserved.
/// `Debug` output redacts `password`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Hyphenated or compact UUID string.
    pub id: String,
    /// Display name.
    pub name: String,
    /// CPF or CNPJ number without separators.
    pub document: u64,
    /// E-mail address.
    pub email: String,
    /// Phone digits, country code optionally included.
    pub phone: u64,
    /// Opaque credential; never validated here.
    pub password: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("document", &self.document)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Client {
    /// Create an empty record with a fresh random identifier.
    pub fn new() -> Self {
        Self {
            id: ClientId::new().to_string(),
            ..Self::default()
        }
    }

    /// Check that `id` is a hyphenated or compact UUID.
    ///
    /// # Errors
    ///
    /// [`ClientError::EmptyField`] or [`ClientError::MalformedUuid`].
    pub fn validate_id(&self) -> Result<(), ClientError> {
        ClientId::parse(&self.id).map(|_| ())
    }

    /// Check that `name` is not empty.
    pub fn validate_name(&self) -> Result<(), ClientError> {
        if self.name.is_empty() {
            return Err(ClientError::EmptyField(Field::Name));
        }
        Ok(())
    }

    /// Check that `document` is a CPF or CNPJ, with the default
    /// [`CpfRemainder::Strict`] policy.
    ///
    /// # Errors
    ///
    /// [`ClientError::EmptyField`] when zero, [`ClientError::InvalidChecksum`]
    /// when neither checksum matches.
    pub fn validate_document(&self) -> Result<(), ClientError> {
        self.validate_document_with(CpfRemainder::default())
    }

    /// [`validate_document`](Self::validate_document) with an explicit CPF
    /// remainder policy.
    pub fn validate_document_with(&self, policy: CpfRemainder) -> Result<(), ClientError> {
        if self.document == 0 {
            return Err(ClientError::EmptyField(Field::Document));
        }
        if !fiscal::is_cpf(self.document, policy) && !fiscal::is_cnpj(self.document) {
            return Err(ClientError::InvalidChecksum);
        }
        Ok(())
    }

    /// Whether `document` passes the CPF check.
    pub fn is_document_cpf(&self) -> bool {
        fiscal::is_cpf(self.document, CpfRemainder::default())
    }

    /// Whether `document` passes the CNPJ check.
    pub fn is_document_cnpj(&self) -> bool {
        fiscal::is_cnpj(self.document)
    }

    /// The registry `document` belongs to, if any.
    pub fn document_kind(&self) -> Option<DocumentKind> {
        DocumentKind::classify(self.document, CpfRemainder::default())
    }

    /// `document` in punctuated form with leading zeros restored.
    pub fn formatted_document(&self) -> Option<String> {
        self.document_kind()
            .and_then(|kind| kind.format(self.document))
    }

    /// Check the e-mail syntax and that its domain has a mail exchange.
    ///
    /// Blocks for as long as `resolver` does.
    ///
    /// # Errors
    ///
    /// [`ClientError::EmptyField`], [`ClientError::MalformedEmail`] or
    /// [`ClientError::UnreachableDomain`].
    pub fn validate_email(&self, resolver: &dyn MailExchangeResolver) -> Result<(), ClientError> {
        let address = email::parse(&self.email)?;
        email::ensure_reachable(&address, resolver)
    }

    /// Check that `phone` resolves to a country and has a canonical form.
    ///
    /// # Errors
    ///
    /// [`ClientError::EmptyField`], [`ClientError::UnknownCountry`] or
    /// [`ClientError::InvalidPhoneFormat`].
    pub fn validate_phone(&self, resolver: &dyn NumberingPlanResolver) -> Result<(), ClientError> {
        phone::validate(self.phone, resolver).map(|_| ())
    }

    /// Country of `phone` per the numbering plan; `None` when `phone` is zero
    /// or unassignable.
    pub fn get_phone_country(&self, resolver: &dyn NumberingPlanResolver) -> Option<CountryCode> {
        phone::country_of(self.phone, resolver)
    }
}
