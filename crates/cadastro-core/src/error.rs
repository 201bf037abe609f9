//! # Error Hierarchy
//!
//! Structured error types for client validation, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Every [`ClientError`] is a local, field-scoped validation failure. None of
//! them is fatal: each `validate_*` operation returns exactly one outcome and
//! callers decide how to aggregate.

use thiserror::Error;

use crate::client::Field;

/// Field-scoped validation failure for a [`Client`](crate::Client) record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// A required field is empty (string) or zero (numeric).
    #[error("{0} should not be empty")]
    EmptyField(Field),

    /// The identifier is not a hyphenated or compact UUID.
    #[error("id should be a valid uuid")]
    MalformedUuid,

    /// The e-mail address does not match the `local@domain` grammar.
    #[error("email should have a valid email address format")]
    MalformedEmail,

    /// The e-mail domain has no mail-exchange record, or the lookup failed.
    #[error("email domain \"{0}\" has no reachable mail exchange")]
    UnreachableDomain(String),

    /// The document satisfies neither the CPF nor the CNPJ checksum.
    #[error("document should have a CPF or CNPJ number")]
    InvalidChecksum,

    /// The phone number does not map to any country in the numbering plan.
    #[error("phone should have defined country code")]
    UnknownCountry,

    /// The phone number could not be brought into canonical numeric form.
    #[error("phone should have a valid number")]
    InvalidPhoneFormat,
}

impl ClientError {
    /// The record field this failure is scoped to.
    pub fn field(&self) -> Field {
        match self {
            Self::EmptyField(field) => *field,
            Self::MalformedUuid => Field::Id,
            Self::MalformedEmail | Self::UnreachableDomain(_) => Field::Email,
            Self::InvalidChecksum => Field::Document,
            Self::UnknownCountry | Self::InvalidPhoneFormat => Field::Phone,
        }
    }
}

/// Errors reported by resolver backends (mail exchange, numbering plan).
///
/// These never reach callers of the validator directly; they collapse into
/// the corresponding [`ClientError`] and are logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// The lookup ran but failed for this target.
    #[error("lookup of \"{target}\" failed: {reason}")]
    Lookup {
        /// The domain or digit string that was looked up.
        target: String,
        /// Backend-specific description of the failure.
        reason: String,
    },

    /// The backend could not be reached at all.
    #[error("resolver unavailable: {0}")]
    Unavailable(String),
}

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable holds a value outside its accepted set.
    #[error("invalid value \"{value}\" for {var} (expected {expected})")]
    InvalidValue {
        /// The environment variable name.
        var: String,
        /// The rejected value.
        value: String,
        /// Human-readable list of accepted values.
        expected: String,
    },
}
