//! # Identity Newtypes
//!
//! Domain-primitive newtypes used by the client record.
//!
//! ## Validation
//!
//! [`ClientId`] is always valid by construction; [`ClientId::parse`] is the
//! single place where a raw identifier string is checked. [`CountryCode`]
//! validates the ISO 3166-1 alpha-2 shape at construction time, including
//! when deserialized.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::Field;
use crate::error::ClientError;

/// Length of the canonical hyphenated form (8-4-4-4-12).
const HYPHENATED_LEN: usize = 36;
/// Length of the compact form (32 hex digits, no hyphens).
const SIMPLE_LEN: usize = 32;

/// Implements `Deserialize` for a string newtype by routing the raw string
/// through the type's `new()` constructor.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// ClientId
// ---------------------------------------------------------------------------

/// Identifier of a client record.
///
/// Any UUID version is accepted when parsing; freshly generated identifiers
/// are random (v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Create a new random client identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a client identifier.
    ///
    /// Accepts the canonical hyphenated form (`8-4-4-4-12`) and the compact
    /// 32-hex-digit form, in either letter case. Braced and URN forms are
    /// rejected.
    ///
    /// # Errors
    ///
    /// - [`ClientError::EmptyField`] if `raw` is empty.
    /// - [`ClientError::MalformedUuid`] for any other non-UUID input.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        if raw.is_empty() {
            return Err(ClientError::EmptyField(Field::Id));
        }
        if raw.len() != HYPHENATED_LEN && raw.len() != SIMPLE_LEN {
            return Err(ClientError::MalformedUuid);
        }
        Uuid::try_parse(raw)
            .map(Self)
            .map_err(|_| ClientError::MalformedUuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ClientId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ClientId {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// CountryCode
// ---------------------------------------------------------------------------

/// ISO 3166-1 alpha-2 country code, stored upper-case (`"BR"`, `"US"`).
///
/// Only the shape is checked: two ASCII letters. Whether the code is actually
/// assigned is up to the numbering plan that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CountryCode(String);

impl_validating_deserialize!(CountryCode);

impl CountryCode {
    /// Create a country code, validating the two-letter shape.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnknownCountry`] if the value is not exactly
    /// two ASCII letters.
    pub fn new(value: impl Into<String>) -> Result<Self, ClientError> {
        let s = value.into();
        if s.len() != 2 || !s.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ClientError::UnknownCountry);
        }
        Ok(Self(s.to_ascii_uppercase()))
    }

    /// Access the alpha-2 string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<&str> for CountryCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
