//! # E-mail Validation
//!
//! Syntax check against a `local@domain` grammar followed by a mail-exchange
//! reachability check on the domain part.
//!
//! ## Architecture
//!
//! The [`MailExchangeResolver`] trait abstracts over the DNS backend.
//! Deployments implement it against their resolver of choice; tests and
//! offline environments use [`StaticMailExchange`]. The validator never
//! performs network I/O itself.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::client::Field;
use crate::error::{ClientError, ResolverError};

/// Local part of printable specials, then dot-separated domain labels of at
/// most 63 characters that neither start nor end with a hyphen. The grammar
/// admits exactly one `@`.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
        r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    ))
    .expect("e-mail pattern is a valid regex")
});

/// A syntactically valid e-mail address split at its `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress {
    local: String,
    domain: String,
}

impl EmailAddress {
    /// The part before `@`.
    pub fn local(&self) -> &str {
        &self.local
    }

    /// The part after `@`.
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.local, self.domain)
    }
}

impl std::str::FromStr for EmailAddress {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse an e-mail address.
///
/// # Errors
///
/// - [`ClientError::EmptyField`] if `raw` is empty or whitespace.
/// - [`ClientError::MalformedEmail`] if `raw` does not match the grammar,
///   which includes having zero or several `@`.
pub fn parse(raw: &str) -> Result<EmailAddress, ClientError> {
    if raw.trim().is_empty() {
        return Err(ClientError::EmptyField(Field::Email));
    }
    if !EMAIL_PATTERN.is_match(raw) {
        return Err(ClientError::MalformedEmail);
    }
    let (local, domain) = raw.split_once('@').ok_or(ClientError::MalformedEmail)?;
    Ok(EmailAddress {
        local: local.to_string(),
        domain: domain.to_string(),
    })
}

/// Require at least one mail-exchange record for the address's domain.
///
/// Resolver errors and empty answers both yield
/// [`ClientError::UnreachableDomain`]; the resolver error is logged.
pub fn ensure_reachable(
    address: &EmailAddress,
    resolver: &dyn MailExchangeResolver,
) -> Result<(), ClientError> {
    match resolver.resolve(address.domain()) {
        Ok(records) if !records.is_empty() => Ok(()),
        Ok(_) => {
            tracing::debug!(domain = address.domain(), "no mail exchange records");
            Err(ClientError::UnreachableDomain(address.domain().to_string()))
        }
        Err(e) => {
            tracing::warn!(
                domain = address.domain(),
                resolver = resolver.resolver_name(),
                error = %e,
                "mail exchange lookup failed"
            );
            Err(ClientError::UnreachableDomain(address.domain().to_string()))
        }
    }
}

/// One mail-exchange record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MxRecord {
    /// Lower values are preferred.
    pub preference: u16,
    /// Host name of the mail server.
    pub exchange: String,
}

/// Resolves the mail-exchange records of a domain.
///
/// Implementations must be `Send + Sync` so one resolver can be shared by
/// validators running on different threads. Calls may block; no timeout is
/// applied by the validator.
pub trait MailExchangeResolver: Send + Sync {
    /// Look up the MX records of `domain`.
    fn resolve(&self, domain: &str) -> Result<Vec<MxRecord>, ResolverError>;

    /// Human-readable name of this implementation, used in log output.
    fn resolver_name(&self) -> &str {
        "mail-exchange"
    }
}

/// In-memory mail-exchange table.
///
/// Domains are matched case-insensitively. Unknown domains resolve to an
/// empty record list.
#[derive(Debug, Clone, Default)]
pub struct StaticMailExchange {
    records: HashMap<String, Vec<MxRecord>>,
}

impl StaticMailExchange {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record for `domain` pointing at `exchange`, with preference 10.
    pub fn with_domain(mut self, domain: &str, exchange: &str) -> Self {
        self.insert(
            domain,
            MxRecord {
                preference: 10,
                exchange: exchange.to_string(),
            },
        );
        self
    }

    /// Add a record for `domain`.
    pub fn insert(&mut self, domain: &str, record: MxRecord) {
        self.records
            .entry(domain.to_ascii_lowercase())
            .or_default()
            .push(record);
    }
}

impl MailExchangeResolver for StaticMailExchange {
    fn resolve(&self, domain: &str) -> Result<Vec<MxRecord>, ResolverError> {
        let mut records = self
            .records
            .get(&domain.to_ascii_lowercase())
            .cloned()
            .unwrap_or_default();
        records.sort_by_key(|r| r.preference);
        Ok(records)
    }

    fn resolver_name(&self) -> &str {
        "StaticMailExchange"
    }
}
