#![deny(missing_docs)]

//! # cadastro-core — Client Record Validation
//!
//! Validates a single `Client` record (identity, contact, and Brazilian
//! fiscal-registration data) before it is persisted. Dependencies are
//! limited to `serde`, `thiserror`, `uuid`, `regex`, `once_cell`,
//! `phonenumber`, and `tracing`.
//!
//! ## Design Principles
//!
//! 1. **Field-scoped results.** Every `validate_*` operation returns one
//!    [`ClientError`] or success. [`ValidationReport`] collects outcomes per
//!    field without merging them.
//!
//! 2. **Exact checksum arithmetic.** CPF and CNPJ check digits are verified
//!    with integer division and modulo only (see [`fiscal`]).
//!
//! 3. **Injected collaborators.** Mail-exchange lookup and numbering-plan
//!    resolution sit behind the [`MailExchangeResolver`] and
//!    [`NumberingPlanResolver`] traits. The crate performs no network I/O.
//!
//! 4. **Immutable statics only.** The e-mail pattern and the numbering-plan
//!    metadata are initialized once and never mutated.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()`, `.unwrap()`, or `.expect()` outside tests, with one
//!   exception: compiling a constant regex pattern inside a static
//!   initializer may `.expect()`. Each such pattern is forced by a unit
//!   test, so a bad pattern fails the test suite instead of a caller.

pub mod client;
pub mod config;
pub mod email;
pub mod error;
pub mod fiscal;
pub mod identity;
pub mod phone;
pub mod validator;

// Re-export primary types at crate root for ergonomic imports.
pub use client::{Client, Field};
pub use config::ValidatorConfig;
pub use email::{EmailAddress, MailExchangeResolver, MxRecord, StaticMailExchange};
pub use error::{ClientError, ConfigError, ResolverError};
pub use fiscal::{is_cnpj, is_cpf, CpfRemainder, DocumentKind};
pub use identity::{ClientId, CountryCode};
pub use phone::{CallingPlan, NumberingPlanResolver};
pub use validator::{DocumentValidator, ValidationReport};
