//! # Phone Numbers and Numbering Plans
//!
//! A phone number is stored as an unsigned integer: digits only, no `+`,
//! country calling code optionally embedded. Validation asks a
//! [`NumberingPlanResolver`] which country the digits belong to, then asks it
//! for the canonical form of the number in that country.
//!
//! [`CallingPlan`] is the built-in resolver, backed by the libphonenumber
//! metadata shipped with the `phonenumber` crate.

use phonenumber::PhoneNumber;

use crate::client::Field;
use crate::error::ClientError;
use crate::identity::CountryCode;

/// Maps phone digit strings to countries and canonical forms.
///
/// Implementations must be `Send + Sync` and may block.
pub trait NumberingPlanResolver: Send + Sync {
    /// Country the digit string belongs to, or `None` if no region of the
    /// plan can be assigned.
    fn country_for(&self, digits: &str) -> Option<CountryCode>;

    /// Canonical form of `digits` in `country`: calling code followed by the
    /// national significant number. `None` if the digits are not a valid
    /// number there.
    fn canonicalize(&self, digits: &str, country: &CountryCode) -> Option<String>;
}

/// Country of `phone`; `None` when `phone` is zero or unassignable.
pub fn country_of(phone: u64, resolver: &dyn NumberingPlanResolver) -> Option<CountryCode> {
    if phone == 0 {
        return None;
    }
    resolver.country_for(&phone.to_string())
}

/// Validate `phone` and return its canonical numeric form.
///
/// # Errors
///
/// - [`ClientError::EmptyField`] if `phone` is zero.
/// - [`ClientError::UnknownCountry`] if no country can be assigned.
/// - [`ClientError::InvalidPhoneFormat`] if the canonical form is missing,
///   non-numeric, or zero.
pub fn validate(phone: u64, resolver: &dyn NumberingPlanResolver) -> Result<u64, ClientError> {
    if phone == 0 {
        return Err(ClientError::EmptyField(Field::Phone));
    }
    let digits = phone.to_string();
    let country = resolver
        .country_for(&digits)
        .ok_or(ClientError::UnknownCountry)?;
    let canonical = resolver
        .canonicalize(&digits, &country)
        .ok_or(ClientError::InvalidPhoneFormat)?;
    match canonical.parse::<u64>() {
        Ok(n) if n != 0 => Ok(n),
        _ => Err(ClientError::InvalidPhoneFormat),
    }
}

// ---------------------------------------------------------------------------
// Built-in numbering plan
// ---------------------------------------------------------------------------

/// Brazilian country calling code.
const BR_CALLING_CODE: u16 = 55;

/// Numbering plan backed by libphonenumber metadata (`phonenumber` crate).
///
/// A digit string is assigned to a region when `+<digits>` parses and is a
/// valid number there. Brazilian mobile numbers written in the 8-digit form
/// that predates the 2016 ninth-digit migration are read with the leading 9
/// restored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingPlan {
    _private: (),
}

impl CallingPlan {
    /// Create the built-in plan.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NumberingPlanResolver for CallingPlan {
    fn country_for(&self, digits: &str) -> Option<CountryCode> {
        let number = parse_valid(None, &format!("+{digits}"))?;
        region_of(&number)
    }

    fn canonicalize(&self, digits: &str, country: &CountryCode) -> Option<String> {
        let id = country.as_str().parse::<phonenumber::country::Id>().ok()?;
        let number = parse_valid(None, &format!("+{digits}"))
            .filter(|n| region_of(n).as_ref() == Some(country))
            .or_else(|| parse_valid(Some(id), digits))
            .filter(|n| region_of(n).as_ref() == Some(country))?;
        let e164 = number.format().mode(phonenumber::Mode::E164).to_string();
        Some(e164.trim_start_matches('+').to_string())
    }
}

/// Parse `raw` and keep it only if valid, retrying Brazilian legacy mobile
/// numbers with the ninth digit restored.
fn parse_valid(country: Option<phonenumber::country::Id>, raw: &str) -> Option<PhoneNumber> {
    let number = phonenumber::parse(country, raw).ok()?;
    if phonenumber::is_valid(&number) {
        return Some(number);
    }
    let upgraded = with_ninth_digit(&number)?;
    phonenumber::parse(None, upgraded)
        .ok()
        .filter(phonenumber::is_valid)
}

/// `+55 AA NNNN-NNNN` with a mobile leading digit (6-9) becomes
/// `+55 AA 9NNNN-NNNN`.
fn with_ninth_digit(number: &PhoneNumber) -> Option<String> {
    if number.code().value() != BR_CALLING_CODE {
        return None;
    }
    let national = number.national().value().to_string();
    let subscriber_lead = national.as_bytes().get(2)?;
    if national.len() != 10 || !(b'6'..=b'9').contains(subscriber_lead) {
        return None;
    }
    Some(format!(
        "+{BR_CALLING_CODE}{}9{}",
        &national[..2],
        &national[2..]
    ))
}

fn region_of(number: &PhoneNumber) -> Option<CountryCode> {
    let id = number.country().id()?;
    // Region ids are named after their ISO 3166-1 alpha-2 code.
    CountryCode::new(format!("{id:?}")).ok()
}
