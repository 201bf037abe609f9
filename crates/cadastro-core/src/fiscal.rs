//! # Fiscal Document Checksums
//!
//! Check-digit verification for Brazilian taxpayer registry numbers stored as
//! unsigned integers:
//!
//! - **CPF** (individuals): 11 digits, the last two are check digits.
//! - **CNPJ** (organizations): 14 digits, the last two are check digits.
//!
//! Because documents are stored numerically, leading zeros are lost. Both
//! checks therefore accept a range of digit counts and weight digits by their
//! place value from the low end, so a number that lost its leading zeros
//! verifies against its remaining digits.
//!
//! All arithmetic is exact integer division and modulo.

use serde::{Deserialize, Serialize};

/// Fewest decimal digits accepted as a CPF.
pub const CPF_MIN_DIGITS: u32 = 8;
/// Most decimal digits accepted as a CPF.
pub const CPF_MAX_DIGITS: u32 = 12;
/// Fewest decimal digits accepted as a CNPJ.
pub const CNPJ_MIN_DIGITS: u32 = 12;
/// Most decimal digits accepted as a CNPJ.
pub const CNPJ_MAX_DIGITS: u32 = 16;

/// How the CPF check treats a weighted-sum remainder of 10.
///
/// The official algorithm maps a remainder of 10 to check digit 0. Records
/// validated by earlier systems were checked without that step, so
/// [`CpfRemainder::Strict`] is the default: such numbers (for example
/// `123.456.789-09`) are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CpfRemainder {
    /// A remainder of 10 never matches a check digit.
    #[default]
    Strict,
    /// A remainder of 10 is read as check digit 0.
    Canonical,
}

impl CpfRemainder {
    fn reduce(self, remainder: u64) -> u64 {
        match self {
            Self::Strict => remainder,
            Self::Canonical if remainder == 10 => 0,
            Self::Canonical => remainder,
        }
    }
}

/// Which fiscal registry a document number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Individual taxpayer (Cadastro de Pessoas Físicas).
    Cpf,
    /// Organization taxpayer (Cadastro Nacional da Pessoa Jurídica).
    Cnpj,
}

impl DocumentKind {
    /// Classify a document number by its checksum.
    ///
    /// A 12-digit value may in principle satisfy both checks; it is then
    /// reported as a CPF.
    pub fn classify(value: u64, policy: CpfRemainder) -> Option<Self> {
        if is_cpf(value, policy) {
            Some(Self::Cpf)
        } else if is_cnpj(value) {
            Some(Self::Cnpj)
        } else {
            None
        }
    }

    /// Nominal digit count of a document of this kind.
    pub fn width(self) -> usize {
        match self {
            Self::Cpf => 11,
            Self::Cnpj => 14,
        }
    }

    /// Render `value` in the registry's punctuated form, restoring leading
    /// zeros: `529.982.247-25` or `11.222.333/0001-81`.
    ///
    /// Returns `None` if the value has more digits than the kind allows.
    pub fn format(self, value: u64) -> Option<String> {
        let digits = format!("{value:0width$}", width = self.width());
        if digits.len() != self.width() {
            return None;
        }
        let formatted = match self {
            Self::Cpf => format!(
                "{}.{}.{}-{}",
                &digits[..3],
                &digits[3..6],
                &digits[6..9],
                &digits[9..]
            ),
            Self::Cnpj => format!(
                "{}.{}.{}/{}-{}",
                &digits[..2],
                &digits[2..5],
                &digits[5..8],
                &digits[8..12],
                &digits[12..]
            ),
        };
        Some(formatted)
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpf => write!(f, "CPF"),
            Self::Cnpj => write!(f, "CNPJ"),
        }
    }
}

/// Number of decimal digits in `value` (0 for zero).
pub fn digit_count(value: u64) -> u32 {
    value.checked_ilog10().map_or(0, |log| log + 1)
}

/// Decimal digit at place value `10^place`.
fn digit_at(value: u64, place: u32) -> u64 {
    (value / 10u64.pow(place)) % 10
}

/// The declared check digits: (tens place, units place).
fn check_digits(value: u64) -> (u64, u64) {
    ((value % 100) / 10, value % 10)
}

/// Verify the CPF check digits of `value`.
pub fn is_cpf(value: u64, policy: CpfRemainder) -> bool {
    let len = digit_count(value);
    if value == 0 || !(CPF_MIN_DIGITS..=CPF_MAX_DIGITS).contains(&len) {
        return false;
    }

    let (dig1, dig2) = check_digits(value);
    let mut val1 = 0u64;
    let mut val2 = 0u64;
    // Position i counts from the low end, 1-indexed; 1 and 2 are the check digits.
    for i in 3..=len {
        let x = digit_at(value, i - 1);
        val1 += x * u64::from(i - 1);
        val2 += x * u64::from(i);
    }
    val2 += dig1 * 2;

    let val1 = policy.reduce((val1 * 10) % 11);
    let val2 = policy.reduce((val2 * 10) % 11);
    val1 == dig1 && val2 == dig2
}

/// Verify the CNPJ check digits of `value`.
pub fn is_cnpj(value: u64) -> bool {
    let len = digit_count(value);
    if value == 0 || !(CNPJ_MIN_DIGITS..=CNPJ_MAX_DIGITS).contains(&len) {
        return false;
    }

    let (dig1, dig2) = check_digits(value);
    let mut val1 = 0u64;
    let mut val2 = 0u64;
    for i in 0..=len - 3 {
        let x = digit_at(value, i + 2);
        val1 += x * u64::from(i % 8 + 2);
        val2 += x * u64::from((i + 1) % 8 + 2);
    }
    val2 += dig1 * 2;

    cnpj_digit(val1) == dig1 && cnpj_digit(val2) == dig2
}

fn cnpj_digit(sum: u64) -> u64 {
    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}
