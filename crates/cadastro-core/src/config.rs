//! Validator configuration.
//!
//! Defaults match the behavior existing records were validated with. Override
//! via environment variables or explicit construction.

use crate::error::ConfigError;
use crate::fiscal::CpfRemainder;

const CPF_REMAINDER_VAR: &str = "CADASTRO_CPF_REMAINDER";
const MX_CHECK_VAR: &str = "CADASTRO_MX_CHECK";

/// Tunables for [`DocumentValidator`](crate::DocumentValidator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Treatment of a CPF weighted-sum remainder of 10.
    pub cpf_remainder: CpfRemainder,
    /// Whether e-mail validation queries the mail-exchange resolver. When
    /// false, only syntax is checked.
    pub mx_check: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            cpf_remainder: CpfRemainder::Strict,
            mx_check: true,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CADASTRO_CPF_REMAINDER`: `strict` or `canonical` (default: `strict`)
    /// - `CADASTRO_MX_CHECK`: `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`
    ///   (default: `true`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let cpf_remainder = match lookup(CPF_REMAINDER_VAR) {
            Some(raw) => parse_cpf_remainder(&raw)?,
            None => defaults.cpf_remainder,
        };
        let mx_check = match lookup(MX_CHECK_VAR) {
            Some(raw) => parse_bool(MX_CHECK_VAR, &raw)?,
            None => defaults.mx_check,
        };
        let config = Self {
            cpf_remainder,
            mx_check,
        };
        tracing::debug!(?config, "validator configuration loaded");
        Ok(config)
    }
}

fn parse_cpf_remainder(raw: &str) -> Result<CpfRemainder, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "strict" => Ok(CpfRemainder::Strict),
        "canonical" => Ok(CpfRemainder::Canonical),
        _ => Err(ConfigError::InvalidValue {
            var: CPF_REMAINDER_VAR.to_string(),
            value: raw.to_string(),
            expected: "strict or canonical".to_string(),
        }),
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            value: raw.to_string(),
            expected: "true or false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ValidatorConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ValidatorConfig::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(load(&[]).unwrap(), ValidatorConfig::default());
        let config = ValidatorConfig::default();
        assert_eq!(config.cpf_remainder, CpfRemainder::Strict);
        assert!(config.mx_check);
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("CADASTRO_CPF_REMAINDER", "Canonical"),
            ("CADASTRO_MX_CHECK", "off"),
        ])
        .unwrap();
        assert_eq!(config.cpf_remainder, CpfRemainder::Canonical);
        assert!(!config.mx_check);
    }

    #[test]
    fn rejects_unknown_remainder_policy() {
        let err = load(&[("CADASTRO_CPF_REMAINDER", "lenient")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref var, .. } if var == "CADASTRO_CPF_REMAINDER"));
    }

    #[test]
    fn rejects_unknown_bool() {
        let err = load(&[("CADASTRO_MX_CHECK", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("maybe"));
    }
}
