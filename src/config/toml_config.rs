use crate::core::catalog::Catalog;
use crate::domain::model::{PaymentMethod, ServiceOffering};
use crate::utils::error::{QuoteError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Floor of -99%: a modifier of -100% or lower would make the price zero or negative.
const MIN_MODIFIER: f64 = -0.99;
const MAX_MODIFIER: f64 = 10.0;

/// A catalog file, e.g.
///
/// ```toml
/// default_payment = "pix"
///
/// [[services]]
/// id = "ensaio-casal"
/// name = "ENSAIO DE CASAL"
/// photo_count = 40
/// hourly_rate = 250.0
/// min_hours = 2
///
/// [[payments]]
/// id = "pix"
/// name = "PIX"
/// modifier = -0.10
/// description = "10% de desconto"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub catalog: Option<CatalogInfo>,
    pub default_payment: Option<String>,
    #[serde(default)]
    pub services: Vec<ServiceOffering>,
    #[serde(default)]
    pub payments: Vec<PaymentMethod>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogInfo {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

impl CatalogConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuoteError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| QuoteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of the environment variable. Unset
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn into_catalog(self) -> Result<Catalog> {
        Catalog::from_config(self)
    }

    fn validate_services(&self) -> Result<()> {
        if self.services.is_empty() {
            return Err(QuoteError::MissingConfigError {
                field: "services".to_string(),
            });
        }
        validation::validate_unique_ids("services.id", self.services.iter().map(|s| s.id.as_str()))?;

        for service in &self.services {
            validation::validate_non_empty_string("services.id", &service.id)?;
            validation::validate_non_empty_string("services.name", &service.name)?;
            validation::validate_positive_amount(
                &format!("services.{}.hourly_rate", service.id),
                service.hourly_rate,
            )?;
            validation::validate_positive_number(
                &format!("services.{}.min_hours", service.id),
                service.min_hours,
                1,
            )?;
        }
        Ok(())
    }

    fn validate_payments(&self) -> Result<()> {
        if self.payments.is_empty() {
            return Err(QuoteError::MissingConfigError {
                field: "payments".to_string(),
            });
        }
        validation::validate_unique_ids("payments.id", self.payments.iter().map(|p| p.id.as_str()))?;

        for payment in &self.payments {
            validation::validate_non_empty_string("payments.id", &payment.id)?;
            validation::validate_non_empty_string("payments.name", &payment.name)?;
            validation::validate_range(
                &format!("payments.{}.modifier", payment.id),
                payment.modifier,
                MIN_MODIFIER,
                MAX_MODIFIER,
            )?;
        }

        if let Some(default_payment) = &self.default_payment {
            if !self.payments.iter().any(|p| &p.id == default_payment) {
                return Err(QuoteError::InvalidConfigValueError {
                    field: "default_payment".to_string(),
                    value: default_payment.clone(),
                    reason: "Not one of the declared payment methods".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        self.validate_services()?;
        self.validate_payments()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
default_payment = "pix"

[catalog]
name = "Estúdio"

[[services]]
id = "ensaio-casal"
name = "ENSAIO DE CASAL"
photo_count = 40
hourly_rate = 250.0
min_hours = 2

[[payments]]
id = "pix"
name = "PIX"
modifier = -0.10
description = "10% de desconto"

[[payments]]
id = "credito-1x"
name = "Crédito 1x"
modifier = 0.0
description = "Sem alteração"
"#;

    #[test]
    fn test_parse_basic_catalog() {
        let config = CatalogConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.catalog.as_ref().unwrap().name, "Estúdio");
        assert_eq!(config.services.len(), 1);
        assert_eq!(config.payments.len(), 2);
        assert!(config.validate().is_ok());

        let catalog = config.into_catalog().unwrap();
        assert_eq!(catalog.default_payment(), "pix");
        assert_eq!(catalog.service("ensaio-casal").unwrap().min_hours, 2);
    }

    #[test]
    fn test_env_var_substitution() {
        // Tests share the process environment; this variable name must stay
        // unique to this test.
        std::env::set_var("PHOTO_QUOTE_TEST_RATE", "275.5");

        let content = BASIC.replace("hourly_rate = 250.0", "hourly_rate = ${PHOTO_QUOTE_TEST_RATE}");
        let config = CatalogConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.services[0].hourly_rate, 275.5);

        std::env::remove_var("PHOTO_QUOTE_TEST_RATE");
    }

    #[test]
    fn test_unset_env_var_is_left_as_written() {
        let content = "default_payment = \"${PHOTO_QUOTE_TEST_NEVER_SET}\"";
        let config = CatalogConfig::from_toml_str(content).unwrap();
        assert_eq!(
            config.default_payment.as_deref(),
            Some("${PHOTO_QUOTE_TEST_NEVER_SET}")
        );
    }

    #[test]
    fn test_rejects_zero_min_hours() {
        let content = BASIC.replace("min_hours = 2", "min_hours = 0");
        let config = CatalogConfig::from_toml_str(&content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_default_payment() {
        let content = BASIC.replace("default_payment = \"pix\"", "default_payment = \"boleto\"");
        let config = CatalogConfig::from_toml_str(&content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(QuoteError::InvalidConfigValueError { ref field, .. }) if field == "default_payment"
        ));
    }

    #[test]
    fn test_rejects_duplicate_service_ids() {
        let duplicate = r#"
[[services]]
id = "ensaio-casal"
name = "OUTRO"
photo_count = 10
hourly_rate = 100.0
min_hours = 1
"#;
        let content = format!("{}{}", BASIC, duplicate);
        let config = CatalogConfig::from_toml_str(&content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_missing_payments() {
        let content = r#"
[[services]]
id = "mini"
name = "MINI"
photo_count = 10
hourly_rate = 100.0
min_hours = 1
"#;
        let config = CatalogConfig::from_toml_str(content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(QuoteError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            CatalogConfig::from_toml_str("[[services]\nid ="),
            Err(QuoteError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_catalog_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = CatalogConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.services[0].id, "ensaio-casal");
    }
}
