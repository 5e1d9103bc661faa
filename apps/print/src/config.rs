//! # Print Configuration
//!
//! Shop settings loaded once at startup and passed by reference to the
//! renderer.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SMARTLINE_*`, nested keys with `__`,
//!    e.g. `SMARTLINE_COMPANY__INN`)
//! 2. Config file (`--config smartline.toml`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after loading.

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use smartline_core::format::{format_rub, format_work_order_number, Precision};
use smartline_core::validation::validate_number_prefix;
use smartline_core::{Money, ValidationError, WorkOrder, DEFAULT_NUMBER_PREFIX};
use tracing::debug;

use crate::error::PrintResult;

pub const ENV_PREFIX: &str = "SMARTLINE";

/// Legal requisites printed in the document footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: String,
    pub inn: String,
    pub kpp: String,
    pub ogrn: String,
    pub address: String,
    pub director: String,
    pub email: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        CompanyInfo {
            name: "ООО \"КОНТАВТО\"".to_string(),
            inn: "2465155610".to_string(),
            kpp: "246501001".to_string(),
            ogrn: "1162468118010".to_string(),
            address: "660020, Красноярский край, г. Красноярск, Советский р-н, \
                      ул. Дудинская, д. 3, стр. 2, офис 202"
                .to_string(),
            director: "Бойко Олег Сергеевич".to_string(),
            email: "osmolovskaya1707@mail.ru".to_string(),
        }
    }
}

impl CompanyInfo {
    /// "ИНН … / КПП … / ОГРН …", skipping empty fields.
    pub fn requisites_line(&self) -> String {
        [("ИНН", &self.inn), ("КПП", &self.kpp), ("ОГРН", &self.ogrn)]
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(label, value)| format!("{label} {value}"))
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    /// Shown at the top of every document.
    pub shop_name: String,

    pub shop_tagline: String,

    /// Ticket code prefix, "ЗН-" by default. Used when an order arrives
    /// without a number.
    pub number_prefix: String,

    /// Fraction digits for amounts in the document.
    pub precision: Precision,

    pub company: CompanyInfo,
}

impl Default for PrintConfig {
    fn default() -> Self {
        PrintConfig {
            shop_name: "Smartline".to_string(),
            shop_tagline: "Установочный центр".to_string(),
            number_prefix: DEFAULT_NUMBER_PREFIX.to_string(),
            precision: Precision::Rubles,
            company: CompanyInfo::default(),
        }
    }
}

impl PrintConfig {
    /// Loads defaults, then the optional file, then `SMARTLINE_*` variables.
    pub fn load(file: Option<&Path>) -> PrintResult<Self> {
        Self::load_with_env(file, None)
    }

    /// Like [`PrintConfig::load`], with an explicit environment map instead
    /// of the process environment when `env` is `Some`.
    pub fn load_with_env(
        file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> PrintResult<Self> {
        let mut builder = Config::builder();

        if let Some(path) = file {
            debug!(path = %path.display(), "Reading config file");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        let config: PrintConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!(
            prefix = %config.number_prefix,
            precision = ?config.precision,
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_number_prefix(&self.number_prefix)?;

        if self.shop_name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "shop_name".to_string(),
            });
        }

        Ok(())
    }

    /// Ticket code for a backend id, e.g. "ЗН-0042".
    pub fn work_order_number(&self, id: i64) -> String {
        format_work_order_number(&self.number_prefix, id)
    }

    /// The order's own number, or one built from its id when blank.
    pub fn display_number(&self, order: &WorkOrder) -> String {
        if order.number.trim().is_empty() {
            self.work_order_number(order.id)
        } else {
            order.number.clone()
        }
    }

    /// Formats an amount at the configured precision.
    pub fn format_amount(&self, amount: Money) -> String {
        format_rub(amount, self.precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = PrintConfig::load_with_env(None, env(&[])).unwrap();
        assert_eq!(config, PrintConfig::default());
        assert_eq!(config.work_order_number(42), "ЗН-0042");
        assert_eq!(config.format_amount(Money::from_kopecks(350_000)), "3\u{a0}500\u{a0}₽");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
number_prefix = "WO-"
precision = "kopecks"

[company]
name = "ИП Смирнов"
"#
        )
        .unwrap();

        let config = PrintConfig::load_with_env(Some(file.path()), env(&[])).unwrap();
        assert_eq!(config.number_prefix, "WO-");
        assert_eq!(config.precision, Precision::Kopecks);
        assert_eq!(config.company.name, "ИП Смирнов");
        // Untouched nested fields keep their defaults.
        assert_eq!(config.company.inn, CompanyInfo::default().inn);
        assert_eq!(config.shop_name, "Smartline");
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "number_prefix = \"WO-\"").unwrap();

        let config = PrintConfig::load_with_env(
            Some(file.path()),
            env(&[
                ("SMARTLINE_NUMBER_PREFIX", "НЗ-"),
                ("SMARTLINE_COMPANY__INN", "1234567890"),
            ]),
        )
        .unwrap();
        assert_eq!(config.number_prefix, "НЗ-");
        assert_eq!(config.company.inn, "1234567890");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = PrintConfig::load_with_env(
            Some(Path::new("/nonexistent/smartline.toml")),
            env(&[]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        let result = PrintConfig::load_with_env(None, env(&[("SMARTLINE_NUMBER_PREFIX", "З Н")]));
        assert!(matches!(
            result,
            Err(crate::error::PrintError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_display_number_falls_back_to_prefix_and_id() {
        let config = PrintConfig::load_with_env(None, env(&[("SMARTLINE_NUMBER_PREFIX", "WO-")])).unwrap();

        let mut order = WorkOrder::new(42, "", "Иванов", Default::default());
        assert_eq!(config.display_number(&order), "WO-0042");

        order.number = "ЗН-0042".to_string();
        assert_eq!(config.display_number(&order), "ЗН-0042");
    }

    #[test]
    fn test_requisites_line_skips_empty() {
        let mut company = CompanyInfo::default();
        company.kpp.clear();
        assert_eq!(
            company.requisites_line(),
            "ИНН 2465155610 / ОГРН 1162468118010"
        );
    }
}
