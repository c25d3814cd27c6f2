//! # Configuration State
//!
//! Configuration read once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`RIGMART_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization.

use std::path::PathBuf;

use rigmart_core::Money;
use serde::{Deserialize, Serialize};

/// Log filter used when neither `RUST_LOG` nor `RIGMART_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,rigmart_storefront=debug";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name shown in the header
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Explicit catalog seed file, if any
    pub catalog_path: Option<PathBuf>,

    /// tracing-subscriber filter directive
    #[serde(skip)]
    pub log_filter: String,
}

impl Default for ConfigState {
    /// Development defaults: Bangladeshi Taka, built-in catalog.
    fn default() -> Self {
        ConfigState {
            store_name: "RigMart".to_string(),
            currency_code: "BDT".to_string(),
            currency_symbol: "৳".to_string(),
            catalog_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `RIGMART_STORE_NAME`: Override store name
    /// - `RIGMART_CURRENCY_CODE`, `RIGMART_CURRENCY_SYMBOL`: Override currency
    /// - `RIGMART_CATALOG_PATH`: Load the catalog from this JSON file
    /// - `RIGMART_LOG`: Log filter when `RUST_LOG` is unset
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(name) = non_empty("RIGMART_STORE_NAME") {
            config.store_name = name;
        }

        if let Some(code) = non_empty("RIGMART_CURRENCY_CODE") {
            config.currency_code = code;
        }

        if let Some(symbol) = non_empty("RIGMART_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(path) = non_empty("RIGMART_CATALOG_PATH") {
            config.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(filter) = non_empty("RIGMART_LOG") {
            config.log_filter = filter;
        }

        config
    }

    /// Formats an amount in minor units as a currency string.
    ///
    /// ```rust
    /// use rigmart_storefront::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1250000), "৳12500.00");
    /// ```
    pub fn format_currency(&self, minor: i64) -> String {
        Money::from_minor(minor).format_with(&self.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_env() {
        let config = ConfigState::from_lookup(|_| None);
        assert_eq!(config, ConfigState::default());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("RIGMART_STORE_NAME", "PC Bazar"),
            ("RIGMART_CURRENCY_CODE", "USD"),
            ("RIGMART_CURRENCY_SYMBOL", "$"),
            ("RIGMART_CATALOG_PATH", "/tmp/catalog.json"),
            ("RIGMART_LOG", "warn"),
        ]);
        let config = ConfigState::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.store_name, "PC Bazar");
        assert_eq!(config.currency_code, "USD");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.format_currency(1099), "$10.99");
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = ConfigState::from_lookup(|k| {
            (k == "RIGMART_STORE_NAME").then(|| "   ".to_string())
        });
        assert_eq!(config.store_name, "RigMart");
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(0), "৳0.00");
        assert_eq!(config.format_currency(-550), "-৳5.50");
    }
}
