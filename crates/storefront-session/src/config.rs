//! # Storefront Configuration
//!
//! Store, pricing and discount settings loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_CURRENCY=EUR                                            │
//! │     STOREFRONT_TAX_RATE=8.25        (percent)                          │
//! │     STOREFRONT_TAX_RATE_BPS=825     (basis points, wins over percent)  │
//! │     STOREFRONT_STORE_NAME="Corner Shop"                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.storefront/... (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     USD, 10% tax, stock discount codes                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Corner Shop"
//! currency_code = "USD"
//!
//! [pricing]
//! tax_rate_bps = 1000        # 10%
//! min_chargeable_cents = 1
//!
//! # Optional. When present, replaces the stock codes entirely.
//! [[discounts]]
//! code = "SPRING15"
//! percent = 15
//! min_purchase_cents = 5000
//!
//! [[discounts]]
//! code = "TENOFF"
//! amount_cents = 1000
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use storefront_core::discount::{DiscountCatalog, DiscountRule};
use storefront_core::validation::{
    validate_currency_code, validate_discount_code, validate_tax_rate_bps,
};
use storefront_core::{Money, TaxRate, DEFAULT_CURRENCY_CODE, DEFAULT_TAX_RATE_BPS, MIN_CHARGEABLE_CENTS};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

const CONFIG_FILE_NAME: &str = "storefront.toml";

// =============================================================================
// Store Settings
// =============================================================================

/// Who is selling, in which currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    /// ISO 4217 code; every cart is priced in it.
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
}

fn default_store_name() -> String {
    "Storefront".to_string()
}

fn default_currency_code() -> String {
    DEFAULT_CURRENCY_CODE.to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_code: default_currency_code(),
        }
    }
}

// =============================================================================
// Pricing Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Tax rate in basis points (1000 = 10%).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Checkout rejects totals below this.
    #[serde(default = "default_min_chargeable_cents")]
    pub min_chargeable_cents: i64,
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE_BPS
}

fn default_min_chargeable_cents() -> i64 {
    MIN_CHARGEABLE_CENTS
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            tax_rate_bps: default_tax_rate_bps(),
            min_chargeable_cents: default_min_chargeable_cents(),
        }
    }
}

impl PricingSettings {
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    pub fn min_chargeable(&self) -> Money {
        Money::from_cents(self.min_chargeable_cents)
    }
}

// =============================================================================
// Discount Entries
// =============================================================================

/// One `[[discounts]]` entry. Exactly one of `percent` / `amount_cents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountEntry {
    pub code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_cents: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_purchase_cents: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount_cents: Option<i64>,
}

impl DiscountEntry {
    fn validate(&self) -> ConfigResult<()> {
        validate_discount_code(&self.code)?;

        match (self.percent, self.amount_cents) {
            (Some(pct), None) if pct > 100 => Err(ConfigError::Invalid(format!(
                "discount {}: percent must be at most 100, got {}",
                self.code, pct
            ))),
            (None, Some(cents)) if cents < 0 => Err(ConfigError::Invalid(format!(
                "discount {}: amount_cents must not be negative",
                self.code
            ))),
            (Some(_), None) | (None, Some(_)) => Ok(()),
            _ => Err(ConfigError::Invalid(format!(
                "discount {}: set exactly one of percent or amount_cents",
                self.code
            ))),
        }
    }

    /// Converts a validated entry into a rule.
    fn to_rule(&self) -> DiscountRule {
        let mut rule = match self.amount_cents {
            Some(cents) => DiscountRule::fixed(&self.code, Money::from_cents(cents)),
            None => DiscountRule::percentage(&self.code, self.percent.unwrap_or_default()),
        };
        if let Some(min) = self.min_purchase_cents {
            rule = rule.with_min_purchase(Money::from_cents(min));
        }
        if let Some(max) = self.max_discount_cents {
            rule = rule.with_max_discount(Money::from_cents(max));
        }
        rule
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    /// Replaces the stock discount codes when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounts: Option<Vec<DiscountEntry>>,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`storefront.toml`), if it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with overrides read from `var` instead of the
    /// process environment.
    pub fn load_with(
        config_path: Option<PathBuf>,
        var: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(var);
        config.validate()?;

        info!(
            store = %config.store.name,
            currency = %config.store.currency_code,
            tax_rate_bps = config.pricing.tax_rate_bps,
            "Storefront config loaded"
        );
        Ok(config)
    }

    /// Loads config or returns the defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document without touching the environment.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_currency_code(&self.store.currency_code)?;
        validate_tax_rate_bps(self.pricing.tax_rate_bps)?;

        if self.pricing.min_chargeable_cents < 0 {
            return Err(ConfigError::Invalid(
                "min_chargeable_cents must not be negative".into(),
            ));
        }

        for entry in self.discounts.iter().flatten() {
            entry.validate()?;
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    /// Applies `STOREFRONT_*` overrides from any key lookup.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("STOREFRONT_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(currency) = var("STOREFRONT_CURRENCY") {
            debug!(currency = %currency, "Overriding currency from environment");
            self.store.currency_code = currency.trim().to_uppercase();
        }

        if let Some(rate) = var("STOREFRONT_TAX_RATE") {
            match rate.trim().parse::<f64>() {
                Ok(pct) if pct >= 0.0 => {
                    self.pricing.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(rate = %rate, "Ignoring unparseable STOREFRONT_TAX_RATE"),
            }
        }

        if let Some(bps) = var("STOREFRONT_TAX_RATE_BPS") {
            match bps.trim().parse::<u32>() {
                Ok(bps) => {
                    debug!(bps, "Overriding tax rate from environment");
                    self.pricing.tax_rate_bps = bps;
                }
                Err(_) => warn!(bps = %bps, "Ignoring unparseable STOREFRONT_TAX_RATE_BPS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn currency_code(&self) -> &str {
        &self.store.currency_code
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.pricing.tax_rate()
    }

    pub fn min_chargeable(&self) -> Money {
        self.pricing.min_chargeable()
    }

    /// The discount catalog this store uses: configured entries, or the
    /// stock codes when none are configured.
    pub fn discount_catalog(&self) -> DiscountCatalog {
        match &self.discounts {
            Some(entries) => DiscountCatalog::new(entries.iter().map(DiscountEntry::to_rule)),
            None => DiscountCatalog::standard(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use storefront_core::discount::{DiscountCodeProvider, DiscountKind};

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.currency_code(), "USD");
        assert_eq!(config.tax_rate(), TaxRate::from_bps(1000));
        assert_eq!(config.min_chargeable(), Money::from_cents(1));
        assert!(config.discounts.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_file() {
        let config = StorefrontConfig::from_toml_str(
            r#"
            [store]
            name = "Corner Shop"
            currency_code = "EUR"

            [pricing]
            tax_rate_bps = 2000
            min_chargeable_cents = 50

            [[discounts]]
            code = "spring15"
            percent = 15
            min_purchase_cents = 5000

            [[discounts]]
            code = "TENOFF"
            amount_cents = 1000
            "#,
        )
        .unwrap();

        assert_eq!(config.store.name, "Corner Shop");
        assert_eq!(config.currency_code(), "EUR");
        assert_eq!(config.tax_rate().bps(), 2000);
        assert_eq!(config.min_chargeable().cents(), 50);
        assert!(config.validate().is_ok());

        let catalog = config.discount_catalog();
        assert_eq!(catalog.len(), 2);
        let spring = catalog.lookup("SPRING15").unwrap();
        assert_eq!(spring.kind, DiscountKind::Percentage { bps: 1500 });
        assert_eq!(spring.min_purchase, Some(Money::from_major(50)));
        assert!(catalog.lookup("SAVE10").is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = StorefrontConfig::from_toml_str("[store]\nname = \"Kiosk\"\n").unwrap();
        assert_eq!(config.store.name, "Kiosk");
        assert_eq!(config.currency_code(), "USD");
        assert_eq!(config.pricing, PricingSettings::default());
        assert_eq!(config.discount_catalog(), DiscountCatalog::standard());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = StorefrontConfig::from_toml_str("[pricing\ntax_rate_bps = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = StorefrontConfig::default();
        config.store.currency_code = "usd".to_string();
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.pricing.tax_rate_bps = 10_001;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.pricing.min_chargeable_cents = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_discount_entries() {
        let entry = |percent, amount_cents| DiscountEntry {
            code: "X1".to_string(),
            percent,
            amount_cents,
            min_purchase_cents: None,
            max_discount_cents: None,
        };

        assert!(entry(Some(10), None).validate().is_ok());
        assert!(entry(None, Some(500)).validate().is_ok());
        assert!(entry(None, None).validate().is_err());
        assert!(entry(Some(10), Some(500)).validate().is_err());
        assert!(entry(Some(101), None).validate().is_err());
        assert!(entry(None, Some(-1)).validate().is_err());

        let mut bad_code = entry(Some(10), None);
        bad_code.code = "NOT VALID".to_string();
        assert!(bad_code.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(vars(&[
            ("STOREFRONT_STORE_NAME", "Night Market"),
            ("STOREFRONT_CURRENCY", "gbp"),
            ("STOREFRONT_TAX_RATE", "8.25"),
        ]));

        assert_eq!(config.store.name, "Night Market");
        assert_eq!(config.currency_code(), "GBP");
        assert_eq!(config.pricing.tax_rate_bps, 825);
    }

    #[test]
    fn test_env_bps_wins_over_percent() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(vars(&[
            ("STOREFRONT_TAX_RATE", "5"),
            ("STOREFRONT_TAX_RATE_BPS", "725"),
        ]));
        assert_eq!(config.pricing.tax_rate_bps, 725);
    }

    #[test]
    fn test_env_garbage_is_ignored() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(vars(&[
            ("STOREFRONT_TAX_RATE", "lots"),
            ("STOREFRONT_TAX_RATE_BPS", "-3"),
        ]));
        assert_eq!(config.pricing.tax_rate_bps, DEFAULT_TAX_RATE_BPS);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("storefront-does-not-exist.toml");
        let config = StorefrontConfig::load_with(Some(path), vars(&[])).unwrap();

        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.store.name, "Storefront");
        assert_eq!(config.currency_code(), "USD");
        assert_eq!(config.tax_rate(), TaxRate::from_bps(DEFAULT_TAX_RATE_BPS));
        assert_eq!(config.min_chargeable(), Money::from_cents(MIN_CHARGEABLE_CENTS));
        assert!(config.discounts.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "storefront-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[pricing]\nmin_chargeable_cents = 100\n").unwrap();

        let config = StorefrontConfig::load_with(Some(path.clone()), vars(&[])).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.min_chargeable().cents(), 100);
        assert_eq!(config.tax_rate(), TaxRate::from_bps(DEFAULT_TAX_RATE_BPS));
    }

    #[test]
    fn test_load_applies_overrides_after_file() {
        let path = std::env::temp_dir().join(format!(
            "storefront-config-override-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[pricing]\ntax_rate_bps = 500\n").unwrap();

        let config = StorefrontConfig::load_with(
            Some(path.clone()),
            vars(&[("STOREFRONT_TAX_RATE_BPS", "725")]),
        )
        .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.pricing.tax_rate_bps, 725);
    }

    #[test]
    fn test_load_rejects_invalid_override() {
        let path = std::env::temp_dir().join("storefront-does-not-exist.toml");
        let result =
            StorefrontConfig::load_with(Some(path), vars(&[("STOREFRONT_CURRENCY", "dollars")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_serialization() {
        let config = StorefrontConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[store]"));
        assert!(toml_str.contains("[pricing]"));
        assert_eq!(StorefrontConfig::from_toml_str(&toml_str).unwrap(), config);
    }
}
