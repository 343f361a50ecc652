//! Configuration management for donationcart.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::cart::FeeSchedule;
use crate::error::{Error, Result};
use crate::money::Money;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "donationcart";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "DONATIONCART_";

/// The WHATWG "valid e-mail address" grammar used by `<input type=email>`.
///
/// Dotless domains such as `amina@example` are valid under it.
const DEFAULT_EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `DONATIONCART_`, sections split on `__`)
/// 2. TOML config file at `~/.config/donationcart/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Card processing fee configuration.
    pub fees: FeesConfig,
    /// Checkout form configuration.
    pub checkout: CheckoutConfig,
    /// Details about the receiving organization.
    pub organization: OrganizationConfig,
}

/// Card processing fee configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeesConfig {
    /// Percentage of the subtotal, in basis points (290 = 2.9%).
    pub percent_bps: u32,
    /// Fixed amount added to every card charge, in cents.
    pub fixed_cents: u64,
}

/// Checkout form configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Regex donor emails must match. `None` only checks for presence.
    pub email_pattern: Option<String>,
    /// Require an honoree name for in-honor and in-memory donations.
    pub require_honoree_name: bool,
    /// Require an employer name when employer matching is enabled.
    pub require_employer_name: bool,
    /// Prefix shown before the confirmation number.
    pub confirmation_prefix: String,
    /// Confirmation numbers are drawn from `0..confirmation_max`.
    pub confirmation_max: u32,
}

/// Details about the receiving organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationConfig {
    /// Display name.
    pub name: String,
    /// Address Zelle donations are sent to.
    pub zelle_email: String,
    /// Address donors contact with questions.
    pub support_email: String,
}

impl Default for FeesConfig {
    fn default() -> Self {
        let schedule = FeeSchedule::default();
        Self {
            percent_bps: schedule.percent_bps,
            fixed_cents: schedule.fixed.cents(),
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            email_pattern: Some(DEFAULT_EMAIL_PATTERN.to_string()),
            require_honoree_name: true,
            require_employer_name: true,
            confirmation_prefix: "IHC".to_string(),
            confirmation_max: 1_000_000,
        }
    }
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            name: "Ihsan Charity".to_string(),
            zelle_email: "donations@ihsancharity.org".to_string(),
            support_email: "support@ihsancharity.org".to_string(),
        }
    }
}

impl FeesConfig {
    /// The fee schedule these settings describe.
    #[must_use]
    pub fn schedule(&self) -> FeeSchedule {
        FeeSchedule {
            percent_bps: self.percent_bps,
            fixed: Money::from_cents(self.fixed_cents),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `DONATIONCART_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.fees.percent_bps > 10_000 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "percent_bps ({}) cannot be greater than 10000 (100%)",
                    self.fees.percent_bps
                ),
            });
        }

        if self.checkout.confirmation_max == 0 {
            return Err(Error::ConfigValidation {
                message: "confirmation_max must be greater than 0".to_string(),
            });
        }

        if self.checkout.confirmation_prefix.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "confirmation_prefix cannot be empty".to_string(),
            });
        }

        if let Some(pattern) = &self.checkout.email_pattern {
            if regex::Regex::new(pattern).is_err() {
                return Err(Error::ConfigValidation {
                    message: format!("invalid regex pattern: {pattern}"),
                });
            }
        }

        Ok(())
    }

    /// Get the card processing fee schedule.
    #[must_use]
    pub fn fee_schedule(&self) -> FeeSchedule {
        self.fees.schedule()
    }
}
