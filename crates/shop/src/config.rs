//! Shop configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional; [`ShopConfig::default`] matches the constants the shop
//! shipped with.
//!
//! - `ECYCLE_ADMIN_EMAIL` - Account granted admin access
//!   (default: admin@ecyclehub.com)
//! - `ECYCLE_TAX_RATE` - Flat tax rate applied at checkout, e.g. `0.10`.
//!   Unset or `0` means no tax.
//! - `ECYCLE_DELIVERY_DAYS` - Base estimated-delivery offset in days
//!   (default: 5)
//! - `ECYCLE_DELIVERY_JITTER_DAYS` - Extra random days added to the
//!   estimate, for the simulated-progress display (default: 0)

use rust_decimal::Decimal;
use thiserror::Error;

use ecycle_core::{Email, Price};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Tax applied to the cart subtotal at checkout.
///
/// Duplicated checkout implementations disagreed on whether a flat 10% tax
/// applied; the policy is configuration now, defaulting to no tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaxPolicy {
    /// Total is the plain subtotal.
    #[default]
    None,
    /// Total is subtotal plus subtotal x rate, rounded to cents.
    FlatRate(Decimal),
}

impl TaxPolicy {
    /// Compute the order total for a cart subtotal.
    #[must_use]
    pub fn total(&self, subtotal: Price) -> Price {
        match self {
            Self::None => subtotal,
            Self::FlatRate(rate) => subtotal + subtotal.rate(*rate),
        }
    }
}

/// Shop application configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// The single account granted admin access (email comparison, no role
    /// field exists in the user records).
    pub admin_email: Email,
    /// Tax policy applied at checkout.
    pub tax: TaxPolicy,
    /// Base estimated-delivery offset in days for in-flight orders.
    pub delivery_days: i64,
    /// Upper bound of random extra days added to the estimate.
    pub delivery_jitter_days: i64,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            // Known-good literal, parse cannot fail
            admin_email: Email::parse("admin@ecyclehub.com")
                .unwrap_or_else(|_| unreachable!("default admin email is valid")),
            tax: TaxPolicy::None,
            delivery_days: 5,
            delivery_jitter_days: 0,
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let admin_email = match std::env::var("ECYCLE_ADMIN_EMAIL") {
            Ok(value) => Email::parse(&value).map_err(|e| {
                ConfigError::InvalidEnvVar("ECYCLE_ADMIN_EMAIL".to_owned(), e.to_string())
            })?,
            Err(_) => defaults.admin_email,
        };

        let tax = match std::env::var("ECYCLE_TAX_RATE") {
            Ok(value) => {
                let rate = value.parse::<Decimal>().map_err(|e| {
                    ConfigError::InvalidEnvVar("ECYCLE_TAX_RATE".to_owned(), e.to_string())
                })?;
                if rate.is_zero() {
                    TaxPolicy::None
                } else {
                    TaxPolicy::FlatRate(rate)
                }
            }
            Err(_) => defaults.tax,
        };

        let delivery_days = parse_days("ECYCLE_DELIVERY_DAYS", defaults.delivery_days)?;
        let delivery_jitter_days =
            parse_days("ECYCLE_DELIVERY_JITTER_DAYS", defaults.delivery_jitter_days)?;

        Ok(Self {
            admin_email,
            tax,
            delivery_days,
            delivery_jitter_days,
        })
    }
}

/// Parse an optional day-count variable with a default.
fn parse_days(key: &str, default: i64) -> Result<i64, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<i64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShopConfig::default();
        assert_eq!(config.admin_email.as_str(), "admin@ecyclehub.com");
        assert_eq!(config.tax, TaxPolicy::None);
        assert_eq!(config.delivery_days, 5);
        assert_eq!(config.delivery_jitter_days, 0);
    }

    #[test]
    fn test_tax_policy_none() {
        let subtotal = Price::from_dollars(2400);
        assert_eq!(TaxPolicy::None.total(subtotal), subtotal);
    }

    #[test]
    fn test_tax_policy_flat_rate() {
        let subtotal = Price::from_dollars(1000);
        let total = TaxPolicy::FlatRate(Decimal::new(10, 2)).total(subtotal);
        assert_eq!(total, Price::from_dollars(1100));
    }
}
