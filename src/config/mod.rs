use rust_decimal::Decimal;
use std::env;

use crate::core::{BillingError, Currency, Result};
use crate::modules::taxes::models::TvaRate;
use crate::modules::taxes::services::resolve_rate;

/// Engine configuration: the defaults the invoice form is seeded with.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub default_tva_rate: TvaRate,
    pub currency: Currency,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// `INVOICE_DEFAULT_TVA_RATE` must name a rate from the policy set;
    /// an out-of-policy default is a deployment mistake and fails loading
    /// rather than being coerced.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let raw_rate = env::var("INVOICE_DEFAULT_TVA_RATE").unwrap_or_else(|_| "20".to_string());
        let candidate: Decimal = raw_rate.parse().map_err(|_| {
            BillingError::configuration(format!(
                "Invalid INVOICE_DEFAULT_TVA_RATE: {}",
                raw_rate
            ))
        })?;
        let default_tva_rate = resolve_rate(candidate).map_err(|_| {
            BillingError::configuration(format!(
                "INVOICE_DEFAULT_TVA_RATE {} is not an allowed TVA rate",
                candidate
            ))
        })?;

        let currency = env::var("INVOICE_CURRENCY")
            .unwrap_or_else(|_| "eur".to_string())
            .parse()
            .map_err(BillingError::Configuration)?;

        Ok(Self {
            default_tva_rate,
            currency,
        })
    }
}

impl Default for EngineConfig {
    /// The defaults the invoice form ships with: standard rate, euros
    fn default() -> Self {
        Self {
            default_tva_rate: TvaRate::Standard,
            currency: Currency::Eur,
        }
    }
}
