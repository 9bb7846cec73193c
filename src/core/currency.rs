use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported invoice currencies.
///
/// Amounts are carried at full precision inside the engine; a currency only
/// decides how a value is rounded and rendered at the display/persistence
/// boundary. Wire form is the lowercase ISO code (`"eur"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// Euro (2 decimal places)
    Eur,
    /// US Dollar (2 decimal places)
    Usd,
}

impl Currency {
    /// Returns the minor-unit scale for this currency
    pub fn scale(&self) -> u32 {
        match self {
            Currency::Eur | Currency::Usd => 2,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
        }
    }

    /// Rounds a value to minor units.
    ///
    /// Round-half-up (midpoint away from zero). This is the single rounding
    /// mode used everywhere an amount crosses the display or persistence
    /// boundary; intermediate arithmetic is never rounded.
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.scale(), RoundingStrategy::MidpointAwayFromZero)
    }

    /// Formats an amount as a symbol-prefixed currency string (`€105.49`)
    pub fn format_amount(&self, amount: Decimal) -> String {
        format!(
            "{}{:.width$}",
            self.symbol(),
            self.round(amount),
            width = self.scale() as usize
        )
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Eur => write!(f, "eur"),
            Currency::Usd => write!(f, "usd"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "eur" => Ok(Currency::Eur),
            "usd" => Ok(Currency::Usd),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}
