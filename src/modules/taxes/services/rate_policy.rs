use rust_decimal::Decimal;
use tracing::error;

use crate::core::{BillingError, Result};
use crate::modules::taxes::models::TvaRate;

/// Resolve a candidate percentage against the enumerated TVA rates.
///
/// The rate selector only ever offers enumerated rates, so an out-of-policy
/// candidate means a caller bug or tampered input: it is logged and the
/// computation aborted. It is never silently replaced with 0%.
pub fn resolve_rate(candidate: Decimal) -> Result<TvaRate> {
    TvaRate::from_percent(candidate).ok_or_else(|| {
        error!(%candidate, "TVA rate outside the allowed set");
        BillingError::InvalidTaxRate(candidate)
    })
}
