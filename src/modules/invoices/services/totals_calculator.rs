use rust_decimal::Decimal;

use crate::core::{BillingError, Result};
use crate::modules::invoices::models::InvoiceTotals;
use crate::modules::line_items::models::{LineItem, LineItemDraft};
use crate::modules::line_items::services::normalize;
use crate::modules::taxes::models::TvaRate;
use crate::modules::taxes::services::resolve_rate;

/// Computes invoice totals. Stateless and deterministic; both the live
/// editing preview and the authoritative creation path go through this one
/// implementation so the two sides agree bit-for-bit.
pub struct TotalsCalculator;

impl TotalsCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute totals for a non-empty set of line items at full precision.
    ///
    /// subtotal = Σ line_total (in input order)
    /// tva_amount = subtotal × rate / 100
    /// total = subtotal + tva_amount
    ///
    /// No rounding happens here, not per line and not on the sums;
    /// minor-unit rounding is applied only when a value crosses the
    /// display or persistence boundary (`InvoiceTotals::rounded`).
    pub fn compute(&self, items: &[LineItem], rate: TvaRate) -> Result<InvoiceTotals> {
        if items.is_empty() {
            return Err(BillingError::EmptyLineItems);
        }

        let subtotal: Decimal = items.iter().map(LineItem::line_total).sum();

        Ok(InvoiceTotals::new(subtotal, rate))
    }

    /// Live-preview entry point: raw editor rows plus the selected rate
    /// candidate, invoked fresh on every edit.
    ///
    /// Incomplete rows are skipped; if nothing survives, the preview fails
    /// with `EmptyLineItems` and the editor shows no totals while the user
    /// keeps typing. An out-of-policy candidate propagates
    /// `InvalidTaxRate`.
    pub fn preview(&self, drafts: &[LineItemDraft], candidate: Decimal) -> Result<InvoiceTotals> {
        let rate = resolve_rate(candidate)?;
        let items = normalize(drafts);

        self.compute(&items, rate)
    }
}

impl Default for TotalsCalculator {
    fn default() -> Self {
        Self::new()
    }
}
