// Invoice models: the unrounded totals aggregate produced by the
// calculator, its rounded boundary form, and the durable invoice record
// the back office persists and reads back verbatim.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::core::{BillingError, Currency, Result};
use crate::modules::invoices::services::TotalsCalculator;
use crate::modules::line_items::models::{LineItem, LineItemDraft};
use crate::modules::line_items::services::normalize;
use crate::modules::taxes::models::TvaRate;
use crate::modules::taxes::services::resolve_rate;

/// Derived invoice totals at full precision.
///
/// Read-only by construction: `total == subtotal + tva_amount` always
/// holds, and a changed line item or rate produces a freshly computed value
/// rather than mutating this one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceTotals {
    subtotal: Decimal,
    rate: TvaRate,
    tva_amount: Decimal,
    total: Decimal,
}

impl InvoiceTotals {
    pub(crate) fn new(subtotal: Decimal, rate: TvaRate) -> Self {
        let tva_amount = subtotal * rate.as_fraction();
        let total = subtotal + tva_amount;

        Self {
            subtotal,
            rate,
            tva_amount,
            total,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    pub fn rate(&self) -> TvaRate {
        self.rate
    }

    pub fn tva_amount(&self) -> Decimal {
        self.tva_amount
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Round for display or persistence.
    ///
    /// Subtotal and TVA are each rounded to minor units; the rounded total
    /// is then reconciled as their sum rather than rounded independently,
    /// so a stored record always satisfies `total == subtotal + tva_amount`
    /// in minor units.
    pub fn rounded(&self, currency: Currency) -> RoundedTotals {
        let subtotal = currency.round(self.subtotal);
        let tva_amount = currency.round(self.tva_amount);

        RoundedTotals {
            subtotal,
            tva_amount,
            total: subtotal + tva_amount,
        }
    }
}

/// Minor-unit totals as shown on screen and written to storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundedTotals {
    pub subtotal: Decimal,
    pub tva_amount: Decimal,
    pub total: Decimal,
}

/// Payload the submission collaborator sends at invoice-creation time
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceRequest {
    pub client_id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    pub line_items: Vec<LineItemDraft>,
    pub tva_rate: Decimal,
    pub currency: Currency,
    pub due_date: DateTime<Utc>,
}

/// Invoice lifecycle as the back office tracks it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Overdue,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Pending
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Pending => write!(f, "pending"),
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::Overdue => write!(f, "overdue"),
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            _ => Err(format!("Invalid invoice status: {}", s)),
        }
    }
}

/// A persisted invoice row, already rounded to minor units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub id: Uuid,
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: Decimal,
    pub line_total: Decimal,
}

impl InvoiceLineItem {
    fn from_line_item(item: &LineItem, currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: item.description().to_string(),
            unit_price: item.unit_price(),
            quantity: item.quantity(),
            line_total: currency.round(item.line_total()),
        }
    }
}

/// The durable invoice record.
///
/// Totals are computed once at creation, rounded to minor units, and stored
/// alongside the normalized line items. The record is read back verbatim
/// for display and never recomputed implicitly, so a later change to the
/// rate policy cannot retroactively alter historical invoices. The only
/// recomputation paths are the explicit update operations below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub id: Uuid,
    pub number: String,
    pub client_id: String,
    pub project_id: Option<String>,
    pub line_items: Vec<InvoiceLineItem>,
    pub subtotal: Decimal,
    pub tva_rate: TvaRate,
    pub tva_amount: Decimal,
    pub total: Decimal,
    pub currency: Currency,
    pub status: InvoiceStatus,
    pub due_date: DateTime<Utc>,
    pub issued_date: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InvoiceRecord {
    /// Build the authoritative record at submit time.
    ///
    /// Runs the same normalize → resolve → compute chain as the editing
    /// preview, then applies boundary rounding and freezes the result.
    /// Fails with `EmptyLineItems` when no row survives normalization and
    /// with `InvalidTaxRate` for an out-of-policy rate; either error blocks
    /// the creation request entirely.
    pub fn create(request: CreateInvoiceRequest, number: String) -> Result<Self> {
        let rate = resolve_rate(request.tva_rate)?;
        let items = normalize(&request.line_items);
        let totals = TotalsCalculator::new().compute(&items, rate)?;
        let rounded = totals.rounded(request.currency);

        let line_items = items
            .iter()
            .map(|item| InvoiceLineItem::from_line_item(item, request.currency))
            .collect();

        let now = Utc::now();
        let record = Self {
            id: Uuid::new_v4(),
            number,
            client_id: request.client_id,
            project_id: request.project_id,
            line_items,
            subtotal: rounded.subtotal,
            tva_rate: rate,
            tva_amount: rounded.tva_amount,
            total: rounded.total,
            currency: request.currency,
            status: InvoiceStatus::Pending,
            due_date: request.due_date,
            issued_date: now,
            paid_at: None,
            created_at: now,
            updated_at: now,
        };

        info!(
            number = %record.number,
            total = %record.currency.format_amount(record.total),
            "invoice created"
        );

        Ok(record)
    }

    /// Replace the line items (and optionally the rate) and recompute every
    /// stored amount from scratch.
    pub fn replace_line_items(
        &mut self,
        drafts: &[LineItemDraft],
        tva_rate: Option<Decimal>,
    ) -> Result<()> {
        let rate = match tva_rate {
            Some(candidate) => resolve_rate(candidate)?,
            None => self.tva_rate,
        };

        let items = normalize(drafts);
        let totals = TotalsCalculator::new().compute(&items, rate)?;
        let rounded = totals.rounded(self.currency);

        self.line_items = items
            .iter()
            .map(|item| InvoiceLineItem::from_line_item(item, self.currency))
            .collect();
        self.subtotal = rounded.subtotal;
        self.tva_rate = rate;
        self.tva_amount = rounded.tva_amount;
        self.total = rounded.total;
        self.touch();

        Ok(())
    }

    /// Change only the rate.
    ///
    /// TVA and total are recomputed from the stored (already rounded)
    /// subtotal; the recorded line items are left untouched.
    pub fn change_rate(&mut self, candidate: Decimal) -> Result<()> {
        let rate = resolve_rate(candidate)?;
        let tva_amount = self.currency.round(self.subtotal * rate.as_fraction());

        self.tva_rate = rate;
        self.tva_amount = tva_amount;
        self.total = self.subtotal + tva_amount;
        self.touch();

        Ok(())
    }

    /// Update status, allowing only the forward transitions the back office
    /// performs: pending invoices get paid or fall overdue, and overdue
    /// invoices can still be paid.
    pub fn update_status(&mut self, new_status: InvoiceStatus) -> Result<()> {
        match (self.status, new_status) {
            (InvoiceStatus::Pending, InvoiceStatus::Paid)
            | (InvoiceStatus::Overdue, InvoiceStatus::Paid) => {
                self.status = InvoiceStatus::Paid;
                self.paid_at = Some(Utc::now());
                self.touch();
                Ok(())
            }
            (InvoiceStatus::Pending, InvoiceStatus::Overdue) => {
                self.status = InvoiceStatus::Overdue;
                self.touch();
                Ok(())
            }
            _ => Err(BillingError::validation(format!(
                "invalid status transition from {} to {}",
                self.status, new_status
            ))),
        }
    }

    /// Pending invoices past their due date surface as overdue
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == InvoiceStatus::Pending && now > self.due_date
    }

    /// Next number in the `INV-n` sequence.
    ///
    /// The sequence starts at `INV-1001`; an absent or malformed
    /// predecessor restarts it there.
    pub fn next_number(last: Option<&str>) -> String {
        let next = last
            .and_then(|number| number.strip_prefix("INV-"))
            .and_then(|digits| digits.parse::<u64>().ok())
            .map(|n| n + 1)
            .unwrap_or(1001);

        format!("INV-{}", next)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
