// A line item starts life as a draft row in the invoice editor: every cell
// is free text and the user may not have finished filling it in. Drafts are
// normalized into immutable `LineItem`s before any totals are computed;
// rows that do not normalize are skipped, never zeroed.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{BillingError, Result};

/// A raw invoice row as the editing UI holds it.
///
/// Cells arrive as text (or numbers, for rows seeded programmatically);
/// missing cells deserialize to empty strings rather than failing, because
/// the editor legitimately holds half-filled rows.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineItemDraft {
    #[serde(default, deserialize_with = "raw_cell")]
    pub description: String,
    #[serde(default, deserialize_with = "raw_cell")]
    pub unit_price: String,
    #[serde(default, deserialize_with = "raw_cell")]
    pub quantity: String,
}

impl LineItemDraft {
    pub fn new(
        description: impl Into<String>,
        unit_price: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            unit_price: unit_price.into(),
            quantity: quantity.into(),
        }
    }
}

/// Accept a cell as text, number, or null. The editor seeds fresh rows with
/// `quantity: 1` as a number and leaves untouched cells empty.
fn raw_cell<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Text(String),
        Number(f64),
        Empty,
    }

    Ok(match Cell::deserialize(deserializer)? {
        Cell::Text(text) => text,
        Cell::Number(value) => value.to_string(),
        Cell::Empty => String::new(),
    })
}

/// A normalized, billable invoice row.
///
/// Immutable once constructed: `line_total` is derived from
/// `unit_price × quantity` at construction time and is not independently
/// settable. Amounts are kept at full precision; rounding to minor units
/// happens only when the row is persisted onto an invoice record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    description: String,
    unit_price: Decimal,
    quantity: Decimal,
    line_total: Decimal,
}

impl LineItem {
    /// Create a line item with validation.
    ///
    /// # Arguments
    /// * `description` - Product/service description (non-empty)
    /// * `unit_price` - Must be non-negative
    /// * `quantity` - Must be strictly positive
    pub fn new(
        description: impl Into<String>,
        unit_price: Decimal,
        quantity: Decimal,
    ) -> Result<Self> {
        let description = description.into();
        Self::validate_description(&description)?;
        Self::validate_unit_price(unit_price)?;
        Self::validate_quantity(quantity)?;

        let line_total = unit_price * quantity;

        Ok(Self {
            description,
            unit_price,
            quantity,
            line_total,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn line_total(&self) -> Decimal {
        self.line_total
    }

    fn validate_description(description: &str) -> Result<()> {
        if description.trim().is_empty() {
            return Err(BillingError::validation(
                "line item description cannot be empty",
            ));
        }

        Ok(())
    }

    fn validate_unit_price(unit_price: Decimal) -> Result<()> {
        if unit_price < Decimal::ZERO {
            return Err(BillingError::validation(format!(
                "unit price must be non-negative, got: {}",
                unit_price
            )));
        }

        Ok(())
    }

    fn validate_quantity(quantity: Decimal) -> Result<()> {
        if quantity <= Decimal::ZERO {
            return Err(BillingError::validation(format!(
                "quantity must be positive, got: {}",
                quantity
            )));
        }

        Ok(())
    }
}
