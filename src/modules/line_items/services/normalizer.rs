use rust_decimal::Decimal;
use tracing::debug;

use crate::modules::line_items::models::{LineItem, LineItemDraft};

/// Normalize raw editor rows into line items, preserving input order.
///
/// A row is dropped when its description is blank, its unit price does not
/// parse or is negative, or its quantity does not parse or is not strictly
/// positive. Dropped rows are not errors; the editor legitimately holds
/// rows the user has not finished filling in. An all-dropped result is
/// surfaced by the caller as `EmptyLineItems` when totals are requested.
pub fn normalize(drafts: &[LineItemDraft]) -> Vec<LineItem> {
    let items: Vec<LineItem> = drafts.iter().filter_map(normalize_row).collect();

    let dropped = drafts.len() - items.len();
    if dropped > 0 {
        debug!(dropped, "skipped incomplete line item rows");
    }

    items
}

fn normalize_row(draft: &LineItemDraft) -> Option<LineItem> {
    let unit_price = parse_cell(&draft.unit_price)?;
    let quantity = parse_cell(&draft.quantity)?;

    LineItem::new(draft.description.trim(), unit_price, quantity).ok()
}

fn parse_cell(raw: &str) -> Option<Decimal> {
    raw.trim().parse().ok()
}
