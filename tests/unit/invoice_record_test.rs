// End-to-end tests for the persisted invoice record
//
// Validates:
// - The authoritative creation path produces the same numbers as the
//   editing preview, with boundary rounding applied once at persist time
// - Round-half-up at minor units, with the stored total reconciled as
//   rounded subtotal + rounded TVA
// - The explicit update operations (replace line items, change rate)
// - Stored records survive a serialization round trip unchanged

use chrono::{Duration, Utc};
use factura::{
    BillingError, CreateInvoiceRequest, Currency, InvoiceRecord, InvoiceStatus, LineItemDraft,
    TotalsCalculator, TvaRate,
};
use rust_decimal_macros::dec;

fn request(line_items: Vec<LineItemDraft>, tva_rate: rust_decimal::Decimal) -> CreateInvoiceRequest {
    CreateInvoiceRequest {
        client_id: "client-1".to_string(),
        project_id: Some("project-9".to_string()),
        line_items,
        tva_rate,
        currency: Currency::Eur,
        due_date: Utc::now() + Duration::days(30),
    }
}

#[test]
fn test_create_standard_rate_invoice() {
    let record = InvoiceRecord::create(
        request(
            vec![
                LineItemDraft::new("A", "100", "2"),
                LineItemDraft::new("B", "50", "1"),
            ],
            dec!(20),
        ),
        "INV-1001".to_string(),
    )
    .unwrap();

    assert_eq!(record.number, "INV-1001");
    assert_eq!(record.subtotal, dec!(250.00));
    assert_eq!(record.tva_rate, TvaRate::Standard);
    assert_eq!(record.tva_amount, dec!(50.00));
    assert_eq!(record.total, dec!(300.00));
    assert_eq!(record.status, InvoiceStatus::Pending);
    assert_eq!(record.line_items.len(), 2);
    assert_eq!(record.line_items[0].line_total, dec!(200.00));
    assert_eq!(record.line_items[1].line_total, dec!(50.00));
}

#[test]
fn test_create_fractional_rate_invoice_rounds_half_up() {
    // Unrounded: subtotal 99.99, TVA 5.49945, total 105.48945
    let record = InvoiceRecord::create(
        request(vec![LineItemDraft::new("A", "33.33", "3")], dec!(5.5)),
        "INV-1002".to_string(),
    )
    .unwrap();

    assert_eq!(record.subtotal, dec!(99.99));
    assert_eq!(record.tva_amount, dec!(5.50));
    // Reconciled: 99.99 + 5.50, not an independent rounding of 105.48945
    assert_eq!(record.total, dec!(105.49));
    assert_eq!(record.currency.format_amount(record.total), "€105.49");
}

#[test]
fn test_stored_total_is_reconciled_not_independently_rounded() {
    // subtotal 19.999 × 5 = 99.995 rounds up to 100.00, TVA 19.999 rounds
    // up to 20.00. Rounding the unrounded total (119.994) independently
    // would store 119.99 and break additivity by one minor unit.
    let record = InvoiceRecord::create(
        request(vec![LineItemDraft::new("Retainer", "19.999", "5")], dec!(20)),
        "INV-1003".to_string(),
    )
    .unwrap();

    assert_eq!(record.subtotal, dec!(100.00));
    assert_eq!(record.tva_amount, dec!(20.00));
    assert_eq!(record.total, dec!(120.00));
    assert_eq!(record.total, record.subtotal + record.tva_amount);
}

#[test]
fn test_create_matches_editing_preview() {
    // The client-side preview and the authoritative record must agree on
    // every rounded amount.
    let drafts = vec![
        LineItemDraft::new("Design sprint", "450", "2"),
        LineItemDraft::new("Hosting", "24.99", "12"),
    ];

    let preview = TotalsCalculator::new()
        .preview(&drafts, dec!(10))
        .unwrap()
        .rounded(Currency::Eur);
    let record =
        InvoiceRecord::create(request(drafts, dec!(10)), "INV-1004".to_string()).unwrap();

    assert_eq!(record.subtotal, preview.subtotal);
    assert_eq!(record.tva_amount, preview.tva_amount);
    assert_eq!(record.total, preview.total);
}

#[test]
fn test_create_skips_unfinished_rows() {
    let record = InvoiceRecord::create(
        request(
            vec![
                LineItemDraft::new("A", "10", "2"),
                LineItemDraft::new("", "", ""),
            ],
            dec!(0),
        ),
        "INV-1005".to_string(),
    )
    .unwrap();

    assert_eq!(record.line_items.len(), 1);
    assert_eq!(record.subtotal, dec!(20.00));
    assert_eq!(record.tva_amount, dec!(0.00));
    assert_eq!(record.total, dec!(20.00));
}

#[test]
fn test_create_with_no_valid_rows_is_blocked() {
    let result = InvoiceRecord::create(
        request(vec![LineItemDraft::new("", "", "")], dec!(20)),
        "INV-1006".to_string(),
    );

    assert!(matches!(result, Err(BillingError::EmptyLineItems)));
}

#[test]
fn test_create_with_unlisted_rate_is_blocked() {
    let result = InvoiceRecord::create(
        request(vec![LineItemDraft::new("A", "10", "1")], dec!(13)),
        "INV-1007".to_string(),
    );

    assert!(matches!(result, Err(BillingError::InvalidTaxRate(_))));
}

#[test]
fn test_replace_line_items_recomputes_all_amounts() {
    let mut record = InvoiceRecord::create(
        request(vec![LineItemDraft::new("A", "100", "1")], dec!(20)),
        "INV-1008".to_string(),
    )
    .unwrap();

    record
        .replace_line_items(&[LineItemDraft::new("B", "200", "3")], None)
        .unwrap();

    assert_eq!(record.line_items.len(), 1);
    assert_eq!(record.line_items[0].description, "B");
    assert_eq!(record.subtotal, dec!(600.00));
    assert_eq!(record.tva_rate, TvaRate::Standard);
    assert_eq!(record.tva_amount, dec!(120.00));
    assert_eq!(record.total, dec!(720.00));
}

#[test]
fn test_change_rate_recomputes_from_stored_subtotal() {
    let mut record = InvoiceRecord::create(
        request(vec![LineItemDraft::new("A", "33.33", "3")], dec!(5.5)),
        "INV-1009".to_string(),
    )
    .unwrap();
    assert_eq!(record.subtotal, dec!(99.99));

    record.change_rate(dec!(20)).unwrap();

    // TVA derives from the stored rounded subtotal, line items untouched
    assert_eq!(record.tva_rate, TvaRate::Standard);
    assert_eq!(record.tva_amount, dec!(20.00));
    assert_eq!(record.total, dec!(119.99));
    assert_eq!(record.line_items.len(), 1);
    assert_eq!(record.line_items[0].line_total, dec!(99.99));
}

#[test]
fn test_change_rate_rejects_unlisted_rate_and_keeps_record_intact() {
    let mut record = InvoiceRecord::create(
        request(vec![LineItemDraft::new("A", "100", "1")], dec!(20)),
        "INV-1010".to_string(),
    )
    .unwrap();

    let result = record.change_rate(dec!(15));

    assert!(matches!(result, Err(BillingError::InvalidTaxRate(_))));
    assert_eq!(record.tva_rate, TvaRate::Standard);
    assert_eq!(record.total, dec!(120.00));
}

#[test]
fn test_pending_invoice_past_due_date_is_overdue() {
    let mut req = request(vec![LineItemDraft::new("A", "10", "1")], dec!(0));
    req.due_date = Utc::now() - Duration::days(3);

    let record = InvoiceRecord::create(req, "INV-1011".to_string()).unwrap();

    assert!(record.is_overdue(Utc::now()));
}

#[test]
fn test_record_serialization_round_trip() {
    let record = InvoiceRecord::create(
        request(vec![LineItemDraft::new("A", "33.33", "3")], dec!(5.5)),
        "INV-1012".to_string(),
    )
    .unwrap();

    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains("105.49"));
    assert!(json.contains("5.50"));

    let restored: InvoiceRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.number, record.number);
    assert_eq!(restored.subtotal, record.subtotal);
    assert_eq!(restored.tva_rate, record.tva_rate);
    assert_eq!(restored.tva_amount, record.tva_amount);
    assert_eq!(restored.total, record.total);
    assert_eq!(restored.status, record.status);
}
