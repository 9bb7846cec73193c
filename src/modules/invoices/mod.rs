// Invoices module

pub mod models;
pub mod services;

pub use models::{
    CreateInvoiceRequest, InvoiceLineItem, InvoiceRecord, InvoiceStatus, InvoiceTotals,
    RoundedTotals,
};
pub use services::TotalsCalculator;
