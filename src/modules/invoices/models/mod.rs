mod invoice;

pub use invoice::{
    CreateInvoiceRequest, InvoiceLineItem, InvoiceRecord, InvoiceStatus, InvoiceTotals,
    RoundedTotals,
};
