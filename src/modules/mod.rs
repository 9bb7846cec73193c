pub mod invoices;
pub mod line_items;
pub mod taxes;
