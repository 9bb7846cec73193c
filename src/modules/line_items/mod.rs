// Line items module

pub mod models;
pub mod services;

pub use models::{LineItem, LineItemDraft};
pub use services::normalize;
