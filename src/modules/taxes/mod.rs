// Taxes module

pub mod models;
pub mod services;

pub use models::TvaRate;
pub use services::resolve_rate;
