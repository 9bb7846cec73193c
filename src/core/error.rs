use rust_decimal::Decimal;

/// Crate-wide Result type
pub type Result<T> = std::result::Result<T, BillingError>;

/// Errors the totals engine can surface to its callers.
///
/// `EmptyLineItems` and `InvalidTaxRate` are both fatal to the current
/// computation; there is no partial result. The editing-preview caller
/// treats them as "totals unavailable" and keeps accepting edits, while the
/// submission caller must block invoice creation on either.
#[derive(thiserror::Error, Debug)]
pub enum BillingError {
    /// Totals were requested with zero valid line items
    #[error("invoice must have at least one line item")]
    EmptyLineItems,

    /// A tax rate outside the enumerated policy set was supplied.
    /// The selector only ever offers enumerated rates, so this is an
    /// integrity error rather than recoverable user input.
    #[error("TVA rate {0}% is not an allowed rate")]
    InvalidTaxRate(Decimal),

    /// Validation errors for business rules
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl BillingError {
    pub fn validation(msg: impl Into<String>) -> Self {
        BillingError::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        BillingError::Configuration(msg.into())
    }
}
