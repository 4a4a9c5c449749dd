//! Pricing
//!
//! Cart amounts are plain decimals; currency only comes in when they are
//! shown to someone.

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use thiserror::Error;

/// Errors related to currency lookup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Currency code not supported
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Look up a supported currency by ISO code.
///
/// # Errors
///
/// Returns [`PricingError::UnknownCurrency`] for anything other than `GBP`,
/// `USD` or `EUR`.
pub fn parse_currency(code: &str) -> Result<&'static Currency, PricingError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(PricingError::UnknownCurrency(other.to_string())),
    }
}

/// Format a raw amount for display in `currency`, e.g. `$15.00`.
pub fn format_currency(amount: Decimal, currency: &Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}
