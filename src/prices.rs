//! Prices

use std::str::FromStr;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Errors that can occur while turning display prices into amounts.
#[derive(Debug, Error)]
pub enum PriceError {
    /// The price string contains no digits at all.
    #[error("price {0:?} contains no amount")]
    Missing(String),

    /// The extracted digits do not form a number.
    #[error("price {price:?} is not a valid amount")]
    Invalid {
        /// The original display price.
        price: String,

        /// Decimal parsing failure.
        #[source]
        source: rust_decimal::Error,
    },

    /// Multiplying or summing amounts left the decimal range.
    #[error("price arithmetic overflowed")]
    Overflow,
}

/// Extracts the numeric value of a display price such as `"$1,234.56"`.
///
/// Every character that is not an ASCII digit or a decimal point is dropped before
/// parsing, so currency symbols, thousands separators and signs are ignored.
///
/// # Errors
///
/// - [`PriceError::Missing`]: the string has no digits.
/// - [`PriceError::Invalid`]: what remains is not a decimal number (e.g. `"1.2.3"`).
pub fn parse_price(price: &str) -> Result<Decimal, PriceError> {
    let amount: String = price
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if !amount.chars().any(|c| c.is_ascii_digit()) {
        return Err(PriceError::Missing(price.to_string()));
    }

    Decimal::from_str(&amount).map_err(|source| PriceError::Invalid {
        price: price.to_string(),
        source,
    })
}

/// Unit price times quantity.
///
/// # Errors
///
/// Returns a [`PriceError`] if the price cannot be parsed or the product overflows.
pub fn line_total(price: &str, quantity: u32) -> Result<Decimal, PriceError> {
    parse_price(price)?
        .checked_mul(Decimal::from(quantity))
        .ok_or(PriceError::Overflow)
}

/// Currency and tax settings used for cart totals.
#[derive(Debug, Clone, Copy)]
pub struct Pricing {
    /// Currency that totals are reported in.
    pub currency: &'static Currency,

    /// Taxes and fees charged on the subtotal.
    pub tax_rate: Percentage,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            currency: iso::USD,
            tax_rate: Percentage::from(Decimal::new(1, 1)),
        }
    }
}

impl Pricing {
    /// Create pricing settings for the given currency and tax rate.
    pub fn new(currency: &'static Currency, tax_rate: Percentage) -> Self {
        Self { currency, tax_rate }
    }

    /// Tax due on `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the product leaves the decimal range.
    pub fn tax_on(&self, amount: Decimal) -> Result<Decimal, PriceError> {
        // Percentage only exposes its value through multiplication.
        (self.tax_rate * Decimal::ONE)
            .checked_mul(amount)
            .ok_or(PriceError::Overflow)
    }

    /// Wrap an amount in the configured currency.
    pub fn money(&self, amount: Decimal) -> Money<'static, Currency> {
        Money::from_decimal(amount, self.currency)
    }
}
