//! Cart totals

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{
    cart::models::CartItem,
    prices::{PriceError, Pricing, line_total},
};

/// Order summary for a cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    /// Sum of unit price times quantity over every line.
    pub subtotal: Money<'static, Currency>,

    /// Taxes and fees on the subtotal.
    pub tax: Money<'static, Currency>,

    /// Subtotal plus tax.
    pub total: Money<'static, Currency>,
}

/// Calculates subtotal, tax and total for a cart.
///
/// An empty cart totals to zero.
///
/// # Errors
///
/// - [`PriceError::Missing`] / [`PriceError::Invalid`]: a line's price has no usable amount.
/// - [`PriceError::Overflow`]: the amounts leave the decimal range.
pub fn compute_totals(cart: &[CartItem], pricing: &Pricing) -> Result<CartTotals, PriceError> {
    let subtotal = cart.iter().try_fold(Decimal::ZERO, |acc, item| {
        let line = line_total(&item.price, item.quantity)?;

        acc.checked_add(line).ok_or(PriceError::Overflow)
    })?;

    let tax = pricing.tax_on(subtotal)?;
    let total = subtotal.checked_add(tax).ok_or(PriceError::Overflow)?;

    Ok(CartTotals {
        subtotal: pricing.money(subtotal),
        tax: pricing.money(tax),
        total: pricing.money(total),
    })
}

/// Number of tickets across all lines.
pub fn item_count(cart: &[CartItem]) -> u64 {
    cart.iter().map(|item| u64::from(item.quantity)).sum()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use decimal_percentage::Percentage;
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn item(event_id: &str, price: &str, quantity: u32) -> CartItem {
        CartItem {
            event_id: event_id.to_string(),
            event_title: format!("Event {event_id}"),
            price: price.to_string(),
            quantity,
            image_url: String::new(),
        }
    }

    #[test]
    fn totals_for_mixed_cart() -> TestResult {
        let cart = [item("1", "$10.00", 2), item("2", "$1,234.56", 1)];

        let totals = compute_totals(&cart, &Pricing::default())?;

        assert_eq!(*totals.subtotal.amount(), Decimal::from_str("1254.56")?);
        assert_eq!(*totals.tax.amount(), Decimal::from_str("125.456")?);
        assert_eq!(*totals.total.amount(), Decimal::from_str("1380.016")?);
        assert_eq!(totals.total.currency(), iso::USD);

        Ok(())
    }

    #[test]
    fn empty_cart_totals_to_zero() -> TestResult {
        let totals = compute_totals(&[], &Pricing::default())?;

        assert!(totals.subtotal.is_zero());
        assert!(totals.tax.is_zero());
        assert!(totals.total.is_zero());

        Ok(())
    }

    #[test]
    fn uses_configured_tax_rate_and_currency() -> TestResult {
        let pricing = Pricing::new(iso::GBP, Percentage::from(Decimal::new(20, 2)));
        let cart = [item("1", "£50", 1)];

        let totals = compute_totals(&cart, &pricing)?;

        assert_eq!(*totals.tax.amount(), Decimal::from(10));
        assert_eq!(*totals.total.amount(), Decimal::from(60));
        assert_eq!(totals.total.currency(), iso::GBP);

        Ok(())
    }

    #[test]
    fn unparseable_price_fails() {
        let cart = [item("1", "TBA", 1)];

        let result = compute_totals(&cart, &Pricing::default());

        assert!(matches!(result, Err(PriceError::Missing(_))), "got {result:?}");
    }

    #[test]
    fn item_count_sums_quantities() {
        let cart = [item("1", "$1", 2), item("2", "$1", 3)];

        assert_eq!(item_count(&cart), 5);
        assert_eq!(item_count(&[]), 0);
    }
}
