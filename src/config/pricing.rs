//! Pricing Config

use clap::Args;
use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::iso;

use crate::{config::ConfigError, prices::Pricing};

/// Currency and tax settings.
#[derive(Debug, Args)]
pub struct PricingConfig {
    /// ISO 4217 currency code totals are reported in
    #[arg(long, env = "EVENTIVERSE_CURRENCY", default_value = "USD")]
    pub currency: String,

    /// Taxes and fees as a fraction of the subtotal (0.1 = 10%)
    #[arg(long, env = "EVENTIVERSE_TAX_RATE", default_value = "0.1")]
    pub tax_rate: Decimal,
}

impl PricingConfig {
    /// Resolve the settings into [`Pricing`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the currency is unknown or the tax rate is outside
    /// `0..=1`.
    pub fn pricing(&self) -> Result<Pricing, ConfigError> {
        let code = self.currency.trim().to_uppercase();

        let currency = iso::find(&code).ok_or(ConfigError::UnknownCurrency(code))?;

        if self.tax_rate.is_sign_negative() || self.tax_rate > Decimal::ONE {
            return Err(ConfigError::InvalidTaxRate(self.tax_rate));
        }

        Ok(Pricing::new(currency, Percentage::from(self.tax_rate)))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use testresult::TestResult;

    use super::*;

    fn config(currency: &str, tax_rate: &str) -> Result<PricingConfig, rust_decimal::Error> {
        Ok(PricingConfig {
            currency: currency.to_string(),
            tax_rate: Decimal::from_str(tax_rate)?,
        })
    }

    #[test]
    fn resolves_lowercase_currency() -> TestResult {
        let pricing = config("gbp", "0.2")?.pricing()?;

        assert_eq!(pricing.currency, iso::GBP);
        assert_eq!(pricing.tax_on(Decimal::from(10))?, Decimal::from(2));

        Ok(())
    }

    #[test]
    fn rejects_unknown_currency() -> TestResult {
        let result = config("ABC", "0.1")?.pricing();

        assert!(
            matches!(result, Err(ConfigError::UnknownCurrency(ref code)) if code == "ABC"),
            "got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn rejects_out_of_range_tax() -> TestResult {
        for rate in ["-0.1", "1.5"] {
            let result = config("USD", rate)?.pricing();

            assert!(
                matches!(result, Err(ConfigError::InvalidTaxRate(_))),
                "rate {rate}: got {result:?}"
            );
        }

        Ok(())
    }
}
