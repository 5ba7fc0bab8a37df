//! Configuration
//!
//! Settings come from command-line flags with environment fallbacks; a `.env` file in
//! the working directory is loaded first if present.

use clap::Args;
use thiserror::Error;

mod catalog;
mod observability;
mod pricing;
mod storage;

pub use catalog::CatalogConfig;
pub use observability::{LogFormat, LoggingConfig};
pub use pricing::PricingConfig;
pub use storage::StorageConfig;

/// Errors raised while turning settings into runtime values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The currency code is not an ISO 4217 currency.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The tax rate is outside `0..=1`.
    #[error("tax rate must be between 0 and 1, got {0}")]
    InvalidTaxRate(rust_decimal::Decimal),
}

/// Eventiverse settings.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Persistent store settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Currency and tax settings.
    #[command(flatten)]
    pub pricing: PricingConfig,

    /// Event catalog settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

/// Load `.env` into the process environment, if one exists.
pub fn load_dotenv() {
    // Missing .env is fine
    _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: AppConfig,
    }

    #[test]
    fn flags_override_defaults() -> TestResult {
        let cli = TestCli::try_parse_from([
            "eventiverse",
            "--data-dir",
            "/tmp/eventiverse-test",
            "--currency",
            "EUR",
            "--tax-rate",
            "0.2",
            "--log-format",
            "json",
        ])?;

        assert_eq!(
            cli.config.storage.data_dir.to_str(),
            Some("/tmp/eventiverse-test")
        );
        assert!(matches!(cli.config.logging.log_format, LogFormat::Json));

        let pricing = cli.config.pricing.pricing()?;
        assert_eq!(pricing.currency.iso_alpha_code, "EUR");

        Ok(())
    }
}
