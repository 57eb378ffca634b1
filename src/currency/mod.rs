//! Display currencies and exchange rates
//!
//! Calculations run in the base currency (Russian ruble). Results are
//! converted for display by multiplying with an exchange rate expressed as
//! units of the display currency per ruble.

pub mod loader;

pub use loader::{load_rates, load_rates_from_reader, RatesTable};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurrencyError {
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("No exchange rate for {0}")]
    RateNotFound(Currency),

    #[error("Invalid rate for {code}: {reason}")]
    InvalidRate { code: String, reason: String },

    #[error("Failed to read rates file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed rates file: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Rub,
    Usd,
    Eur,
    Cny,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Rub, Currency::Usd, Currency::Eur, Currency::Cny];

    /// The currency calculations are entered in
    pub const BASE: Currency = Currency::Rub;

    /// ISO 4217 code, as used in the central-bank rates feed
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Rub => "RUB",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Cny => "CNY",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Rub => "₽",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Cny => "¥",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| CurrencyError::UnknownCurrency(code.to_string()))
    }
}

/// Conversion from the base currency into a display currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub currency: Currency,
    /// Display-currency units per one unit of base currency
    pub units_per_base: f64,
}

impl ExchangeRate {
    /// Identity rate (results shown in the base currency)
    pub fn base() -> Self {
        Self {
            currency: Currency::BASE,
            units_per_base: 1.0,
        }
    }

    /// Manually entered rate. Must be positive and finite.
    pub fn manual(currency: Currency, units_per_base: f64) -> Result<Self, CurrencyError> {
        if !(units_per_base.is_finite() && units_per_base > 0.0) {
            return Err(CurrencyError::InvalidRate {
                code: currency.code().to_string(),
                reason: format!("{units_per_base} is not a positive number"),
            });
        }
        Ok(Self { currency, units_per_base })
    }

    pub fn convert(&self, amount: f64) -> f64 {
        amount * self.units_per_base
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::base()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes_case_insensitive() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" EUR ".parse::<Currency>().unwrap(), Currency::Eur);
        assert!(matches!(
            "GBP".parse::<Currency>(),
            Err(CurrencyError::UnknownCurrency(code)) if code == "GBP"
        ));
    }

    #[test]
    fn test_base_rate_is_identity() {
        let rate = ExchangeRate::default();
        assert_eq!(rate.currency, Currency::Rub);
        assert_eq!(rate.convert(1234.5), 1234.5);
    }

    #[test]
    fn test_manual_rate_validation() {
        assert!(ExchangeRate::manual(Currency::Usd, 0.0).is_err());
        assert!(ExchangeRate::manual(Currency::Usd, f64::NAN).is_err());
        let rate = ExchangeRate::manual(Currency::Usd, 0.5).unwrap();
        assert_eq!(rate.convert(10.0), 5.0);
    }
}
