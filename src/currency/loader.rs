//! Load exchange rates from a CSV export of the central-bank daily rates
//!
//! Expected columns: `CharCode,Nominal,Value`, where `Value` is the price in
//! rubles of `Nominal` units of the currency. Values may use a decimal comma,
//! as the feed does.

use super::{Currency, CurrencyError, ExchangeRate};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Raw CSV row matching the rates feed columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "CharCode")]
    char_code: String,
    #[serde(rename = "Nominal")]
    nominal: u32,
    #[serde(rename = "Value")]
    value: String,
}

impl CsvRow {
    /// Rubles per single unit of the currency
    fn base_per_unit(&self) -> Result<f64, CurrencyError> {
        let value: f64 = self
            .value
            .trim()
            .replace(',', ".")
            .parse()
            .map_err(|_| self.invalid(format!("value {:?} is not a number", self.value)))?;

        if self.nominal == 0 {
            return Err(self.invalid("nominal is zero".to_string()));
        }
        if !(value.is_finite() && value > 0.0) {
            return Err(self.invalid(format!("value {value} is not positive")));
        }

        Ok(value / self.nominal as f64)
    }

    fn invalid(&self, reason: String) -> CurrencyError {
        CurrencyError::InvalidRate {
            code: self.char_code.clone(),
            reason,
        }
    }
}

/// Exchange rates keyed by currency
#[derive(Debug, Clone, Default)]
pub struct RatesTable {
    units_per_base: HashMap<Currency, f64>,
}

impl RatesTable {
    /// Rate for `currency`; the base currency always converts at 1.0
    pub fn get(&self, currency: Currency) -> Result<ExchangeRate, CurrencyError> {
        if currency == Currency::BASE {
            return Ok(ExchangeRate::base());
        }
        self.units_per_base
            .get(&currency)
            .map(|&units_per_base| ExchangeRate { currency, units_per_base })
            .ok_or(CurrencyError::RateNotFound(currency))
    }

    pub fn insert(&mut self, rate: ExchangeRate) {
        self.units_per_base.insert(rate.currency, rate.units_per_base);
    }

    pub fn len(&self) -> usize {
        self.units_per_base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units_per_base.is_empty()
    }
}

/// Load rates from a CSV file
pub fn load_rates<P: AsRef<Path>>(path: P) -> Result<RatesTable, CurrencyError> {
    let file = std::fs::File::open(path)?;
    load_rates_from_reader(file)
}

/// Load rates from any reader (e.g., string buffer)
///
/// Rows for currencies this crate does not display are skipped.
pub fn load_rates_from_reader<R: Read>(reader: R) -> Result<RatesTable, CurrencyError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut table = RatesTable::default();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;

        let currency = match row.char_code.parse::<Currency>() {
            Ok(currency) => currency,
            Err(_) => {
                warn!("Skipping rate for unsupported currency {}", row.char_code);
                continue;
            }
        };

        let base_per_unit = row.base_per_unit()?;
        table.insert(ExchangeRate {
            currency,
            units_per_base: 1.0 / base_per_unit,
        });
    }

    debug!("Loaded {} exchange rates", table.len());
    Ok(table)
}
