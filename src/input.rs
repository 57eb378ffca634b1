//! Calculation inputs and parsing of user-entered text fields

use crate::error::{Field, ProjectionError};
use crate::projection::DEFAULT_TARGET_CAPITAL;
use serde::{Deserialize, Serialize};

/// Longest accepted horizon for term-based modes
pub const MAX_TERM_YEARS: f64 = 10_000.0;

/// Which question the calculation answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// How long until the capital reaches the target
    TimeToTarget,
    /// How much the capital grows to over a fixed term
    FutureValue,
    /// Which annual rate reaches the target within a fixed term
    RequiredRate,
}

impl CalculationMode {
    pub fn uses_rate(&self) -> bool {
        !matches!(self, CalculationMode::RequiredRate)
    }

    pub fn uses_term(&self) -> bool {
        !matches!(self, CalculationMode::TimeToTarget)
    }
}

/// Numeric inputs for one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    pub starting_capital: f64,

    /// Annual rate in percent (12.0 means 12%)
    pub annual_rate_percent: f64,

    /// Horizon in years; ignored by time-to-target
    pub term_years: f64,

    pub inflation_enabled: bool,

    /// Annual inflation in percent; only read when `inflation_enabled`
    pub inflation_rate_percent: f64,

    /// Capital the time-to-target and required-rate modes aim for
    pub target_capital: f64,
}

impl SimulationInput {
    pub fn new(starting_capital: f64, annual_rate_percent: f64) -> Self {
        Self {
            starting_capital,
            annual_rate_percent,
            term_years: 0.0,
            inflation_enabled: false,
            inflation_rate_percent: 0.0,
            target_capital: DEFAULT_TARGET_CAPITAL,
        }
    }

    pub fn with_term(mut self, term_years: f64) -> Self {
        self.term_years = term_years;
        self
    }

    pub fn with_inflation(mut self, inflation_rate_percent: f64) -> Self {
        self.inflation_enabled = true;
        self.inflation_rate_percent = inflation_rate_percent;
        self
    }

    pub fn with_target(mut self, target_capital: f64) -> Self {
        self.target_capital = target_capital;
        self
    }

    /// Inflation actually applied: the entered rate when enabled, zero otherwise
    pub fn effective_inflation_percent(&self) -> f64 {
        if self.inflation_enabled {
            self.inflation_rate_percent
        } else {
            0.0
        }
    }

    /// Number of monthly steps in the term, `round(term_years * 12)`
    pub fn term_months(&self) -> u32 {
        (self.term_years * 12.0).round() as u32
    }

    /// Check the inputs the given mode depends on
    pub fn validate(&self, mode: CalculationMode) -> Result<(), ProjectionError> {
        require_positive(Field::StartingCapital, self.starting_capital)?;
        require_positive(Field::TargetCapital, self.target_capital)?;

        match mode {
            // Growth must be strictly positive or the target is never reached
            CalculationMode::TimeToTarget => require_positive(Field::AnnualRate, self.annual_rate_percent)?,
            CalculationMode::FutureValue => require_finite(Field::AnnualRate, self.annual_rate_percent)?,
            CalculationMode::RequiredRate => {}
        }

        if mode.uses_term() {
            require_finite(Field::TermYears, self.term_years)?;
            if self.term_years < 0.0 {
                return Err(ProjectionError::OutOfRange {
                    field: Field::TermYears,
                    reason: "must not be negative",
                });
            }
            if self.term_years > MAX_TERM_YEARS {
                return Err(ProjectionError::OutOfRange {
                    field: Field::TermYears,
                    reason: "must not exceed 10000 years",
                });
            }
        }

        if self.inflation_enabled {
            require_finite(Field::InflationRate, self.inflation_rate_percent)?;
            if self.inflation_rate_percent <= -1200.0 {
                return Err(ProjectionError::OutOfRange {
                    field: Field::InflationRate,
                    reason: "must be greater than -1200%",
                });
            }
        }

        Ok(())
    }
}

fn require_finite(field: Field, value: f64) -> Result<(), ProjectionError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProjectionError::OutOfRange { field, reason: "must be a finite number" })
    }
}

fn require_positive(field: Field, value: f64) -> Result<(), ProjectionError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ProjectionError::OutOfRange { field, reason: "must be greater than zero" })
    }
}

/// Form fields exactly as entered
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    pub capital: String,
    pub rate: String,
    pub term: String,
    pub inflation_enabled: bool,
    pub inflation: String,
    pub exchange_rate: String,
}

/// Parsed and validated calculation request
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    pub mode: CalculationMode,
    pub input: SimulationInput,
    /// Display-currency units per unit of base currency
    pub exchange_rate: f64,
}

impl RawInput {
    /// Parse the fields the mode needs and validate the result.
    ///
    /// Blank inflation counts as zero, a blank exchange rate as 1.0.
    pub fn parse(&self, mode: CalculationMode) -> Result<ParsedRequest, ProjectionError> {
        let starting_capital = parse_required(Field::StartingCapital, &self.capital)?;

        let annual_rate_percent = if mode.uses_rate() {
            parse_required(Field::AnnualRate, &self.rate)?
        } else {
            parse_optional(Field::AnnualRate, &self.rate)?.unwrap_or(0.0)
        };

        let term_years = if mode.uses_term() {
            parse_required(Field::TermYears, &self.term)?
        } else {
            0.0
        };

        let inflation_rate_percent = if self.inflation_enabled {
            parse_optional(Field::InflationRate, &self.inflation)?.unwrap_or(0.0)
        } else {
            0.0
        };

        let exchange_rate = parse_optional(Field::ExchangeRate, &self.exchange_rate)?.unwrap_or(1.0);
        require_positive(Field::ExchangeRate, exchange_rate)?;

        let input = SimulationInput {
            starting_capital,
            annual_rate_percent,
            term_years,
            inflation_enabled: self.inflation_enabled,
            inflation_rate_percent,
            target_capital: DEFAULT_TARGET_CAPITAL,
        };
        input.validate(mode)?;

        Ok(ParsedRequest { mode, input, exchange_rate })
    }
}

/// Parse a decimal number, accepting a comma as the decimal separator
pub fn parse_number(field: Field, text: &str) -> Result<f64, ProjectionError> {
    let normalized = text.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ProjectionError::InvalidNumber {
            field,
            value: text.trim().to_string(),
        })
}

fn parse_optional(field: Field, text: &str) -> Result<Option<f64>, ProjectionError> {
    if text.trim().is_empty() {
        Ok(None)
    } else {
        parse_number(field, text).map(Some)
    }
}

fn parse_required(field: Field, text: &str) -> Result<f64, ProjectionError> {
    parse_optional(field, text)?.ok_or(ProjectionError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(capital: &str, rate: &str, term: &str) -> RawInput {
        RawInput {
            capital: capital.to_string(),
            rate: rate.to_string(),
            term: term.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_time_to_target_ignores_term() {
        let request = raw("100000", "12", "").parse(CalculationMode::TimeToTarget).unwrap();
        assert_eq!(request.input.starting_capital, 100_000.0);
        assert_eq!(request.input.annual_rate_percent, 12.0);
        assert_eq!(request.exchange_rate, 1.0);
        assert_eq!(request.input.target_capital, DEFAULT_TARGET_CAPITAL);
    }

    #[test]
    fn test_parse_accepts_decimal_comma() {
        let mut fields = raw(" 1500,50 ", "7,5", "2,5");
        fields.exchange_rate = "0,0125".to_string();
        let request = fields.parse(CalculationMode::FutureValue).unwrap();
        assert_eq!(request.input.starting_capital, 1500.5);
        assert_eq!(request.input.annual_rate_percent, 7.5);
        assert_eq!(request.input.term_years, 2.5);
        assert_eq!(request.exchange_rate, 0.0125);
    }

    #[test]
    fn test_missing_term_is_validation_error() {
        let err = raw("100000", "12", "  ").parse(CalculationMode::FutureValue).unwrap_err();
        assert_eq!(err, ProjectionError::MissingField(Field::TermYears));
        assert!(err.is_validation());
    }

    #[test]
    fn test_non_numeric_capital_rejected() {
        let err = raw("lots", "12", "").parse(CalculationMode::TimeToTarget).unwrap_err();
        assert_eq!(err.field(), Some(Field::StartingCapital));
        assert!(matches!(err, ProjectionError::InvalidNumber { .. }));
    }

    #[test]
    fn test_infinite_values_rejected() {
        let err = raw("inf", "12", "").parse(CalculationMode::TimeToTarget).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidNumber { .. }));
    }

    #[test]
    fn test_time_to_target_requires_positive_rate() {
        for rate in ["0", "-3"] {
            let err = raw("100000", rate, "").parse(CalculationMode::TimeToTarget).unwrap_err();
            assert_eq!(err.field(), Some(Field::AnnualRate));
        }
        // Future value tolerates a zero or negative rate
        assert!(raw("100000", "-3", "5").parse(CalculationMode::FutureValue).is_ok());
    }

    #[test]
    fn test_required_rate_does_not_need_rate_field() {
        let request = raw("500000", "", "10").parse(CalculationMode::RequiredRate).unwrap();
        assert_eq!(request.input.term_years, 10.0);
    }

    #[test]
    fn test_inflation_blank_defaults_to_zero_and_disabled_is_ignored() {
        let mut fields = raw("100000", "12", "");
        fields.inflation = "garbage".to_string();
        // Not enabled: field never parsed
        assert!(fields.parse(CalculationMode::TimeToTarget).is_ok());

        fields.inflation_enabled = true;
        assert!(fields.parse(CalculationMode::TimeToTarget).is_err());

        fields.inflation = String::new();
        let request = fields.parse(CalculationMode::TimeToTarget).unwrap();
        assert!(request.input.inflation_enabled);
        assert_eq!(request.input.inflation_rate_percent, 0.0);
    }

    #[test]
    fn test_negative_term_and_zero_capital_rejected() {
        let err = raw("100000", "5", "-1").parse(CalculationMode::FutureValue).unwrap_err();
        assert_eq!(err.field(), Some(Field::TermYears));

        let err = raw("0", "5", "1").parse(CalculationMode::FutureValue).unwrap_err();
        assert_eq!(err.field(), Some(Field::StartingCapital));
    }

    #[test]
    fn test_non_positive_exchange_rate_rejected() {
        let mut fields = raw("100000", "5", "1");
        fields.exchange_rate = "0".to_string();
        let err = fields.parse(CalculationMode::FutureValue).unwrap_err();
        assert_eq!(err.field(), Some(Field::ExchangeRate));
    }

    #[test]
    fn test_target_must_be_positive() {
        let input = SimulationInput::new(100.0, 5.0).with_target(0.0);
        assert_eq!(
            input.validate(CalculationMode::TimeToTarget),
            Err(ProjectionError::OutOfRange {
                field: Field::TargetCapital,
                reason: "must be greater than zero",
            })
        );

        let input = SimulationInput::new(100.0, 5.0).with_target(f64::NAN);
        assert_eq!(
            input.validate(CalculationMode::RequiredRate).unwrap_err().field(),
            Some(Field::TargetCapital)
        );
        assert!(SimulationInput::new(100.0, 5.0).with_target(250.0).validate(CalculationMode::TimeToTarget).is_ok());
    }

    #[test]
    fn test_term_months_rounds() {
        let input = SimulationInput::new(1.0, 1.0).with_term(0.01);
        assert_eq!(input.term_months(), 0);
        assert_eq!(input.clone().with_term(2.5).term_months(), 30);
        assert_eq!(input.with_term(1.0 / 24.0 + 0.001).term_months(), 1);
    }
}
