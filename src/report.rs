//! Presentation of calculation outcomes: result text and chart-ready data

use crate::currency::ExchangeRate;
use crate::projection::{CalculationOutcome, ProjectionSeries};
use serde::Serialize;
use std::fmt;

/// Format an amount with thousands separators and two decimals
pub fn format_amount(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (digits, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}

/// Result text for one calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub headline: String,
    pub details: Vec<String>,
    /// False when the outcome is a "not found" notice rather than a result
    pub is_result: bool,
}

impl Summary {
    /// Amounts are shown converted with `rate`
    pub fn from_outcome(outcome: &CalculationOutcome, rate: &ExchangeRate) -> Self {
        let symbol = rate.currency.symbol();
        let amounts = |series: &ProjectionSeries| {
            let totals = series.summary();
            vec![
                format!("Nominal: {} {}", format_amount(rate.convert(totals.final_nominal)), symbol),
                format!("Real: {} {}", format_amount(rate.convert(totals.final_real)), symbol),
            ]
        };

        match outcome {
            CalculationOutcome::TimeToTarget { months, series } => Self {
                headline: format!(
                    "Target reached in {} years and {} months",
                    months / 12,
                    months % 12
                ),
                details: amounts(series),
                is_result: true,
            },
            CalculationOutcome::FutureValue { term_years, series, .. } => Self {
                headline: format!("After {term_years} years:"),
                details: amounts(series),
                is_result: true,
            },
            CalculationOutcome::RequiredRate { rate_percent, .. } => Self {
                headline: format!("Required rate: {rate_percent:.1}% per year"),
                details: Vec::new(),
                is_result: true,
            },
            CalculationOutcome::RateNotFound => Self {
                headline: "The target is out of reach even at 99.9% per year".to_string(),
                details: Vec::new(),
                is_result: false,
            },
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.headline)?;
        for line in &self.details {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

/// Curves for plotting capital growth against month index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub months: Vec<u32>,
    pub nominal: Vec<f64>,
    /// Inflation-adjusted curve, only when inflation is enabled
    pub real: Option<Vec<f64>>,
}

impl ChartData {
    pub fn from_series(series: &ProjectionSeries, rate: &ExchangeRate, inflation_enabled: bool) -> Self {
        Self {
            title: "Capital growth".to_string(),
            x_label: "Months".to_string(),
            y_label: format!("Amount ({})", rate.currency.code()),
            months: series.months().collect(),
            nominal: series.iter().map(|p| rate.convert(p.nominal)).collect(),
            real: inflation_enabled.then(|| series.iter().map(|p| rate.convert(p.real)).collect()),
        }
    }
}
