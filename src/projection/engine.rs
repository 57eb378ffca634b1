//! Core projection engine for the three calculation modes

use log::debug;
use serde::{Deserialize, Serialize};

use super::search::{search_required_rate, RateSearch};
use super::series::ProjectionSeries;
use super::state::CompoundingState;
use super::{MAX_TIME_TO_TARGET_MONTHS, RATE_SEARCH_MAX_TENTHS, RATE_SEARCH_MIN_TENTHS};
use crate::error::ProjectionError;
use crate::input::{CalculationMode, SimulationInput};

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Time-to-target fails with `TargetUnreachable` past this many months
    pub max_time_to_target_months: u32,

    /// Required-rate candidates, in tenths of a percent
    pub rate_search_min_tenths: u32,
    pub rate_search_max_tenths: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            max_time_to_target_months: MAX_TIME_TO_TARGET_MONTHS,
            rate_search_min_tenths: RATE_SEARCH_MIN_TENTHS,
            rate_search_max_tenths: RATE_SEARCH_MAX_TENTHS,
        }
    }
}

/// Result of a time-to-target projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeToTarget {
    /// Months until capital first reaches the target
    pub months: u32,
    pub series: ProjectionSeries,
}

impl TimeToTarget {
    pub fn years(&self) -> u32 {
        self.months / 12
    }

    pub fn remaining_months(&self) -> u32 {
        self.months % 12
    }
}

/// Result of a fixed-term projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureValue {
    pub final_nominal: f64,
    pub series: ProjectionSeries,
}

/// Main projection engine
///
/// Holds no state between calls; every method is a pure function of its input.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Compound monthly until capital reaches `input.target_capital`.
    ///
    /// Requires a positive rate; a rate too small to reach the target within
    /// the configured ceiling returns `TargetUnreachable`.
    pub fn time_to_target(&self, input: &SimulationInput) -> Result<TimeToTarget, ProjectionError> {
        input.validate(CalculationMode::TimeToTarget)?;

        let inflation = input.effective_inflation_percent();
        let mut state = CompoundingState::new(input.starting_capital);
        let mut series = ProjectionSeries::new(input.starting_capital);

        while state.capital < input.target_capital {
            if state.month >= self.config.max_time_to_target_months {
                return Err(ProjectionError::TargetUnreachable {
                    target: input.target_capital,
                    months: state.month,
                });
            }
            state.advance_month(input.annual_rate_percent);
            series.push(state.point(inflation));
        }

        debug!(
            "time to target: {} months at {}% (final nominal {:.2})",
            state.month, input.annual_rate_percent, state.capital
        );

        Ok(TimeToTarget { months: state.month, series })
    }

    /// Compound monthly for `round(term_years * 12)` months
    pub fn future_value(&self, input: &SimulationInput) -> Result<FutureValue, ProjectionError> {
        input.validate(CalculationMode::FutureValue)?;

        let months = input.term_months();
        let inflation = input.effective_inflation_percent();
        let mut state = CompoundingState::new(input.starting_capital);
        let mut series = ProjectionSeries::with_capacity(input.starting_capital, months as usize);

        for _month in 1..=months {
            state.advance_month(input.annual_rate_percent);
            series.push(state.point(inflation));
        }

        debug!(
            "future value: {} months at {}% -> {:.2}",
            months, input.annual_rate_percent, state.capital
        );

        Ok(FutureValue { final_nominal: state.capital, series })
    }

    /// Find the lowest rate on the 0.1% grid that reaches the target within the term.
    ///
    /// `input.annual_rate_percent` is ignored. Exhausting the grid is `RateSearch::NotFound`.
    pub fn required_rate(&self, input: &SimulationInput) -> Result<RateSearch, ProjectionError> {
        input.validate(CalculationMode::RequiredRate)?;

        let months = input.term_months();
        let inflation = input.inflation_enabled.then_some(input.inflation_rate_percent);
        let result = search_required_rate(
            input.starting_capital,
            input.target_capital,
            months,
            inflation,
            self.config.rate_search_min_tenths,
            self.config.rate_search_max_tenths,
        );

        debug!("required rate over {} months: {:?}", months, result);

        Ok(result)
    }

    /// Run the calculation for `mode`
    pub fn calculate(
        &self,
        mode: CalculationMode,
        input: &SimulationInput,
    ) -> Result<CalculationOutcome, ProjectionError> {
        match mode {
            CalculationMode::TimeToTarget => {
                let TimeToTarget { months, series } = self.time_to_target(input)?;
                Ok(CalculationOutcome::TimeToTarget { months, series })
            }
            CalculationMode::FutureValue => {
                let FutureValue { final_nominal, series } = self.future_value(input)?;
                Ok(CalculationOutcome::FutureValue {
                    term_years: input.term_years,
                    final_nominal,
                    series,
                })
            }
            CalculationMode::RequiredRate => match self.required_rate(input)? {
                RateSearch::Found { rate_percent } => {
                    // Project at the found rate so the result can be charted and exported
                    let at_rate = SimulationInput {
                        annual_rate_percent: rate_percent,
                        ..input.clone()
                    };
                    let FutureValue { series, .. } = self.future_value(&at_rate)?;
                    Ok(CalculationOutcome::RequiredRate { rate_percent, series })
                }
                RateSearch::NotFound => Ok(CalculationOutcome::RateNotFound),
            },
        }
    }
}

/// Run one calculation with the default engine configuration
pub fn calculate(
    mode: CalculationMode,
    input: &SimulationInput,
) -> Result<CalculationOutcome, ProjectionError> {
    ProjectionEngine::default().calculate(mode, input)
}

/// Outcome of one calculation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CalculationOutcome {
    TimeToTarget {
        months: u32,
        series: ProjectionSeries,
    },
    FutureValue {
        term_years: f64,
        final_nominal: f64,
        series: ProjectionSeries,
    },
    RequiredRate {
        rate_percent: f64,
        series: ProjectionSeries,
    },
    /// Required-rate search exhausted; not an error
    RateNotFound,
}

impl CalculationOutcome {
    pub fn mode(&self) -> CalculationMode {
        match self {
            CalculationOutcome::TimeToTarget { .. } => CalculationMode::TimeToTarget,
            CalculationOutcome::FutureValue { .. } => CalculationMode::FutureValue,
            CalculationOutcome::RequiredRate { .. } | CalculationOutcome::RateNotFound => {
                CalculationMode::RequiredRate
            }
        }
    }

    pub fn series(&self) -> Option<&ProjectionSeries> {
        match self {
            CalculationOutcome::TimeToTarget { series, .. }
            | CalculationOutcome::FutureValue { series, .. }
            | CalculationOutcome::RequiredRate { series, .. } => Some(series),
            CalculationOutcome::RateNotFound => None,
        }
    }
}
