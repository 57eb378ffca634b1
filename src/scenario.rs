//! Scenario runner for batch projections
//!
//! Runs many independent calculations with one engine configuration. Each
//! calculation is sequential; a batch is spread across threads with rayon.

use crate::error::ProjectionError;
use crate::input::{CalculationMode, SimulationInput};
use crate::projection::{CalculationOutcome, ProjectionEngine};
use log::info;
use rayon::prelude::*;
use serde::Serialize;

/// Future value of one input at one candidate rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSweepRow {
    pub rate_percent: f64,
    pub final_nominal: f64,
    pub final_real: f64,
}

/// Batch runner sharing one engine configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let rows = runner.rate_sweep(&input, &[4.0, 6.0, 8.0])?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the default engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the same mode for many inputs; results keep input order
    pub fn run_batch(
        &self,
        mode: CalculationMode,
        inputs: &[SimulationInput],
    ) -> Vec<Result<CalculationOutcome, ProjectionError>> {
        info!("Running {} {:?} scenarios", inputs.len(), mode);
        inputs
            .par_iter()
            .map(|input| self.engine.calculate(mode, input))
            .collect()
    }

    /// Future value of `input` at each rate in `rates_percent`
    pub fn rate_sweep(
        &self,
        input: &SimulationInput,
        rates_percent: &[f64],
    ) -> Result<Vec<RateSweepRow>, ProjectionError> {
        rates_percent
            .par_iter()
            .map(|&rate_percent| {
                let at_rate = SimulationInput {
                    annual_rate_percent: rate_percent,
                    ..input.clone()
                };
                let result = self.engine.future_value(&at_rate)?;
                let last = result.series.last();
                Ok(RateSweepRow {
                    rate_percent,
                    final_nominal: last.nominal,
                    final_real: last.real,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_batch_keeps_order_and_errors() {
        let runner = ScenarioRunner::new();
        let inputs = vec![
            SimulationInput::new(100_000.0, 12.0),
            SimulationInput::new(100_000.0, 0.0),
            SimulationInput::new(500_000.0, 12.0),
        ];

        let results = runner.run_batch(CalculationMode::TimeToTarget, &inputs);
        assert_eq!(results.len(), 3);
        assert!(matches!(results[0], Ok(CalculationOutcome::TimeToTarget { months: 232, .. })));
        assert!(results[1].is_err());

        let months = |r: &Result<CalculationOutcome, ProjectionError>| match r {
            Ok(CalculationOutcome::TimeToTarget { months, .. }) => *months,
            _ => panic!("expected time-to-target outcome"),
        };
        assert!(months(&results[2]) < months(&results[0]));
    }

    #[test]
    fn test_rate_sweep_increases_with_rate() {
        let runner = ScenarioRunner::new();
        let input = SimulationInput::new(100_000.0, 0.0).with_term(10.0).with_inflation(4.0);

        let rows = runner.rate_sweep(&input, &[3.0, 5.0, 7.0]).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].rate_percent, 3.0);
        assert!(rows[2].final_nominal > rows[1].final_nominal);
        assert!(rows[1].final_nominal > rows[0].final_nominal);
        assert!(rows.iter().all(|r| r.final_real < r.final_nominal));
    }
}
