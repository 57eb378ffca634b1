//! Print future values across a grid of annual rates
//!
//! Supports JSON output via --json flag
//! Accepts config via environment variables:
//!   CAPITAL, TERM_YEARS, INFLATION_PCT, RATE_FROM, RATE_TO, RATE_STEP

use anyhow::{bail, Context, Result};
use invest_calc::report::format_amount;
use invest_calc::scenario::ScenarioRunner;
use invest_calc::SimulationInput;
use std::env;
use std::time::Instant;

/// Largest grid the table will print
const MAX_GRID_ROWS: usize = 10_000;

fn env_f64(name: &str, default: f64) -> Result<f64> {
    match env::var(name) {
        Ok(text) => text
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a number, got {text:?}")),
        Err(_) => Ok(default),
    }
}

/// Rates from `from` to `to` inclusive in steps of `step`
fn rate_grid(from: f64, to: f64, step: f64) -> Result<Vec<f64>> {
    if !(from.is_finite() && to.is_finite() && step.is_finite()) {
        bail!("Rate grid bounds must be finite: RATE_FROM={from}, RATE_TO={to}, RATE_STEP={step}");
    }
    if step <= 0.0 || to < from {
        bail!("Rate grid is empty: RATE_FROM={from}, RATE_TO={to}, RATE_STEP={step}");
    }

    let steps = ((to - from) / step).floor();
    if steps >= MAX_GRID_ROWS as f64 {
        bail!("Rate grid has more than {MAX_GRID_ROWS} rows; raise RATE_STEP or narrow the range");
    }

    Ok((0..=steps as usize).map(|i| from + i as f64 * step).collect())
}

fn main() -> Result<()> {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");
    let start = Instant::now();

    let capital = env_f64("CAPITAL", 100_000.0)?;
    let term_years = env_f64("TERM_YEARS", 10.0)?;
    let rate_from = env_f64("RATE_FROM", 1.0)?;
    let rate_to = env_f64("RATE_TO", 20.0)?;
    let rate_step = env_f64("RATE_STEP", 1.0)?;

    let rates = rate_grid(rate_from, rate_to, rate_step)?;

    let mut input = SimulationInput::new(capital, rate_from).with_term(term_years);
    if let Ok(text) = env::var("INFLATION_PCT") {
        let inflation: f64 = text.trim().parse().context("INFLATION_PCT must be a number")?;
        input = input.with_inflation(inflation);
    }

    let runner = ScenarioRunner::new();
    let rows = runner.rate_sweep(&input, &rates)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Capital {} over {} years", format_amount(capital), term_years);
    println!("{:>8} {:>20} {:>20}", "Rate %", "Nominal", "Real");
    println!("{}", "-".repeat(50));
    for row in &rows {
        println!(
            "{:>8.2} {:>20} {:>20}",
            row.rate_percent,
            format_amount(row.final_nominal),
            format_amount(row.final_real),
        );
    }

    println!("\n{} rates in {:?}", rows.len(), start.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_grid_inclusive() {
        assert_eq!(rate_grid(1.0, 3.0, 1.0).unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(rate_grid(5.0, 5.0, 0.5).unwrap(), vec![5.0]);
    }

    #[test]
    fn test_rate_grid_rejects_empty_and_non_finite() {
        assert!(rate_grid(3.0, 1.0, 1.0).is_err());
        assert!(rate_grid(1.0, 3.0, 0.0).is_err());
        assert!(rate_grid(1.0, f64::INFINITY, 1.0).is_err());
        assert!(rate_grid(1.0, 3.0, f64::NAN).is_err());
    }

    #[test]
    fn test_rate_grid_caps_row_count() {
        assert!(rate_grid(1.0, 1e20, 1.0).is_err());
        assert!(rate_grid(1.0, 2.0, 1e-300).is_err());
        assert_eq!(rate_grid(0.0, 9_999.0, 1.0).unwrap().len(), MAX_GRID_ROWS);
    }
}
