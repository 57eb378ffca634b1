//! Investment Calculator CLI
//!
//! Runs one projection and prints the result. Optional outputs: JSON report,
//! CSV export of the monthly series, and chart data as JSON.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use invest_calc::currency::{load_rates, Currency, ExchangeRate};
use invest_calc::export::export_outcome;
use invest_calc::{CalculationMode, CalculationOutcome, ChartData, ProjectionEngine, RawInput, Summary};
use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// How long until the capital reaches one million
    TimeToTarget,
    /// How much the capital grows to over the term
    FutureValue,
    /// Which annual rate reaches one million within the term
    RequiredRate,
}

impl From<ModeArg> for CalculationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::TimeToTarget => CalculationMode::TimeToTarget,
            ModeArg::FutureValue => CalculationMode::FutureValue,
            ModeArg::RequiredRate => CalculationMode::RequiredRate,
        }
    }
}

/// Compound-interest investment calculator.
#[derive(Parser, Debug)]
#[command(name = "invest-calc", version, about)]
struct Args {
    /// Calculation mode.
    #[arg(short, long, value_enum, default_value = "time-to-target")]
    mode: ModeArg,

    /// Starting capital, in rubles.
    #[arg(short, long)]
    capital: String,

    /// Annual interest rate in percent.
    #[arg(short, long, default_value = "")]
    rate: String,

    /// Term in years (future-value and required-rate modes).
    #[arg(short, long, default_value = "")]
    term: String,

    /// Annual inflation in percent; enables inflation adjustment.
    #[arg(short, long)]
    inflation: Option<String>,

    /// Display currency: RUB, USD, EUR or CNY.
    #[arg(long, default_value = "RUB", env = "INVEST_CALC_CURRENCY")]
    currency: String,

    /// Manual exchange rate, display-currency units per ruble.
    #[arg(long, default_value = "", env = "INVEST_CALC_EXCHANGE_RATE")]
    exchange_rate: String,

    /// CSV of daily rates (CharCode,Nominal,Value) used when no manual rate is given.
    #[arg(long, env = "INVEST_CALC_RATES_FILE")]
    rates_file: Option<PathBuf>,

    /// Write the monthly series to this CSV file.
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Write chart data to this JSON file.
    #[arg(long)]
    chart_data: Option<PathBuf>,

    /// Print the full result as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a Summary,
    exchange_rate: &'a ExchangeRate,
    outcome: &'a CalculationOutcome,
}

fn resolve_exchange_rate(args: &Args, currency: Currency, manual: f64) -> Result<ExchangeRate> {
    if currency == Currency::BASE {
        return Ok(ExchangeRate::base());
    }
    if !args.exchange_rate.trim().is_empty() {
        return Ok(ExchangeRate::manual(currency, manual)?);
    }
    if let Some(path) = &args.rates_file {
        let table = load_rates(path)
            .with_context(|| format!("Failed to load exchange rates from {}", path.display()))?;
        let rate = table.get(currency)?;
        info!("Using {} rate {:.6} from {}", currency, rate.units_per_base, path.display());
        return Ok(rate);
    }

    warn!("No exchange rate for {currency}; showing amounts at 1.0");
    Ok(ExchangeRate { currency, units_per_base: 1.0 })
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mode = CalculationMode::from(args.mode);
    let currency: Currency = args.currency.parse()?;

    let raw = RawInput {
        capital: args.capital.clone(),
        rate: args.rate.clone(),
        term: args.term.clone(),
        inflation_enabled: args.inflation.is_some(),
        inflation: args.inflation.clone().unwrap_or_default(),
        exchange_rate: args.exchange_rate.clone(),
    };

    let request = raw.parse(mode).context("Check the entered data")?;

    let rate = resolve_exchange_rate(&args, currency, request.exchange_rate)?;
    let engine = ProjectionEngine::default();
    let outcome = engine
        .calculate(request.mode, &request.input)
        .context("Calculation failed")?;
    let summary = Summary::from_outcome(&outcome, &rate);

    if args.json {
        let report = JsonReport {
            summary: &summary,
            exchange_rate: &rate,
            outcome: &outcome,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{summary}");
    }

    if let Some(path) = &args.export {
        export_outcome(path, Some(&outcome))
            .with_context(|| format!("Failed to export to {}", path.display()))?;
        if !args.json {
            println!("\nMonthly series written to: {}", path.display());
        }
    }

    if let Some(path) = &args.chart_data {
        let series = outcome
            .series()
            .context("No series to chart: the required rate was not found")?;
        let chart = ChartData::from_series(series, &rate, request.input.inflation_enabled);
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &chart)?;
        info!("Chart data written to {}", path.display());
    }

    if !summary.is_result {
        std::process::exit(1);
    }

    Ok(())
}
