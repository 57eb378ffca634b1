//! Investment Calculator - Compound-interest projection engine
//!
//! This library provides:
//! - Time to reach a target capital under monthly compounding
//! - Future value over a fixed term, with optional inflation adjustment
//! - Required annual rate to reach a target within a term
//! - Currency conversion, result text and chart-ready series
//! - CSV export and batch scenario runs

pub mod error;
pub mod input;
pub mod projection;
pub mod currency;
pub mod report;
pub mod export;
pub mod scenario;

// Re-export commonly used types
pub use error::{Field, ProjectionError};
pub use input::{CalculationMode, RawInput, SimulationInput};
pub use projection::{
    calculate, CalculationOutcome, ProjectionEngine, ProjectionPoint, ProjectionSeries, RateSearch,
};
pub use currency::{Currency, ExchangeRate};
pub use report::{ChartData, Summary};
pub use scenario::ScenarioRunner;
