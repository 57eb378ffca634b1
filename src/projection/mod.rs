//! Projection engine for monthly compound-interest projections

mod state;
mod series;
mod engine;
mod search;

pub use state::CompoundingState;
pub use series::{ProjectionPoint, ProjectionSeries, SeriesError, SeriesSummary};
pub use engine::{
    calculate, CalculationOutcome, FutureValue, ProjectionConfig, ProjectionEngine, TimeToTarget,
};
pub use search::{final_capital_at_rate, RateSearch};

// ============================================================================
// Engine Constants
// ============================================================================

/// Capital the "become a millionaire" modes aim for unless overridden
pub const DEFAULT_TARGET_CAPITAL: f64 = 1_000_000.0;

/// Time-to-target gives up after this many months (10,000 years)
pub const MAX_TIME_TO_TARGET_MONTHS: u32 = 120_000;

/// Lowest required-rate candidate, in tenths of a percent (0.1%)
pub const RATE_SEARCH_MIN_TENTHS: u32 = 1;

/// Highest required-rate candidate, in tenths of a percent (99.9%)
pub const RATE_SEARCH_MAX_TENTHS: u32 = 999;
