//! Compounding state tracked while stepping through a projection

use super::series::ProjectionPoint;

/// Capital at a point in time during projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundingState {
    /// Months elapsed since the start (0 = starting capital)
    pub month: u32,

    /// Nominal capital after `month` compounding steps
    pub capital: f64,
}

impl CompoundingState {
    /// Initialize state at projection start
    pub fn new(starting_capital: f64) -> Self {
        Self {
            month: 0,
            capital: starting_capital,
        }
    }

    /// Apply one month of interest at the given annual rate (percent)
    pub fn advance_month(&mut self, annual_rate_percent: f64) {
        self.capital += self.capital * (annual_rate_percent / 100.0) / 12.0;
        self.month += 1;
    }

    /// Capital deflated by cumulative inflation since month 0
    pub fn real_value(&self, inflation_rate_percent: f64) -> f64 {
        self.capital / monthly_inflation_factor(inflation_rate_percent).powi(self.month as i32)
    }

    /// Snapshot of the current month for the series
    pub fn point(&self, inflation_rate_percent: f64) -> ProjectionPoint {
        ProjectionPoint {
            month: self.month,
            nominal: self.capital,
            real: self.real_value(inflation_rate_percent),
        }
    }
}

/// One month of inflation as a growth factor, `1 + inflation/100/12`
pub(crate) fn monthly_inflation_factor(inflation_rate_percent: f64) -> f64 {
    1.0 + inflation_rate_percent / 100.0 / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_advance_month_compounds_monthly() {
        let mut state = CompoundingState::new(1000.0);
        state.advance_month(12.0);
        assert_eq!(state.month, 1);
        assert_relative_eq!(state.capital, 1010.0, max_relative = 1e-12);

        state.advance_month(12.0);
        assert_relative_eq!(state.capital, 1020.1, max_relative = 1e-12);
    }

    #[test]
    fn test_real_value_without_inflation_is_nominal() {
        let mut state = CompoundingState::new(500.0);
        for _ in 0..24 {
            state.advance_month(6.0);
        }
        assert_eq!(state.real_value(0.0), state.capital);
    }

    #[test]
    fn test_real_value_deflates_cumulatively() {
        let mut state = CompoundingState::new(1000.0);
        for _ in 0..12 {
            state.advance_month(0.0);
        }
        // 12% inflation: 1% per month for 12 months
        assert_relative_eq!(state.real_value(12.0), 1000.0 / 1.01_f64.powi(12), max_relative = 1e-12);
    }
}
