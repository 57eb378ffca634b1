//! Month-indexed projection output

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capital at the end of one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub month: u32,
    /// Capital without inflation adjustment
    pub nominal: f64,
    /// Capital deflated by cumulative inflation
    pub real: f64,
}

/// Rejected point list when rebuilding a series
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("series has no points")]
    Empty,

    #[error("series starts at month {0}, expected month 0")]
    BadStart(u32),

    #[error("month {month} follows month {previous}; months must be strictly increasing")]
    NotIncreasing { previous: u32, month: u32 },
}

/// Ordered projection points, strictly increasing in month and starting at month 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ProjectionPoint>", into = "Vec<ProjectionPoint>")]
pub struct ProjectionSeries {
    points: Vec<ProjectionPoint>,
}

impl ProjectionSeries {
    /// Start a series at month 0 with the starting capital as both nominal and real value
    pub fn new(starting_capital: f64) -> Self {
        Self::with_capacity(starting_capital, 0)
    }

    pub fn with_capacity(starting_capital: f64, months: usize) -> Self {
        let mut points = Vec::with_capacity(months + 1);
        points.push(ProjectionPoint {
            month: 0,
            nominal: starting_capital,
            real: starting_capital,
        });
        Self { points }
    }

    /// Append the next month
    pub fn push(&mut self, point: ProjectionPoint) {
        debug_assert!(
            self.points.last().map_or(true, |last| point.month > last.month),
            "months must be strictly increasing"
        );
        self.points.push(point);
    }

    pub fn points(&self) -> &[ProjectionPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a series holds at least its starting point
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> &ProjectionPoint {
        &self.points[0]
    }

    pub fn last(&self) -> &ProjectionPoint {
        &self.points[self.points.len() - 1]
    }

    pub fn months(&self) -> impl Iterator<Item = u32> + '_ {
        self.points.iter().map(|p| p.month)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectionPoint> {
        self.points.iter()
    }

    /// Get summary statistics
    pub fn summary(&self) -> SeriesSummary {
        let first = self.first();
        let last = self.last();

        SeriesSummary {
            total_months: last.month,
            starting_capital: first.nominal,
            final_nominal: last.nominal,
            final_real: last.real,
            nominal_growth: last.nominal - first.nominal,
            inflation_loss: last.nominal - last.real,
        }
    }
}

impl TryFrom<Vec<ProjectionPoint>> for ProjectionSeries {
    type Error = SeriesError;

    fn try_from(points: Vec<ProjectionPoint>) -> Result<Self, Self::Error> {
        let first = points.first().ok_or(SeriesError::Empty)?;
        if first.month != 0 {
            return Err(SeriesError::BadStart(first.month));
        }
        if let Some(pair) = points.windows(2).find(|pair| pair[1].month <= pair[0].month) {
            return Err(SeriesError::NotIncreasing {
                previous: pair[0].month,
                month: pair[1].month,
            });
        }
        Ok(Self { points })
    }
}

impl From<ProjectionSeries> for Vec<ProjectionPoint> {
    fn from(series: ProjectionSeries) -> Self {
        series.points
    }
}

impl<'a> IntoIterator for &'a ProjectionSeries {
    type Item = &'a ProjectionPoint;
    type IntoIter = std::slice::Iter<'a, ProjectionPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub total_months: u32,
    pub starting_capital: f64,
    pub final_nominal: f64,
    pub final_real: f64,
    pub nominal_growth: f64,
    pub inflation_loss: f64,
}
