//! Spreadsheet export of projection series
//!
//! Writes a three-column CSV table (`Months,Nominal,Real`) with a header row
//! and one row per month.

use crate::projection::{CalculationOutcome, ProjectionSeries};
use log::info;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

pub const HEADERS: [&str; 3] = ["Months", "Nominal", "Real"];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export: run a calculation first")]
    NothingToExport,

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode export: {0}")]
    Csv(#[from] csv::Error),
}

/// Write the series as CSV to any writer
pub fn write_series<W: Write>(writer: W, series: &ProjectionSeries) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    for point in series {
        csv_writer.write_record([
            point.month.to_string(),
            point.nominal.to_string(),
            point.real.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the series to a CSV file, replacing any existing file
pub fn write_series_to_path<P: AsRef<Path>>(path: P, series: &ProjectionSeries) -> Result<(), ExportError> {
    let file = std::fs::File::create(path.as_ref())?;
    write_series(std::io::BufWriter::new(file), series)?;
    info!("Exported {} rows to {}", series.len(), path.as_ref().display());
    Ok(())
}

/// Export the series of an outcome; outcomes without a series cannot be exported
pub fn export_outcome<P: AsRef<Path>>(path: P, outcome: Option<&CalculationOutcome>) -> Result<(), ExportError> {
    let series = outcome
        .and_then(CalculationOutcome::series)
        .ok_or(ExportError::NothingToExport)?;
    write_series_to_path(path, series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionPoint;

    #[test]
    fn test_write_series_table() {
        let mut series = ProjectionSeries::new(100.0);
        series.push(ProjectionPoint { month: 1, nominal: 101.0, real: 100.5 });

        let mut buffer = Vec::new();
        write_series(&mut buffer, &series).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "Months,Nominal,Real\n0,100,100\n1,101,100.5\n");
    }

    #[test]
    fn test_export_without_series_fails() {
        let path = std::env::temp_dir().join("invest_calc_never_written.csv");
        assert!(matches!(export_outcome(&path, None), Err(ExportError::NothingToExport)));
        assert!(matches!(
            export_outcome(&path, Some(&CalculationOutcome::RateNotFound)),
            Err(ExportError::NothingToExport)
        ));
    }

    #[test]
    fn test_write_series_to_path_round_trip_row_count() {
        let series = crate::ProjectionEngine::default()
            .future_value(&crate::SimulationInput::new(1000.0, 5.0).with_term(2.0))
            .unwrap()
            .series;
        let path = std::env::temp_dir().join(format!("invest_calc_export_{}.csv", std::process::id()));

        write_series_to_path(&path, &series).unwrap();
        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.headers().unwrap().iter().collect::<Vec<_>>(), HEADERS);
        assert_eq!(reader.records().count(), 25);

        std::fs::remove_file(&path).unwrap();
    }
}
