//! Error types for projection requests

use std::fmt;
use thiserror::Error;

/// Named input field, used to point validation errors at the offending value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    StartingCapital,
    AnnualRate,
    TermYears,
    InflationRate,
    ExchangeRate,
    TargetCapital,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::StartingCapital => "starting capital",
            Field::AnnualRate => "annual rate",
            Field::TermYears => "term (years)",
            Field::InflationRate => "inflation rate",
            Field::ExchangeRate => "exchange rate",
            Field::TargetCapital => "target capital",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("Missing value: {0}")]
    MissingField(Field),

    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: Field, value: String },

    #[error("Invalid {field}: {reason}")]
    OutOfRange { field: Field, reason: &'static str },

    #[error("Target of {target:.2} not reached within {months} months")]
    TargetUnreachable { target: f64, months: u32 },
}

impl ProjectionError {
    /// True for errors caused by bad user input (as opposed to an exhausted computation)
    pub fn is_validation(&self) -> bool {
        !matches!(self, ProjectionError::TargetUnreachable { .. })
    }

    /// The field at fault, if any
    pub fn field(&self) -> Option<Field> {
        match self {
            ProjectionError::MissingField(field)
            | ProjectionError::InvalidNumber { field, .. }
            | ProjectionError::OutOfRange { field, .. } => Some(*field),
            ProjectionError::TargetUnreachable { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(ProjectionError::MissingField(Field::TermYears).is_validation());
        assert!(!ProjectionError::TargetUnreachable { target: 1.0, months: 5 }.is_validation());
    }

    #[test]
    fn test_error_message_names_field() {
        let err = ProjectionError::InvalidNumber {
            field: Field::StartingCapital,
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid number for starting capital: \"abc\"");
        assert_eq!(err.field(), Some(Field::StartingCapital));
    }
}
