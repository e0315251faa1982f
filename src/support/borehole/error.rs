use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors raised while validating borehole field parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParametersError {
    /// A geometric parameter or the number of years is not strictly positive.
    #[error("{parameter} must be strictly positive")]
    NonPositive {
        parameter: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The monthly profile does not have one entry per month.
    #[error("expected 12 monthly fractions, got {count}")]
    FractionCount { count: usize },

    /// A monthly fraction is negative or not a number.
    #[error("monthly fraction {month} is invalid: {value}")]
    InvalidFraction {
        /// Month number, 1 for January.
        month: usize,
        value: f64,
    },

    /// The monthly fractions do not add up to one.
    #[error("monthly fractions must sum to 1, got {sum}")]
    FractionSum { sum: f64 },
}
