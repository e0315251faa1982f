use std::error::Error as StdError;

use thiserror::Error;
use uom::si::{energy::megawatt_hour, f64::Energy};

/// Errors that can occur while estimating an extraction limit.
#[derive(Debug, Error)]
pub enum EstimateError {
    /// Fewer than two trial rates were given.
    #[error("at least 2 trial rates are required, got {count}")]
    TooFewTrials { count: usize },

    /// All trial rates are equal, so no line can be fitted through them.
    #[error("trial rates must not all be equal")]
    DegenerateTrials,

    /// A trial rate is not finite.
    #[error("trial rate is not finite: {} MWh", rate.get::<megawatt_hour>())]
    InvalidRate { rate: Energy },

    /// The fitted line is too flat to reach the target temperature.
    #[error("fitted slope {slope} K/MWh is too flat to solve for the target")]
    DegenerateSlope {
        /// Fitted slope, in K per MWh.
        slope: f64,
    },

    /// The model returned a temperature that is not finite.
    #[error("non-finite temperature at {} MWh", rate.get::<megawatt_hour>())]
    NonFinite { rate: Energy },

    /// The model failed to evaluate a trial rate.
    #[error("evaluation failed at {} MWh", rate.get::<megawatt_hour>())]
    Evaluation {
        rate: Energy,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}
