use std::error::Error as StdError;

use thiserror::Error;
use uom::si::{energy::megawatt_hour, f64::Energy};

type Source = Box<dyn StdError + Send + Sync>;

/// Errors that can occur while building or evaluating a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The solver rejected the model setup.
    #[error("failed to build model")]
    Build(#[source] Source),

    /// The solver failed to run the study for the given rate.
    #[error("failed to solve at {} MWh", rate.get::<megawatt_hour>())]
    Solve {
        rate: Energy,
        #[source]
        source: Source,
    },

    /// The solver failed to evaluate the wall temperature.
    #[error("failed to evaluate {expression}")]
    Evaluate {
        expression: &'static str,
        #[source]
        source: Source,
    },

    /// The solver returned no time steps.
    #[error("{expression} has no values")]
    EmptySeries { expression: &'static str },

    /// The solver returned a value that is not finite.
    #[error("{expression} has a non-finite value at step {step}")]
    NonFinite {
        expression: &'static str,
        step: usize,
    },
}
