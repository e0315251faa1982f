use std::{error::Error as StdError, io, path::PathBuf};

use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Length, TemperatureInterval},
    length::meter,
};

/// Errors that can occur while running the borehole-design tool.
#[derive(Debug, Error)]
pub enum DesignToolError {
    /// No layer of the geology lies above the borehole tip.
    #[error("geology has no layers above {} m", depth.get::<meter>())]
    NoGround { depth: Length },

    /// Reading or writing an exchange file failed.
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The tool failed to run.
    #[error("design tool failed")]
    Tool(#[source] Box<dyn StdError + Send + Sync>),

    /// A labelled line is missing from the report.
    #[error("report has no line starting with {label:?}")]
    MissingLine { label: &'static str },

    /// A labelled line of the report has no readable value.
    #[error("cannot read value from report line {line:?}")]
    Parse { label: &'static str, line: String },

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Best temperature residual achieved.
        residual: TemperatureInterval,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
