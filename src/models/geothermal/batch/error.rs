use std::{error::Error as StdError, io, path::PathBuf};

use thiserror::Error;

use crate::{
    models::geothermal::{extraction_limit::EstimateError, simulation::SimulationError},
    support::{borehole::ParametersError, geology::GeologyError},
};

/// Failure of a single case.
///
/// A failed case is reported and skipped; it never aborts the batch.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("invalid geology")]
    Geology(#[from] GeologyError),

    #[error("invalid borehole parameters")]
    Parameters(#[from] ParametersError),

    #[error("simulation failed")]
    Simulation(#[from] SimulationError),

    #[error("extraction limit estimate failed")]
    Estimate(#[from] EstimateError),

    #[error("case runner failed")]
    Runner(#[source] Box<dyn StdError + Send + Sync>),
}

/// Failure to read or write the result store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("result store {} is not valid CSV", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write result store {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
