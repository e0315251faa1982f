use crate::models::geothermal::{
    extraction_limit::{EstimatorConfig, ExtractionLimit, estimate},
    simulation::{FemClient, Simulation},
};

use super::{Case, CaseError};

/// The work done for one case of a batch.
pub trait CaseRunner {
    /// Estimates the extraction limit of `case`.
    ///
    /// # Errors
    ///
    /// Returns a [`CaseError`] if the case cannot be evaluated.
    fn run(&self, case: &Case) -> Result<ExtractionLimit, CaseError>;
}

/// Builds a finite-element model per case and runs the estimator on it.
pub struct FemRunner<'c, C> {
    client: &'c C,
    config: EstimatorConfig,
}

impl<'c, C: FemClient> FemRunner<'c, C> {
    pub fn new(client: &'c C, config: EstimatorConfig) -> Self {
        Self { client, config }
    }
}

impl<C: FemClient> CaseRunner for FemRunner<'_, C> {
    fn run(&self, case: &Case) -> Result<ExtractionLimit, CaseError> {
        let simulation = Simulation::build(self.client, &case.params, &case.geology)?;
        Ok(estimate(&simulation, &case.rates, &self.config)?)
    }
}
