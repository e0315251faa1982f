use std::error::Error as StdError;

use super::{ModelSetup, Parameter};

/// Connection to an external finite-element solver.
///
/// Implementations translate a [`ModelSetup`] into the solver's own model
/// representation and drive it. Methods take `&self` so that one client can
/// serve several models in sequence.
pub trait FemClient {
    /// Handle to a model living in the solver.
    type Model;

    type Error: StdError + Send + Sync + 'static;

    /// Creates a solver model from the setup.
    ///
    /// # Errors
    ///
    /// Returns the solver's error if any part of the setup is rejected.
    fn build(&self, setup: &ModelSetup) -> Result<Self::Model, Self::Error>;

    /// Sets or replaces a model parameter.
    ///
    /// # Errors
    ///
    /// Returns the solver's error if the parameter is rejected.
    fn set_parameter(&self, model: &Self::Model, parameter: &Parameter)
    -> Result<(), Self::Error>;

    /// Runs the study of the model.
    ///
    /// # Errors
    ///
    /// Returns the solver's error if the study fails.
    fn solve(&self, model: &Self::Model) -> Result<(), Self::Error>;

    /// Evaluates an expression at every stored time step, in the given unit.
    ///
    /// # Errors
    ///
    /// Returns the solver's error if the expression cannot be evaluated.
    fn evaluate(
        &self,
        model: &Self::Model,
        expression: &str,
        unit: &str,
    ) -> Result<Vec<f64>, Self::Error>;
}
