//! Finite-element simulation of a single borehole.
//!
//! A [`Simulation`] owns a solver model built once from a [`ModelSetup`] and
//! evaluates it for any annual extraction energy. Each evaluation sets the
//! energy parameter, runs the transient study and returns the coldest
//! area-averaged borehole wall temperature over the operating period.
//!
//! The solver itself sits behind the [`FemClient`] trait.

mod client;
mod error;
mod setup;

pub use client::FemClient;
pub use error::SimulationError;
pub use setup::{
    ANNUAL_ENERGY, Block, BoundaryCondition, Cylinder, DomainModel, Extrapolation, Geometry,
    InitialTemperature, MEAN_WALL_TEMPERATURE, Mesh, ModelSetup, Parameter, Physics,
    PhysicsInterface, Piece, Piecewise, Selection, Study, SweptDistribution, TimeStepping,
    Variable,
};

use std::time::Instant;

use tracing::{debug, info};
use twine_core::Model;
use uom::si::{
    energy::megawatt_hour,
    f64::{Energy, ThermodynamicTemperature},
    thermodynamic_temperature::degree_celsius,
};

use crate::support::{borehole::Parameters, geology::Geology};

/// A solver model ready to be evaluated at any extraction rate.
pub struct Simulation<'c, C: FemClient> {
    client: &'c C,
    model: C::Model,
    setup: ModelSetup,
}

impl<'c, C: FemClient> Simulation<'c, C> {
    /// Builds the solver model for the parameters and geology.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Build`] if the solver rejects the setup.
    pub fn build(
        client: &'c C,
        params: &Parameters,
        geology: &Geology,
    ) -> Result<Self, SimulationError> {
        let start = Instant::now();
        let setup = ModelSetup::new(params, geology);

        let model = client
            .build(&setup)
            .map_err(|source| SimulationError::Build(Box::new(source)))?;

        info!(
            model = %setup.name,
            layers = geology.layers().len(),
            elapsed = ?start.elapsed(),
            "built finite-element model"
        );

        Ok(Self {
            client,
            model,
            setup,
        })
    }

    /// The setup the solver model was built from.
    #[must_use]
    pub fn setup(&self) -> &ModelSetup {
        &self.setup
    }

    /// Returns the coldest mean borehole wall temperature reached while
    /// extracting `rate` every year.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulationError`] if the solver fails, or if the
    /// temperature series is empty or contains a non-finite value.
    pub fn evaluate(&self, rate: Energy) -> Result<ThermodynamicTemperature, SimulationError> {
        let start = Instant::now();
        let solve_error = |source: C::Error| SimulationError::Solve {
            rate,
            source: Box::new(source),
        };

        let energy = Parameter::quantity(ANNUAL_ENERGY, rate.get::<megawatt_hour>(), "MWh");
        self.client
            .set_parameter(&self.model, &energy)
            .map_err(solve_error)?;
        self.client.solve(&self.model).map_err(solve_error)?;

        let series = self
            .client
            .evaluate(&self.model, MEAN_WALL_TEMPERATURE, "degC")
            .map_err(|source| SimulationError::Evaluate {
                expression: MEAN_WALL_TEMPERATURE,
                source: Box::new(source),
            })?;

        let coldest = coldest(&series)?;

        debug!(
            e_annual_mwh = rate.get::<megawatt_hour>(),
            t_ave_min_c = coldest,
            steps = series.len(),
            elapsed = ?start.elapsed(),
            "solved"
        );

        Ok(ThermodynamicTemperature::new::<degree_celsius>(coldest))
    }
}

fn coldest(series: &[f64]) -> Result<f64, SimulationError> {
    if let Some(step) = series.iter().position(|value| !value.is_finite()) {
        return Err(SimulationError::NonFinite {
            expression: MEAN_WALL_TEMPERATURE,
            step,
        });
    }
    series
        .iter()
        .copied()
        .reduce(f64::min)
        .ok_or(SimulationError::EmptySeries {
            expression: MEAN_WALL_TEMPERATURE,
        })
}

impl<C: FemClient> Model for Simulation<'_, C> {
    type Input = Energy;
    type Output = ThermodynamicTemperature;
    type Error = SimulationError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.evaluate(*input)
    }
}
