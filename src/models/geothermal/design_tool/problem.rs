//! Problem formulation for the extraction-limit search.

use std::convert::Infallible;

use twine_core::EquationProblem;
use uom::si::{
    energy::megawatt_hour,
    f64::{Energy, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
};

use crate::support::units::TemperatureDifference;

use super::DesignTrial;

/// Equation problem definition for the fluid temperature limit.
///
/// Computes the residual as `target − T_fluid`, which grows with the
/// extracted energy.
pub(super) struct LimitProblem {
    target: ThermodynamicTemperature,
}

impl LimitProblem {
    pub(super) fn new(target: ThermodynamicTemperature) -> Self {
        Self { target }
    }
}

impl EquationProblem<1> for LimitProblem {
    type Input = Energy;
    type Output = DesignTrial;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Energy::new::<megawatt_hour>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        let residual = self
            .target
            .minus(output.report.min_mean_fluid_temperature);
        Ok([residual.get::<delta_kelvin>()])
    }
}
