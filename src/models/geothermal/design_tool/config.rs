use twine_solvers::equation::bisection;
use uom::si::{
    energy::megawatt_hour,
    f64::{Energy, TemperatureInterval},
    temperature_interval::kelvin as delta_kelvin,
};

/// Solver configuration for the extraction-limit search.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the annual energy.
    pub energy_tol: Energy,

    /// Absolute tolerance on the fluid temperature residual.
    pub temperature_tol: TemperatureInterval,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            energy_tol: Energy::new::<megawatt_hour>(1e-3),
            temperature_tol: TemperatureInterval::new::<delta_kelvin>(1e-6),
        }
    }
}

impl SearchConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.energy_tol.get::<megawatt_hour>(),
            x_rel_tol: 0.0,
            residual_tol: self.temperature_tol.get::<delta_kelvin>(),
        }
    }
}
