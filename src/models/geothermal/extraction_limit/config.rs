use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};

/// Configuration of the extraction-limit estimator.
#[derive(Debug, Clone, Copy)]
pub struct EstimatorConfig {
    /// Minimum allowed borehole temperature.
    pub target: ThermodynamicTemperature,

    /// Smallest usable magnitude of the fitted slope, in K per MWh.
    ///
    /// Flatter fits cannot be solved for the target temperature.
    pub min_abs_slope: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            target: ThermodynamicTemperature::new::<degree_celsius>(0.0),
            min_abs_slope: 1e-12,
        }
    }
}
