use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Extension trait for computing temperature differences.
///
/// This trait provides a [`minus`](Self::minus) method that subtracts two
/// [`ThermodynamicTemperature`] values (absolute temperatures) and returns a
/// [`TemperatureInterval`] (temperature difference).
///
/// For background on why this extension is needed:
/// [#380](https://github.com/iliekturtles/uom/issues/380),
/// [#289](https://github.com/iliekturtles/uom/issues/289).
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::LinearPowerDensity,
        linear_power_density::watt_per_meter,
        temperature_interval::degree_celsius as delta_celsius,
        thermodynamic_temperature::degree_celsius,
    };

    use crate::support::units::LinearThermalResistance;

    #[test]
    fn subtract_temperatures() {
        let surface = ThermodynamicTemperature::new::<degree_celsius>(13.2);
        let at_depth = ThermodynamicTemperature::new::<degree_celsius>(16.2);

        assert_relative_eq!(
            at_depth.minus(surface).get::<delta_celsius>(),
            3.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            surface.minus(at_depth).get::<delta_kelvin>(),
            -3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn linear_resistance_relates_wall_and_fluid() {
        // Rb · q' gives the fluid-to-wall temperature drop.
        let resistance: LinearThermalResistance = TemperatureInterval::new::<delta_kelvin>(0.1)
            / LinearPowerDensity::new::<watt_per_meter>(1.0);
        let drop: TemperatureInterval = resistance * LinearPowerDensity::new::<watt_per_meter>(30.0);

        assert_relative_eq!(drop.get::<delta_kelvin>(), 3.0, epsilon = 1e-12);
    }
}
