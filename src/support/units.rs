//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units (e.g., conductivity, depth,
//! energy). This module provides what borehole modeling needs but [`uom`]
//! doesn't include.
//!
//! ## Temperature differences
//!
//! The [`TemperatureDifference`] trait provides a [`minus`](TemperatureDifference::minus) method
//! for subtracting one absolute temperature from another to get a temperature interval:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::{temperature_interval, thermodynamic_temperature::degree_celsius};
//! use borehole_potential::support::units::TemperatureDifference;
//!
//! let wall = ThermodynamicTemperature::new::<degree_celsius>(4.0);
//! let fluid = ThermodynamicTemperature::new::<degree_celsius>(1.5);
//! let delta_t = wall.minus(fluid);
//! assert!((delta_t.get::<temperature_interval::kelvin>() - 2.5).abs() < 1e-12);
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::LinearThermalResistance;
pub use temperature_difference::TemperatureDifference;
