//! Borehole field parameters.
//!
//! A field is modeled as a regular grid of identical boreholes. By symmetry a
//! single borehole inside a square cell of side `borehole_spacing` stands for
//! the whole field; a very wide spacing approximates an isolated borehole.

mod error;
mod monthly;

use std::f64::consts::PI;

use uom::si::f64::{Area, Length};

use crate::support::constraint::{Constraint, StrictlyPositive};

pub use error::ParametersError;
pub use monthly::{MonthlyFractions, STANDARD_HEATING_PROFILE};

/// Geometry and operating horizon of a borehole field.
///
/// The annual energy to extract is not part of the parameters; it is the
/// input of each evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    borehole_length: Length,
    borehole_diameter: Length,
    borehole_spacing: Length,
    num_years: u32,
    monthly_fractions: Option<MonthlyFractions>,
}

impl Parameters {
    /// Creates validated parameters with a constant extraction rate.
    ///
    /// # Errors
    ///
    /// Returns [`ParametersError::NonPositive`] if a length or the number of
    /// years is not strictly positive.
    pub fn new(
        borehole_length: Length,
        borehole_diameter: Length,
        borehole_spacing: Length,
        num_years: u32,
    ) -> Result<Self, ParametersError> {
        for (parameter, value) in [
            ("L_borehole", borehole_length),
            ("D_borehole", borehole_diameter),
            ("borehole_spacing", borehole_spacing),
        ] {
            StrictlyPositive::check(&value)
                .map_err(|source| ParametersError::NonPositive { parameter, source })?;
        }
        StrictlyPositive::check(&num_years).map_err(|source| ParametersError::NonPositive {
            parameter: "num_years",
            source,
        })?;

        Ok(Self {
            borehole_length,
            borehole_diameter,
            borehole_spacing,
            num_years,
            monthly_fractions: None,
        })
    }

    /// Distributes the annual energy over the months of the year.
    #[must_use]
    pub fn with_monthly_fractions(mut self, fractions: MonthlyFractions) -> Self {
        self.monthly_fractions = Some(fractions);
        self
    }

    #[must_use]
    pub fn borehole_length(&self) -> Length {
        self.borehole_length
    }

    #[must_use]
    pub fn borehole_diameter(&self) -> Length {
        self.borehole_diameter
    }

    /// Distance between neighboring boreholes of the grid.
    #[must_use]
    pub fn borehole_spacing(&self) -> Length {
        self.borehole_spacing
    }

    /// Length of the simulated operating period.
    #[must_use]
    pub fn num_years(&self) -> u32 {
        self.num_years
    }

    /// Monthly load profile, `None` for constant extraction.
    #[must_use]
    pub fn monthly_fractions(&self) -> Option<&MonthlyFractions> {
        self.monthly_fractions.as_ref()
    }

    /// Area of the borehole wall through which heat is extracted.
    #[must_use]
    pub fn borehole_wall_area(&self) -> Area {
        self.borehole_diameter * self.borehole_length * PI
    }
}
