use uom::si::{
    f64::{
        HeatFluxDensity, Length, ThermalConductivity, ThermodynamicTemperature,
        VolumetricHeatCapacity,
    },
    length::meter,
};

use crate::support::{
    borehole::{MonthlyFractions, Parameters},
    geology::Geology,
    units::LinearThermalResistance,
};

use super::DesignToolError;

/// A predefined borefield layout of the design tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Borefield {
    /// Record number in the tool's configuration library.
    pub record: u32,

    /// Number of boreholes in the layout.
    pub boreholes: u32,
}

impl Borefield {
    /// A single borehole.
    pub const SINGLE: Self = Self {
        record: 0,
        boreholes: 1,
    };

    /// A square grid of 34 × 34 boreholes.
    pub const SQUARE_34: Self = Self {
        record: 761,
        boreholes: 1156,
    };

    /// Picks the layout that represents a field with the given spacing.
    ///
    /// Dense 20 m grids are modeled as a large square field; 500 m is far
    /// enough apart for boreholes not to interact.
    #[must_use]
    pub fn for_spacing(spacing: Length) -> Option<Self> {
        let spacing = spacing.get::<meter>();
        if (spacing - 20.0).abs() < 1e-9 {
            Some(Self::SQUARE_34)
        } else if (spacing - 500.0).abs() < 1e-9 {
            Some(Self::SINGLE)
        } else {
            None
        }
    }
}

/// Input of one design-tool run, except for the annual energy.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignInput {
    pub ground_conductivity: ThermalConductivity,
    pub ground_heat_capacity: VolumetricHeatCapacity,
    pub surface_temperature: ThermodynamicTemperature,
    pub geothermal_heat_flux: HeatFluxDensity,
    pub borefield: Borefield,
    pub borehole_length: Length,
    pub borehole_spacing: Length,
    pub borehole_diameter: Length,

    /// Fluid-to-wall thermal resistance of the borehole.
    pub borehole_resistance: LinearThermalResistance,

    /// Seasonal performance factor of the heat pump.
    ///
    /// The ground supplies `(SPF − 1)/SPF` of the heat demand; values of
    /// `99999` and above mean direct extraction.
    pub spf: f64,

    pub num_years: u32,
    pub monthly_fractions: MonthlyFractions,
}

impl DesignInput {
    /// Builds the tool input from a layered geology.
    ///
    /// The tool only knows homogeneous ground, so conductivity and heat
    /// capacity are averaged over the borehole length. Without a monthly
    /// profile the load is spread evenly over the year.
    ///
    /// # Errors
    ///
    /// Returns [`DesignToolError::NoGround`] if no layer lies above the
    /// borehole tip.
    pub fn from_geology(
        geology: &Geology,
        params: &Parameters,
        borefield: Borefield,
        borehole_resistance: LinearThermalResistance,
        spf: f64,
    ) -> Result<Self, DesignToolError> {
        let depth = params.borehole_length();
        let ground = geology
            .average_properties(depth)
            .ok_or(DesignToolError::NoGround { depth })?;

        Ok(Self {
            ground_conductivity: ground.conductivity,
            ground_heat_capacity: ground.volumetric_heat_capacity,
            surface_temperature: geology.surface_temperature(),
            geothermal_heat_flux: geology.geothermal_heat_flux(),
            borefield,
            borehole_length: depth,
            borehole_spacing: params.borehole_spacing(),
            borehole_diameter: params.borehole_diameter(),
            borehole_resistance,
            spf,
            num_years: params.num_years(),
            monthly_fractions: params
                .monthly_fractions()
                .copied()
                .unwrap_or(MonthlyFractions::UNIFORM),
        })
    }

    /// Whether the heat is extracted without a heat pump.
    #[must_use]
    pub fn is_direct(&self) -> bool {
        self.spf >= 99_999.0
    }

    /// Share of the heat demand supplied by the ground.
    #[must_use]
    pub fn ground_share(&self) -> f64 {
        (self.spf - 1.0) / self.spf
    }
}
