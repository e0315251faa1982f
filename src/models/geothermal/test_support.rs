use std::{
    cell::{Cell, RefCell},
    fs,
    marker::PhantomData,
    path::Path,
    sync::Arc,
};

use thiserror::Error;
use twine_core::Model;
use uom::si::{
    energy::megawatt_hour,
    f64::{
        Energy, HeatFluxDensity, Length, Ratio, ThermalConductivity, ThermodynamicTemperature,
        VolumetricHeatCapacity,
    },
    heat_flux_density::watt_per_square_meter,
    length::meter,
    ratio::ratio,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
    volumetric_heat_capacity::joule_per_cubic_meter_kelvin,
};

use crate::support::{
    borehole::{Parameters, STANDARD_HEATING_PROFILE},
    geology::{Geology, Layer, Material, ThermalProperties},
    units::LinearThermalResistance,
};

use super::{
    design_tool::{Borefield, DesignInput, DesignTool, format_report},
    simulation::{ANNUAL_ENERGY, FemClient, ModelSetup, Parameter},
};

#[derive(Debug, Clone, Error, PartialEq)]
#[error("stub failure: {0}")]
pub(crate) struct StubError(pub(crate) &'static str);

pub(crate) fn mwh(value: f64) -> Energy {
    Energy::new::<megawatt_hour>(value)
}

fn m(value: f64) -> Length {
    Length::new::<meter>(value)
}

/// A borehole resistance in K·m/W.
pub(crate) fn resistance(value: f64) -> LinearThermalResistance {
    LinearThermalResistance {
        dimension: PhantomData,
        units: PhantomData,
        value,
    }
}

/// Porous sand with `k_eff` = 0.88 W/(m·K).
pub(crate) fn sand() -> Material {
    Material::porous(
        "Sand",
        ThermalProperties::from_si(1.0, 1000.0, 1800.0).expect("valid matrix"),
        Ratio::new::<ratio>(0.3),
    )
    .expect("valid porosity")
}

pub(crate) fn granite() -> Material {
    Material::solid(
        "Granite",
        ThermalProperties::from_si(3.0, 730.0, 2700.0).expect("valid properties"),
    )
}

/// One kilometer of homogeneous rock, `ρ·cp` = 2.295 MJ/(m³·K).
pub(crate) fn bedrock() -> Geology {
    let rock = Material::solid(
        "Crystalline Rock",
        ThermalProperties::from_si(2.5, 850.0, 2700.0).expect("valid properties"),
    );
    let mut geology = Geology::new(
        "Bedrock",
        ThermodynamicTemperature::new::<degree_celsius>(8.0),
        HeatFluxDensity::new::<watt_per_square_meter>(0.06),
    );
    geology
        .add_layer(
            Layer::new("Rock Layer", Arc::new(rock), m(0.0), m(-1000.0)).expect("valid layer"),
        )
        .expect("layer starts at the surface");
    geology
}

pub(crate) fn stub_params() -> Parameters {
    Parameters::new(m(200.0), m(0.15), m(20.0), 50).expect("valid parameters")
}

/// Design-tool input for a single 200 m borehole in [`bedrock`].
pub(crate) fn design_input() -> DesignInput {
    DesignInput {
        ground_conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(2.5),
        ground_heat_capacity: VolumetricHeatCapacity::new::<joule_per_cubic_meter_kelvin>(
            2.295e6,
        ),
        surface_temperature: ThermodynamicTemperature::new::<degree_celsius>(8.0),
        geothermal_heat_flux: HeatFluxDensity::new::<watt_per_square_meter>(0.06),
        borefield: Borefield::SINGLE,
        borehole_length: m(200.0),
        borehole_spacing: m(500.0),
        borehole_diameter: m(0.15),
        borehole_resistance: resistance(0.1),
        spf: 99_999.0,
        num_years: 50,
        monthly_fractions: STANDARD_HEATING_PROFILE,
    }
}

/// Minimum temperature falling linearly with the extracted energy.
pub(crate) struct LinearModel {
    slope: f64,
    intercept: f64,
    failing_above: Option<f64>,
    calls: Cell<usize>,
}

impl LinearModel {
    /// `T = slope·E + intercept`, with `E` in MWh and `T` in °C.
    pub(crate) fn new(slope: f64, intercept: f64) -> Self {
        Self {
            slope,
            intercept,
            failing_above: None,
            calls: Cell::new(0),
        }
    }

    /// Fails for every rate above `limit` MWh.
    pub(crate) fn failing_above(mut self, limit: f64) -> Self {
        self.failing_above = Some(limit);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Model for LinearModel {
    type Input = Energy;
    type Output = ThermodynamicTemperature;
    type Error = StubError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.calls.set(self.calls.get() + 1);
        let energy = input.get::<megawatt_hour>();
        if self.failing_above.is_some_and(|limit| energy > limit) {
            return Err(StubError("rate too high"));
        }
        Ok(ThermodynamicTemperature::new::<degree_celsius>(
            self.slope * energy + self.intercept,
        ))
    }
}

/// A solver whose coldest mean wall temperature is linear in the energy.
///
/// The stored series dips to the coldest value on the second step.
pub(crate) struct StubFemClient {
    slope: f64,
    intercept: f64,
    energy: Cell<f64>,
    solves: Cell<usize>,
    last_parameter: RefCell<Option<Parameter>>,
    fail_build: Cell<bool>,
    fail_solve: Cell<bool>,
}

impl StubFemClient {
    pub(crate) fn linear(slope: f64, intercept: f64) -> Self {
        Self {
            slope,
            intercept,
            energy: Cell::new(0.0),
            solves: Cell::new(0),
            last_parameter: RefCell::new(None),
            fail_build: Cell::new(false),
            fail_solve: Cell::new(false),
        }
    }

    pub(crate) fn solves(&self) -> usize {
        self.solves.get()
    }

    pub(crate) fn last_parameter(&self) -> Option<Parameter> {
        self.last_parameter.borrow().clone()
    }

    pub(crate) fn fail_build(&self, fail: bool) {
        self.fail_build.set(fail);
    }

    pub(crate) fn fail_solve(&self, fail: bool) {
        self.fail_solve.set(fail);
    }
}

impl FemClient for StubFemClient {
    type Model = ();
    type Error = StubError;

    fn build(&self, _setup: &ModelSetup) -> Result<Self::Model, Self::Error> {
        if self.fail_build.get() {
            return Err(StubError("build"));
        }
        Ok(())
    }

    fn set_parameter(&self, _model: &(), parameter: &Parameter) -> Result<(), Self::Error> {
        if parameter.name == ANNUAL_ENERGY {
            let energy = parameter
                .value_in("MWh")
                .ok_or(StubError("energy without MWh"))?;
            self.energy.set(energy);
        }
        *self.last_parameter.borrow_mut() = Some(parameter.clone());
        Ok(())
    }

    fn solve(&self, _model: &()) -> Result<(), Self::Error> {
        if self.fail_solve.get() {
            return Err(StubError("solve"));
        }
        self.solves.set(self.solves.get() + 1);
        Ok(())
    }

    fn evaluate(&self, _model: &(), _expression: &str, _unit: &str) -> Result<Vec<f64>, Self::Error> {
        let coldest = self.slope * self.energy.get() + self.intercept;
        Ok(vec![coldest + 2.0, coldest, coldest + 0.5])
    }
}

/// A design tool whose minimum fluid temperature is linear in the energy.
///
/// Reads the annual load back from the DAT file, like the real tool does.
pub(crate) struct LinearDesignTool {
    slope: f64,
    intercept: f64,
    failing_above: Option<f64>,
    runs: Cell<usize>,
}

impl LinearDesignTool {
    pub(crate) fn new(slope: f64, intercept: f64) -> Self {
        Self {
            slope,
            intercept,
            failing_above: None,
            runs: Cell::new(0),
        }
    }

    /// Fails without writing a report above `limit` MWh.
    pub(crate) fn failing_above(mut self, limit: f64) -> Self {
        self.failing_above = Some(limit);
        self
    }

    pub(crate) fn runs(&self) -> usize {
        self.runs.get()
    }
}

impl DesignTool for LinearDesignTool {
    type Error = StubError;

    fn run(&self, dat: &Path, report: &Path) -> Result<(), Self::Error> {
        self.runs.set(self.runs.get() + 1);
        let text = fs::read_to_string(dat).map_err(|_| StubError("unreadable DAT file"))?;
        let energy: f64 = text
            .lines()
            .find_map(|line| line.trim().strip_suffix("annual_heat_load"))
            .and_then(|value| value.trim().parse().ok())
            .ok_or(StubError("no annual load"))?;

        if self.failing_above.is_some_and(|limit| energy > limit) {
            return Err(StubError("load too high"));
        }

        let temperature = self.slope * energy + self.intercept;
        fs::write(report, format_report(energy, temperature))
            .map_err(|_| StubError("unwritable report"))
    }
}
