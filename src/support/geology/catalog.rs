//! Stratigraphic models of Budapest.
//!
//! Twelve borehole logs from the Budapest area, each a stack of the same six
//! water-saturated rock types. All share a mean annual surface temperature
//! of 13.2 °C and differ in their measured geothermal heat flux.

use std::sync::Arc;

use uom::si::{
    f64::{HeatFluxDensity, Length, Ratio, ThermodynamicTemperature, Velocity},
    heat_flux_density::watt_per_square_meter,
    length::meter,
    ratio::ratio,
    thermodynamic_temperature::degree_celsius,
    velocity::meter_per_second,
};

use super::{Geology, GeologyError, Layer, Material, MaterialLibrary, ThermalProperties};

/// Groundwater flow assigned to the catalog layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroundwaterFlow {
    /// The same Darcy velocity in every layer (zero for none).
    Uniform(Velocity),

    /// Typical velocities of each rock type.
    Predefined,
}

/// Mean annual ground surface temperature in Budapest, °C.
pub const SURFACE_TEMPERATURE: f64 = 13.2;

/// Rock name, k (W/(m·K)), cp (J/(kg·K)), ρ (kg/m³), porosity, typical velocity (m/s).
const MATERIALS: [(&str, f64, f64, f64, f64, f64); 6] = [
    ("Quaternary Deposits", 3.0, 1800.0, 1800.0, 0.30, 1.0e-8),
    ("Miocene Rocks", 1.8, 840.0, 2200.0, 0.10, 1.0e-9),
    ("Upper Oligocene Rocks", 1.8, 900.0, 2500.0, 0.10, 0.5e-9),
    ("Lower Oligocene Rocks", 1.5, 2100.0, 2000.0, 0.05, 1.0e-10),
    ("Eocene Rocks", 2.0, 840.0, 2100.0, 0.15, 1.0e-9),
    ("Triassic Rocks", 2.5, 850.0, 2700.0, 0.15, 1.0e-8),
];

const QUATERNARY: usize = 0;
const MIOCENE: usize = 1;
const UPPER_OLIGOCENE: usize = 2;
const LOWER_OLIGOCENE: usize = 3;
const EOCENE: usize = 4;
const TRIASSIC: usize = 5;

/// Layer bottoms in meters below the surface, keyed by material.
type Log = &'static [(usize, f64)];

/// Borehole name, geothermal heat flux (W/m²), log.
const BOREHOLES: [(&str, f64, Log); 12] = [
    (
        "B-21",
        0.0938,
        &[(QUATERNARY, 15.3), (LOWER_OLIGOCENE, 523.0), (EOCENE, 633.0), (TRIASSIC, 766.4)],
    ),
    (
        "B-30",
        0.0905,
        &[(QUATERNARY, 16.5), (LOWER_OLIGOCENE, 551.0), (EOCENE, 695.3), (TRIASSIC, 800.0)],
    ),
    (
        "B-39",
        0.098,
        &[
            (QUATERNARY, 14.4),
            (UPPER_OLIGOCENE, 285.4),
            (LOWER_OLIGOCENE, 482.0),
            (TRIASSIC, 650.0),
        ],
    ),
    (
        "B-48",
        0.0867,
        &[
            (QUATERNARY, 7.9),
            (MIOCENE, 360.3),
            (UPPER_OLIGOCENE, 507.0),
            (LOWER_OLIGOCENE, 1081.7),
            (EOCENE, 1128.0),
            (TRIASSIC, 1198.0),
        ],
    ),
    (
        "B-63",
        0.0928,
        &[(QUATERNARY, 24.85), (MIOCENE, 700.0), (UPPER_OLIGOCENE, 701.0)],
    ),
    (
        "B-13",
        0.083_581,
        &[
            (QUATERNARY, 12.0),
            (MIOCENE, 424.82),
            (UPPER_OLIGOCENE, 647.42),
            (LOWER_OLIGOCENE, 1194.0),
            (EOCENE, 1234.82),
        ],
    ),
    (
        "B-56",
        0.083_625,
        &[
            (QUATERNARY, 15.0),
            (MIOCENE, 439.1),
            (UPPER_OLIGOCENE, 775.4),
            (LOWER_OLIGOCENE, 1095.0),
            (EOCENE, 1172.0),
            (TRIASSIC, 1233.0),
        ],
    ),
    (
        "B-179",
        0.082_856_8,
        &[
            (MIOCENE, 351.0),
            (UPPER_OLIGOCENE, 600.0),
            (LOWER_OLIGOCENE, 1025.0),
            (EOCENE, 1240.0),
            (TRIASSIC, 1304.5),
        ],
    ),
    (
        "B-180",
        0.082_739,
        &[
            (MIOCENE, 347.3),
            (UPPER_OLIGOCENE, 580.0),
            (LOWER_OLIGOCENE, 1027.0),
            (EOCENE, 1228.4),
            (TRIASSIC, 1270.0),
        ],
    ),
    (
        "Pm_1",
        0.071_45,
        &[
            (QUATERNARY, 10.0),
            (MIOCENE, 180.0),
            (UPPER_OLIGOCENE, 280.0),
            (LOWER_OLIGOCENE, 1070.0),
            (EOCENE, 1340.0),
            (TRIASSIC, 1735.0),
        ],
    ),
    (
        "B-64",
        0.091_16,
        &[(QUATERNARY, 13.4), (MIOCENE, 319.0), (UPPER_OLIGOCENE, 600.0)],
    ),
    (
        "B-38",
        0.1016,
        &[(QUATERNARY, 21.0), (LOWER_OLIGOCENE, 175.0), (EOCENE, 320.0), (TRIASSIC, 559.5)],
    ),
];

/// Returns the six Budapest rock types.
///
/// # Errors
///
/// Returns a [`GeologyError`] only if the built-in property table is invalid.
pub fn materials() -> Result<MaterialLibrary, GeologyError> {
    let mut library = MaterialLibrary::new();
    for index in 0..MATERIALS.len() {
        library.insert(rock(index)?)?;
    }
    Ok(library)
}

/// Returns the twelve Budapest geologies with the given groundwater flow.
///
/// # Errors
///
/// Returns a [`GeologyError`] if a uniform velocity is negative.
pub fn budapest(flow: GroundwaterFlow) -> Result<Vec<Geology>, GeologyError> {
    let handles = (0..MATERIALS.len())
        .map(|index| rock(index).map(Arc::new))
        .collect::<Result<Vec<_>, _>>()?;

    BOREHOLES
        .iter()
        .map(|&(name, q, log)| {
            let mut geology = Geology::new(
                name,
                ThermodynamicTemperature::new::<degree_celsius>(SURFACE_TEMPERATURE),
                HeatFluxDensity::new::<watt_per_square_meter>(q),
            );
            let mut top = 0.0;
            for &(rock, bottom) in log {
                let velocity = match flow {
                    GroundwaterFlow::Uniform(velocity) => velocity,
                    GroundwaterFlow::Predefined => {
                        Velocity::new::<meter_per_second>(MATERIALS[rock].5)
                    }
                };
                let layer = Layer::new(
                    layer_name(MATERIALS[rock].0),
                    Arc::clone(&handles[rock]),
                    Length::new::<meter>(-top),
                    Length::new::<meter>(-bottom),
                )?
                .with_velocity(velocity)?;
                geology.add_layer(layer)?;
                top = bottom;
            }
            Ok(geology)
        })
        .collect()
}

fn rock(index: usize) -> Result<Material, GeologyError> {
    let (name, k, cp, rho, porosity, _) = MATERIALS[index];
    Material::porous(
        name,
        ThermalProperties::from_si(k, cp, rho)?,
        Ratio::new::<ratio>(porosity),
    )
}

/// "Miocene Rocks" becomes "Miocene Layer".
fn layer_name(material: &str) -> String {
    let stem = material
        .rsplit_once(' ')
        .map_or(material, |(stem, _)| stem);
    format!("{stem} Layer")
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::ConstZero;

    #[test]
    fn twelve_geologies_without_flow() {
        let geologies = budapest(GroundwaterFlow::Uniform(Velocity::ZERO)).expect("valid catalog");

        assert_eq!(geologies.len(), 12);
        assert!(geologies.iter().all(Geology::has_porous_layers));
        assert!(!geologies.iter().any(Geology::has_groundwater_flow));

        let b21 = &geologies[0];
        assert_eq!(b21.name(), "B-21");
        assert_eq!(b21.layers()[0].name(), "Quaternary Layer");
        assert_eq!(b21.layers()[1].name(), "Lower Oligocene Layer");
        assert_relative_eq!(b21.thickness().get::<meter>(), 766.4);
        assert_relative_eq!(
            b21.surface_temperature().get::<degree_celsius>(),
            13.2,
            epsilon = 1e-9
        );
    }

    #[test]
    fn predefined_flow_per_rock() {
        let geologies = budapest(GroundwaterFlow::Predefined).expect("valid catalog");
        let b179 = geologies
            .iter()
            .find(|geology| geology.name() == "B-179")
            .expect("B-179 is in the catalog");

        assert!(b179.has_groundwater_flow());
        assert_relative_eq!(
            b179.layers()[1].velocity().get::<meter_per_second>(),
            0.5e-9
        );
    }

    #[test]
    fn negative_uniform_flow_is_rejected() {
        let flow = GroundwaterFlow::Uniform(Velocity::new::<meter_per_second>(-1e-9));
        assert!(matches!(
            budapest(flow),
            Err(GeologyError::Velocity { .. })
        ));
    }

    #[test]
    fn material_library() {
        let library = materials().expect("valid materials");
        assert_eq!(library.len(), 6);
        assert!(library.get("upper_oligocene_rocks").is_some());
    }
}
