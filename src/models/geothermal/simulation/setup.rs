//! Declarative finite-element model setup.
//!
//! [`ModelSetup::new`] translates borehole parameters and a geology into the
//! vocabulary of a finite-element heat transfer solver: named parameters,
//! functions, geometry, mesh, physics, derived variables and a transient
//! study. The translation is pure, so it can be inspected and tested without
//! a solver; a [`FemClient`](super::FemClient) turns it into a live model.

mod expression;
mod geometry;
mod physics;
mod study;
mod temperature;

pub use expression::{Extrapolation, Parameter, Piece, Piecewise, Variable};
pub use geometry::{Block, Cylinder, Geometry, Mesh, SweptDistribution};
pub use physics::{BoundaryCondition, DomainModel, Physics, PhysicsInterface, Selection};
pub use study::{Study, TimeStepping};
pub use temperature::InitialTemperature;

use uom::si::{
    heat_flux_density::watt_per_square_meter, length::meter, mass_density::kilogram_per_cubic_meter,
    ratio::ratio, specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin, thermodynamic_temperature::degree_celsius,
    velocity::meter_per_second,
};

use crate::support::{
    borehole::{MonthlyFractions, Parameters},
    geology::{Geology, Medium, ThermalProperties},
};

/// Name of the parameter holding the annual extraction energy.
pub const ANNUAL_ENERGY: &str = "E_annual";

/// Name of the area-averaged borehole wall temperature variable.
pub const MEAN_WALL_TEMPERATURE: &str = "T_ave";

/// Everything needed to build a finite-element model of one borehole.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSetup {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub functions: Vec<Piecewise>,
    pub geometry: Geometry,
    pub mesh: Mesh,
    pub physics: Physics,
    pub variables: Vec<Variable>,
    pub study: Study,
}

impl ModelSetup {
    /// Translates the parameters and geology into a model setup.
    ///
    /// The annual energy parameter starts at zero; it is set before each
    /// solve.
    #[must_use]
    pub fn new(params: &Parameters, geology: &Geology) -> Self {
        let mut functions = vec![InitialTemperature::new(geology).to_piecewise()];
        if let Some(fractions) = params.monthly_fractions() {
            functions.push(monthly_profile(fractions));
        }

        let q_extraction = if params.monthly_fractions().is_some() {
            format!("({ANNUAL_ENERGY}*monthly_fractions(t))/(1[a]/12)")
        } else {
            format!("{ANNUAL_ENERGY}/1[a]")
        };

        Self {
            name: format!("Model of {}", geology.name()),
            parameters: parameters(params, geology),
            functions,
            geometry: Geometry::new(params, geology),
            mesh: Mesh::new(params, geology),
            physics: Physics::new(geology),
            variables: vec![
                Variable::new("T_min", "borehole_wall_minimum(T)"),
                Variable::new(MEAN_WALL_TEMPERATURE, "borehole_wall_average(T)"),
                Variable::new("Q_extraction", q_extraction),
            ],
            study: Study::new(params.num_years(), params.monthly_fractions().is_some()),
        }
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Looks up a function by name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Piecewise> {
        self.functions.iter().find(|f| f.name == name)
    }
}

fn parameters(params: &Parameters, geology: &Geology) -> Vec<Parameter> {
    let mut list = vec![
        Parameter::quantity("H_model", geology.thickness().get::<meter>(), "m"),
        Parameter::quantity("D_borehole", params.borehole_diameter().get::<meter>(), "m"),
        Parameter::quantity("L_borehole", params.borehole_length().get::<meter>(), "m"),
        Parameter::quantity(
            "borehole_spacing",
            params.borehole_spacing().get::<meter>(),
            "m",
        ),
        Parameter::quantity(
            "T_surface",
            geology.surface_temperature().get::<degree_celsius>(),
            "degC",
        ),
        Parameter::quantity(
            "q_geothermal",
            geology.geothermal_heat_flux().get::<watt_per_square_meter>(),
            "W/m^2",
        ),
        Parameter::quantity(ANNUAL_ENERGY, 0.0, "MWh"),
        Parameter::derived("A_wall", "pi*D_borehole*L_borehole"),
    ];

    for layer in geology.layers() {
        let tag = layer.tag();
        list.push(Parameter::quantity(
            format!("h_{tag}"),
            layer.thickness().get::<meter>(),
            "m",
        ));
        properties(&mut list, "eff", tag, &layer.material().effective());

        if let Medium::Porous {
            properties: porous,
            velocity,
        } = layer.medium()
        {
            properties(&mut list, "fluid", tag, porous.fluid());
            properties(&mut list, "solid", tag, porous.matrix());
            list.push(Parameter::quantity(
                format!("eps_{tag}"),
                porous.porosity().get::<ratio>(),
                "1",
            ));
            if layer.has_groundwater_flow() {
                list.push(Parameter::quantity(
                    format!("v_{tag}"),
                    velocity.get::<meter_per_second>(),
                    "m/s",
                ));
            }
        }
    }

    list
}

fn properties(list: &mut Vec<Parameter>, phase: &str, tag: &str, properties: &ThermalProperties) {
    list.extend([
        Parameter::quantity(
            format!("k_{phase}_{tag}"),
            properties.conductivity.get::<watt_per_meter_kelvin>(),
            "W/(m*K)",
        ),
        Parameter::quantity(
            format!("Cp_{phase}_{tag}"),
            properties.specific_heat.get::<joule_per_kilogram_kelvin>(),
            "J/(kg*K)",
        ),
        Parameter::quantity(
            format!("rho_{phase}_{tag}"),
            properties.density.get::<kilogram_per_cubic_meter>(),
            "kg/m^3",
        ),
    ]);
}

fn monthly_profile(fractions: &MonthlyFractions) -> Piecewise {
    let pieces = fractions
        .as_array()
        .iter()
        .enumerate()
        .map(|(i, fraction)| Piece {
            start: format!("{i}/12"),
            end: format!("{}/12", i + 1),
            expression: fraction.to_string(),
        })
        .collect();

    Piecewise {
        name: "monthly_fractions".to_owned(),
        argument: "t".to_owned(),
        argument_unit: "a".to_owned(),
        function_unit: "1".to_owned(),
        extrapolation: Extrapolation::Periodic,
        pieces,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use approx::assert_relative_eq;
    use uom::si::f64::{HeatFluxDensity, Length, ThermodynamicTemperature, Velocity};

    use crate::models::geothermal::test_support::{granite, sand};
    use crate::support::{
        borehole::STANDARD_HEATING_PROFILE,
        geology::Layer,
    };

    fn m(value: f64) -> Length {
        Length::new::<meter>(value)
    }

    fn params(length: f64) -> Parameters {
        Parameters::new(m(length), m(0.15), m(20.0), 50).expect("valid parameters")
    }

    fn stratified(sand_velocity: f64) -> Geology {
        let sand = Arc::new(sand());
        let granite = Arc::new(granite());
        let mut geology = Geology::new(
            "Test Geology",
            ThermodynamicTemperature::new::<degree_celsius>(8.0),
            HeatFluxDensity::new::<watt_per_square_meter>(0.06),
        );
        geology
            .add_layers([
                Layer::new("Sandy Layer", sand, m(0.0), m(-100.0))
                    .expect("valid layer")
                    .with_velocity(Velocity::new::<meter_per_second>(sand_velocity))
                    .expect("valid velocity"),
                Layer::new("Granitic Layer", granite, m(-100.0), m(-500.0)).expect("valid layer"),
            ])
            .expect("contiguous layers");
        geology
    }

    #[test]
    fn named_parameters() {
        let setup = ModelSetup::new(&params(150.0), &stratified(1e-6));

        let expression = |name: &str| {
            setup
                .parameter(name)
                .unwrap_or_else(|| panic!("missing parameter {name}"))
                .expression
                .as_str()
        };

        assert_eq!(setup.name, "Model of Test Geology");
        assert_eq!(expression("H_model"), "500[m]");
        assert_eq!(expression("L_borehole"), "150[m]");
        assert_eq!(expression("D_borehole"), "0.15[m]");
        assert_eq!(expression("T_surface"), "8[degC]");
        assert_eq!(expression("q_geothermal"), "0.06[W/m^2]");
        assert_eq!(expression("E_annual"), "0[MWh]");
        assert_eq!(expression("A_wall"), "pi*D_borehole*L_borehole");

        assert_eq!(expression("h_sandy_layer"), "100[m]");
        assert_eq!(expression("eps_sandy_layer"), "0.3[1]");
        assert_eq!(expression("k_solid_sandy_layer"), "1[W/(m*K)]");
        assert_eq!(expression("k_fluid_sandy_layer"), "0.6[W/(m*K)]");
        assert_eq!(expression("k_eff_sandy_layer"), "0.88[W/(m*K)]");
        assert_eq!(expression("v_sandy_layer"), "0.000001[m/s]");

        assert_eq!(expression("k_eff_granitic_layer"), "3[W/(m*K)]");
        assert!(setup.parameter("eps_granitic_layer").is_none());
        assert!(setup.parameter("v_granitic_layer").is_none());
    }

    #[test]
    fn stagnant_porous_layer_has_no_velocity() {
        let setup = ModelSetup::new(&params(150.0), &stratified(0.0));

        assert!(setup.parameter("eps_sandy_layer").is_some());
        assert!(setup.parameter("v_sandy_layer").is_none());
        assert!(!setup.geometry.full_width);
        assert!(
            !setup
                .physics
                .boundaries
                .iter()
                .any(|bc| matches!(bc, BoundaryCondition::Periodic { .. }))
        );
    }

    #[test]
    fn initial_temperature_is_continuous() {
        let geology = stratified(0.0);
        let profile = InitialTemperature::new(&geology);
        let at = |z: f64| {
            profile
                .at(m(z))
                .expect("geology has layers")
                .get::<degree_celsius>()
        };

        assert_relative_eq!(at(0.0), 8.0);

        // 0.06 W/m² over 100 m at k = 0.88 W/(m·K), then 400 m at 3 W/(m·K).
        let interface = 8.0 + 0.06 / 0.88 * 100.0;
        assert_relative_eq!(at(-100.0), interface, epsilon = 1e-9);
        assert_relative_eq!(at(-100.0 + 1e-9), interface, epsilon = 1e-6);
        assert_relative_eq!(at(-100.0 - 1e-9), interface, epsilon = 1e-6);
        assert_relative_eq!(at(-500.0), interface + 0.06 / 3.0 * 400.0, epsilon = 1e-9);

        // Outermost layers are continued.
        assert_relative_eq!(at(-600.0), at(-500.0) + 2.0, epsilon = 1e-9);
    }

    #[test]
    fn initial_temperature_function() {
        let setup = ModelSetup::new(&params(150.0), &stratified(0.0));
        let function = setup.function("T_initial").expect("always defined");

        assert_eq!(function.extrapolation, Extrapolation::Interior);
        assert_eq!(
            function.pieces,
            vec![
                Piece {
                    start: "0-h_sandy_layer".to_owned(),
                    end: "0".to_owned(),
                    expression: "T_surface-q_geothermal/k_eff_sandy_layer*z".to_owned(),
                },
                Piece {
                    start: "0-h_sandy_layer-h_granitic_layer".to_owned(),
                    end: "0-h_sandy_layer".to_owned(),
                    expression: "T_surface+q_geothermal/k_eff_sandy_layer*h_sandy_layer\
                                 -q_geothermal/k_eff_granitic_layer*(z+h_sandy_layer)"
                        .to_owned(),
                },
            ]
        );
    }

    #[test]
    fn monthly_profile_function() {
        let constant = ModelSetup::new(&params(150.0), &stratified(0.0));
        assert!(constant.function("monthly_fractions").is_none());
        assert_eq!(
            constant.variables[2],
            Variable::new("Q_extraction", "E_annual/1[a]")
        );
        assert!(matches!(
            constant.study.stepping,
            TimeStepping::Free { .. }
        ));

        let seasonal = ModelSetup::new(
            &params(150.0).with_monthly_fractions(STANDARD_HEATING_PROFILE),
            &stratified(0.0),
        );
        let function = seasonal
            .function("monthly_fractions")
            .expect("defined with a profile");
        assert_eq!(function.extrapolation, Extrapolation::Periodic);
        assert_eq!(function.argument_unit, "a");
        assert_eq!(function.pieces.len(), 12);
        assert_eq!(function.pieces[0].start, "0/12");
        assert_eq!(function.pieces[11].end, "12/12");
        assert_eq!(function.pieces[0].expression, "0.194717");
        assert_eq!(
            seasonal.variables[2].expression,
            "(E_annual*monthly_fractions(t))/(1[a]/12)"
        );
        assert_eq!(seasonal.study.stepping, TimeStepping::Strict);
        assert_eq!(seasonal.study.output_times(), "range(0,1/12,50)");
        assert_eq!(seasonal.study.num_outputs(), 601);
    }

    #[test]
    fn geometry_splits_at_borehole_tip() {
        let setup = ModelSetup::new(&params(150.0), &stratified(1e-6));
        let labels: Vec<_> = setup
            .geometry
            .blocks
            .iter()
            .map(|block| block.label.as_str())
            .collect();

        assert_eq!(
            labels,
            [
                "Sandy Layer",
                "Upper Part of Granitic Layer",
                "Lower Part of Granitic Layer"
            ]
        );
        assert!(setup.geometry.full_width);
        assert_eq!(setup.geometry.blocks[1].position[2], "-150");
        assert_eq!(setup.geometry.blocks[1].size[2], "50");
        assert_eq!(setup.geometry.blocks[0].size[0], "borehole_spacing");
        assert_eq!(setup.geometry.borehole.radius, "0.5*D_borehole");

        let stagnant = ModelSetup::new(&params(150.0), &stratified(0.0));
        assert_eq!(stagnant.geometry.blocks[0].size[0], "0.5*borehole_spacing");
    }

    #[test]
    fn swept_mesh_covers_layers_above_tip() {
        let shallow = ModelSetup::new(&params(80.0), &stratified(0.0));
        assert_eq!(shallow.mesh.collar_edge_elements, 10);
        assert_eq!(
            shallow.mesh.swept,
            vec![SweptDistribution {
                layer: "sandy_layer".to_owned(),
                elements: 20,
            }]
        );

        // The granite is 400 m thick: 80 elements of 5 m.
        let deep = ModelSetup::new(&params(150.0), &stratified(0.0));
        assert_eq!(deep.mesh.swept.len(), 2);
        assert_eq!(deep.mesh.swept[1].elements, 80);

        // A tip exactly on an interface stops the sweep there.
        let interface = ModelSetup::new(&params(100.0), &stratified(0.0));
        assert_eq!(interface.mesh.swept.len(), 1);
    }

    #[test]
    fn physics_dispatches_on_medium() {
        let setup = ModelSetup::new(&params(150.0), &stratified(1e-6));

        assert_eq!(
            setup.physics.interface,
            PhysicsInterface::PorousMediaHeatTransfer
        );
        assert_eq!(setup.physics.initial_temperature, "T_initial(z)");
        assert!(matches!(
            &setup.physics.domains[0],
            DomainModel::Porous { velocity: Some(v), .. } if v[0] == "v_sandy_layer"
        ));
        assert!(matches!(
            &setup.physics.domains[1],
            DomainModel::Solid { conductivity, .. } if conductivity == "k_eff_granitic_layer"
        ));
        assert!(setup.physics.boundaries.contains(&BoundaryCondition::HeatFlux {
            label: "Borehole Wall Heat Flux".to_owned(),
            selection: Selection::BoreholeWall,
            expression: "-Q_extraction/A_wall".to_owned(),
        }));
        assert!(setup.physics.boundaries.contains(&BoundaryCondition::Periodic {
            selection: Selection::LateralBoundaries,
        }));

        let solid_only = Geology::with_layers(
            "Bedrock",
            ThermodynamicTemperature::new::<degree_celsius>(8.0),
            HeatFluxDensity::new::<watt_per_square_meter>(0.06),
            [Layer::new("Granitic Layer", Arc::new(granite()), m(0.0), m(-300.0))
                .expect("valid layer")],
        )
        .expect("contiguous layers");
        assert_eq!(
            Physics::new(&solid_only).interface,
            PhysicsInterface::HeatTransfer
        );
    }
}
