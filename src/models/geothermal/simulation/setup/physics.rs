use crate::support::geology::{Geology, Medium};

/// Heat transfer formulation of the whole model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsInterface {
    /// Conduction in solids only.
    HeatTransfer,

    /// Conduction and advection in saturated porous media.
    PorousMediaHeatTransfer,
}

/// Named regions of the model that conditions and meshes refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    GroundSurface,
    /// The base of the geology.
    GeothermalBoundary,
    BoreholeWall,
    /// The lateral faces normal to `x`: the source and destination of a
    /// periodic condition.
    LateralBoundaries,
    /// All volumes of the layer with the given tag.
    Layer(String),
}

/// Material model of one layer.
///
/// Property fields hold parameter names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainModel {
    Solid {
        label: String,
        selection: Selection,
        conductivity: String,
        density: String,
        heat_capacity: String,
    },
    Porous {
        label: String,
        selection: Selection,
        porosity: String,
        fluid_conductivity: String,
        fluid_density: String,
        fluid_heat_capacity: String,
        solid_conductivity: String,
        solid_density: String,
        solid_heat_capacity: String,
        /// Darcy velocity components, when the groundwater flows.
        velocity: Option<[String; 3]>,
    },
}

/// A condition on the model boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryCondition {
    Temperature {
        label: String,
        selection: Selection,
        expression: String,
    },
    /// Inward heat flux.
    HeatFlux {
        label: String,
        selection: Selection,
        expression: String,
    },
    /// The temperature leaving one lateral face re-enters through the other.
    Periodic { selection: Selection },
}

/// The physics of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Physics {
    pub interface: PhysicsInterface,
    pub initial_temperature: String,
    pub domains: Vec<DomainModel>,
    pub boundaries: Vec<BoundaryCondition>,
}

impl Physics {
    #[must_use]
    pub fn new(geology: &Geology) -> Self {
        let interface = if geology.has_porous_layers() {
            PhysicsInterface::PorousMediaHeatTransfer
        } else {
            PhysicsInterface::HeatTransfer
        };

        let domains = geology
            .layers()
            .iter()
            .map(|layer| {
                let tag = layer.tag();
                let selection = Selection::Layer(tag.to_owned());
                match layer.medium() {
                    Medium::Solid { .. } => DomainModel::Solid {
                        label: format!("{} Solid", layer.name()),
                        selection,
                        conductivity: format!("k_eff_{tag}"),
                        density: format!("rho_eff_{tag}"),
                        heat_capacity: format!("Cp_eff_{tag}"),
                    },
                    Medium::Porous { .. } => DomainModel::Porous {
                        label: layer.name().to_owned(),
                        selection,
                        porosity: format!("eps_{tag}"),
                        fluid_conductivity: format!("k_fluid_{tag}"),
                        fluid_density: format!("rho_fluid_{tag}"),
                        fluid_heat_capacity: format!("Cp_fluid_{tag}"),
                        solid_conductivity: format!("k_solid_{tag}"),
                        solid_density: format!("rho_solid_{tag}"),
                        solid_heat_capacity: format!("Cp_solid_{tag}"),
                        velocity: layer
                            .has_groundwater_flow()
                            .then(|| [format!("v_{tag}"), "0".to_owned(), "0".to_owned()]),
                    },
                }
            })
            .collect();

        let mut boundaries = vec![
            BoundaryCondition::Temperature {
                label: "Ground Surface Temperature".to_owned(),
                selection: Selection::GroundSurface,
                expression: "T_surface".to_owned(),
            },
            BoundaryCondition::HeatFlux {
                label: "Geothermal Heat Flux".to_owned(),
                selection: Selection::GeothermalBoundary,
                expression: "q_geothermal".to_owned(),
            },
            BoundaryCondition::HeatFlux {
                label: "Borehole Wall Heat Flux".to_owned(),
                selection: Selection::BoreholeWall,
                expression: "-Q_extraction/A_wall".to_owned(),
            },
        ];
        if geology.has_groundwater_flow() {
            boundaries.push(BoundaryCondition::Periodic {
                selection: Selection::LateralBoundaries,
            });
        }

        Self {
            interface,
            initial_temperature: "T_initial(z)".to_owned(),
            domains,
            boundaries,
        }
    }
}
