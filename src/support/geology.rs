//! Stratified subsurface models.
//!
//! A [`Geology`] is an ordered, gap-free stack of [`Layer`]s starting at the
//! ground surface, together with the surface temperature and the geothermal
//! heat flux that set its undisturbed temperature profile. Each layer refers
//! to a shared [`Material`], which is either solid or porous.
//!
//! Elevations follow one convention throughout: `z = 0` at the ground
//! surface and negative below it.
//!
//! ```
//! use std::sync::Arc;
//!
//! use borehole_potential::support::geology::{Geology, Layer, Material, ThermalProperties};
//! use uom::si::{
//!     f64::{HeatFluxDensity, Length, ThermodynamicTemperature},
//!     heat_flux_density::watt_per_square_meter,
//!     length::meter,
//!     thermodynamic_temperature::degree_celsius,
//! };
//!
//! let granite = Arc::new(Material::solid(
//!     "Granite",
//!     ThermalProperties::from_si(3.0, 730.0, 2700.0).unwrap(),
//! ));
//!
//! let mut geology = Geology::new(
//!     "Bedrock",
//!     ThermodynamicTemperature::new::<degree_celsius>(8.0),
//!     HeatFluxDensity::new::<watt_per_square_meter>(0.06),
//! );
//! geology
//!     .add_layer(Layer::new("Granitic Layer", granite, Length::new::<meter>(0.0), Length::new::<meter>(-300.0)).unwrap())
//!     .unwrap();
//!
//! assert_eq!(geology.thickness().get::<meter>(), 300.0);
//! assert_eq!(geology.split(Length::new::<meter>(-100.0)).layers().len(), 2);
//! ```

pub mod catalog;
mod error;
mod layer;
mod material;

use std::fmt;

use uom::{
    ConstZero,
    si::{
        f64::{
            HeatFluxDensity, Length, ThermalConductivity, ThermodynamicTemperature, Velocity,
            VolumetricHeatCapacity,
        },
        heat_flux_density::watt_per_square_meter,
        length::meter,
        thermodynamic_temperature::degree_celsius,
    },
};

pub use error::GeologyError;
pub use layer::{Layer, Medium};
pub use material::{Material, MaterialKind, MaterialLibrary, PorousProperties, ThermalProperties};

/// A named stack of contiguous layers below the ground surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Geology {
    name: String,
    tag: String,
    surface_temperature: ThermodynamicTemperature,
    geothermal_heat_flux: HeatFluxDensity,
    layers: Vec<Layer>,
}

/// Thickness-weighted bulk properties over a depth range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageProperties {
    pub conductivity: ThermalConductivity,
    pub volumetric_heat_capacity: VolumetricHeatCapacity,
}

impl Geology {
    /// Creates a geology with no layers.
    pub fn new(
        name: impl Into<String>,
        surface_temperature: ThermodynamicTemperature,
        geothermal_heat_flux: HeatFluxDensity,
    ) -> Self {
        let name = name.into();
        Self {
            tag: material::tag(&name),
            name,
            surface_temperature,
            geothermal_heat_flux,
            layers: Vec::new(),
        }
    }

    /// Creates a geology and adds the given layers in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`GeologyError`] raised by [`Geology::add_layer`].
    pub fn with_layers(
        name: impl Into<String>,
        surface_temperature: ThermodynamicTemperature,
        geothermal_heat_flux: HeatFluxDensity,
        layers: impl IntoIterator<Item = Layer>,
    ) -> Result<Self, GeologyError> {
        let mut geology = Self::new(name, surface_temperature, geothermal_heat_flux);
        geology.add_layers(layers)?;
        Ok(geology)
    }

    /// Appends a layer to the bottom of the geology.
    ///
    /// The first layer must start at the ground level and every following
    /// layer must start exactly where the previous one ends. On error the
    /// geology is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`GeologyError::NotAtSurface`] if the first layer does not start at zero.
    /// - [`GeologyError::Discontinuous`] if the layer leaves a gap or overlaps.
    pub fn add_layer(&mut self, layer: Layer) -> Result<(), GeologyError> {
        match self.layers.last() {
            None if layer.z_from() != Length::ZERO => {
                return Err(GeologyError::NotAtSurface {
                    layer: layer.name().to_owned(),
                    z_from: layer.z_from(),
                });
            }
            Some(bottom) if layer.z_from() != bottom.z_to() => {
                return Err(GeologyError::Discontinuous {
                    layer: layer.name().to_owned(),
                    expected: bottom.z_to(),
                    found: layer.z_from(),
                });
            }
            _ => {}
        }
        self.layers.push(layer);
        Ok(())
    }

    /// Appends layers in order, stopping at the first failure.
    ///
    /// Layers added before the failing one stay in place.
    ///
    /// # Errors
    ///
    /// Returns the [`GeologyError`] of the first layer that could not be added.
    pub fn add_layers(&mut self, layers: impl IntoIterator<Item = Layer>) -> Result<(), GeologyError> {
        layers.into_iter().try_for_each(|layer| self.add_layer(layer))
    }

    /// Returns a new geology with a layer interface at elevation `z`.
    ///
    /// The layer containing `z` strictly inside is replaced by its upper and
    /// lower parts. The total thickness is unchanged.
    #[must_use]
    pub fn split(&self, z: Length) -> Self {
        Self {
            layers: self.layers.iter().flat_map(|layer| layer.split(z)).collect(),
            ..self.clone()
        }
    }

    /// Returns a new geology where every layer carries the same Darcy velocity.
    ///
    /// # Errors
    ///
    /// Returns a [`GeologyError`] if any layer cannot carry that velocity.
    pub fn with_uniform_velocity(&self, velocity: Velocity) -> Result<Self, GeologyError> {
        let layers = self
            .layers
            .iter()
            .map(|layer| layer.clone().with_velocity(velocity))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            layers,
            ..self.clone()
        })
    }

    /// Returns thickness-weighted conductivity and volumetric heat capacity
    /// of the layers between the surface and the given depth.
    ///
    /// Returns `None` if no layer overlaps that range.
    #[must_use]
    pub fn average_properties(&self, depth: Length) -> Option<AverageProperties> {
        let bottom = -depth;
        let mut total = Length::ZERO;
        let mut conductivity = ThermalConductivity::ZERO;
        let mut heat_capacity = VolumetricHeatCapacity::ZERO;

        for layer in &self.layers {
            let top = layer.z_from();
            let base = if layer.z_to() > bottom {
                layer.z_to()
            } else {
                bottom
            };
            if top <= base {
                continue;
            }
            let h = (top - base).get::<meter>();
            let properties = layer.material().effective();
            conductivity += properties.conductivity * h;
            heat_capacity += properties.volumetric_heat_capacity() * h;
            total += top - base;
        }

        if total <= Length::ZERO {
            return None;
        }
        let total = total.get::<meter>();
        Some(AverageProperties {
            conductivity: conductivity / total,
            volumetric_heat_capacity: heat_capacity / total,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn surface_temperature(&self) -> ThermodynamicTemperature {
        self.surface_temperature
    }

    /// Heat flux entering the geology from below.
    #[must_use]
    pub fn geothermal_heat_flux(&self) -> HeatFluxDensity {
        self.geothermal_heat_flux
    }

    /// Returns the layers from the surface downward.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Depth of the bottom of the deepest layer, zero when empty.
    #[must_use]
    pub fn thickness(&self) -> Length {
        self.layers
            .last()
            .map_or(Length::ZERO, |bottom| -bottom.z_to())
    }

    #[must_use]
    pub fn has_porous_layers(&self) -> bool {
        self.layers
            .iter()
            .any(|layer| matches!(layer.medium(), Medium::Porous { .. }))
    }

    #[must_use]
    pub fn has_groundwater_flow(&self) -> bool {
        self.layers.iter().any(Layer::has_groundwater_flow)
    }
}

impl fmt::Display for Geology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: T_surface={} °C, q_geothermal={} W/m², thickness={} m, layers=[",
            self.name,
            rounded(self.surface_temperature.get::<degree_celsius>()),
            rounded(self.geothermal_heat_flux.get::<watt_per_square_meter>()),
            rounded(self.thickness().get::<meter>()),
        )?;
        for (i, layer) in self.layers.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(
                f,
                "{} ({} m)",
                layer.name(),
                rounded(layer.thickness().get::<meter>())
            )?;
        }
        f.write_str("]")
    }
}

/// Rounds to six significant digits for display.
pub(crate) fn rounded(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let digits = 6 - value.abs().log10().ceil() as i32;
    let scale = 10_f64.powi(digits);
    (value * scale).round() / scale
}
