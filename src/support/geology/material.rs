use std::{collections::BTreeMap, fmt, sync::Arc};

use uom::si::{
    f64::{MassDensity, Ratio, SpecificHeatCapacity, ThermalConductivity, VolumetricHeatCapacity},
    mass_density::kilogram_per_cubic_meter,
    ratio::{percent, ratio},
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::constraint::{Constraint, StrictlyPositive, UnitIntervalUpperOpen};

use super::{GeologyError, rounded};

/// Thermal conductivity, specific heat capacity and density of a single phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalProperties {
    pub conductivity: ThermalConductivity,
    pub specific_heat: SpecificHeatCapacity,
    pub density: MassDensity,
}

impl ThermalProperties {
    /// Creates validated thermal properties.
    ///
    /// # Errors
    ///
    /// Returns [`GeologyError::Property`] if any property is not strictly positive.
    pub fn new(
        conductivity: ThermalConductivity,
        specific_heat: SpecificHeatCapacity,
        density: MassDensity,
    ) -> Result<Self, GeologyError> {
        StrictlyPositive::check(&conductivity).map_err(|source| GeologyError::Property {
            property: "thermal conductivity",
            source,
        })?;
        StrictlyPositive::check(&specific_heat).map_err(|source| GeologyError::Property {
            property: "specific heat capacity",
            source,
        })?;
        StrictlyPositive::check(&density).map_err(|source| GeologyError::Property {
            property: "density",
            source,
        })?;
        Ok(Self {
            conductivity,
            specific_heat,
            density,
        })
    }

    /// Creates validated properties from SI values (W/(m·K), J/(kg·K), kg/m³).
    ///
    /// # Errors
    ///
    /// Returns [`GeologyError::Property`] if any value is not strictly positive.
    pub fn from_si(k: f64, cp: f64, rho: f64) -> Result<Self, GeologyError> {
        Self::new(
            ThermalConductivity::new::<watt_per_meter_kelvin>(k),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cp),
            MassDensity::new::<kilogram_per_cubic_meter>(rho),
        )
    }

    /// Liquid water filling the pores of saturated rock.
    #[must_use]
    pub fn water() -> Self {
        Self {
            conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(0.6),
            specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(4186.0),
            density: MassDensity::new::<kilogram_per_cubic_meter>(1000.0),
        }
    }

    /// Returns `ρ·cp`.
    #[must_use]
    pub fn volumetric_heat_capacity(&self) -> VolumetricHeatCapacity {
        self.density * self.specific_heat
    }
}

/// A saturated porous medium: a solid matrix with fluid-filled voids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PorousProperties {
    matrix: ThermalProperties,
    fluid: ThermalProperties,
    porosity: Ratio,
}

impl PorousProperties {
    /// Returns the properties of the solid matrix.
    #[must_use]
    pub fn matrix(&self) -> &ThermalProperties {
        &self.matrix
    }

    /// Returns the properties of the pore fluid.
    #[must_use]
    pub fn fluid(&self) -> &ThermalProperties {
        &self.fluid
    }

    /// Returns the void fraction, in `[0, 1)`.
    #[must_use]
    pub fn porosity(&self) -> Ratio {
        self.porosity
    }

    /// Returns the volume-weighted mixture of matrix and fluid.
    ///
    /// Conductivity, density and volumetric heat capacity mix linearly with
    /// porosity; the effective specific heat is `C_eff / ρ_eff`.
    #[must_use]
    pub fn effective(&self) -> ThermalProperties {
        let phi = self.porosity.get::<ratio>();
        let solid = 1.0 - phi;

        let conductivity = self.matrix.conductivity * solid + self.fluid.conductivity * phi;
        let density = self.matrix.density * solid + self.fluid.density * phi;
        let heat_capacity = self.matrix.volumetric_heat_capacity() * solid
            + self.fluid.volumetric_heat_capacity() * phi;

        ThermalProperties {
            conductivity,
            specific_heat: heat_capacity / density,
            density,
        }
    }
}

/// How a material stores and conducts heat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialKind {
    Solid(ThermalProperties),
    Porous(PorousProperties),
}

/// A named subsurface material.
///
/// Materials are immutable once built. Layers share them through [`Arc`],
/// typically handed out by a [`MaterialLibrary`].
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    name: String,
    tag: String,
    kind: MaterialKind,
}

impl Material {
    /// Creates an impermeable material.
    pub fn solid(name: impl Into<String>, properties: ThermalProperties) -> Self {
        let name = name.into();
        Self {
            tag: tag(&name),
            name,
            kind: MaterialKind::Solid(properties),
        }
    }

    /// Creates a water-saturated porous material.
    ///
    /// # Errors
    ///
    /// Returns [`GeologyError::Porosity`] unless `0 ≤ porosity < 1`.
    pub fn porous(
        name: impl Into<String>,
        matrix: ThermalProperties,
        porosity: Ratio,
    ) -> Result<Self, GeologyError> {
        Self::porous_with_fluid(name, matrix, ThermalProperties::water(), porosity)
    }

    /// Creates a porous material saturated with the given fluid.
    ///
    /// # Errors
    ///
    /// Returns [`GeologyError::Porosity`] unless `0 ≤ porosity < 1`.
    pub fn porous_with_fluid(
        name: impl Into<String>,
        matrix: ThermalProperties,
        fluid: ThermalProperties,
        porosity: Ratio,
    ) -> Result<Self, GeologyError> {
        let name = name.into();
        if let Err(source) = UnitIntervalUpperOpen::check(&porosity) {
            return Err(GeologyError::Porosity {
                material: name,
                porosity,
                source,
            });
        }
        Ok(Self {
            tag: tag(&name),
            name,
            kind: MaterialKind::Porous(PorousProperties {
                matrix,
                fluid,
                porosity,
            }),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the lowercase, underscore-separated identifier of this material.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn kind(&self) -> &MaterialKind {
        &self.kind
    }

    /// Returns the properties a heat conduction model should use.
    ///
    /// For porous materials these are the effective mixture properties.
    #[must_use]
    pub fn effective(&self) -> ThermalProperties {
        match &self.kind {
            MaterialKind::Solid(properties) => *properties,
            MaterialKind::Porous(porous) => porous.effective(),
        }
    }

    /// Returns the void fraction, zero for solid materials.
    #[must_use]
    pub fn porosity(&self) -> Ratio {
        match &self.kind {
            MaterialKind::Solid(_) => Ratio::new::<ratio>(0.0),
            MaterialKind::Porous(porous) => porous.porosity,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let effective = self.effective();
        write!(
            f,
            "{} ({}): k={} W/(m·K), Cp={} J/(kg·K), rho={} kg/m³",
            self.name,
            self.tag,
            rounded(effective.conductivity.get::<watt_per_meter_kelvin>()),
            rounded(effective.specific_heat.get::<joule_per_kilogram_kelvin>()),
            rounded(effective.density.get::<kilogram_per_cubic_meter>()),
        )?;
        if let MaterialKind::Porous(porous) = &self.kind {
            write!(f, ", porosity={} %", rounded(porous.porosity.get::<percent>()))?;
        }
        Ok(())
    }
}

/// Owns materials by tag and hands out shared handles to them.
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    materials: BTreeMap<String, Arc<Material>>,
}

impl MaterialLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a material and returns a shared handle to it.
    ///
    /// # Errors
    ///
    /// Returns [`GeologyError::DuplicateMaterial`] if the tag is already taken.
    pub fn insert(&mut self, material: Material) -> Result<Arc<Material>, GeologyError> {
        if self.materials.contains_key(material.tag()) {
            return Err(GeologyError::DuplicateMaterial {
                tag: material.tag,
            });
        }
        let handle = Arc::new(material);
        self.materials
            .insert(handle.tag().to_owned(), Arc::clone(&handle));
        Ok(handle)
    }

    /// Looks up a material by tag.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<Arc<Material>> {
        self.materials.get(tag).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// Normalizes a display name into an identifier.
pub(crate) fn tag(name: &str) -> String {
    name.replace(' ', "_").to_lowercase()
}
