use std::{cmp::Ordering, fmt, sync::Arc};

use uom::{
    ConstZero,
    si::{
        f64::{Length, Velocity},
        length::meter,
        velocity::meter_per_second,
    },
};

use crate::support::constraint::{Constraint, NonNegative, NonPositive};

use super::{
    GeologyError, rounded,
    material::{Material, MaterialKind, PorousProperties, ThermalProperties, tag},
};

/// A horizontal slab of one material between two elevations.
///
/// Elevations are measured upward from the ground surface, so `z_to < z_from ≤ 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    name: String,
    tag: String,
    z_from: Length,
    z_to: Length,
    material: Arc<Material>,
    velocity: Velocity,
}

/// The medium of a layer, as seen by a heat transport model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Medium<'a> {
    /// Conduction only.
    Solid { properties: &'a ThermalProperties },

    /// Conduction through a saturated matrix, with optional Darcy flow.
    Porous {
        properties: &'a PorousProperties,
        velocity: Velocity,
    },
}

impl Layer {
    /// Creates a layer without groundwater flow.
    ///
    /// # Errors
    ///
    /// - [`GeologyError::AboveGround`] if `z_from > 0`.
    /// - [`GeologyError::Inverted`] if `z_to > z_from`.
    /// - [`GeologyError::ZeroThickness`] if `z_to == z_from`.
    pub fn new(
        name: impl Into<String>,
        material: Arc<Material>,
        z_from: Length,
        z_to: Length,
    ) -> Result<Self, GeologyError> {
        let name = name.into();

        if let Err(source) = NonPositive::check(&z_from) {
            return Err(GeologyError::AboveGround {
                layer: name,
                z_from,
                source,
            });
        }

        match z_to.partial_cmp(&z_from) {
            Some(Ordering::Less) => {}
            Some(Ordering::Equal) => {
                return Err(GeologyError::ZeroThickness {
                    layer: name,
                    z: z_from,
                });
            }
            Some(Ordering::Greater) | None => {
                return Err(GeologyError::Inverted {
                    layer: name,
                    z_from,
                    z_to,
                });
            }
        }

        Ok(Self {
            tag: tag(&name),
            name,
            z_from,
            z_to,
            material,
            velocity: Velocity::ZERO,
        })
    }

    /// Returns this layer with the given Darcy velocity.
    ///
    /// # Errors
    ///
    /// - [`GeologyError::Velocity`] if the velocity is negative or NaN.
    /// - [`GeologyError::FlowWithoutPorosity`] if the velocity is positive
    ///   and the material has no pore space.
    pub fn with_velocity(mut self, velocity: Velocity) -> Result<Self, GeologyError> {
        if let Err(source) = NonNegative::check(&velocity) {
            return Err(GeologyError::Velocity {
                layer: self.name,
                velocity,
                source,
            });
        }

        let porous = match self.material.kind() {
            MaterialKind::Porous(properties) => properties.porosity().value > 0.0,
            MaterialKind::Solid(_) => false,
        };
        if velocity > Velocity::ZERO && !porous {
            return Err(GeologyError::FlowWithoutPorosity {
                layer: self.name,
                material: self.material.name().to_owned(),
            });
        }

        self.velocity = velocity;
        Ok(self)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Elevation of the top of the layer.
    #[must_use]
    pub fn z_from(&self) -> Length {
        self.z_from
    }

    /// Elevation of the bottom of the layer.
    #[must_use]
    pub fn z_to(&self) -> Length {
        self.z_to
    }

    #[must_use]
    pub fn thickness(&self) -> Length {
        self.z_from - self.z_to
    }

    #[must_use]
    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    /// Darcy velocity of the groundwater, zero when stagnant.
    #[must_use]
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    #[must_use]
    pub fn has_groundwater_flow(&self) -> bool {
        self.velocity > Velocity::ZERO
    }

    #[must_use]
    pub fn medium(&self) -> Medium<'_> {
        match self.material.kind() {
            MaterialKind::Solid(properties) => Medium::Solid { properties },
            MaterialKind::Porous(properties) => Medium::Porous {
                properties,
                velocity: self.velocity,
            },
        }
    }

    /// Splits the layer at elevation `z`.
    ///
    /// Returns the upper and lower parts when `z` lies strictly inside the
    /// layer, otherwise a copy of this layer. Both parts keep the material
    /// and velocity.
    #[must_use]
    pub fn split(&self, z: Length) -> Vec<Layer> {
        if !(self.z_to < z && z < self.z_from) {
            return vec![self.clone()];
        }

        let part = |prefix: &str, z_from: Length, z_to: Length| {
            let name = format!("{prefix} Part of {}", self.name);
            Layer {
                tag: tag(&name),
                name,
                z_from,
                z_to,
                material: Arc::clone(&self.material),
                velocity: self.velocity,
            }
        };

        vec![
            part("Upper", self.z_from, z),
            part("Lower", z, self.z_to),
        ]
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} from {} m to {} m ({} m thick)",
            self.name,
            self.tag,
            self.material.name(),
            rounded(self.z_from.get::<meter>()),
            rounded(self.z_to.get::<meter>()),
            rounded(self.thickness().get::<meter>()),
        )?;
        if self.has_groundwater_flow() {
            write!(f, ", v={} m/s", rounded(self.velocity.get::<meter_per_second>()))?;
        }
        Ok(())
    }
}
