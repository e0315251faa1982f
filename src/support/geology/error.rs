use thiserror::Error;
use uom::si::f64::{Length, Ratio, Velocity};

use crate::support::constraint::ConstraintError;

/// Errors raised while building materials, layers and geologies.
///
/// A failed operation never leaves a partially modified value behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeologyError {
    /// A thermal property is zero, negative or not a number.
    #[error("invalid {property}")]
    Property {
        property: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// Porosity is outside `[0, 1)`.
    #[error("invalid porosity for material `{material}`: {porosity:?}")]
    Porosity {
        material: String,
        porosity: Ratio,
        #[source]
        source: ConstraintError,
    },

    /// Two materials share the same tag.
    #[error("material `{tag}` is already registered")]
    DuplicateMaterial { tag: String },

    /// The top of a layer lies above the ground surface.
    #[error("layer `{layer}` must lie completely below the ground surface: z_from={z_from:?}")]
    AboveGround {
        layer: String,
        z_from: Length,
        #[source]
        source: ConstraintError,
    },

    /// The bottom of a layer lies above its top.
    #[error("layer `{layer}` must have its top above its bottom: z_from={z_from:?}, z_to={z_to:?}")]
    Inverted {
        layer: String,
        z_from: Length,
        z_to: Length,
    },

    /// The top and bottom of a layer coincide.
    #[error("layer `{layer}` must have a positive thickness")]
    ZeroThickness { layer: String, z: Length },

    /// Groundwater velocity is negative or not a number.
    #[error("invalid groundwater velocity for layer `{layer}`: {velocity:?}")]
    Velocity {
        layer: String,
        velocity: Velocity,
        #[source]
        source: ConstraintError,
    },

    /// Groundwater flow was requested through a material without pores.
    #[error("layer `{layer}` cannot carry groundwater flow: `{material}` has zero porosity")]
    FlowWithoutPorosity { layer: String, material: String },

    /// The first layer of a geology does not start at the ground surface.
    #[error("first layer `{layer}` must begin at the ground level: z_from={z_from:?}")]
    NotAtSurface { layer: String, z_from: Length },

    /// A layer does not start where the geology currently ends.
    #[error(
        "layer `{layer}` can only be added to the bottom of the geology: expected z_from={expected:?}, found {found:?}"
    )]
    Discontinuous {
        layer: String,
        expected: Length,
        found: Length,
    },
}
