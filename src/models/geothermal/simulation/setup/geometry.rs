use uom::si::length::meter;

use crate::support::{borehole::Parameters, geology::Geology};

/// Minimum number of swept elements along a layer the borehole crosses.
const MIN_SWEPT_ELEMENTS: u32 = 20;

/// Target swept element height, in meters.
const SWEPT_ELEMENT_HEIGHT: f64 = 5.0;

/// Elements along the borehole collar circle.
const COLLAR_EDGE_ELEMENTS: u32 = 10;

/// An axis-aligned box, positioned by its lower corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub label: String,
    pub position: [String; 3],
    pub size: [String; 3],
}

/// The borehole, removed from the blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cylinder {
    pub label: String,
    pub position: [String; 3],
    pub radius: String,
    pub height: String,
}

/// The ground domain around one borehole of the field.
///
/// The domain is a square cell of side `borehole_spacing` centered on the
/// borehole. Without groundwater flow only the half with `x ≤ 0` is modeled;
/// with flow along `x` the full width is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// One block per layer, with the layer crossed by the borehole tip split
    /// at the tip.
    pub blocks: Vec<Block>,
    pub borehole: Cylinder,
    pub full_width: bool,
}

impl Geometry {
    #[must_use]
    pub fn new(params: &Parameters, geology: &Geology) -> Self {
        let full_width = geology.has_groundwater_flow();
        let width = if full_width {
            "borehole_spacing"
        } else {
            "0.5*borehole_spacing"
        };

        let blocks = geology
            .split(-params.borehole_length())
            .layers()
            .iter()
            .map(|layer| Block {
                label: layer.name().to_owned(),
                position: [
                    "-0.5*borehole_spacing".to_owned(),
                    "-0.5*borehole_spacing".to_owned(),
                    layer.z_to().get::<meter>().to_string(),
                ],
                size: [
                    width.to_owned(),
                    "0.5*borehole_spacing".to_owned(),
                    layer.thickness().get::<meter>().to_string(),
                ],
            })
            .collect();

        Self {
            blocks,
            borehole: Cylinder {
                label: "Borehole Cylinder".to_owned(),
                position: ["0".to_owned(), "0".to_owned(), "-L_borehole".to_owned()],
                radius: "0.5*D_borehole".to_owned(),
                height: "L_borehole".to_owned(),
            },
            full_width,
        }
    }
}

/// Element count of a swept layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweptDistribution {
    /// Tag of the layer the distribution applies to.
    pub layer: String,

    /// Elements across the layer, graded toward both faces.
    pub elements: u32,
}

/// Meshing instructions.
///
/// Layers above the borehole tip are meshed by sweeping a triangulated
/// ground surface downward; everything below is meshed with free tetrahedra.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mesh {
    pub collar_edge_elements: u32,
    pub swept: Vec<SweptDistribution>,
}

impl Mesh {
    #[must_use]
    pub fn new(params: &Parameters, geology: &Geology) -> Self {
        let tip = -params.borehole_length();

        let swept = geology
            .layers()
            .iter()
            .take_while(|layer| layer.z_from() > tip)
            .map(|layer| {
                let by_height = (layer.thickness().get::<meter>() / SWEPT_ELEMENT_HEIGHT).ceil();
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let elements = (by_height as u32).max(MIN_SWEPT_ELEMENTS);
                SweptDistribution {
                    layer: layer.tag().to_owned(),
                    elements,
                }
            })
            .collect();

        Self {
            collar_edge_elements: COLLAR_EDGE_ELEMENTS,
            swept,
        }
    }
}
