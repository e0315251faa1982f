use uom::si::{
    f64::{Length, ThermodynamicTemperature},
    heat_flux_density::watt_per_square_meter,
    length::meter,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::geology::Geology;

use super::{Extrapolation, Piece, Piecewise};

/// Undisturbed ground temperature before extraction starts.
///
/// Within layer `i` the temperature rises linearly with depth,
/// `T(z) = T_top,i − (q/k_i)·(z − z_from,i)`, and each layer starts at the
/// temperature the layer above ends with, so the profile is continuous.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialTemperature {
    segments: Vec<Segment>,
    tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    z_from: f64,
    z_to: f64,
    top: f64,
    gradient: f64,
}

impl Segment {
    fn at(&self, z: f64) -> f64 {
        self.top - self.gradient * (z - self.z_from)
    }
}

impl InitialTemperature {
    #[must_use]
    pub fn new(geology: &Geology) -> Self {
        let q = geology.geothermal_heat_flux().get::<watt_per_square_meter>();
        let mut top = geology.surface_temperature().get::<degree_celsius>();

        let segments = geology
            .layers()
            .iter()
            .map(|layer| {
                let k = layer
                    .material()
                    .effective()
                    .conductivity
                    .get::<watt_per_meter_kelvin>();
                let segment = Segment {
                    z_from: layer.z_from().get::<meter>(),
                    z_to: layer.z_to().get::<meter>(),
                    top,
                    gradient: q / k,
                };
                top = segment.at(segment.z_to);
                segment
            })
            .collect();

        Self {
            segments,
            tags: geology.layers().iter().map(|l| l.tag().to_owned()).collect(),
        }
    }

    /// Temperature at elevation `z`, continuing the outermost layers beyond
    /// the geology. Returns `None` for a geology without layers.
    #[must_use]
    pub fn at(&self, z: Length) -> Option<ThermodynamicTemperature> {
        let z = z.get::<meter>();
        let segment = self
            .segments
            .iter()
            .find(|segment| z >= segment.z_to)
            .or_else(|| self.segments.last())?;
        Some(ThermodynamicTemperature::new::<degree_celsius>(
            segment.at(z),
        ))
    }

    /// Renders the profile as the `T_initial(z)` function, in terms of the
    /// layer parameters `h_<tag>` and `k_eff_<tag>`.
    #[must_use]
    pub fn to_piecewise(&self) -> Piecewise {
        let mut pieces = Vec::with_capacity(self.tags.len());
        let mut start = String::from("0");
        let mut end = String::from("0");
        let mut offset = String::from("T_surface");
        let mut depth = String::new();

        for (i, tag) in self.tags.iter().enumerate() {
            start.push_str(&format!("-h_{tag}"));

            let expression = if i == 0 {
                format!("{offset}-q_geothermal/k_eff_{tag}*z")
            } else {
                let above = &self.tags[i - 1];
                if depth.is_empty() {
                    depth = format!("h_{above}");
                } else {
                    depth.push_str(&format!("+h_{above}"));
                }
                offset.push_str(&format!("+q_geothermal/k_eff_{above}*h_{above}"));
                end.push_str(&format!("-h_{above}"));
                format!("{offset}-q_geothermal/k_eff_{tag}*(z+{depth})")
            };

            pieces.push(Piece {
                start: start.clone(),
                end: end.clone(),
                expression,
            });
        }

        Piecewise {
            name: "T_initial".to_owned(),
            argument: "z".to_owned(),
            argument_unit: "m".to_owned(),
            function_unit: "K".to_owned(),
            extrapolation: Extrapolation::Interior,
            pieces,
        }
    }
}
