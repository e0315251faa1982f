use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, P1, P3, Z0},
};

/// Thermal resistance per unit length, K·m/W in SI.
///
/// The borehole thermal resistance between the fluid and the borehole wall
/// is quoted in these units.
pub type LinearThermalResistance = Quantity<ISQ<N1, N1, P3, Z0, P1, Z0, Z0>, SI<f64>, f64>;
