use std::cmp::Ordering;

use uom::si::{f64::Ratio, ratio::ratio};

use super::{Constraint, ConstraintError};

/// Supplies the bounds 0 and 1 of a dimensionless type.
pub trait UnitBounds: PartialOrd {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
}

impl UnitBounds for Ratio {
    fn zero() -> Self {
        Ratio::new::<ratio>(0.0)
    }
    fn one() -> Self {
        Ratio::new::<ratio>(1.0)
    }
}

/// `0 ≤ x < 1`, the admissible range of porosity.
///
/// A rock may have no pore space, but a medium that is all pore space is no
/// longer a rock.
///
/// ```
/// use borehole_potential::support::constraint::{Constraint, UnitIntervalUpperOpen};
/// use uom::si::{f64::Ratio, ratio::percent};
///
/// assert!(UnitIntervalUpperOpen::check(&Ratio::new::<percent>(30.0)).is_ok());
/// assert!(UnitIntervalUpperOpen::check(&Ratio::new::<percent>(100.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitIntervalUpperOpen;

impl<T: UnitBounds> Constraint<T> for UnitIntervalUpperOpen {
    fn check(value: &T) -> Result<(), ConstraintError> {
        let below = value.partial_cmp(&T::zero());
        let above = value.partial_cmp(&T::one());
        match (below, above) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Equal | Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}
