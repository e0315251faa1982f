use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constraint, ConstraintError};

/// Zero or greater.
///
/// Groundwater flows in the direction fixed by the model, so a Darcy
/// velocity is a speed and never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonNegative;

/// Zero or less.
///
/// Elevations are measured upward from the ground surface, so every point
/// of the subsurface satisfies this constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonPositive;

/// Greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictlyPositive;

/// Orders `value` against zero; NaN has no order.
fn sign<T: PartialOrd + Zero>(value: &T) -> Result<Ordering, ConstraintError> {
    value
        .partial_cmp(&T::zero())
        .ok_or(ConstraintError::NotANumber)
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match sign(value)? {
            Ordering::Less => Err(ConstraintError::Negative),
            Ordering::Equal | Ordering::Greater => Ok(()),
        }
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match sign(value)? {
            Ordering::Greater => Err(ConstraintError::Positive),
            Ordering::Equal | Ordering::Less => Ok(()),
        }
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match sign(value)? {
            Ordering::Greater => Ok(()),
            Ordering::Equal => Err(ConstraintError::Zero),
            Ordering::Less => Err(ConstraintError::Negative),
        }
    }
}
