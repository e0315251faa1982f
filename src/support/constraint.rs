//! Numeric invariants checked when domain values are constructed.
//!
//! Geological and borehole inputs carry physical invariants: a conductivity
//! cannot be zero, the top of a layer cannot lie above ground, a porosity
//! must stay below one. Constructors run the matching [`Constraint`] and wrap
//! the [`ConstraintError`] into their own error together with the offending
//! value, so a value that made it past construction is never checked again.
//!
//! - [`NonNegative`]: Darcy velocity.
//! - [`NonPositive`]: Elevation of a layer top.
//! - [`StrictlyPositive`]: Material properties, borehole lengths, years.
//! - [`UnitIntervalUpperOpen`]: Porosity, `0 ≤ x < 1`.

mod sign;
mod unit_interval;

use thiserror::Error;

pub use sign::{NonNegative, NonPositive, StrictlyPositive};
pub use unit_interval::{UnitBounds, UnitIntervalUpperOpen};

/// A numeric invariant, named by a marker type.
///
/// ```
/// use borehole_potential::support::constraint::{Constraint, ConstraintError, StrictlyPositive};
/// use uom::si::{f64::Length, length::meter};
///
/// assert!(StrictlyPositive::check(&Length::new::<meter>(200.0)).is_ok());
/// assert_eq!(
///     StrictlyPositive::check(&Length::new::<meter>(0.0)),
///     Err(ConstraintError::Zero)
/// );
/// ```
pub trait Constraint<T> {
    /// Checks that `value` satisfies the invariant.
    ///
    /// # Errors
    ///
    /// Returns the [`ConstraintError`] describing the violation.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// How a value violates a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be positive")]
    Positive,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}
