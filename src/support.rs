//! Supporting utilities used by models.
//!
//! - [`geology`]: Materials, layers and stratified geologies.
//! - [`borehole`]: Borehole field parameters and monthly load profiles.
//! - [`constraint`]: Type-level numeric constraints.
//! - [`units`]: Extensions to [`uom`].

pub mod borehole;
pub mod constraint;
pub mod geology;
pub mod units;
