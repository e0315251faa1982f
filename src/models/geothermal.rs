//! Geothermal potential of borehole heat exchanger fields.
//!
//! - [`extraction_limit`]: Estimates the annual energy at which the borehole
//!   reaches its minimum allowed temperature, from a few trial evaluations.
//! - [`simulation`]: Declarative finite-element model setup and the
//!   evaluation primitive built on an external solver.
//! - [`design_tool`]: Input/output adapter for an external borehole-design
//!   tool and a bracketed search on its results.
//! - [`batch`]: Resumable sweeps over geologies and borehole configurations
//!   with results persisted to a CSV file.

pub mod batch;
pub mod design_tool;
pub mod extraction_limit;
pub mod simulation;

#[cfg(test)]
mod test_support;
